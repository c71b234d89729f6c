//! The link button shown when the car first reaches a building.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlButtonElement, HtmlDivElement};

use crate::blog::BlogEntry;

pub const OVERLAY_CLASS: &str = "blog-overlay";

/// Injects the link button for `entry` near the top-left of the page.
///
/// Each call appends a new container; callers are expected to reveal once.
pub fn show_blog_button(document: &Document, entry: &BlogEntry) -> Result<HtmlDivElement, JsValue> {
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Missing body"))?;

    let container = document
        .create_element("div")?
        .dyn_into::<HtmlDivElement>()?;
    container.set_class_name(OVERLAY_CLASS);
    let style = container.style();
    style.set_property("position", "absolute")?;
    style.set_property("top", "20px")?;
    style.set_property("left", "20px")?;
    style.set_property("z-index", "1000")?;

    let button = document
        .create_element("button")?
        .dyn_into::<HtmlButtonElement>()?;
    button.set_inner_text(&entry.title);
    button.set_attribute("data-url", &entry.url)?;

    let url = entry.url.clone();
    let on_click = Closure::wrap(Box::new(move |_event: Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.open_with_url_and_target(&url, "_blank") {
            web_sys::console::error_1(&err);
        }
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    container.append_child(&button)?;
    body.append_child(&container)?;

    Ok(container)
}
