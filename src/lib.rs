pub mod assets;
pub mod blog;
pub mod config;
pub mod error;
pub mod overlay;
pub mod phase;
pub mod world;

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, HtmlImageElement, Window,
};

use assets::{Sprites, fetch_blog_entries, is_drawable};
use config::Config;
use phase::{Phase, phase_after_load, set_status, show_phase};
use world::{Entity, Viewport};

struct AppState {
    document: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
    phase: Phase,
}

fn window() -> Window {
    web_sys::window().expect("missing window")
}

pub(crate) fn js_value_to_string(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn log_event(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

fn window_viewport(win: &Window) -> Result<Viewport, JsValue> {
    let width = win.inner_width()?.as_f64().unwrap_or(0.0).floor().max(0.0);
    let height = win.inner_height()?.as_f64().unwrap_or(0.0).floor().max(0.0);
    Ok(Viewport::new(width, height))
}

fn resize_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
    let width = viewport.width as u32;
    let height = viewport.height as u32;
    if canvas.width() != width {
        canvas.set_width(width);
    }
    if canvas.height() != height {
        canvas.set_height(height);
    }
}

fn draw_image(
    ctx: &CanvasRenderingContext2d,
    image: &HtmlImageElement,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) {
    if !is_drawable(image) {
        return;
    }
    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height);
}

fn draw_entity(ctx: &CanvasRenderingContext2d, sprites: &Sprites, entity: &Entity) {
    if let Some(image) = sprites.for_kind(entity.kind) {
        draw_image(ctx, image, entity.x, entity.y, entity.width, entity.height);
    }
}

fn render_frame(state: &mut AppState) {
    let AppState {
        document,
        ctx,
        sprites,
        phase,
        ..
    } = state;
    let Phase::Running { world, entries } = phase else {
        return;
    };

    let viewport = world.viewport();
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    draw_image(ctx, &sprites.road, 0.0, 0.0, viewport.width, viewport.height);

    let revealed = world.tick();
    for entity in world.entities() {
        draw_entity(ctx, sprites, entity);
    }

    let Some(index) = revealed else {
        return;
    };
    let Some(entry) = entries.get(index) else {
        web_sys::console::error_1(&JsValue::from_str(&format!(
            "no blog entry for building {}",
            index
        )));
        return;
    };
    log_event(&format!("reveal: building {} -> {}", index, entry.url));
    if let Err(err) = overlay::show_blog_button(document, entry) {
        web_sys::console::error_1(&err);
    }
}

fn start_render_loop(state: Rc<RefCell<AppState>>) -> Result<(), JsValue> {
    let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let frame_cell_cb = Rc::clone(&frame_cell);

    *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        render_frame(&mut state.borrow_mut());

        if let Some(cb) = frame_cell_cb.borrow().as_ref() {
            let _ = window().request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));

    let first = frame_cell.borrow();
    let cb = first
        .as_ref()
        .ok_or_else(|| JsValue::from_str("Missing frame callback"))?;
    window().request_animation_frame(cb.as_ref().unchecked_ref())?;
    Ok(())
}

fn begin_loading(state: Rc<RefCell<AppState>>, config: Config) {
    spawn_local(async move {
        let result = fetch_blog_entries(&config.blog_data_url, config.building_count).await;

        let mut st = state.borrow_mut();
        let viewport = Viewport::new(st.canvas.width() as f64, st.canvas.height() as f64);
        st.phase = phase_after_load(result, &config, viewport);
        match &st.phase {
            Phase::Running { entries, .. } => log_event(&format!(
                "blog metadata ready ({} entries, {} buildings)",
                entries.len(),
                config.building_count
            )),
            Phase::Failed(message) => {
                web_sys::console::error_1(&JsValue::from_str(message));
            }
            Phase::Loading => {}
        }
        show_phase(&st.document, &st.phase);

        if !matches!(st.phase, Phase::Running { .. }) {
            return;
        }
        drop(st);

        if let Err(err) = start_render_loop(Rc::clone(&state)) {
            let mut st = state.borrow_mut();
            st.phase = Phase::Failed(js_value_to_string(&err));
            show_phase(&st.document, &st.phase);
            web_sys::console::error_1(&err);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(err) = start_impl() {
        if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
            set_status(&doc, "error");
        }
        web_sys::console::error_1(&JsValue::from_str(&format!(
            "fatal: {}",
            js_value_to_string(&err)
        )));
    }
}

fn start_impl() -> Result<(), JsValue> {
    let win = window();
    let document = win
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Missing body"))?;

    let mut config = Config::default();
    if let Err(err) = config.apply_query(&win.location().search().unwrap_or_default()) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("ignoring query: {}", err)));
    }

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Canvas 2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    body.append_child(&canvas)?;
    resize_canvas(&canvas, window_viewport(&win)?);

    let sprites = Sprites::load(&config)?;

    let state = Rc::new(RefCell::new(AppState {
        document: document.clone(),
        canvas,
        ctx,
        sprites,
        phase: Phase::Loading,
    }));
    show_phase(&document, &state.borrow().phase);
    log_event(&format!("car_blog start (speed {})", config.speed));

    let state_resize = Rc::clone(&state);
    let resize = Closure::wrap(Box::new(move |_event: Event| {
        let Ok(viewport) = window_viewport(&window()) else {
            return;
        };
        let mut st = state_resize.borrow_mut();
        resize_canvas(&st.canvas, viewport);
        if let Phase::Running { world, .. } = &mut st.phase {
            world.set_viewport(viewport);
        }
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
    resize.forget();

    begin_loading(state, config);

    Ok(())
}
