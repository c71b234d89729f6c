//! Sprite images and the blog metadata fetch.

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlImageElement, Response};

use crate::blog::{BlogEntry, parse_blog_entries};
use crate::config::Config;
use crate::error::{LoadError, LoadResult};
use crate::js_value_to_string;
use crate::world::EntityKind;

pub struct Sprites {
    pub car: HtmlImageElement,
    pub road: HtmlImageElement,
    pub buildings: Vec<HtmlImageElement>,
}

impl Sprites {
    /// Starts every sprite load. Loads are not awaited; frames drawn before an
    /// image decodes just skip it.
    pub fn load(config: &Config) -> Result<Self, JsValue> {
        let buildings = config
            .building_sprite_urls()
            .iter()
            .map(|url| load_image(url))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            car: load_image(&config.car_sprite_url)?,
            road: load_image(&config.road_sprite_url)?,
            buildings,
        })
    }

    pub fn for_kind(&self, kind: EntityKind) -> Option<&HtmlImageElement> {
        match kind {
            EntityKind::Car => Some(&self.car),
            EntityKind::Building(index) => self.buildings.get(index),
        }
    }
}

fn load_image(url: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;

    let failed_url = url.to_string();
    let onerror = Closure::wrap(Box::new(move || {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "sprite failed to load: {}",
            failed_url
        )));
    }) as Box<dyn FnMut()>);
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    image.set_src(url);
    Ok(image)
}

/// True once the image has decoded. Broken or pending images must not be
/// passed to `drawImage`.
pub fn is_drawable(image: &HtmlImageElement) -> bool {
    image.complete() && image.natural_width() > 0 && image.natural_height() > 0
}

pub async fn fetch_blog_entries(url: &str, building_count: usize) -> LoadResult<Vec<BlogEntry>> {
    let window = web_sys::window().ok_or_else(|| LoadError::Network {
        url: url.to_string(),
        reason: "missing window".to_string(),
    })?;

    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|err| LoadError::Network {
            url: url.to_string(),
            reason: js_value_to_string(&err),
        })?;
    let resp: Response = resp_value.dyn_into().map_err(|err| LoadError::Network {
        url: url.to_string(),
        reason: js_value_to_string(&err),
    })?;
    if !resp.ok() {
        return Err(LoadError::Http {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    let body_error = |err: JsValue| LoadError::Body {
        url: url.to_string(),
        reason: js_value_to_string(&err),
    };
    let text: Promise = resp.text().map_err(body_error)?;
    let text = JsFuture::from(text)
        .await
        .map_err(body_error)?
        .as_string()
        .ok_or_else(|| LoadError::Body {
            url: url.to_string(),
            reason: "body is not text".to_string(),
        })?;

    Ok(parse_blog_entries(&text, building_count)?)
}
