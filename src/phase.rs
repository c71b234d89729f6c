//! Page lifecycle: loading, running the road, or stopped on a load failure.

use web_sys::Document;

use crate::blog::BlogEntry;
use crate::config::Config;
use crate::error::LoadResult;
use crate::world::{Viewport, World};

pub enum Phase {
    Loading,
    Running { world: World, entries: Vec<BlogEntry> },
    Failed(String),
}

impl Phase {
    pub fn status(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Running { .. } => "running",
            Phase::Failed(_) => "error",
        }
    }
}

/// The world is only built when the metadata arrived and validated.
pub fn phase_after_load(
    result: LoadResult<Vec<BlogEntry>>,
    config: &Config,
    viewport: Viewport,
) -> Phase {
    match result {
        Ok(entries) => Phase::Running {
            world: World::new(config, viewport),
            entries,
        },
        Err(err) => Phase::Failed(err.to_string()),
    }
}

pub fn set_status(document: &Document, status: &str) {
    if let Some(el) = document.document_element() {
        let _ = el.set_attribute("data-render-status", status);
    }
}

/// Mirrors `phase` onto the document element's `data-render-*` attributes.
pub fn show_phase(document: &Document, phase: &Phase) {
    set_status(document, phase.status());
    if let Phase::Failed(message) = phase {
        if let Some(el) = document.document_element() {
            let _ = el.set_attribute("data-render-error", message);
        }
    }
}
