use log::{info, warn};
use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;
use web_sys::{window, Document};

use crate::config::SiteConfig;
use crate::{anchors, cards, contact, dom, nav, reveal, theme, video, year};

/// Runs `init` now if the document is parsed, otherwise on
/// `DOMContentLoaded`.
pub fn run_when_ready() {
    let Some(document) = window().and_then(|w| w.document()) else {
        warn!("No document, site scripts not started");
        return;
    };
    if is_loading(&document) {
        dom::listen(&document, "DOMContentLoaded", |_| init());
    } else {
        init();
    }
}

fn is_loading(document: &Document) -> bool {
    Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string())
        .map_or(false, |state| state == "loading")
}

pub fn init() {
    let Some(window) = window() else {
        warn!("No window, site scripts not started");
        return;
    };
    let Some(document) = window.document() else {
        warn!("No document, site scripts not started");
        return;
    };
    let config = SiteConfig::load(&document);

    // Cards are tagged before the reveal observer collects its targets.
    theme::mount(&window, &document, &config);
    cards::mount(&document);
    reveal::mount(&document, &config.reveal);
    anchors::mount(&document);
    contact::mount(&document, &config.form);
    year::mount(&document);
    nav::mount(&document);
    video::mount(&document);

    info!("Site scripts initialized");
}
