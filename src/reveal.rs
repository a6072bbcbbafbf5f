use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::RevealConfig;
use crate::dom::{self, DomNode};
use crate::error::describe;

pub const TARGET_CLASS: &str = "fade-up";
pub const VISIBLE_CLASS: &str = "is-visible";

pub trait ViewportObserver<N> {
    fn observe(&self, target: &N);
    fn unobserve(&self, target: &N);
}

impl ViewportObserver<Element> for IntersectionObserver {
    fn observe(&self, target: &Element) {
        IntersectionObserver::observe(self, target);
    }

    fn unobserve(&self, target: &Element) {
        IntersectionObserver::unobserve(self, target);
    }
}

pub struct Intersection<N> {
    pub target: N,
    pub is_intersecting: bool,
}

/// Marks intersecting targets visible and stops watching them, so an element
/// never hides again after scrolling away. Returns how many were revealed.
pub fn reveal_entries<N, O>(observer: &O, entries: impl IntoIterator<Item = Intersection<N>>) -> usize
where
    N: DomNode,
    O: ViewportObserver<N>,
{
    let mut revealed = 0;
    for entry in entries.into_iter().filter(|e| e.is_intersecting) {
        entry.target.add_class(VISIBLE_CLASS);
        observer.unobserve(&entry.target);
        revealed += 1;
    }
    revealed
}

fn entries(records: &Array) -> Vec<Intersection<Element>> {
    records
        .iter()
        .filter_map(|record| record.dyn_into::<IntersectionObserverEntry>().ok())
        .map(|entry| Intersection {
            is_intersecting: entry.is_intersecting(),
            target: entry.target(),
        })
        .collect()
}

pub fn mount(document: &Document, config: &RevealConfig) {
    let targets = dom::select_all(document, &format!(".{}", TARGET_CLASS));
    if targets.is_empty() {
        debug!("Reveal skipped: no .{} elements", TARGET_CLASS);
        return;
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |records: Array, observer: IntersectionObserver| {
            reveal_entries(&observer, entries(&records));
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin);

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            for target in &targets {
                ViewportObserver::observe(&observer, target);
            }
            callback.forget();
            info!("Watching {} reveal targets", targets.len());
        }
        Err(err) => {
            warn!("IntersectionObserver unavailable ({}), revealing everything", describe(&err));
            for target in &targets {
                target.add_class(VISIBLE_CLASS);
            }
        }
    }
}
