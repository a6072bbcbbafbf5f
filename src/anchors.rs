use log::debug;
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

pub trait ElementLookup {
    type Node;

    fn by_id(&self, id: &str) -> Option<Self::Node>;
}

impl ElementLookup for Document {
    type Node = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.get_element_by_id(id)
    }
}

/// Fragment id of a same-page link, `None` for a bare `#` or anything that is
/// not a fragment.
pub fn fragment_id(href: Option<&str>) -> Option<&str> {
    href?.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn resolve_target<L: ElementLookup>(lookup: &L, href: Option<&str>) -> Option<L::Node> {
    lookup.by_id(fragment_id(href)?)
}

fn smooth_scroll(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn mount(document: &Document) {
    let anchors = dom::select_all(document, ANCHOR_SELECTOR);
    for anchor in &anchors {
        let document = document.clone();
        let link = anchor.clone();
        dom::listen(anchor, "click", move |event| {
            // href is read at click time, links may be rewritten after load.
            let href = link.get_attribute("href");
            if let Some(target) = resolve_target(&document, href.as_deref()) {
                event.prevent_default();
                smooth_scroll(&target);
            }
        });
    }
    debug!("Smooth scrolling on {} anchors", anchors.len());
}
