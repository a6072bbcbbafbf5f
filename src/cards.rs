use log::debug;
use web_sys::Document;

use crate::dom::{self, DomNode};
use crate::reveal::TARGET_CLASS;

pub const CARD_SELECTORS: &[&str] = &[
    ".service-card",
    ".price-card",
    ".add-on-item",
    ".contact-form label",
];

pub fn enhance<N: DomNode>(targets: &[N]) {
    for target in targets {
        target.add_class(TARGET_CLASS);
    }
}

pub fn mount(document: &Document) {
    let targets = dom::select_all(document, &CARD_SELECTORS.join(", "));
    enhance(&targets);
    debug!("Tagged {} cards for reveal", targets.len());
}
