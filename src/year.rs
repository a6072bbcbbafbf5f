use chrono::{Datelike, Local};
use log::debug;
use web_sys::Document;

use crate::dom::{self, DomNode};

pub const YEAR_SELECTOR: &str = "#year";

pub fn current_year() -> i32 {
    Local::now().year()
}

pub fn stamp<N: DomNode>(slot: Option<&N>, year: i32) -> bool {
    match slot {
        Some(slot) => {
            slot.set_text(&year.to_string());
            true
        }
        None => false,
    }
}

pub fn mount(document: &Document) {
    let slot = dom::select(document, YEAR_SELECTOR);
    if !stamp(slot.as_ref(), current_year()) {
        debug!("Year stamp skipped: no {} element", YEAR_SELECTOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeNode;
    use std::rc::Rc;

    #[test]
    fn writes_year_into_slot() {
        let slot = FakeNode::new();
        assert!(stamp(Some(&slot), 2026));
        assert_eq!(slot.text(), "2026");
    }

    #[test]
    fn missing_slot_is_tolerated() {
        assert!(!stamp::<Rc<FakeNode>>(None, 2026));
    }

    #[test]
    fn clock_year_is_plausible() {
        assert!(current_year() >= 2024);
    }
}
