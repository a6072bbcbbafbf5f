use std::rc::Rc;

use log::debug;
use web_sys::Document;

use crate::dom::{self, DomNode};

pub const TOGGLE_SELECTOR: &str = "#mobileNavToggle";
pub const PANEL_SELECTOR: &str = "#mobileNav";
pub const HIDDEN_CLASS: &str = "hidden";
pub const ARIA_EXPANDED: &str = "aria-expanded";

pub struct MobileNav<N> {
    toggle: N,
    panel: N,
}

impl<N: DomNode> MobileNav<N> {
    pub fn new(toggle: N, panel: N) -> Self {
        Self { toggle, panel }
    }

    /// Flips the panel and returns whether it is now open.
    pub fn flip(&self) -> bool {
        let open = !self.panel.toggle_class(HIDDEN_CLASS);
        self.toggle
            .set_attr(ARIA_EXPANDED, if open { "true" } else { "false" });
        open
    }
}

pub fn mount(document: &Document) {
    let (Some(toggle), Some(panel)) = (
        dom::select(document, TOGGLE_SELECTOR),
        dom::select(document, PANEL_SELECTOR),
    ) else {
        debug!("Mobile nav skipped: toggle or panel missing");
        return;
    };
    let nav = Rc::new(MobileNav::new(toggle.clone(), panel));
    dom::listen(&toggle, "click", move |_| {
        nav.flip();
    });
}
