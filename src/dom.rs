use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, NodeList};

use crate::error::describe;

/// The slice of an element the site scripts touch: classes, attributes and
/// text. Methods take `&self` because DOM handles are shared references.
pub trait DomNode {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Flips `class` and returns whether it is present afterwards.
    fn toggle_class(&self, class: &str) -> bool;
    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&self, name: &str, value: &str);
    fn remove_attr(&self, name: &str);
    fn set_text(&self, text: &str);
}

impl<T: DomNode + ?Sized> DomNode for Rc<T> {
    fn has_class(&self, class: &str) -> bool {
        (**self).has_class(class)
    }
    fn add_class(&self, class: &str) {
        (**self).add_class(class)
    }
    fn remove_class(&self, class: &str) {
        (**self).remove_class(class)
    }
    fn toggle_class(&self, class: &str) -> bool {
        (**self).toggle_class(class)
    }
    fn set_class(&self, class: &str, on: bool) {
        (**self).set_class(class, on)
    }
    fn attr(&self, name: &str) -> Option<String> {
        (**self).attr(name)
    }
    fn set_attr(&self, name: &str, value: &str) {
        (**self).set_attr(name, value)
    }
    fn remove_attr(&self, name: &str) {
        (**self).remove_attr(name)
    }
    fn set_text(&self, text: &str) {
        (**self).set_text(text)
    }
}

impl DomNode for Element {
    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.class_list().add_1(class) {
            debug!("classList.add({}) failed: {}", class, describe(&err));
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.class_list().remove_1(class) {
            debug!("classList.remove({}) failed: {}", class, describe(&err));
        }
    }

    fn toggle_class(&self, class: &str) -> bool {
        match self.class_list().toggle(class) {
            Ok(present) => present,
            Err(err) => {
                debug!("classList.toggle({}) failed: {}", class, describe(&err));
                self.has_class(class)
            }
        }
    }

    fn set_class(&self, class: &str, on: bool) {
        if let Err(err) = self.class_list().toggle_with_force(class, on) {
            debug!("classList.toggle({}, {}) failed: {}", class, on, describe(&err));
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        if let Err(err) = self.set_attribute(name, value) {
            debug!("setAttribute({}) failed: {}", name, describe(&err));
        }
    }

    fn remove_attr(&self, name: &str) {
        if let Err(err) = self.remove_attribute(name) {
            debug!("removeAttribute({}) failed: {}", name, describe(&err));
        }
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

pub fn select(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => elements(&list),
        Err(err) => {
            debug!("querySelectorAll({}) failed: {}", selector, describe(&err));
            Vec::new()
        }
    }
}

pub fn select_within(parent: &Element, selector: &str) -> Vec<Element> {
    parent
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attaches `handler` for the page lifetime. The closure is leaked on
/// purpose: the page never removes these listeners.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(err) =
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
    {
        debug!("addEventListener({}) failed: {}", event, describe(&err));
        return;
    }
    callback.forget();
}
