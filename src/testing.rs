//! In-memory stand-ins for the browser seams, shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::anchors::ElementLookup;
use crate::contact::{FormField, FormView};
use crate::dom::DomNode;
use crate::error::SiteError;
use crate::reveal::ViewportObserver;
use crate::timer::Scheduler;
use crate::video::Playback;

#[derive(Debug, Default)]
pub struct FakeNode {
    pub id: String,
    classes: RefCell<BTreeSet<String>>,
    attrs: RefCell<BTreeMap<String, String>>,
    text: RefCell<String>,
    value: RefCell<String>,
}

impl FakeNode {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_id(id: &str) -> Rc<Self> {
        Rc::new(Self {
            id: id.to_string(),
            ..Self::default()
        })
    }

    pub fn with_value(value: &str) -> Rc<Self> {
        let node = Self::new();
        node.set_value(value);
        node
    }

    pub fn with_class(class: &str) -> Rc<Self> {
        let node = Self::new();
        node.add_class(class);
        node
    }

    pub fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl DomNode for FakeNode {
    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        let mut classes = self.classes.borrow_mut();
        if classes.remove(class) {
            false
        } else {
            classes.insert(class.to_string());
            true
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs.borrow().get(name).cloned()
    }

    fn set_attr(&self, name: &str, value: &str) {
        self.attrs
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attr(&self, name: &str) {
        self.attrs.borrow_mut().remove(name);
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }
}

impl FormField for FakeNode {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }
}

#[derive(Debug, Default)]
pub struct FakeForm {
    pub fields: Vec<Rc<FakeNode>>,
    pub resets: Cell<usize>,
}

impl FakeForm {
    pub fn with_values(values: &[&str]) -> Self {
        Self {
            fields: values.iter().map(|v| FakeNode::with_value(v)).collect(),
            resets: Cell::new(0),
        }
    }
}

impl FormView for FakeForm {
    type Field = Rc<FakeNode>;

    fn required_fields(&self) -> Vec<Rc<FakeNode>> {
        self.fields.clone()
    }

    fn reset_fields(&self) {
        for field in &self.fields {
            field.set_value("");
        }
        self.resets.set(self.resets.get() + 1);
    }
}

type Task = (u32, Rc<Cell<bool>>, Box<dyn FnOnce()>);

/// Holds scheduled tasks until the test fires them.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Vec<Task>>>,
}

pub struct ManualHandle(Rc<Cell<bool>>);

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.0.set(true);
    }
}

impl ManualScheduler {
    /// Delays of tasks that are still due to fire.
    pub fn pending(&self) -> Vec<u32> {
        self.queue
            .borrow()
            .iter()
            .filter(|(_, cancelled, _)| !cancelled.get())
            .map(|(delay, _, _)| *delay)
            .collect()
    }

    /// Fires every live task and returns how many ran.
    pub fn fire_all(&self) -> usize {
        let tasks: Vec<Task> = self.queue.borrow_mut().drain(..).collect();
        let mut fired = 0;
        for (_, cancelled, task) in tasks {
            if !cancelled.get() {
                task();
                fired += 1;
            }
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.queue
            .borrow_mut()
            .push((delay_ms, Rc::clone(&cancelled), task));
        ManualHandle(cancelled)
    }
}

/// Tracks which targets are observed, the way the browser would.
#[derive(Default)]
pub struct FakeObserver {
    observed: RefCell<Vec<Rc<FakeNode>>>,
}

impl FakeObserver {
    pub fn is_observing(&self, target: &Rc<FakeNode>) -> bool {
        self.observed.borrow().iter().any(|n| Rc::ptr_eq(n, target))
    }

    pub fn observed_count(&self) -> usize {
        self.observed.borrow().len()
    }
}

impl ViewportObserver<Rc<FakeNode>> for FakeObserver {
    fn observe(&self, target: &Rc<FakeNode>) {
        if !self.is_observing(target) {
            self.observed.borrow_mut().push(Rc::clone(target));
        }
    }

    fn unobserve(&self, target: &Rc<FakeNode>) {
        self.observed.borrow_mut().retain(|n| !Rc::ptr_eq(n, target));
    }
}

#[derive(Default)]
pub struct FakeDocument {
    pub nodes: Vec<Rc<FakeNode>>,
}

impl ElementLookup for FakeDocument {
    type Node = Rc<FakeNode>;

    fn by_id(&self, id: &str) -> Option<Rc<FakeNode>> {
        self.nodes.iter().find(|n| n.id == id).cloned()
    }
}

#[derive(Debug, Default)]
pub struct FakePlayer {
    pub playing: Cell<bool>,
    pub position: Cell<f64>,
    pub play_attempts: Cell<usize>,
    pub refuse_play: bool,
}

impl Playback for FakePlayer {
    fn start(&self) -> Result<(), SiteError> {
        self.play_attempts.set(self.play_attempts.get() + 1);
        if self.refuse_play {
            return Err(SiteError::Js("NotAllowedError: play() failed".to_string()));
        }
        self.playing.set(true);
        Ok(())
    }

    fn halt(&self) -> Result<(), SiteError> {
        self.playing.set(false);
        Ok(())
    }

    fn rewind(&self) {
        self.position.set(0.0);
    }
}
