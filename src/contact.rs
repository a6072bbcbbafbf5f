use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::config::{FormConfig, FormMessages};
use crate::dom::{self, DomNode};
use crate::timer::{Scheduler, TimeoutScheduler};

pub const FORM_SELECTOR: &str = "#contactForm";
pub const MESSAGE_SELECTOR: &str = "#formMessage";
pub const SUBMIT_SELECTOR: &str = "button[type=\"submit\"]";
pub const REQUIRED_SELECTOR: &str = "input[required], textarea[required], select[required]";

pub const ARIA_INVALID: &str = "aria-invalid";
pub const ARIA_BUSY: &str = "aria-busy";
pub const HIDDEN_MESSAGE_CLASS: &str = "sr-only";
pub const ERROR_CLASS: &str = "text-red-500";
pub const SUCCESS_CLASS: &str = "text-green-600";

pub trait FormField: DomNode {
    fn value(&self) -> String;
}

impl<T: FormField + ?Sized> FormField for Rc<T> {
    fn value(&self) -> String {
        (**self).value()
    }
}

impl FormField for Element {
    fn value(&self) -> String {
        if let Some(input) = self.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = self.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }
}

pub trait FormView {
    type Field: FormField;

    fn required_fields(&self) -> Vec<Self::Field>;
    fn reset_fields(&self);
}

impl<T: FormView + ?Sized> FormView for Rc<T> {
    type Field = T::Field;

    fn required_fields(&self) -> Vec<T::Field> {
        (**self).required_fields()
    }

    fn reset_fields(&self) {
        (**self).reset_fields()
    }
}

impl FormView for HtmlFormElement {
    type Field = Element;

    fn required_fields(&self) -> Vec<Element> {
        dom::select_within(self, REQUIRED_SELECTOR)
    }

    fn reset_fields(&self) {
        self.reset();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Incomplete,
    Sending,
    Sent,
}

impl SubmissionStatus {
    pub fn message(self, messages: &FormMessages) -> Option<&str> {
        match self {
            SubmissionStatus::Idle => None,
            SubmissionStatus::Incomplete => Some(&messages.incomplete),
            SubmissionStatus::Sending => Some(&messages.sending),
            SubmissionStatus::Sent => Some(&messages.sent),
        }
    }

    pub fn is_error(self) -> bool {
        self == SubmissionStatus::Incomplete
    }
}

/// Validates the contact form and plays out the simulated send.
///
/// Only one completion is ever outstanding: a new submit attempt drops the
/// pending timer handle, which cancels it.
pub struct ContactForm<F, N, S: Scheduler> {
    form: F,
    message: N,
    submit: Option<N>,
    scheduler: S,
    config: FormConfig,
    status: Cell<SubmissionStatus>,
    pending: RefCell<Option<S::Handle>>,
}

impl<F, N, S> ContactForm<F, N, S>
where
    F: FormView + 'static,
    N: DomNode + 'static,
    S: Scheduler + 'static,
{
    pub fn new(form: F, message: N, submit: Option<N>, scheduler: S, config: FormConfig) -> Self {
        Self {
            form,
            message,
            submit,
            scheduler,
            config,
            status: Cell::new(SubmissionStatus::Idle),
            pending: RefCell::new(None),
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status.get()
    }

    /// Marks every required field, returns true when none is blank.
    pub fn validate(&self) -> bool {
        let mut valid = true;
        for field in self.form.required_fields() {
            if field.value().trim().is_empty() {
                field.set_attr(ARIA_INVALID, "true");
                valid = false;
            } else {
                field.remove_attr(ARIA_INVALID);
            }
        }
        valid
    }

    pub fn submit(self: &Rc<Self>) -> SubmissionStatus {
        if self.pending.borrow_mut().take().is_some() && self.status() == SubmissionStatus::Sending {
            debug!("Superseding pending contact submission");
            self.set_busy(false);
        }

        if !self.validate() {
            self.set_status(SubmissionStatus::Incomplete);
            return self.status();
        }

        self.set_busy(true);
        self.set_status(SubmissionStatus::Sending);

        let this = Rc::clone(self);
        let handle = self
            .scheduler
            .schedule(self.config.submit_delay_ms, Box::new(move || this.complete()));
        *self.pending.borrow_mut() = Some(handle);
        self.status()
    }

    fn complete(&self) {
        self.set_busy(false);
        self.set_status(SubmissionStatus::Sent);
        self.form.reset_fields();
        info!("Contact request acknowledged");
    }

    fn set_busy(&self, busy: bool) {
        if let Some(button) = &self.submit {
            if busy {
                button.set_attr(ARIA_BUSY, "true");
            } else {
                button.remove_attr(ARIA_BUSY);
            }
        }
    }

    fn set_status(&self, status: SubmissionStatus) {
        self.status.set(status);
        let Some(text) = status.message(&self.config.messages) else {
            return;
        };
        self.message.set_text(text);
        self.message.remove_class(HIDDEN_MESSAGE_CLASS);
        self.message.set_class(ERROR_CLASS, status.is_error());
        self.message.set_class(SUCCESS_CLASS, !status.is_error());
    }
}

pub fn mount(document: &Document, config: &FormConfig) {
    let form = dom::select(document, FORM_SELECTOR)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
    let (Some(form), Some(message)) = (form, dom::select(document, MESSAGE_SELECTOR)) else {
        debug!("Contact form skipped: form or message slot missing");
        return;
    };
    let submit = form.query_selector(SUBMIT_SELECTOR).ok().flatten();

    let controller = Rc::new(ContactForm::new(
        form.clone(),
        message,
        submit,
        TimeoutScheduler,
        config.clone(),
    ));
    dom::listen(&form, "submit", move |event| {
        event.prevent_default();
        controller.submit();
    });
    info!("Contact form ready");
}
