/// Event wiring for the download form and the quality buttons
///
/// Every button on the page gets a `ButtonMachine`; DOM writes only happen
/// with what a machine transition returns. Pending timeouts are keyed by the
/// button that owns them, so replacing one cancels the old one.
use crate::alerts::Severity;
use crate::config::UiConfig;
use crate::error::Result;
use crate::feedback::FieldFeedback;
use crate::lifecycle::{review_submission, ButtonMachine, LoadingTicket, Restore, SubmitDecision};
use crate::telemetry;
use crate::ui::{dom, notify};
use crate::validator::{classify, ValidationState};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use log::{debug, error, info, warn};
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, HtmlFormElement, HtmlInputElement, PageTransitionEvent, Window};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ButtonKey {
    Submit,
    Quality(usize),
}

struct BoundButton {
    element: HtmlElement,
    machine: ButtonMachine,
}

struct ControllerState {
    config: UiConfig,
    url_input: Option<HtmlInputElement>,
    buttons: HashMap<ButtonKey, BoundButton>,
    safety_timers: HashMap<ButtonKey, Timeout>,
    paste_timer: Option<Timeout>,
}

type SharedState = Rc<RefCell<ControllerState>>;

/// Bound page state plus the listeners feeding it; dropping it detaches them
pub struct Controller {
    state: SharedState,
    _listeners: Vec<EventListener>,
}

thread_local! {
    static ACTIVE_CONTROLLER: RefCell<Option<Controller>> = RefCell::new(None);
}

impl Controller {
    pub fn bind(window: &Window, document: &Document, config: UiConfig) -> Controller {
        let url_input = dom::query::<HtmlInputElement>(document, &config.selectors.url_input);
        let form = dom::query::<HtmlFormElement>(document, &config.selectors.form);

        let mut buttons = HashMap::new();
        if let Some(element) = dom::query::<HtmlElement>(document, &config.selectors.submit_button) {
            buttons.insert(ButtonKey::Submit, BoundButton::new(element));
        }
        let quality_buttons = dom::query_all::<HtmlElement>(document, &config.selectors.quality_buttons);
        for (index, element) in quality_buttons.iter().enumerate() {
            buttons.insert(ButtonKey::Quality(index), BoundButton::new(element.clone()));
        }

        let state = Rc::new(RefCell::new(ControllerState {
            config,
            url_input: url_input.clone(),
            buttons,
            safety_timers: HashMap::new(),
            paste_timer: None,
        }));

        let mut listeners = Vec::new();

        match &url_input {
            Some(input) => {
                let on_input = state.clone();
                listeners.push(EventListener::new(input, "input", move |_| {
                    refresh_from_input(&on_input);
                }));

                let on_paste = state.clone();
                listeners.push(EventListener::new(input, "paste", move |_| {
                    schedule_paste_refresh(&on_paste);
                }));
            }
            None => debug!("no URL input on this page"),
        }

        if let Some(form) = &form {
            let on_submit = state.clone();
            listeners.push(EventListener::new_with_options(
                form,
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| handle_submit(&on_submit, event),
            ));
        }

        for (index, element) in quality_buttons.iter().enumerate() {
            let on_click = state.clone();
            listeners.push(EventListener::new(element, "click", move |_| {
                handle_quality_click(&on_click, ButtonKey::Quality(index));
            }));
        }

        let on_pageshow = state.clone();
        listeners.push(EventListener::new(window, "pageshow", move |event| {
            let restored = event
                .dyn_ref::<PageTransitionEvent>()
                .map(|event| event.persisted())
                .unwrap_or(false);
            if restored {
                handle_page_restored(&on_pageshow);
            }
        }));

        info!(
            "controller bound: url input {}, form {}, {} quality buttons",
            url_input.is_some(),
            form.is_some(),
            quality_buttons.len()
        );

        Controller {
            state,
            _listeners: listeners,
        }
    }

    /// Classify `url` and show the result on the bound input and submit button
    pub fn validate(&self, url: &str) -> ValidationState {
        let validation = classify(url);
        if let Err(e) = apply_feedback(&mut self.state.borrow_mut(), validation) {
            warn!("Failed to apply validation feedback: {}", e);
        }
        validation
    }
}

impl BoundButton {
    fn new(element: HtmlElement) -> BoundButton {
        BoundButton {
            element,
            machine: ButtonMachine::new(),
        }
    }

    fn show_loading(&self, label_html: &str) -> Result<()> {
        self.element.set_inner_html(label_html);
        dom::set_disabled(&self.element, true)
    }

    fn restore(&self, restore: Restore) -> Result<()> {
        self.element.set_inner_html(&restore.label);
        dom::set_disabled(&self.element, !restore.enabled)
    }
}

/// Make `controller` the one used by the exported functions
pub fn install(controller: Controller) {
    ACTIVE_CONTROLLER.with(|active| *active.borrow_mut() = Some(controller));
}

/// Classify, and apply feedback when a controller is installed
pub fn validate(url: &str) -> ValidationState {
    ACTIVE_CONTROLLER.with(|active| match active.borrow().as_ref() {
        Some(controller) => controller.validate(url),
        None => classify(url),
    })
}

fn apply_feedback(state: &mut ControllerState, validation: ValidationState) -> Result<()> {
    let feedback = FieldFeedback::from(validation);

    if let Some(input) = &state.url_input {
        let (remove, add) = feedback.class_changes(&state.config.classes);
        dom::swap_classes(input, &remove, add)?;
    }

    if let Some(button) = state.buttons.get_mut(&ButtonKey::Submit) {
        if let Some(enabled) = button.machine.apply_validation(validation) {
            dom::set_disabled(&button.element, !enabled)?;
        }
    }

    debug!("url field is {}", validation.as_str());
    Ok(())
}

fn refresh_from_input(state_rc: &SharedState) {
    let mut state = state_rc.borrow_mut();
    let Some(value) = state.url_input.as_ref().map(|input| input.value()) else {
        return;
    };

    if let Err(e) = apply_feedback(&mut state, classify(&value)) {
        warn!("Failed to apply validation feedback: {}", e);
    }
}

/// Validate once the pasted text has landed in the field
fn schedule_paste_refresh(state_rc: &SharedState) {
    let delay = state_rc.borrow().config.timings.paste_settle_ms;
    let target = state_rc.clone();
    let timer = Timeout::new(delay, move || refresh_from_input(&target));

    state_rc.borrow_mut().paste_timer = Some(timer);
}

fn handle_submit(state_rc: &SharedState, event: &Event) {
    let mut state = state_rc.borrow_mut();
    let value = state
        .url_input
        .as_ref()
        .map(|input| input.value())
        .unwrap_or_default();

    match review_submission(&value) {
        SubmitDecision::BlockEmpty => {
            event.prevent_default();
            let message = state.config.messages.empty_url.clone();
            drop(state);
            notify::show_alert(&message, Severity::Error);
        }
        SubmitDecision::Proceed => {
            // No release: the navigation that follows resets the page
            start_loading(&mut state, ButtonKey::Submit);
            drop(state);
            telemetry::track_event("download_submitted", json!({ "url": value }));
        }
    }
}

fn handle_quality_click(state_rc: &SharedState, key: ButtonKey) {
    let mut state = state_rc.borrow_mut();
    let Some(ticket) = start_loading(&mut state, key) else {
        return;
    };

    let delay = state.config.timings.safety_reset_ms;
    let target = state_rc.clone();
    let timer = Timeout::new(delay, move || release_after_timeout(&target, key, ticket));

    // Replacing the entry cancels the reset pending from an earlier click
    state.safety_timers.insert(key, timer);
    drop(state);

    if let ButtonKey::Quality(index) = key {
        telemetry::track_event("quality_selected", json!({ "index": index }));
    }
}

fn start_loading(state: &mut ControllerState, key: ButtonKey) -> Option<LoadingTicket> {
    let label_html = state.config.messages.processing_label.clone();
    let button = state.buttons.get_mut(&key)?;

    let ticket = button.machine.begin_loading(button.element.inner_html());
    if let Err(e) = button.show_loading(&label_html) {
        error!("Failed to show loading state on {:?}: {}", key, e);
    }
    Some(ticket)
}

fn release_after_timeout(state_rc: &SharedState, key: ButtonKey, ticket: LoadingTicket) {
    let mut state = state_rc.borrow_mut();
    state.safety_timers.remove(&key);

    let Some(button) = state.buttons.get_mut(&key) else {
        return;
    };
    if let Some(restore) = button.machine.release(ticket) {
        info!("No download started for {:?}; restoring button", key);
        if let Err(e) = button.restore(restore) {
            error!("Failed to restore {:?}: {}", key, e);
        }
    }
}

/// Back/forward cache restored the page with buttons still loading
fn handle_page_restored(state_rc: &SharedState) {
    let mut state = state_rc.borrow_mut();
    state.safety_timers.clear();
    state.paste_timer = None;

    for (key, button) in state.buttons.iter_mut() {
        if let Some(restore) = button.machine.complete() {
            debug!("page restored; releasing {:?}", key);
            if let Err(e) = button.restore(restore) {
                error!("Failed to restore {:?}: {}", key, e);
            }
        }
    }
}
