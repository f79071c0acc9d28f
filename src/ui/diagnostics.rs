/// Logging hooks for uncaught script errors and unhandled promise rejections
///
/// These are diagnostic only: nothing is shown to the user and nothing is retried.
use gloo_events::EventListener;
use log::error;
use wasm_bindgen::JsCast;
use web_sys::{ErrorEvent, PromiseRejectionEvent, Window};

pub fn install(window: &Window) {
    EventListener::new(window, "error", |event| {
        if let Some(event) = event.dyn_ref::<ErrorEvent>() {
            error!(
                "JavaScript error: {} ({}:{}) {:?}",
                event.message(),
                event.filename(),
                event.lineno(),
                event.error()
            );
        }
    })
    .forget();

    EventListener::new(window, "unhandledrejection", |event| {
        if let Some(event) = event.dyn_ref::<PromiseRejectionEvent>() {
            error!("Unhandled promise rejection: {:?}", event.reason());
        }
    })
    .forget();
}
