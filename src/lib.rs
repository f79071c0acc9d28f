/// TikTok Downloader - page helpers for the download form
/// Built with Rust + WASM + Yew

pub mod alerts;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod feedback;
pub mod lifecycle;
pub mod telemetry;
pub mod ui;
pub mod validator;

use alerts::Severity;
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Set up panic hook and logging, then bind to the page
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    ui::start();
}

/// Classify a URL and reflect the result on the form
///
/// Returns `"valid"`, `"invalid"` or `"unvalidated"`.
#[wasm_bindgen(js_name = validateTikTokUrl)]
pub fn validate_tiktok_url(url: &str) -> String {
    ui::controller::validate(url).as_str().to_string()
}

#[wasm_bindgen(js_name = showAlert)]
pub fn show_alert(message: &str, alert_type: Option<String>) {
    ui::notify::show_alert(message, Severity::from_type_name(alert_type.as_deref()));
}

#[wasm_bindgen(js_name = copyToClipboard)]
pub fn copy_to_clipboard(text: String) {
    spawn_local(ui::clipboard::copy_and_notify(text));
}

#[wasm_bindgen(js_name = trackEvent)]
pub fn track_event(event_name: &str, properties: JsValue) {
    let properties = if properties.is_undefined() || properties.is_null() {
        serde_json::Value::Null
    } else {
        serde_wasm_bindgen::from_value(properties).unwrap_or_else(|e| {
            warn!("Dropping unserializable properties for '{}': {}", event_name, e);
            serde_json::Value::Null
        })
    };
    telemetry::track_event(event_name, properties);
}
