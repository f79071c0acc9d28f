/// Copy text using the async Clipboard API, falling back to `execCommand`
use crate::clipboard::{CopyMethod, CopyOutcome};
use crate::config;
use crate::error::{Result, UiError};
use crate::telemetry;
use crate::ui::{dom, notify};
use js_sys::Reflect;
use log::{debug, warn};
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlDocument, HtmlTextAreaElement};

/// Copy `text` and report the outcome with a banner
pub async fn copy_and_notify(text: String) {
    let outcome = copy_text(&text).await;

    let (message, severity) = outcome.notification(&config::current().messages);
    notify::show_alert(&message, severity);
    telemetry::track_event("copy_to_clipboard", json!({ "copied": outcome.is_copied() }));
}

pub async fn copy_text(text: &str) -> CopyOutcome {
    match write_with_clipboard_api(text).await {
        Ok(true) => return CopyOutcome::Copied(CopyMethod::AsyncClipboard),
        Ok(false) => debug!("async clipboard unavailable, using legacy copy"),
        Err(e) => warn!("async clipboard write failed, using legacy copy: {}", e),
    }

    match legacy_copy(text) {
        Ok(()) => CopyOutcome::Copied(CopyMethod::LegacyCommand),
        Err(e) => {
            warn!("legacy copy failed: {}", e);
            CopyOutcome::Failed(e.to_string())
        }
    }
}

/// `Ok(false)` when the browser has no async clipboard
async fn write_with_clipboard_api(text: &str) -> Result<bool> {
    let navigator = dom::window()?.navigator();
    let has_clipboard = Reflect::has(&navigator, &JsValue::from_str("clipboard")).unwrap_or(false);
    if !has_clipboard {
        return Ok(false);
    }

    let clipboard = navigator.clipboard();
    let has_write_text =
        Reflect::has(&clipboard, &JsValue::from_str("writeText")).unwrap_or(false);
    if !has_write_text {
        return Ok(false);
    }

    JsFuture::from(clipboard.write_text(text)).await?;
    Ok(true)
}

/// Copy through a temporary off-screen textarea and `execCommand("copy")`
pub fn legacy_copy(text: &str) -> Result<()> {
    let document = dom::document()?;
    let field = OffscreenTextArea::attach(&document, text)?;
    field.select()?;

    let copied = document
        .dyn_ref::<HtmlDocument>()
        .ok_or_else(|| UiError::Js("document does not support execCommand".to_string()))?
        .exec_command("copy")?;

    if copied {
        Ok(())
    } else {
        Err(UiError::Js("execCommand(\"copy\") returned false".to_string()))
    }
}

/// Hidden textarea that is removed from the page when dropped
struct OffscreenTextArea {
    element: HtmlTextAreaElement,
}

impl OffscreenTextArea {
    fn attach(document: &Document, text: &str) -> Result<OffscreenTextArea> {
        let element = document
            .create_element("textarea")?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| UiError::Js("created element is not a textarea".to_string()))?;
        element.set_value(text);
        element.set_attribute("readonly", "")?;

        let style = element.style();
        style.set_property("position", "fixed")?;
        style.set_property("left", "-999999px")?;
        style.set_property("top", "-999999px")?;

        let body = document
            .body()
            .ok_or_else(|| UiError::MissingElement("body".to_string()))?;
        body.append_child(&element)?;

        Ok(OffscreenTextArea { element })
    }

    fn select(&self) -> Result<()> {
        self.element.focus()?;
        self.element.select();
        Ok(())
    }
}

impl Drop for OffscreenTextArea {
    fn drop(&mut self) {
        self.element.remove();
    }
}
