/// Page configuration: selectors, marker classes, timings and messages
///
/// Every field has a default matching the stock download page. The server may
/// override any subset (for instance localized messages) by embedding JSON in
/// `<script type="application/json" id="downloader-ui-config">`.
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Id of the script element carrying JSON overrides
pub const CONFIG_ELEMENT_ID: &str = "downloader-ui-config";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiConfig {
    pub selectors: Selectors,
    pub classes: MarkerClasses,
    pub timings: Timings,
    pub messages: Messages,
}

thread_local! {
    static ACTIVE_CONFIG: RefCell<UiConfig> = RefCell::new(UiConfig::default());
}

impl UiConfig {
    pub fn from_json(json: &str) -> Result<UiConfig> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Make `config` the one used by every UI module
pub fn install(config: UiConfig) {
    ACTIVE_CONFIG.with(|active| *active.borrow_mut() = config);
}

pub fn current() -> UiConfig {
    ACTIVE_CONFIG.with(|active| active.borrow().clone())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub url_input: String,
    pub submit_button: String,
    pub form: String,
    pub quality_buttons: String,
    pub main_content: String,
    pub tooltips: String,
    pub popovers: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Selectors {
            url_input: ".url-input".to_string(),
            submit_button: ".download-btn".to_string(),
            form: ".download-form".to_string(),
            quality_buttons: ".download-quality-btn".to_string(),
            main_content: ".main-content".to_string(),
            tooltips: "[data-bs-toggle=\"tooltip\"]".to_string(),
            popovers: "[data-bs-toggle=\"popover\"]".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerClasses {
    pub valid: String,
    pub invalid: String,
}

impl Default for MarkerClasses {
    fn default() -> Self {
        MarkerClasses {
            valid: "is-valid".to_string(),
            invalid: "is-invalid".to_string(),
        }
    }
}

/// Delays in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timings {
    pub paste_settle_ms: u32,
    pub safety_reset_ms: u32,
    pub alert_dismiss_ms: u32,
    /// Must match the CSS fade transition
    pub alert_fade_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            paste_settle_ms: 100,
            safety_reset_ms: 10_000,
            alert_dismiss_ms: 5_000,
            alert_fade_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    pub empty_url: String,
    pub copied: String,
    pub copy_failed: String,
    /// Inner HTML of a button while it is loading
    pub processing_label: String,
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            empty_url: "Please enter a TikTok URL".to_string(),
            copied: "Copied to clipboard!".to_string(),
            copy_failed: "Failed to copy to clipboard".to_string(),
            processing_label: "<i class=\"fas fa-spinner fa-spin\"></i> Processing...".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UiError;

    #[test]
    fn test_defaults() {
        let config = UiConfig::default();

        assert_eq!(config.selectors.url_input, ".url-input");
        assert_eq!(config.selectors.quality_buttons, ".download-quality-btn");
        assert_eq!(config.classes.invalid, "is-invalid");
        assert_eq!(config.timings.safety_reset_ms, 10_000);
        assert_eq!(config.timings.alert_dismiss_ms + config.timings.alert_fade_ms, 5_300);
        assert_eq!(config.messages.empty_url, "Please enter a TikTok URL");
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(UiConfig::from_json("{}").unwrap(), UiConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = UiConfig::from_json(
            r#"{
                "messages": { "emptyUrl": "Veuillez saisir une URL TikTok" },
                "timings": { "safetyResetMs": 15000 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.messages.empty_url, "Veuillez saisir une URL TikTok");
        assert_eq!(config.messages.copied, "Copied to clipboard!");
        assert_eq!(config.timings.safety_reset_ms, 15_000);
        assert_eq!(config.timings.paste_settle_ms, 100);
        assert_eq!(config.selectors, Selectors::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let result = UiConfig::from_json("{ not json");
        assert!(matches!(result, Err(UiError::Config(_))));
    }

    #[test]
    fn test_install_replaces_current() {
        let mut config = UiConfig::default();
        config.messages.copied = "Kopiert!".to_string();

        install(config.clone());
        assert_eq!(current(), config);

        install(UiConfig::default());
        assert_eq!(current().messages.copied, "Copied to clipboard!");
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let result = UiConfig::from_json(r#"{ "timings": { "pasteSettleMs": "soon" } }"#);
        assert!(result.is_err());
    }
}
