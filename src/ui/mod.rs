/// Browser-side wiring for the download page
pub mod clipboard;
pub mod components;
pub mod controller;
pub mod diagnostics;
pub mod dom;
pub mod notify;
pub mod widgets;

use crate::config::{self, UiConfig, CONFIG_ELEMENT_ID};
use crate::error::Result;
use crate::telemetry;
use gloo_events::EventListener;
use log::{error, info, warn};
use web_sys::Document;

/// Hook up diagnostics now and initialize the page once the DOM is parsed
pub fn start() {
    let document = match dom::window() {
        Ok(window) => {
            diagnostics::install(&window);
            window.document()
        }
        Err(e) => {
            error!("No window: {}", e);
            return;
        }
    };
    let Some(document) = document else {
        error!("No document to bind to");
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| run()).forget();
    } else {
        run();
    }
}

fn run() {
    if let Err(e) = telemetry::measure("initializeApp", initialize_app) {
        error!("Initialization failed: {}", e);
    }
}

fn initialize_app() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;

    let config = load_config(&document);
    config::install(config.clone());

    controller::install(controller::Controller::bind(&window, &document, config.clone()));
    let widgets = widgets::initialize(&document, &config.selectors);
    info!("page ready ({} tooltips/popovers)", widgets);
    Ok(())
}

/// Read overrides from the page, falling back to defaults
fn load_config(document: &Document) -> UiConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return UiConfig::default();
    };

    UiConfig::from_json(&json).unwrap_or_else(|e| {
        warn!("Ignoring page configuration: {}", e);
        UiConfig::default()
    })
}
