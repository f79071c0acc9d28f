/// Notification banners: insertion, auto-dismiss and removal
///
/// Each banner lives in its own `.container` div at the top of the main
/// content region and is rendered there by Yew. Its dismiss timer is keyed by
/// the banner id, so removing the banner also cancels whatever is pending.
use crate::alerts::{AlertPhase, AlertRecord, Severity};
use crate::config::{self, Timings};
use crate::error::{Result, UiError};
use crate::ui::components::{AlertBanner, AlertBannerProps};
use crate::ui::dom;
use gloo_timers::callback::Timeout;
use log::{debug, error};
use std::cell::RefCell;
use std::collections::HashMap;
use uuid::Uuid;
use web_sys::Element;
use yew::AppHandle;

struct ActiveAlert {
    record: AlertRecord,
    timings: Timings,
    container: Element,
    handle: AppHandle<AlertBanner>,
    timer: Option<Timeout>,
}

thread_local! {
    static ACTIVE_ALERTS: RefCell<HashMap<Uuid, ActiveAlert>> = RefCell::new(HashMap::new());
}

/// Show a banner; failures are logged, never raised
pub fn show_alert(message: &str, severity: Severity) {
    if let Err(e) = try_show_alert(message, severity) {
        error!("Failed to show alert '{}': {}", message, e);
    }
}

pub fn try_show_alert(message: &str, severity: Severity) -> Result<AlertRecord> {
    let config = config::current();
    let document = dom::document()?;
    let record = AlertRecord::new(message, severity, js_sys::Date::now());
    let id = Uuid::new_v4();

    let container = document.create_element("div")?;
    container.set_class_name("container");
    container.set_attribute("data-alert-id", &id.to_string())?;

    let host: Element = match dom::query::<Element>(&document, &config.selectors.main_content) {
        Some(main) => main,
        None => document
            .body()
            .ok_or_else(|| UiError::MissingElement("body".to_string()))?
            .into(),
    };
    host.insert_before(&container, host.first_child().as_ref())?;

    let handle = yew::Renderer::<AlertBanner>::with_root_and_props(
        container.clone(),
        AlertBannerProps {
            message: record.message.clone(),
            severity,
        },
    )
    .render();

    let timings = config.timings.clone();
    let timer = record
        .delay_until_next_phase(record.created_at, &timings)
        .map(|delay| Timeout::new(delay, move || advance(id)));

    ACTIVE_ALERTS.with(|alerts| {
        alerts.borrow_mut().insert(
            id,
            ActiveAlert {
                record: record.clone(),
                timings,
                container,
                handle,
                timer,
            },
        )
    });

    debug!("alert {} shown ({:?})", id, severity);
    Ok(record)
}

/// Move a banner to the phase its timeline says it is in now
fn advance(id: Uuid) {
    let now = js_sys::Date::now();

    let removed = ACTIVE_ALERTS.with(|alerts| {
        let mut alerts = alerts.borrow_mut();
        let phase = {
            let alert = alerts.get(&id)?;
            alert.record.phase_at(now, &alert.timings)
        };
        if phase == AlertPhase::Removed {
            return alerts.remove(&id);
        }

        let alert = alerts.get_mut(&id)?;
        if phase == AlertPhase::Fading {
            if let Some(banner) = dom::query_in::<Element>(&alert.container, ".alert") {
                let _ = banner.class_list().remove_1("show");
            }
        }
        alert.timer = alert
            .record
            .delay_until_next_phase(now, &alert.timings)
            .map(|delay| Timeout::new(delay.max(1), move || advance(id)));
        None
    });

    if let Some(alert) = removed {
        alert.handle.destroy();
        if alert.container.is_connected() {
            alert.container.remove();
        }
        debug!("alert {} removed", id);
    }
}

/// Number of banners still tracked (visible or fading)
pub fn active_count() -> usize {
    ACTIVE_ALERTS.with(|alerts| alerts.borrow().len())
}
