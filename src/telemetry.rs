/// Event tracking and timing helpers
///
/// Events are only logged for now; no analytics backend is wired in.
use log::info;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedEvent {
    pub name: String,
    pub properties: Value,
}

impl TrackedEvent {
    /// Anything other than a JSON object becomes an empty property map
    pub fn new(name: impl Into<String>, properties: Value) -> TrackedEvent {
        let properties = match properties {
            Value::Object(map) => Value::Object(map),
            _ => Value::Object(Map::new()),
        };
        TrackedEvent {
            name: name.into(),
            properties,
        }
    }
}

pub fn track(event: &TrackedEvent) {
    info!("Event tracked: {} {}", event.name, event.properties);
}

pub fn track_event(name: &str, properties: Value) {
    track(&TrackedEvent::new(name, properties));
}

/// Run `f`, returning its result and the elapsed time reported by `clock`
pub fn measure_with<T>(clock: impl Fn() -> f64, f: impl FnOnce() -> T) -> (T, f64) {
    let start = clock();
    let result = f();
    (result, clock() - start)
}

/// Time `f` with the page's high-resolution clock and log the duration
pub fn measure<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let (result, elapsed) = measure_with(performance_now, f);
    info!("{} took {:.2} milliseconds", name, elapsed);
    result
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_event_keeps_object_properties() {
        let event = TrackedEvent::new("quality_selected", json!({ "index": 2 }));

        assert_eq!(event.name, "quality_selected");
        assert_eq!(event.properties["index"], 2);
    }

    #[test]
    fn test_event_normalizes_non_object_properties() {
        assert_eq!(TrackedEvent::new("x", Value::Null).properties, json!({}));
        assert_eq!(TrackedEvent::new("x", json!([1, 2])).properties, json!({}));
    }

    #[test]
    fn test_measure_with_fake_clock() {
        let ticks = Cell::new(10.0);
        let clock = || {
            let now = ticks.get();
            ticks.set(now + 2.5);
            now
        };

        let (value, elapsed) = measure_with(clock, || 40 + 2);

        assert_eq!(value, 42);
        assert_eq!(elapsed, 2.5);
    }
}
