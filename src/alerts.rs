/// Alert data for the notification banners
use crate::config::Timings;
use log::warn;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Bootstrap contextual suffix (`alert-<suffix>`)
    pub fn contextual_class(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "danger",
        }
    }

    pub fn banner_classes(&self) -> String {
        format!(
            "alert alert-{} alert-dismissible fade show",
            self.contextual_class()
        )
    }

    /// Lenient parse for the JS-facing `type` argument
    pub fn from_type_name(name: Option<&str>) -> Severity {
        match name {
            None => Severity::Info,
            Some(name) => name.parse().unwrap_or_else(|_| {
                warn!("unknown alert type '{}', using info", name);
                Severity::Info
            }),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "success" => Ok(Severity::Success),
            "warning" => Ok(Severity::Warning),
            "error" | "danger" => Ok(Severity::Error),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

/// One banner shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub message: String,
    pub severity: Severity,
    /// Milliseconds since the epoch
    pub created_at: f64,
}

/// Where a banner is in its auto-dismiss timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Visible,
    Fading,
    Removed,
}

impl AlertRecord {
    pub fn new(message: impl Into<String>, severity: Severity, created_at: f64) -> AlertRecord {
        AlertRecord {
            message: message.into(),
            severity,
            created_at,
        }
    }

    /// Visible until the dismiss delay, fading for the transition, then gone
    pub fn phase_at(&self, now: f64, timings: &Timings) -> AlertPhase {
        let elapsed = now - self.created_at;
        let fade_start = f64::from(timings.alert_dismiss_ms);
        let removal = fade_start + f64::from(timings.alert_fade_ms);

        if elapsed < fade_start {
            AlertPhase::Visible
        } else if elapsed < removal {
            AlertPhase::Fading
        } else {
            AlertPhase::Removed
        }
    }

    pub fn fade_deadline(&self, timings: &Timings) -> f64 {
        self.created_at + f64::from(timings.alert_dismiss_ms)
    }

    pub fn removal_deadline(&self, timings: &Timings) -> f64 {
        self.fade_deadline(timings) + f64::from(timings.alert_fade_ms)
    }

    /// Milliseconds from `now` until the next phase starts; `None` once removed
    pub fn delay_until_next_phase(&self, now: f64, timings: &Timings) -> Option<u32> {
        let deadline = match self.phase_at(now, timings) {
            AlertPhase::Visible => self.fade_deadline(timings),
            AlertPhase::Fading => self.removal_deadline(timings),
            AlertPhase::Removed => return None,
        };
        Some((deadline - now).ceil().max(0.0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_classes() {
        assert_eq!(
            Severity::Error.banner_classes(),
            "alert alert-danger alert-dismissible fade show"
        );
        assert_eq!(
            Severity::Success.banner_classes(),
            "alert alert-success alert-dismissible fade show"
        );
        assert_eq!(Severity::default().contextual_class(), "info");
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("danger".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!(" Success ".parse::<Severity>(), Ok(Severity::Success));
        assert_eq!("warning".parse::<Severity>(), Ok(Severity::Warning));
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn test_from_type_name_falls_back_to_info() {
        assert_eq!(Severity::from_type_name(None), Severity::Info);
        assert_eq!(Severity::from_type_name(Some("loud")), Severity::Info);
        assert_eq!(Severity::from_type_name(Some("error")), Severity::Error);
    }

    #[test]
    fn test_alert_timeline() {
        let timings = Timings::default();
        let created = 1_000_000.0;
        let alert = AlertRecord::new("Please enter a TikTok URL", Severity::Error, created);

        assert_eq!(alert.phase_at(created, &timings), AlertPhase::Visible);
        assert_eq!(alert.phase_at(created + 4_999.0, &timings), AlertPhase::Visible);
        assert_eq!(alert.phase_at(created + 5_000.0, &timings), AlertPhase::Fading);
        assert_eq!(alert.phase_at(created + 5_299.0, &timings), AlertPhase::Fading);
        assert_eq!(alert.phase_at(created + 5_300.0, &timings), AlertPhase::Removed);
    }

    #[test]
    fn test_removal_deadline() {
        let alert = AlertRecord::new("Copied to clipboard!", Severity::Success, 0.0);
        assert_eq!(alert.removal_deadline(&Timings::default()), 5_300.0);
    }

    #[test]
    fn test_delay_until_next_phase() {
        let timings = Timings::default();
        let alert = AlertRecord::new("Copied to clipboard!", Severity::Success, 1_000.0);

        assert_eq!(alert.delay_until_next_phase(1_000.0, &timings), Some(5_000));
        assert_eq!(alert.delay_until_next_phase(3_500.5, &timings), Some(2_500));
        assert_eq!(alert.delay_until_next_phase(6_000.0, &timings), Some(300));
        assert_eq!(alert.delay_until_next_phase(6_250.0, &timings), Some(50));
        assert_eq!(alert.delay_until_next_phase(6_300.0, &timings), None);
    }

    #[test]
    fn test_delays_follow_configured_timings() {
        let timings = Timings {
            alert_dismiss_ms: 20,
            alert_fade_ms: 10,
            ..Timings::default()
        };
        let alert = AlertRecord::new("hi", Severity::Info, 0.0);

        assert_eq!(alert.delay_until_next_phase(0.0, &timings), Some(20));
        assert_eq!(alert.delay_until_next_phase(20.0, &timings), Some(10));
        assert_eq!(alert.removal_deadline(&timings), 30.0);
    }

    #[test]
    fn test_serialization() {
        let alert = AlertRecord::new("hi", Severity::Warning, 12.5);

        let json = serde_json::to_string(&alert).unwrap();
        assert!(json.contains("\"warning\""));

        let deserialized: AlertRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, alert);
    }
}
