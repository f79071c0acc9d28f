/// Visual feedback for the URL field
use crate::config::MarkerClasses;
use crate::validator::ValidationState;

/// Style marker applied to the URL input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Valid,
    Invalid,
}

impl Marker {
    pub fn class_name<'a>(&self, classes: &'a MarkerClasses) -> &'a str {
        match self {
            Marker::Valid => &classes.valid,
            Marker::Invalid => &classes.invalid,
        }
    }
}

/// What the binder writes to the page for one validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFeedback {
    /// `None` clears both markers
    pub marker: Option<Marker>,
    pub submit_enabled: bool,
}

impl From<ValidationState> for FieldFeedback {
    fn from(state: ValidationState) -> Self {
        match state {
            ValidationState::Valid => FieldFeedback {
                marker: Some(Marker::Valid),
                submit_enabled: true,
            },
            ValidationState::Invalid => FieldFeedback {
                marker: Some(Marker::Invalid),
                submit_enabled: false,
            },
            // An empty field must not block submission forever
            ValidationState::Unvalidated => FieldFeedback {
                marker: None,
                submit_enabled: true,
            },
        }
    }
}

impl FieldFeedback {
    /// Classes to remove and the class to add, in that order
    pub fn class_changes<'a>(&self, classes: &'a MarkerClasses) -> (Vec<&'a str>, Option<&'a str>) {
        match self.marker {
            Some(marker) => {
                let opposite = match marker {
                    Marker::Valid => Marker::Invalid,
                    Marker::Invalid => Marker::Valid,
                };
                (vec![opposite.class_name(classes)], Some(marker.class_name(classes)))
            }
            None => (vec![classes.valid.as_str(), classes.invalid.as_str()], None),
        }
    }
}
