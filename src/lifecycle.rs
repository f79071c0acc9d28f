/// Loading-state machine for the submit button and the quality buttons
///
/// Each actionable button owns one `ButtonMachine`. Every transition goes
/// through it, and the DOM layer only writes what a transition returns.
use crate::feedback::FieldFeedback;
use crate::validator::ValidationState;
use log::debug;

/// State of a single button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Enabled,
    /// Holds the label shown before loading started
    Loading { original_label: String },
    Disabled,
}

/// Proof of one loading transition; stale tickets are ignored on release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingTicket {
    generation: u64,
}

/// DOM writes needed to leave the loading state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restore {
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct ButtonMachine {
    state: ButtonState,
    /// Enablement requested by validation, applied once loading ends
    validity_enabled: bool,
    generation: u64,
}

impl ButtonMachine {
    pub fn new() -> Self {
        ButtonMachine {
            state: ButtonState::Enabled,
            validity_enabled: true,
            generation: 0,
        }
    }

    pub fn state(&self) -> &ButtonState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ButtonState::Loading { .. })
    }

    /// Record a validation result
    ///
    /// Returns the enabled flag to write, or `None` while loading (the result
    /// is kept and applied on release).
    pub fn apply_validation(&mut self, validation: ValidationState) -> Option<bool> {
        self.validity_enabled = FieldFeedback::from(validation).submit_enabled;

        if self.is_loading() {
            debug!("validation {:?} deferred while loading", validation);
            return None;
        }

        self.state = if self.validity_enabled {
            ButtonState::Enabled
        } else {
            ButtonState::Disabled
        };
        Some(self.validity_enabled)
    }

    /// Enter the loading state, remembering `current_label` for restoration
    ///
    /// A button that is already loading keeps its first recorded label. Every
    /// call issues a fresh ticket and invalidates earlier ones.
    pub fn begin_loading(&mut self, current_label: String) -> LoadingTicket {
        self.generation += 1;

        if !self.is_loading() {
            self.state = ButtonState::Loading {
                original_label: current_label,
            };
        }

        debug!("button loading (generation {})", self.generation);
        LoadingTicket {
            generation: self.generation,
        }
    }

    /// Leave the loading state if `ticket` is still the latest one
    pub fn release(&mut self, ticket: LoadingTicket) -> Option<Restore> {
        if ticket.generation != self.generation {
            debug!(
                "ignoring stale release (ticket {}, current {})",
                ticket.generation, self.generation
            );
            return None;
        }
        self.finish()
    }

    /// Leave the loading state regardless of ticket (page restored, completion)
    pub fn complete(&mut self) -> Option<Restore> {
        self.generation += 1;
        self.finish()
    }

    fn finish(&mut self) -> Option<Restore> {
        let next = if self.validity_enabled {
            ButtonState::Enabled
        } else {
            ButtonState::Disabled
        };

        match std::mem::replace(&mut self.state, next) {
            ButtonState::Loading { original_label } => Some(Restore {
                label: original_label,
                enabled: self.validity_enabled,
            }),
            previous => {
                // Never loaded, so nothing to restore
                self.state = previous;
                None
            }
        }
    }
}

impl Default for ButtonMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of intercepting a form submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Cancel the native submission and tell the user the URL is missing
    BlockEmpty,
    Proceed,
}

pub fn review_submission(url_value: &str) -> SubmitDecision {
    if url_value.trim().is_empty() {
        SubmitDecision::BlockEmpty
    } else {
        SubmitDecision::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loading_label(machine: &ButtonMachine) -> Option<&str> {
        match machine.state() {
            ButtonState::Loading { original_label } => Some(original_label),
            _ => None,
        }
    }

    #[test]
    fn test_new_machine_is_enabled() {
        let machine = ButtonMachine::new();
        assert_eq!(machine.state(), &ButtonState::Enabled);
        assert!(!machine.is_loading());
    }

    #[test]
    fn test_validation_drives_enablement() {
        let mut machine = ButtonMachine::new();

        assert_eq!(machine.apply_validation(ValidationState::Invalid), Some(false));
        assert_eq!(machine.state(), &ButtonState::Disabled);

        assert_eq!(machine.apply_validation(ValidationState::Valid), Some(true));
        assert_eq!(machine.state(), &ButtonState::Enabled);

        machine.apply_validation(ValidationState::Invalid);
        assert_eq!(machine.apply_validation(ValidationState::Unvalidated), Some(true));
        assert_eq!(machine.state(), &ButtonState::Enabled);
    }

    #[test]
    fn test_quality_click_then_safety_release() {
        let mut machine = ButtonMachine::new();

        let ticket = machine.begin_loading("Download HD".to_string());
        assert!(machine.is_loading());
        assert_eq!(loading_label(&machine), Some("Download HD"));

        let restore = machine.release(ticket);
        assert_eq!(
            restore,
            Some(Restore {
                label: "Download HD".to_string(),
                enabled: true,
            })
        );
        assert_eq!(machine.state(), &ButtonState::Enabled);
    }

    #[test]
    fn test_second_click_keeps_first_label() {
        let mut machine = ButtonMachine::new();

        machine.begin_loading("Download HD".to_string());
        let ticket = machine.begin_loading("Processing...".to_string());

        assert_eq!(loading_label(&machine), Some("Download HD"));
        assert_eq!(machine.release(ticket).map(|r| r.label), Some("Download HD".to_string()));
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut machine = ButtonMachine::new();

        let first = machine.begin_loading("Download".to_string());
        let second = machine.begin_loading("Download".to_string());

        assert_eq!(machine.release(first), None);
        assert!(machine.is_loading());
        assert!(machine.release(second).is_some());
    }

    #[test]
    fn test_old_ticket_cannot_release_a_newer_loading_cycle() {
        let mut machine = ButtonMachine::new();

        let old = machine.begin_loading("Download".to_string());
        assert!(machine.release(old).is_some());

        machine.begin_loading("Download".to_string());
        assert_eq!(machine.release(old), None);
        assert!(machine.is_loading());
    }

    #[test]
    fn test_release_without_loading_is_noop() {
        let mut machine = ButtonMachine::new();
        machine.apply_validation(ValidationState::Invalid);

        assert_eq!(machine.complete(), None);
        assert_eq!(machine.state(), &ButtonState::Disabled);
    }

    #[test]
    fn test_validation_during_loading_is_deferred() {
        let mut machine = ButtonMachine::new();
        let ticket = machine.begin_loading("Download".to_string());

        assert_eq!(machine.apply_validation(ValidationState::Invalid), None);
        assert!(machine.is_loading());

        let restore = machine.release(ticket).unwrap();
        assert!(!restore.enabled);
        assert_eq!(machine.state(), &ButtonState::Disabled);
    }

    #[test]
    fn test_complete_releases_any_loading() {
        let mut machine = ButtonMachine::new();
        let ticket = machine.begin_loading("Download".to_string());

        assert!(machine.complete().is_some());
        // The pending safety timeout must not fire a second restore
        assert_eq!(machine.release(ticket), None);
    }

    #[test]
    fn test_review_submission() {
        assert_eq!(review_submission(""), SubmitDecision::BlockEmpty);
        assert_eq!(review_submission("   "), SubmitDecision::BlockEmpty);
        assert_eq!(
            review_submission("https://vm.tiktok.com/ZMabc123/"),
            SubmitDecision::Proceed
        );
        // Only blankness is checked here; format is the validator's concern
        assert_eq!(review_submission("whatever"), SubmitDecision::Proceed);
    }
}
