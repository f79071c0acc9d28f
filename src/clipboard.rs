/// Clipboard copy outcomes and how they are reported
use crate::alerts::Severity;
use crate::config::Messages;

/// Mechanism that performed a successful copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    /// `navigator.clipboard.writeText`
    AsyncClipboard,
    /// Off-screen textarea plus `execCommand("copy")`
    LegacyCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(CopyMethod),
    Failed(String),
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied(_))
    }

    /// Message and severity of the alert shown for this outcome
    pub fn notification(&self, messages: &Messages) -> (String, Severity) {
        match self {
            CopyOutcome::Copied(_) => (messages.copied.clone(), Severity::Success),
            CopyOutcome::Failed(_) => (messages.copy_failed.clone(), Severity::Error),
        }
    }
}
