//! Presentation-agnostic status of the save indicator and submit control.

/// Shown when a submit request gets no reply.
pub const SUBMIT_NETWORK_ERROR: &str =
    "An error occurred while submitting the form. Please try again.";

/// What the save indicator shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// Nothing (also the state after a successful save has been shown).
    #[default]
    Idle,
    Saving,
    Saved,
    Failed,
}

/// State of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitControl {
    #[default]
    Enabled,

    /// Disabled while a submit request is in flight, and after success.
    Submitting,
}

impl SubmitControl {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}
