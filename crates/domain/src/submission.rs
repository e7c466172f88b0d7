use serde::{Deserialize, Serialize};

/// Lifecycle of one form's submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Waiting for input; submit is enabled.
    #[default]
    Idle,
    /// Checking values against the schema.
    Validating,
    /// Validated payload handed to the dispatcher.
    Submitting,
    /// Dispatcher accepted the payload.
    Succeeded,
    /// Dispatcher rejected the payload or could not be reached.
    Failed,
}

impl SubmissionState {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Returns whether a submission cycle is running. Only `Idle` accepts a
    /// new submit.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Outcome reported by a dispatch handler.
///
/// `ok: false` is an ordinary business-level rejection, not an error. The
/// wire shape is `{ "ok": bool, "data": string? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Whether the handler accepted the payload.
    pub ok: bool,
    /// Human-readable explanation.
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DispatchResult {
    /// Creates an accepted result.
    #[must_use]
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: Some(message.into()),
        }
    }

    /// Creates a rejected result.
    #[must_use]
    pub fn rejected(message: Option<String>) -> Self {
        Self { ok: false, message }
    }

    /// Returns the message if present and not blank.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }
}
