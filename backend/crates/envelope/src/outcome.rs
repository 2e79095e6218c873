//! Outcome keys and their resolution rules.
//!
//! An outcome key classifies a handler's business result independently of
//! the transport status code. Handlers may declare one explicitly; when
//! they do not, the key is inferred from the status code alone.

use serde::{Deserialize, Serialize};

/// Canonical "no content" status code used for no-op outcomes.
pub const NO_CONTENT: u16 = 204;

/// Semantic classification of a handler's result.
///
/// Exactly one key is attached to any normalized response. Serialized in
/// camelCase to match the wire contract (`sendMailFailed` and friends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKey {
    /// The operation completed as requested.
    Success,
    /// The operation ran but did not achieve its goal.
    Failed,
    /// The operation was a no-op; nothing was modified.
    Unchanged,
    /// The operation was accepted and awaits an out-of-band step.
    Pending,
    /// A notification mail could not be dispatched.
    SendMailFailed,
    /// A token or code was rejected as invalid or expired.
    InvalidOrExpired,
    /// A verification step completed.
    IsVerified,
    /// A verification step was repeated after already completing.
    AlreadyVerified,
}

impl OutcomeKey {
    /// Wire spelling of the key, used as the last message-key segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Unchanged => "unchanged",
            Self::Pending => "pending",
            Self::SendMailFailed => "sendMailFailed",
            Self::InvalidOrExpired => "invalidOrExpired",
            Self::IsVerified => "isVerified",
            Self::AlreadyVerified => "alreadyVerified",
        }
    }

    /// Resolve the effective outcome key for a response.
    ///
    /// A declared key always wins. Without one the status code decides:
    /// 204 reads as [`OutcomeKey::Unchanged`], any other success-range code
    /// as [`OutcomeKey::Success`], and everything else as
    /// [`OutcomeKey::Failed`].
    #[must_use]
    pub fn resolve(declared: Option<Self>, status: u16) -> Self {
        match declared {
            Some(key) => key,
            None if status == NO_CONTENT => Self::Unchanged,
            None if is_success_status(status) => Self::Success,
            None => Self::Failed,
        }
    }

    /// Whether a response counts as successful.
    ///
    /// Success is a conjunction of transport and domain signals: the status
    /// must sit in `[200, 300)` and the outcome must not be
    /// [`OutcomeKey::Failed`]. A 200 carrying a failed outcome (validation
    /// reported in-band, say) must not read as success.
    #[must_use]
    pub fn is_success(status: u16, key: Self) -> bool {
        is_success_status(status) && key != Self::Failed
    }
}

impl std::fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `status` falls in the HTTP success range `[200, 300)`.
#[must_use]
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}
