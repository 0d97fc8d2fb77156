//! Error types reported to callers.
//!
//! Only recoverable conditions live here. Lifecycle misuse (starting twice,
//! pushing after stop, ...) panics instead, see [`crate::Progress`].

use thiserror::Error;

/// Reasons a [`crate::Update`] can be rejected.
///
/// A rejected update never modifies the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    /// Neither `key` nor `message` was given.
    #[error("can not push message without key or message")]
    MissingIdentity,

    /// A new message must carry its text.
    #[error("can not push message with empty message")]
    EmptyMessage,

    /// A new message needs one of the seven known statuses.
    ///
    /// Holds the offending value; empty when the status was missing.
    #[error("can not push message with invalid status \"{0}\"")]
    InvalidStatus(String),

    /// The progress log has not been started yet.
    #[error("can not push updates into progress log that has not been started")]
    NotStarted,
}

/// Returned when parsing a [`crate::MessageStatus`] from text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown message status \"{0}\"")]
pub struct ParseStatusError(pub String);

impl From<ParseStatusError> for PushError {
    fn from(err: ParseStatusError) -> Self {
        Self::InvalidStatus(err.0)
    }
}
