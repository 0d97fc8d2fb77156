//! Message status: the closed set of states a tracked task can be in.

use crate::error::ParseStatusError;
use std::fmt;
use std::str::FromStr;

/// Status of a tracked message.
///
/// `Pending` and `Started` are in progress; every other status is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageStatus {
    /// Known about, but not running yet. Not rendered while active.
    Pending,
    /// Running. Rendered with a spinner on interactive targets.
    Started,
    /// Finished successfully.
    Success,
    /// Finished with a warning.
    Warning,
    /// Failed.
    Error,
    /// Never ran.
    Skipped,
    /// Outcome unknown, e.g. still running when the log was closed.
    Unknown,
}

impl MessageStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Started,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::Skipped,
        Self::Unknown,
    ];

    /// Lowercase name used in text form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Started => "started",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Skipped => "skipped",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the message should be animated while active.
    #[inline]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::Started)
    }

    /// Whether this status ends the message's lifecycle.
    #[inline]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Pending | Self::Started)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
