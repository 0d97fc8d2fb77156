//! Updates and the messages they build.

use super::MessageStatus;
use std::time::{Duration, Instant};

/// A request to create or change a [`Message`].
///
/// Every field is optional. Empty strings are treated like `None`, so
/// `Update::for_key("build").progress_message("(50%)")` changes only the
/// progress suffix of an existing message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    /// Stable identity. Falls back to `message` when unset.
    pub key: Option<String>,
    /// Message text.
    pub message: Option<String>,
    /// New status. `None` keeps the current one.
    pub status: Option<MessageStatus>,
    /// Extra text shown under the message once it is finished.
    pub details: Option<String>,
    /// Suffix shown after the message on interactive targets only.
    pub progress_message: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl Update {
    /// Update identified by its message text.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Update identified by an explicit key.
    pub fn for_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Set the key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the message text.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the status.
    #[must_use]
    pub const fn status(mut self, status: MessageStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the details.
    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Set the progress suffix.
    #[must_use]
    pub fn progress_message(mut self, progress: impl Into<String>) -> Self {
        self.progress_message = Some(progress.into());
        self
    }

    /// The key this update applies to: `key` if non-empty, else `message`.
    pub fn identity(&self) -> Option<&str> {
        non_empty(self.key.as_ref()).or_else(|| non_empty(self.message.as_ref()))
    }

    pub(crate) fn message_text(&self) -> Option<&str> {
        non_empty(self.message.as_ref())
    }
}

/// A tracked unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Stable identity.
    pub key: String,
    /// Text shown to the user.
    pub message: String,
    /// Current status.
    pub status: MessageStatus,
    /// Extra text shown once finished. Empty for none.
    pub details: String,
    /// Interactive-only suffix. Empty for none.
    pub progress_message: String,
    /// When the message was first seen.
    pub created: Option<Instant>,
    /// When the message left `Pending`.
    pub started: Option<Instant>,
    /// When the message reached a finished status.
    pub finished: Option<Instant>,
}

impl Message {
    /// A message with no timestamps, for use with [`super::MessageStore::add`].
    pub fn new(message: impl Into<String>, status: MessageStatus) -> Self {
        Self {
            key: String::new(),
            message: message.into(),
            status,
            details: String::new(),
            progress_message: String::new(),
            created: None,
            started: None,
            finished: None,
        }
    }

    /// Merge `update` into this message, stamping timestamps at `now`.
    pub(crate) fn apply(&mut self, update: &Update, now: Instant) {
        let status = update.status.unwrap_or(self.status);

        if self.created.is_none() {
            self.created = Some(now);
        }
        if status != MessageStatus::Pending && self.started.is_none() {
            self.started = Some(now);
        }
        if status.is_finished() {
            self.finished = Some(now);
            if self.started.is_none() {
                self.started = self.finished;
            }
        }

        if self.key.is_empty() {
            if let Some(key) = update.identity() {
                self.key = key.to_string();
            }
        }
        if let Some(message) = update.message_text() {
            self.message = message.to_string();
        }
        self.status = status;
        if let Some(details) = non_empty(update.details.as_ref()) {
            self.details = details.to_string();
        }
        if let Some(progress) = non_empty(update.progress_message.as_ref()) {
            self.progress_message = progress.to_string();
        }
    }

    /// Time spent since start; frozen once finished, zero before start.
    pub fn elapsed(&self) -> Duration {
        let Some(started) = self.started else {
            return Duration::ZERO;
        };
        let end = self.finished.unwrap_or_else(Instant::now);
        end.saturating_duration_since(started)
    }

    /// [`Self::elapsed`] in fractional seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}
