//! `MessageStore`: canonical state of every tracked message.

use super::{Message, MessageStatus, Update};
use crate::error::PushError;
use std::collections::HashMap;
use std::time::Instant;

/// Holds in-progress messages by key and finished messages in completion order.
///
/// A message lives in exactly one of the two collections. Once finished it
/// is never moved back; a later push with the same key and an in-progress
/// status starts a new, independent message under that key.
#[derive(Debug, Default)]
pub struct MessageStore {
    /// In-progress messages by key, with their insertion sequence.
    in_progress: HashMap<String, (u64, Message)>,
    /// Finished messages, append-only.
    finished: Vec<Message>,
    /// Next insertion sequence.
    next_seq: u64,
}

impl MessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an update, creating the message if its key is not in progress.
    ///
    /// Creating requires non-empty message text and a status. Updates to an
    /// existing message may leave any field unset to keep its value.
    pub fn push(&mut self, update: &Update) -> Result<(), PushError> {
        self.push_at(update, Instant::now())
    }

    fn push_at(&mut self, update: &Update, now: Instant) -> Result<(), PushError> {
        let key = update.identity().ok_or(PushError::MissingIdentity)?;

        let (seq, mut msg) = match self.in_progress.remove(key) {
            Some(entry) => entry,
            None => {
                if update.message_text().is_none() {
                    return Err(PushError::EmptyMessage);
                }
                let status = update
                    .status
                    .ok_or_else(|| PushError::InvalidStatus(String::new()))?;
                (self.take_seq(), Message::new("", status))
            }
        };

        msg.apply(update, now);
        self.file(seq, msg);
        Ok(())
    }

    /// Insert a prebuilt message, keeping its timestamps.
    ///
    /// Useful for historical data. Live progress should use [`Self::push`].
    pub fn add(&mut self, mut msg: Message) -> Result<(), PushError> {
        if msg.message.is_empty() {
            return Err(PushError::EmptyMessage);
        }
        if msg.key.is_empty() {
            msg.key.clone_from(&msg.message);
        }

        // Replacing an in-progress message keeps its place in line.
        let seq = match self.in_progress.remove(&msg.key) {
            Some((seq, _)) => seq,
            None => self.take_seq(),
        };
        self.file(seq, msg);
        Ok(())
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn file(&mut self, seq: u64, msg: Message) {
        if msg.status.is_finished() {
            self.finished.push(msg);
        } else {
            self.in_progress.insert(msg.key.clone(), (seq, msg));
        }
    }

    /// In-progress messages: unstarted first by creation time, then started
    /// ones by start time. Ties keep insertion order.
    pub fn list_in_progress(&self) -> Vec<&Message> {
        let mut entries: Vec<&(u64, Message)> = self.in_progress.values().collect();
        entries.sort_by_key(|(seq, msg)| match msg.started {
            None => (false, msg.created, *seq),
            Some(started) => (true, Some(started), *seq),
        });
        entries.into_iter().map(|(_, msg)| msg).collect()
    }

    /// Finished messages in the order they finished.
    pub fn list_finished(&self) -> &[Message] {
        &self.finished
    }

    /// Whether any message is still in progress.
    pub fn has_in_progress(&self) -> bool {
        !self.in_progress.is_empty()
    }

    /// Finish every in-progress message: pending ones become skipped,
    /// started ones unknown.
    pub fn close(&mut self) {
        let now = Instant::now();
        let closing: Vec<Update> = self
            .list_in_progress()
            .into_iter()
            .map(|msg| {
                let status = match msg.status {
                    MessageStatus::Pending => MessageStatus::Skipped,
                    _ => MessageStatus::Unknown,
                };
                Update::for_key(msg.key.as_str()).status(status)
            })
            .collect();

        for update in &closing {
            if let Err(err) = self.push_at(update, now) {
                tracing::warn!(error = %err, "failed to close message");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn started(message: &str) -> Update {
        Update::new(message).status(MessageStatus::Started)
    }

    #[test]
    fn test_push_errors() {
        let cases = [
            (
                Update::default().status(MessageStatus::Success),
                PushError::MissingIdentity,
            ),
            (
                Update::for_key("test").status(MessageStatus::Success),
                PushError::EmptyMessage,
            ),
            (Update::new("Testing"), PushError::InvalidStatus(String::new())),
        ];

        for (update, expected) in cases {
            let mut store = MessageStore::new();
            assert_eq!(store.push(&update), Err(expected));
            assert!(store.list_in_progress().is_empty());
            assert!(store.list_finished().is_empty());
        }
    }

    #[test]
    fn test_list_in_progress_and_finished() {
        let mut store = MessageStore::new();

        store.push(&Update::new("2nd").status(MessageStatus::Pending)).unwrap();
        store.push(&started("1st")).unwrap();
        store.push(&started("2nd")).unwrap();

        let messages = store.list_in_progress();
        assert!(store.list_finished().is_empty());
        assert_eq!(messages[0].message, "1st");
        assert_eq!(messages[1].message, "2nd");

        store.push(&Update::new("2nd").status(MessageStatus::Success)).unwrap();
        assert_eq!(store.list_in_progress().len(), 1);
        assert_eq!(store.list_finished().len(), 1);
    }

    #[test]
    fn test_unstarted_sort_before_started() {
        let mut store = MessageStore::new();
        store.push(&started("running")).unwrap();
        store.push(&Update::new("queued-a").status(MessageStatus::Pending)).unwrap();
        store.push(&Update::new("queued-b").status(MessageStatus::Pending)).unwrap();

        let order: Vec<_> = store
            .list_in_progress()
            .iter()
            .map(|m| m.message.as_str())
            .collect();
        assert_eq!(order, ["queued-a", "queued-b", "running"]);
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let mut store = MessageStore::new();
        let now = Instant::now();
        for name in ["c", "a", "b"] {
            store.push_at(&started(name), now).unwrap();
        }

        let order: Vec<_> = store
            .list_in_progress()
            .iter()
            .map(|m| m.key.as_str())
            .collect();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[test]
    fn test_push_updates_message() {
        let mut store = MessageStore::new();
        let t0 = Instant::now();

        store
            .push_at(&Update::new("Testing").key("test").status(MessageStatus::Pending), t0)
            .unwrap();
        let msg = store.list_in_progress()[0];
        assert_eq!(msg.message, "Testing");
        assert!(msg.started.is_none());
        assert!(msg.finished.is_none());

        let t1 = t0 + Duration::from_secs(1);
        store
            .push_at(&Update::new("Still testing").key("test").status(MessageStatus::Started), t1)
            .unwrap();
        let msg = store.list_in_progress()[0];
        assert_eq!(msg.message, "Still testing");
        assert_eq!(msg.started, Some(t1));

        let t2 = t1 + Duration::from_secs(1);
        store
            .push_at(
                &Update::for_key("test").status(MessageStatus::Error).details("Test details"),
                t2,
            )
            .unwrap();
        assert!(store.list_in_progress().is_empty());
        let msg = &store.list_finished()[0];
        assert_eq!(msg.message, "Still testing");
        assert_eq!(msg.started, Some(t1));
        assert_eq!(msg.finished, Some(t2));
        assert_eq!(msg.details, "Test details");
    }

    #[test]
    fn test_implicit_key_from_message() {
        let mut store = MessageStore::new();
        store.push(&started("A")).unwrap();
        store.push(&Update::new("A").status(MessageStatus::Success)).unwrap();

        assert!(store.list_in_progress().is_empty());
        assert_eq!(store.list_finished().len(), 1);
        assert_eq!(store.list_finished()[0].status, MessageStatus::Success);
    }

    #[test]
    fn test_progress_only_update_keeps_message_and_status() {
        let mut store = MessageStore::new();
        store.push(&started("hello").key("k")).unwrap();
        store.push(&Update::for_key("k").progress_message("(50%)")).unwrap();

        let msg = store.list_in_progress()[0];
        assert_eq!(msg.message, "hello");
        assert_eq!(msg.status, MessageStatus::Started);
        assert_eq!(msg.progress_message, "(50%)");
    }

    #[test]
    fn test_existing_key_ignores_missing_status() {
        let mut store = MessageStore::new();
        store.push(&Update::new("x").status(MessageStatus::Pending)).unwrap();
        assert_eq!(store.push(&Update::new("x")), Ok(()));
        assert_eq!(store.list_in_progress()[0].status, MessageStatus::Pending);
    }

    #[test]
    fn test_finished_key_starts_new_message() {
        let mut store = MessageStore::new();
        store.push(&started("job")).unwrap();
        store.push(&Update::new("job").status(MessageStatus::Success)).unwrap();

        assert_eq!(
            store.push(&Update::for_key("job").status(MessageStatus::Started)),
            Err(PushError::EmptyMessage)
        );
        store.push(&started("job")).unwrap();

        assert_eq!(store.list_finished().len(), 1);
        assert_eq!(store.list_in_progress().len(), 1);
        assert_eq!(store.list_in_progress()[0].key, "job");
    }

    #[test]
    fn test_finished_order_is_completion_order() {
        let mut store = MessageStore::new();
        for name in ["a", "b", "c"] {
            store.push(&started(name)).unwrap();
        }
        for name in ["b", "c", "a"] {
            store.push(&Update::new(name).status(MessageStatus::Success)).unwrap();
        }

        let order: Vec<_> = store.list_finished().iter().map(|m| m.key.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn test_add_validates_and_files() {
        let mut store = MessageStore::new();
        assert_eq!(
            store.add(Message::new("", MessageStatus::Success)),
            Err(PushError::EmptyMessage)
        );

        let start = Instant::now();
        let mut historical = Message::new("Done earlier", MessageStatus::Success);
        historical.started = Some(start);
        historical.finished = Some(start + Duration::from_secs(100));
        store.add(historical).unwrap();
        store.add(Message::new("Waiting", MessageStatus::Pending)).unwrap();

        let finished = &store.list_finished()[0];
        assert_eq!(finished.key, "Done earlier");
        assert_eq!(finished.elapsed(), Duration::from_secs(100));
        assert_eq!(store.list_in_progress()[0].key, "Waiting");
    }

    #[test]
    fn test_timestamps_are_ordered() {
        let mut store = MessageStore::new();
        store.push(&Update::new("job").status(MessageStatus::Pending)).unwrap();
        store.push(&started("job")).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        store.push(&Update::new("job").status(MessageStatus::Success)).unwrap();

        let msg = &store.list_finished()[0];
        let (created, started, finished) = (
            msg.created.unwrap(),
            msg.started.unwrap(),
            msg.finished.unwrap(),
        );
        assert!(created <= started && started <= finished);
        assert!(msg.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_add_replaces_in_progress_in_place() {
        let mut store = MessageStore::new();
        let now = Instant::now();
        for name in ["a", "b"] {
            store.push_at(&started(name), now).unwrap();
        }

        let mut replacement = Message::new("a again", MessageStatus::Started);
        replacement.key = "a".into();
        replacement.started = Some(now);
        store.add(replacement).unwrap();

        let order: Vec<_> = store
            .list_in_progress()
            .iter()
            .map(|m| m.message.as_str())
            .collect();
        assert_eq!(order, ["a again", "b"]);
    }

    #[test]
    fn test_close_finalizes_everything() {
        let mut store = MessageStore::new();
        store.push(&Update::new("queued").status(MessageStatus::Pending)).unwrap();
        store.push(&started("running")).unwrap();
        store.push(&started("done")).unwrap();
        store.push(&Update::new("done").status(MessageStatus::Success)).unwrap();

        store.close();

        assert!(store.list_in_progress().is_empty());
        assert!(!store.has_in_progress());
        let statuses: Vec<_> = store
            .list_finished()
            .iter()
            .map(|m| (m.key.as_str(), m.status))
            .collect();
        assert_eq!(
            statuses,
            [
                ("done", MessageStatus::Success),
                ("queued", MessageStatus::Skipped),
                ("running", MessageStatus::Unknown),
            ]
        );

        store.close();
        assert_eq!(store.list_finished().len(), 3);
    }
}
