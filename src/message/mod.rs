//! Message state: statuses, updates and the store that reconciles them.
//!
//! Producers describe work with [`Update`]s. The [`MessageStore`] turns
//! them into [`Message`]s, stamps their timestamps and files each one as
//! either in progress or finished.
//!
//! ```text
//!   Update ──▶ MessageStore::push ──▶ in_progress (key → Message)
//!                                          │ finished status
//!                                          ▼
//!                                     finished (append-only)
//! ```

mod message;
mod status;
mod store;

pub use message::{Message, Update};
pub use status::MessageStatus;
pub use store::MessageStore;
