//! # Progressline
//!
//! A live progress log for CLIs running many tasks at once.
//!
//! Producers on any thread report status [`Update`]s about named tasks. A
//! single worker thread reconciles them into [`Message`]s and paints them
//! to the terminal. Finished tasks are committed to the scrollback once,
//! while running tasks stay in a live block that is erased and repainted
//! with a spinner. When the output is not a terminal, the same updates are
//! written as an append-only log instead.
//!
//! ## Core Concepts
//!
//! - **Message store**: merges partial, out-of-order updates by key and
//!   stamps created/started/finished times
//! - **Incremental rendering**: finished lines are written once; only the
//!   live block is repainted, reflowing correctly when the terminal narrows
//! - **Actor model**: one worker owns all mutable state; producers talk to
//!   it over channels and get a synchronous reply
//!
//! ## Example
//!
//! ```rust,no_run
//! use progressline::{MessageStatus, OutputConfig, Progress, Update};
//!
//! let progress = Progress::new(OutputConfig::default());
//! progress.start();
//!
//! progress.push(Update::new("Downloading").key("fetch").status(MessageStatus::Started))?;
//! progress.push(Update::for_key("fetch").progress_message("(50%)"))?;
//! progress.push(Update::for_key("fetch").status(MessageStatus::Success))?;
//!
//! progress.stop()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod error;
pub mod message;
pub mod render;
pub mod terminal;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use actor::{Progress, DEFAULT_TICK_INTERVAL};
pub use error::{ParseStatusError, PushError};
pub use message::{Message, MessageStatus, MessageStore, Update};
pub use render::{ColorChoice, MessageRenderer, OutputConfig, StatusMap, Target};
pub use terminal::{Color, FixedGeometry, Painter, Style, TerminalGeometry};
