//! Rendering: turns store snapshots into terminal output.
//!
//! [`MessageRenderer`] is stateful. Each pass writes only what changed since
//! the previous one: newly finished lines are committed to the scrollback
//! and the live block of started messages is erased and repainted.

mod config;
mod format;
mod renderer;

pub use config::{ColorChoice, OutputConfig, StatusMap, Target};
pub use format::{elapsed_text, fit_to_width, ELLIPSIS};
pub use renderer::{Frame, MessageRenderer};
