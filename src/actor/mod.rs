//! Actor Model: one worker thread owns all mutable progress state.
//!
//! Producers never touch the store or the renderer. They send requests over
//! crossbeam channels and block for the reply:
//!
//! ```text
//! ┌────────────┐  Request::Push   ┌──────────────────────────┐
//! │ producer 1 │ ───────────────▶ │          Worker          │
//! └────────────┘ ◀─────────────── │                          │
//!                  Result         │  MessageStore            │   bytes   ┌──────┐
//! ┌────────────┐                  │  MessageRenderer ───────────────▶ │ sink │
//! │ producer N │ ───────────────▶ │                          │           └──────┘
//! └────────────┘                  │  tick (≈95 ms) ──▶ render│
//!                      Stop ────▶ │                          │
//!                                 └──────────────────────────┘
//! ```

mod messages;
mod progress;
mod worker;

pub use progress::{Progress, DEFAULT_TICK_INTERVAL};
