//! Message types for worker communication.
//!
//! These define the protocol between producer threads and the worker that
//! owns the store and renderer. Every request carries its own reply channel.

use crate::error::PushError;
use crate::message::Update;
use crossbeam_channel::Sender;
use std::io;

/// Requests serviced by the worker, in arrival order.
#[derive(Debug)]
pub enum Request {
    /// Apply an update and report the validation result.
    Push {
        /// The update to apply.
        update: Update,
        /// Receives the store's verdict.
        reply: Sender<Result<(), PushError>>,
    },
}

/// Ask the worker to finalize every open message, render once more and exit.
#[derive(Debug)]
pub struct Stop {
    /// Receives the first sink error of the session, if any.
    pub done: Sender<io::Result<()>>,
}
