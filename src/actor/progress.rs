//! Progress: the public entry point tying producers to the worker.
//!
//! A `Progress` moves through three states exactly once each:
//!
//! ```text
//! NotStarted ──start()──▶ Running ──stop()──▶ Stopped
//! ```
//!
//! Calls that do not fit the current state are caller bugs and panic, with
//! one exception: pushing before `start` returns [`PushError::NotStarted`].

use super::messages::{Request, Stop};
use super::worker::Worker;
use crate::error::PushError;
use crate::message::Update;
use crate::render::{MessageRenderer, OutputConfig};
use crossbeam_channel::{bounded, unbounded, Sender};
use parking_lot::Mutex;
use std::io;
use std::thread::JoinHandle;
use std::time::Duration;

/// Interval between refreshes when no updates arrive.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(95);

enum Lifecycle {
    NotStarted(Box<MessageRenderer>),
    Running(Running),
    Stopped,
}

struct Running {
    requests: Sender<Request>,
    stop: Sender<Stop>,
    handle: JoinHandle<()>,
}

impl Running {
    /// Ask the worker to finalize and wait until it has.
    fn finish(self) -> io::Result<()> {
        let (done_tx, done_rx) = bounded(1);
        let sent = self.stop.send(Stop { done: done_tx }).is_ok();
        let result = if sent {
            done_rx.recv().unwrap_or_else(|_| Err(worker_gone()))
        } else {
            Err(worker_gone())
        };
        let _ = self.handle.join();
        result
    }
}

fn worker_gone() -> io::Error {
    io::Error::other("progress worker exited unexpectedly")
}

/// Live progress log shared by any number of producer threads.
///
/// # Example
///
/// ```no_run
/// use progressline::{MessageStatus, OutputConfig, Progress, Update};
///
/// let progress = Progress::new(OutputConfig::default());
/// progress.start();
/// progress.push(Update::new("Compiling").key("build").status(MessageStatus::Started))?;
/// progress.push(Update::for_key("build").status(MessageStatus::Success))?;
/// progress.stop()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Progress {
    lifecycle: Mutex<Lifecycle>,
    tick_interval: Duration,
}

impl Progress {
    /// Create a progress log that renders with `config` once started.
    pub fn new(config: OutputConfig) -> Self {
        Self {
            lifecycle: Mutex::new(Lifecycle::NotStarted(Box::new(MessageRenderer::new(config)))),
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    /// Override the refresh interval.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Whether the log has been started and not yet stopped.
    pub fn is_running(&self) -> bool {
        matches!(*self.lifecycle.lock(), Lifecycle::Running(_))
    }

    /// Spawn the worker thread.
    ///
    /// # Panics
    ///
    /// Panics if called more than once.
    pub fn start(&self) {
        let mut lifecycle = self.lifecycle.lock();
        let renderer = match std::mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
            Lifecycle::NotStarted(renderer) => renderer,
            other => {
                *lifecycle = other;
                panic!("can not start progress log more than once");
            }
        };

        let (requests, request_rx) = unbounded();
        let (stop, stop_rx) = bounded(1);
        let handle = Worker::new(*renderer).spawn(request_rx, stop_rx, self.tick_interval);
        *lifecycle = Lifecycle::Running(Running {
            requests,
            stop,
            handle,
        });
        tracing::debug!("progress log started");
    }

    /// Apply an update, blocking until the worker has validated it.
    ///
    /// Updates from all threads are applied in the order they arrive.
    ///
    /// # Panics
    ///
    /// Panics if called after [`Self::stop`].
    pub fn push(&self, update: Update) -> Result<(), PushError> {
        let requests = match &*self.lifecycle.lock() {
            Lifecycle::NotStarted(_) => return Err(PushError::NotStarted),
            Lifecycle::Running(running) => running.requests.clone(),
            Lifecycle::Stopped => {
                panic!("can not push updates into progress log that has been stopped")
            }
        };

        let (reply, result) = bounded(1);
        if requests.send(Request::Push { update, reply }).is_err() {
            panic!("can not push updates into progress log that has been stopped");
        }
        result
            .recv()
            .unwrap_or_else(|_| panic!("progress log stopped before the update was applied"))
    }

    /// Finish every open message, render the final state and wait for the
    /// worker to exit.
    ///
    /// Rendering never fails a push. Instead, the first error writing to the
    /// output sink during the whole session is returned here.
    ///
    /// # Panics
    ///
    /// Panics if the log was never started or is already stopped.
    pub fn stop(&self) -> io::Result<()> {
        let running = {
            let mut lifecycle = self.lifecycle.lock();
            match std::mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
                Lifecycle::Running(running) => running,
                Lifecycle::NotStarted(renderer) => {
                    *lifecycle = Lifecycle::NotStarted(renderer);
                    panic!("can not stop progress log that has not been started");
                }
                Lifecycle::Stopped => panic!("can not stop progress log more than once"),
            }
        };

        let result = running.finish();
        tracing::debug!(ok = result.is_ok(), "progress log stopped");
        result
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        let lifecycle = std::mem::replace(self.lifecycle.get_mut(), Lifecycle::Stopped);
        if let Lifecycle::Running(running) = lifecycle {
            if let Err(err) = running.finish() {
                tracing::warn!(error = %err, "progress log dropped with output errors");
            }
        }
    }
}
