//! Worker: the single thread that owns the store and the renderer.
//!
//! Three event sources feed the loop: a stop signal, push requests and a
//! periodic tick. Each is handled to completion before the next is taken,
//! which gives one global order of updates and renders.

use super::messages::{Request, Stop};
use crate::message::MessageStore;
use crate::render::MessageRenderer;
use crossbeam_channel::{select, tick, Receiver};
use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// State owned by the worker thread.
pub struct Worker {
    store: MessageStore,
    renderer: MessageRenderer,
    /// First sink failure, reported when the worker stops.
    first_error: Option<io::Error>,
}

impl Worker {
    /// Create a worker rendering with `renderer`.
    pub fn new(renderer: MessageRenderer) -> Self {
        Self {
            store: MessageStore::new(),
            renderer,
            first_error: None,
        }
    }

    /// Spawn the worker thread.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    pub fn spawn(
        self,
        requests: Receiver<Request>,
        stop: Receiver<Stop>,
        tick_interval: Duration,
    ) -> JoinHandle<()> {
        thread::Builder::new()
            .name("progressline-worker".to_string())
            .spawn(move || self.run_loop(&requests, &stop, tick_interval))
            .expect("Failed to spawn progress worker thread")
    }

    /// Main worker loop.
    fn run_loop(mut self, requests: &Receiver<Request>, stop: &Receiver<Stop>, interval: Duration) {
        tracing::debug!(?interval, "progress worker started");
        let ticker = tick(interval);

        loop {
            select! {
                recv(stop) -> msg => {
                    // Requests already queued were sent before the stop.
                    while let Ok(request) = requests.try_recv() {
                        self.handle(request);
                    }
                    let result = self.finish();
                    if let Ok(Stop { done }) = msg {
                        let _ = done.send(result);
                    }
                    return;
                }
                recv(requests) -> msg => {
                    if let Ok(request) = msg {
                        self.handle(request);
                    } else {
                        // Every handle is gone; nobody is left to stop us.
                        let _ = self.finish();
                        return;
                    }
                }
                recv(ticker) -> _ => self.render(),
            }
        }
    }

    fn handle(&mut self, request: Request) {
        match request {
            Request::Push { update, reply } => {
                let result = self.store.push(&update);
                if let Err(err) = &result {
                    tracing::trace!(error = %err, "rejected progress update");
                }
                let accepted = result.is_ok();
                // The caller may have given up waiting; nothing to do then.
                let _ = reply.send(result);
                if accepted {
                    self.render();
                }
            }
        }
    }

    fn render(&mut self) {
        if let Err(err) = self.renderer.render(&self.store) {
            tracing::warn!(error = %err, "failed to write progress output");
            self.first_error.get_or_insert(err);
        }
    }

    /// Close the store, render the final state and report the first sink error.
    fn finish(&mut self) -> io::Result<()> {
        self.store.close();
        self.render();
        tracing::debug!(
            finished = self.store.list_finished().len(),
            "progress worker stopped"
        );
        self.first_error.take().map_or(Ok(()), Err)
    }
}
