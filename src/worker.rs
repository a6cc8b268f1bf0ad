//! Background threads driving tracking sessions.
//!
//! A [`TrackingWorker`] calls a tick function at a fixed interval until it is
//! stopped or the function breaks. A [`DelayedTask`] runs a function once after
//! a delay unless cancelled first. Both sleep on a channel, so stopping wakes
//! them immediately, and both join their thread on stop: once `stop` or
//! `cancel` returns, the closure is no longer running and never will again.

use log::{debug, warn};
use std::io;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Periodic tick loop on its own thread.
#[derive(Debug)]
pub struct TrackingWorker {
    name: String,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TrackingWorker {
    /// Spawns a thread calling `tick` immediately and then every `interval`.
    ///
    /// # Errors
    /// Returns an error if the operating system refuses to create the thread.
    pub fn spawn<F>(name: &str, interval: Duration, mut tick: F) -> io::Result<Self>
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                loop {
                    if tick().is_break() {
                        break;
                    }
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        debug!("Worker '{name}' started");
        Ok(Self {
            name: name.to_string(),
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the loop ended on its own or was stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stops the loop and waits for the thread. Calling it again is a no-op.
    pub fn stop(&mut self) {
        drop(self.stop_tx.take());
        if let Some(handle) = self.handle.take() {
            join(&self.name, handle);
        }
    }
}

impl Drop for TrackingWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One-shot function run after a delay.
#[derive(Debug)]
pub struct DelayedTask {
    name: String,
    cancel_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    fired: Arc<AtomicBool>,
}

impl DelayedTask {
    /// Schedules `task` to run on a new thread after `delay`.
    ///
    /// # Errors
    /// Returns an error if the operating system refuses to create the thread.
    pub fn schedule<F>(name: &str, delay: Duration, task: F) -> io::Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let fired = Arc::new(AtomicBool::new(false));
        let fired_flag = Arc::clone(&fired);

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(delay) {
                    fired_flag.store(true, Ordering::Release);
                    task();
                }
            })?;

        Ok(Self {
            name: name.to_string(),
            cancel_tx: Some(cancel_tx),
            handle: Some(handle),
            fired,
        })
    }

    /// Whether the task started running.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Cancels the task and waits for its thread.
    ///
    /// Returns `true` if the task was cancelled before it ran, `false` if it
    /// already ran.
    pub fn cancel(&mut self) -> bool {
        drop(self.cancel_tx.take());
        if let Some(handle) = self.handle.take() {
            join(&self.name, handle);
        }
        !self.has_fired()
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn join(name: &str, handle: JoinHandle<()>) {
    if handle.thread().id() == thread::current().id() {
        // Stopped from its own tick; the loop exits once the tick returns.
        return;
    }
    match handle.join() {
        Ok(()) => debug!("Worker '{name}' joined"),
        Err(err) => warn!("Worker '{name}' panicked: {err:?}"),
    }
}
