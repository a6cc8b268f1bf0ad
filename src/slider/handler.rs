//! Tracking session driving one slider.

use log::{debug, warn};
use std::ops::ControlFlow;
use std::sync::Mutex;

use super::Slider;
use crate::components::InstructionHolder;
use crate::config::GlobalConfig;
use crate::input::ActionError;
use crate::util::lock;
use crate::worker::TrackingWorker;

/// Ignores pointer travel until it leaves the deadzone, then moves the origin
/// to the deadzone edge so that the value does not jump.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeadzoneAnchor {
    origin: i32,
    deadzone: i32,
    passed: bool,
}

impl DeadzoneAnchor {
    pub(crate) fn new(origin: i32, deadzone: i32) -> Self {
        Self {
            origin,
            deadzone: deadzone.max(0),
            passed: false,
        }
    }

    /// Offset of `signal` from the anchor, or `None` while still inside the deadzone.
    pub(crate) fn offset(&mut self, signal: i32) -> Option<f64> {
        if !self.passed {
            let delta = signal - self.origin;
            if delta.abs() <= self.deadzone {
                return None;
            }
            self.passed = true;
            self.origin += self.deadzone * delta.signum();
        }
        Some(f64::from(signal - self.origin))
    }
}

/// Runs one slider while a key is held.
///
/// `start` snapshots the domain and spawns a worker that follows the signal at
/// the configured frame rate. `stop` joins the worker, so no value is written
/// after it returns. At most one session runs at a time.
pub struct SliderHandler {
    name: String,
    slider: Slider,
    config: GlobalConfig,
    instructions: InstructionHolder,
    worker: Mutex<Option<TrackingWorker>>,
}

impl SliderHandler {
    pub fn new(
        name: impl Into<String>,
        slider: Slider,
        config: GlobalConfig,
        instructions: InstructionHolder,
    ) -> Self {
        Self {
            name: name.into(),
            slider,
            config,
            instructions,
            worker: Mutex::new(None),
        }
    }

    /// Starts following `signal`, stopping any previous session first.
    ///
    /// # Errors
    /// Returns an error if the controller or its domain cannot be read, or if
    /// the worker thread cannot be spawned.
    pub fn start<F>(&self, signal: F) -> Result<(), ActionError>
    where
        F: Fn() -> i32 + Send + 'static,
    {
        self.stop();

        let mut adapter = self.slider.open()?;
        let sensitivity = self.slider.sensitivity() * self.config.tracker_sensitivity();
        let mut anchor = DeadzoneAnchor::new(signal(), self.config.tracker_deadzone());
        let instructions = self.instructions.clone();
        let name = self.name.clone();

        let worker = TrackingWorker::spawn(
            &format!("{} slider", self.name),
            self.config.tick_interval(),
            move || {
                let Some(offset) = anchor.offset(signal()) else {
                    return ControlFlow::Continue(());
                };
                match adapter.apply(offset, sensitivity) {
                    Ok(true) => {
                        if let Err(err) = instructions.update() {
                            warn!("{name}: instruction update failed: {err}");
                        }
                        ControlFlow::Continue(())
                    }
                    Ok(false) => ControlFlow::Continue(()),
                    Err(err) => {
                        warn!("{name}: stopping tracker after host error: {err}");
                        ControlFlow::Break(())
                    }
                }
            },
        )?;

        debug!("{}: slider session started", self.name);
        *lock(&self.worker) = Some(worker);
        Ok(())
    }

    /// Stops the running session, if any. Safe to call repeatedly.
    pub fn stop(&self) {
        let worker = lock(&self.worker).take();
        if let Some(mut worker) = worker {
            worker.stop();
            debug!("{}: slider session stopped", self.name);
        }
    }

    /// Whether a session is running.
    pub fn is_active(&self) -> bool {
        lock(&self.worker)
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }
}

impl Drop for SliderHandler {
    fn drop(&mut self) {
        self.stop();
    }
}
