use log::{debug, error};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::components::{ControlledValue, Controller, InstructionHolder};
use crate::input::{ActionError, PluginAction};
use crate::util::lock;
use crate::worker::DelayedTask;

#[derive(Debug)]
struct Session<T> {
    pressed_at: Option<Instant>,
    restore: Option<T>,
    pending: Option<DelayedTask>,
}

/// Sets `high_value` while the key is held and restores the previous state on
/// release.
///
/// The restored value is `low_value` when given, otherwise the value seen right
/// before the press. With a minimum hold time, a release that comes too early
/// defers the restore until the hold time has passed since the press. A new
/// press before that cancels the deferred restore.
pub struct TemporaryKey<T: ControlledValue> {
    name: String,
    controller: Arc<dyn Controller<T>>,
    high_value: T,
    low_value: Option<T>,
    time_interval: Duration,
    instructions: InstructionHolder,
    short_vs_long_press_time: Option<Duration>,
    session: Mutex<Session<T>>,
}

impl<T: ControlledValue> TemporaryKey<T> {
    pub fn new(name: impl Into<String>, controller: Arc<dyn Controller<T>>, high_value: T) -> Self {
        Self {
            name: name.into(),
            controller,
            high_value,
            low_value: None,
            time_interval: Duration::ZERO,
            instructions: InstructionHolder::default(),
            short_vs_long_press_time: None,
            session: Mutex::new(Session {
                pressed_at: None,
                restore: None,
                pending: None,
            }),
        }
    }

    pub fn with_low_value(mut self, value: T) -> Self {
        self.low_value = Some(value);
        self
    }

    /// Minimum time the high value stays set after a press.
    pub fn with_time_interval(mut self, interval: Duration) -> Self {
        self.time_interval = interval;
        self
    }

    pub fn with_instructions(mut self, instructions: InstructionHolder) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_short_vs_long_press_time(mut self, time: Duration) -> Self {
        self.short_vs_long_press_time = Some(time);
        self
    }

    /// Whether a deferred restore is waiting to run.
    pub fn has_pending_restore(&self) -> bool {
        lock(&self.session)
            .pending
            .as_ref()
            .is_some_and(|task| !task.has_fired())
    }
}

impl<T: ControlledValue> PluginAction for TemporaryKey<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_vs_long_press_time(&self) -> Option<Duration> {
        self.short_vs_long_press_time
    }

    fn on_key_press(&self) -> Result<(), ActionError> {
        let pending = lock(&self.session).pending.take();
        let restore_cancelled = pending.is_some_and(|mut task| task.cancel());

        self.controller.refresh()?;
        if restore_cancelled {
            // The high value is still set; keep the value recorded before it.
            debug!("{}: deferred restore cancelled by a new press", self.name);
        } else {
            let before = self.controller.get_value()?;
            lock(&self.session).restore = Some(before);
        }

        self.instructions.enter()?;
        lock(&self.session).pressed_at = Some(Instant::now());
        self.controller.set_value(self.high_value.clone())?;
        Ok(())
    }

    fn on_every_key_release(&self) -> Result<(), ActionError> {
        let (restore, held) = {
            let mut session = lock(&self.session);
            let restore = self.low_value.clone().or_else(|| session.restore.clone());
            let held = session.pressed_at.take().map(|at| at.elapsed());
            (restore, held)
        };

        let result = match (restore, held) {
            (Some(value), Some(held)) if held < self.time_interval => {
                let controller = Arc::clone(&self.controller);
                let name = self.name.clone();
                DelayedTask::schedule(
                    &format!("{} restore", self.name),
                    self.time_interval - held,
                    move || {
                        if let Err(err) = controller.set_value(value) {
                            error!("{name}: deferred restore failed: {err}");
                        }
                    },
                )
                .map(|task| lock(&self.session).pending = Some(task))
                .map_err(ActionError::from)
            }
            (Some(value), _) => self.controller.set_value(value).map_err(ActionError::from),
            (None, _) => Ok(()),
        };

        let exit = self.instructions.exit();
        result?;
        exit?;
        Ok(())
    }
}
