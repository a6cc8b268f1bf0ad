//! Routing of key events to actions.

use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::{ActionError, PluginAction};
use crate::config::GlobalConfig;
use crate::util::lock;

/// Press/release state of one action's key.
///
/// Handler failures are logged and end the current invocation only; the
/// adapter stays usable for the next press.
pub struct ShortcutAdapter {
    action: Arc<dyn PluginAction>,
    config: GlobalConfig,
    pressed_at: Mutex<Option<Instant>>,
}

impl fmt::Debug for ShortcutAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutAdapter")
            .field("action", &self.action.name())
            .field("pressed", &self.is_pressed())
            .finish()
    }
}

impl ShortcutAdapter {
    pub fn new(action: Arc<dyn PluginAction>, config: GlobalConfig) -> Self {
        Self {
            action,
            config,
            pressed_at: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        self.action.name()
    }

    pub fn is_pressed(&self) -> bool {
        lock(&self.pressed_at).is_some()
    }

    /// Hold time separating short and long presses.
    pub fn threshold(&self) -> Duration {
        self.action
            .short_vs_long_press_time()
            .unwrap_or_else(|| self.config.short_vs_long_press_time())
    }

    /// Handles a key press. Auto-repeated presses while held are ignored.
    pub fn press(&self) {
        {
            let mut pressed_at = lock(&self.pressed_at);
            if pressed_at.is_some() {
                debug!("{}: ignoring auto-repeat", self.name());
                return;
            }
            *pressed_at = Some(Instant::now());
        }
        self.report("key press", self.action.on_key_press());
    }

    /// Handles a key release, measuring the hold time since the press.
    pub fn release(&self) {
        let Some(pressed_at) = lock(&self.pressed_at).take() else {
            debug!("{}: release without press", self.name());
            return;
        };
        self.dispatch_release(pressed_at.elapsed());
    }

    /// Handles a key release as if the key had been held for `held`.
    pub fn release_with_hold(&self, held: Duration) {
        if lock(&self.pressed_at).take().is_none() {
            debug!("{}: release without press", self.name());
            return;
        }
        self.dispatch_release(held);
    }

    fn dispatch_release(&self, held: Duration) {
        if held < self.threshold() {
            self.report("short release", self.action.on_short_key_release());
        } else {
            self.report("long release", self.action.on_long_key_release());
        }
        self.report("release", self.action.on_every_key_release());
    }

    fn report(&self, stage: &str, result: Result<(), ActionError>) {
        if let Err(err) = result {
            error!("{}: {stage} failed: {err}", self.name());
        }
    }
}

/// Actions by name.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    adapters: BTreeMap<String, ShortcutAdapter>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action.
    ///
    /// # Errors
    /// Returns [`ActionError::DuplicateAction`] if the name is already taken.
    pub fn register(
        &mut self,
        action: Arc<dyn PluginAction>,
        config: &GlobalConfig,
    ) -> Result<(), ActionError> {
        let name = action.name().to_string();
        if self.adapters.contains_key(&name) {
            return Err(ActionError::DuplicateAction(name));
        }
        self.adapters
            .insert(name, ShortcutAdapter::new(action, config.clone()));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ShortcutAdapter> {
        self.adapters.get(name)
    }

    /// Registered names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.adapters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Forwards a key press. Returns `false` for unknown names.
    pub fn press(&self, name: &str) -> bool {
        match self.adapters.get(name) {
            Some(adapter) => {
                adapter.press();
                true
            }
            None => {
                warn!("No action named '{name}'");
                false
            }
        }
    }

    /// Forwards a key release. Returns `false` for unknown names.
    pub fn release(&self, name: &str) -> bool {
        match self.adapters.get(name) {
            Some(adapter) => {
                adapter.release();
                true
            }
            None => {
                warn!("No action named '{name}'");
                false
            }
        }
    }

    /// Releases every held key, e.g. when the host window loses focus.
    pub fn release_all(&self) {
        let held: Vec<&ShortcutAdapter> =
            self.adapters.values().filter(|a| a.is_pressed()).collect();
        if !held.is_empty() {
            info!("Releasing {} held actions", held.len());
        }
        for adapter in held {
            adapter.release();
        }
    }
}
