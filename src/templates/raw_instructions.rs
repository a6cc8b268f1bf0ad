use std::time::Duration;

use crate::components::InstructionHolder;
use crate::input::{ActionError, PluginAction};

/// Action that only runs its instructions: `enter` on press, `exit` on every
/// release.
#[derive(Debug)]
pub struct RawInstructions {
    name: String,
    instructions: InstructionHolder,
    short_vs_long_press_time: Option<Duration>,
}

impl RawInstructions {
    pub fn new(name: impl Into<String>, instructions: InstructionHolder) -> Self {
        Self {
            name: name.into(),
            instructions,
            short_vs_long_press_time: None,
        }
    }

    pub fn with_short_vs_long_press_time(mut self, time: Duration) -> Self {
        self.short_vs_long_press_time = Some(time);
        self
    }
}

impl PluginAction for RawInstructions {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_vs_long_press_time(&self) -> Option<Duration> {
        self.short_vs_long_press_time
    }

    fn on_key_press(&self) -> Result<(), ActionError> {
        self.instructions.enter()?;
        Ok(())
    }

    fn on_every_key_release(&self) -> Result<(), ActionError> {
        self.instructions.exit()?;
        Ok(())
    }
}
