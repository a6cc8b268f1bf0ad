use std::sync::Arc;
use std::time::Duration;

use crate::PluginContext;
use crate::components::{Controller, InstructionHolder};
use crate::host::Host;
use crate::input::{ActionError, PluginAction};
use crate::rotation::{RotationActuator, RotationConfig, RotationDefaults, RotationManager, Zone};

/// Pick an angle by pointing around the press position while the key is held.
///
/// Values are written live while the pointer moves. What a release inside
/// the deadzone does is decided by the configured rotation deadzone strategy.
pub struct RotationSelector {
    name: String,
    host: Arc<dyn Host>,
    config: RotationConfig,
    actuator: Arc<RotationActuator>,
    manager: RotationManager,
    instructions: InstructionHolder,
    short_vs_long_press_time: Option<Duration>,
}

impl RotationSelector {
    pub fn new(
        ctx: &PluginContext,
        name: impl Into<String>,
        controller: Arc<dyn Controller<i32>>,
        defaults: &RotationDefaults,
    ) -> Self {
        let name = name.into();
        let config = RotationConfig::new(&ctx.store, &name, defaults);
        let actuator = Arc::new(RotationActuator::new(controller, &config.deadzone_strategy));
        let manager = RotationManager::new(
            name.clone(),
            Arc::clone(&ctx.host),
            ctx.config.clone(),
            config.clone(),
            Arc::clone(&actuator),
        );
        Self {
            name,
            host: Arc::clone(&ctx.host),
            config,
            actuator,
            manager,
            instructions: InstructionHolder::default(),
            short_vs_long_press_time: None,
        }
    }

    pub fn with_instructions(mut self, instructions: InstructionHolder) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_short_vs_long_press_time(mut self, time: Duration) -> Self {
        self.short_vs_long_press_time = Some(time);
        self
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn actuator(&self) -> &RotationActuator {
        &self.actuator
    }

    pub fn is_open(&self) -> bool {
        self.manager.is_open()
    }

    /// Zone under the pointer while the widget is open.
    pub fn zone(&self) -> Option<Zone> {
        self.manager.zone()
    }
}

impl PluginAction for RotationSelector {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_vs_long_press_time(&self) -> Option<Duration> {
        self.short_vs_long_press_time
    }

    fn on_key_press(&self) -> Result<(), ActionError> {
        self.instructions.enter()?;
        self.manager.start(self.host.cursor_position())
    }

    fn on_every_key_release(&self) -> Result<(), ActionError> {
        let result = self.manager.stop();
        let exit = self.instructions.exit();
        result?;
        exit?;
        Ok(())
    }
}
