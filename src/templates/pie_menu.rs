use log::{debug, info};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::PluginContext;
use crate::components::{ControlledValue, Controller, InstructionHolder};
use crate::config::GlobalConfig;
use crate::host::Host;
use crate::input::{ActionError, PluginAction};
use crate::pie::{Label, PieActuator, PieConfig, PieGeometry, PieManager};
use crate::util::lock;

/// Stage of a pie menu invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieState {
    Idle,
    Open,
    /// Released over a label, which was committed.
    LabelSelected,
    /// Released inside the deadzone; the deadzone strategy decided.
    DeadzoneRelease,
}

/// Pick a value by hovering over a pie of labels while the key is held.
///
/// Releasing over a label commits its value. Releasing inside the deadzone
/// follows the pie's deadzone strategy.
pub struct PieMenu<T: ControlledValue> {
    name: String,
    host: Arc<dyn Host>,
    global: GlobalConfig,
    controller: Arc<dyn Controller<T>>,
    config: Arc<dyn PieConfig<T>>,
    actuator: Arc<PieActuator<T>>,
    manager: PieManager<T>,
    instructions: InstructionHolder,
    short_vs_long_press_time: Option<Duration>,
    state: Mutex<PieState>,
    last_outcome: Mutex<Option<PieState>>,
}

impl<T: ControlledValue> PieMenu<T> {
    pub fn new<C>(
        ctx: &PluginContext,
        name: impl Into<String>,
        controller: Arc<dyn Controller<T>>,
        config: C,
    ) -> Self
    where
        C: PieConfig<T> + 'static,
    {
        let name = name.into();
        let actuator = Arc::new(PieActuator::new(
            Arc::clone(&controller),
            &config.settings().deadzone_strategy,
        ));
        let manager = PieManager::new(
            name.clone(),
            Arc::clone(&ctx.host),
            ctx.config.clone(),
            Arc::clone(&actuator),
        );
        Self {
            name,
            host: Arc::clone(&ctx.host),
            global: ctx.config.clone(),
            controller,
            config: Arc::new(config),
            actuator,
            manager,
            instructions: InstructionHolder::default(),
            short_vs_long_press_time: None,
            state: Mutex::new(PieState::Idle),
            last_outcome: Mutex::new(None),
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

    pub fn config(&self) -> &Arc<dyn PieConfig<T>> {
        &self.config
    }

    pub fn actuator(&self) -> &PieActuator<T> {
        &self.actuator
    }

    pub fn state(&self) -> PieState {
        *lock(&self.state)
    }

    /// How the last invocation ended.
    pub fn last_outcome(&self) -> Option<PieState> {
        *lock(&self.last_outcome)
    }

    /// Label under the pointer while the pie is open.
    pub fn hovered_label(&self) -> Option<Label<T>> {
        self.manager.active_label()
    }

    /// Label highlighted as the one a deadzone release would pick.
    pub fn highlighted_label(&self) -> Option<Label<T>> {
        self.manager.forced_label()
    }

    fn labels(&self) -> Vec<Label<T>> {
        self.config
            .values()
            .into_iter()
            .map(|value| {
                let name = self.controller.pretty_name(&value);
                Label::new(value, name)
            })
            .collect()
    }
}

impl<T: ControlledValue> PluginAction for PieMenu<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_vs_long_press_time(&self) -> Option<Duration> {
        self.short_vs_long_press_time
    }

    fn on_key_press(&self) -> Result<(), ActionError> {
        self.controller.refresh()?;
        self.instructions.enter()?;

        let labels = self.labels();
        if labels.is_empty() {
            info!("{}: pie has no values to show", self.name);
            return Ok(());
        }

        let settings = self.config.settings();
        let geometry = PieGeometry::new(
            self.host.cursor_position(),
            settings.pie_radius_scale.read(),
            settings.icon_radius_scale.read(),
            &self.global,
        );
        self.manager.start(geometry, labels)?;
        *lock(&self.state) = PieState::Open;
        Ok(())
    }

    fn on_every_key_release(&self) -> Result<(), ActionError> {
        let was_open = *lock(&self.state) == PieState::Open;
        let hovered = self.manager.stop();

        let result = if was_open {
            let outcome = if hovered.is_some() {
                PieState::LabelSelected
            } else {
                PieState::DeadzoneRelease
            };
            *lock(&self.state) = outcome;
            *lock(&self.last_outcome) = Some(outcome);

            let committed = self.actuator.activate(hovered.as_ref());
            if let Ok(Some(label)) = &committed {
                debug!("{}: picked '{}'", self.name, label.display_name);
            }
            committed.map(|_| ()).map_err(ActionError::from)
        } else {
            Ok(())
        };

        *lock(&self.state) = PieState::Idle;
        let exit = self.instructions.exit();
        result?;
        exit?;
        Ok(())
    }
}
