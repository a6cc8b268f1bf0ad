use log::debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::components::{ControlledValue, Controller, InstructionHolder, ValueSource};
use crate::config::{ConfigStore, Field, FieldGroup, FieldValue, ListElement};
use crate::input::{ActionError, PluginAction};
use crate::util::lock;

/// Index of the value following `current` in `values`.
///
/// The cursor is trusted when it still points at `current`, which keeps
/// repeated values in the sequence cycling correctly. Otherwise the first
/// occurrence of `current` is used, and a value missing from the sequence
/// restarts at the first element.
pub fn next_index<T: PartialEq>(values: &[T], cursor: Option<usize>, current: &T) -> usize {
    if values.is_empty() {
        return 0;
    }
    let position = cursor
        .filter(|&index| values.get(index) == Some(current))
        .or_else(|| values.iter().position(|value| value == current));
    match position {
        Some(index) => (index + 1) % values.len(),
        None => 0,
    }
}

/// Cycles through a sequence of values on repeated presses.
///
/// Settings live in a group named after the action: `Values` holds a fixed
/// sequence (dynamic sources such as a preset tag are not persisted) and
/// `Default value` the value a long press resets to on release.
pub struct MultipleAssignment<T: ControlledValue + FieldValue> {
    name: String,
    controller: Arc<dyn Controller<T>>,
    config: FieldGroup,
    values: Box<dyn ValueSource<T>>,
    default_value: Option<Field<T>>,
    instructions: InstructionHolder,
    short_vs_long_press_time: Option<Duration>,
    cursor: Mutex<Option<usize>>,
}

impl<T: ControlledValue + FieldValue> MultipleAssignment<T> {
    /// Cycles over `values`, stored as the editable `Values` setting.
    pub fn new(
        store: &Arc<ConfigStore>,
        name: impl Into<String>,
        controller: Arc<dyn Controller<T>>,
        values: Vec<T>,
    ) -> Self
    where
        T: ListElement,
    {
        let name = name.into();
        let config = FieldGroup::new(store, name.as_str());
        let values = config.field("Values", values);
        Self::with_config(name, controller, config, Box::new(values))
    }

    /// Cycles over a source read again on every press.
    pub fn with_source<S>(
        store: &Arc<ConfigStore>,
        name: impl Into<String>,
        controller: Arc<dyn Controller<T>>,
        source: S,
    ) -> Self
    where
        S: ValueSource<T> + 'static,
    {
        let name = name.into();
        let config = FieldGroup::new(store, name.as_str());
        Self::with_config(name, controller, config, Box::new(source))
    }

    fn with_config(
        name: String,
        controller: Arc<dyn Controller<T>>,
        config: FieldGroup,
        values: Box<dyn ValueSource<T>>,
    ) -> Self {
        let default_value = controller
            .default_value()
            .map(|value| config.field("Default value", value));
        Self {
            name,
            controller,
            config,
            values,
            default_value,
            instructions: InstructionHolder::default(),
            short_vs_long_press_time: None,
            cursor: Mutex::new(None),
        }
    }

    pub fn with_default_value(mut self, value: T) -> Self {
        self.default_value = Some(self.config.field("Default value", value));
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

    pub fn config(&self) -> &FieldGroup {
        &self.config
    }
}

impl<T: ControlledValue + FieldValue> PluginAction for MultipleAssignment<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_vs_long_press_time(&self) -> Option<Duration> {
        self.short_vs_long_press_time
    }

    fn on_key_press(&self) -> Result<(), ActionError> {
        self.controller.refresh()?;
        self.instructions.enter()?;

        let values = self.values.values()?;
        if values.is_empty() {
            debug!("{}: nothing to cycle", self.name);
            return Ok(());
        }

        let current = self.controller.get_value()?;
        let index = {
            let mut cursor = lock(&self.cursor);
            let index = next_index(&values, *cursor, &current);
            *cursor = Some(index);
            index
        };
        self.controller.set_value(values[index].clone())?;
        Ok(())
    }

    fn on_long_key_release(&self) -> Result<(), ActionError> {
        *lock(&self.cursor) = None;
        if let Some(default) = &self.default_value {
            self.controller.set_value(default.read())?;
        }
        Ok(())
    }

    fn on_every_key_release(&self) -> Result<(), ActionError> {
        self.instructions.exit()?;
        Ok(())
    }
}
