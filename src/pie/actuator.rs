use log::debug;
use std::sync::{Arc, Mutex, RwLock};

use super::{Label, PieError, WidgetHolder};
use crate::components::{ControlledValue, Controller};
use crate::config::{DeadzoneStrategy, Field};
use crate::host::HostError;
use crate::util::{lock, read, write};

/// Commits pie selections to the controller.
///
/// The deadzone strategy is cached from its field and kept up to date by a
/// change callback, so edits take effect on the next release.
pub struct PieActuator<T: ControlledValue> {
    controller: Arc<dyn Controller<T>>,
    strategy: Arc<RwLock<DeadzoneStrategy>>,
    labels: RwLock<Vec<Label<T>>>,
    last_label: Mutex<Option<Label<T>>>,
}

impl<T: ControlledValue> PieActuator<T> {
    pub fn new(controller: Arc<dyn Controller<T>>, strategy_field: &Field<DeadzoneStrategy>) -> Self {
        let strategy = Arc::new(RwLock::new(strategy_field.read()));

        let cache = Arc::clone(&strategy);
        strategy_field.on_change(move |value| {
            *write(&cache) = value;
        });

        Self {
            controller,
            strategy,
            labels: RwLock::new(Vec::new()),
            last_label: Mutex::new(None),
        }
    }

    pub fn strategy(&self) -> DeadzoneStrategy {
        *read(&self.strategy)
    }

    /// Labels of the current pie session.
    pub fn set_labels(&self, labels: Vec<Label<T>>) {
        *write(&self.labels) = labels;
    }

    /// Label picked last time a value was committed.
    pub fn last_label(&self) -> Option<Label<T>> {
        lock(&self.last_label).clone()
    }

    /// Label a release inside the deadzone would activate.
    pub fn selected_label(&self) -> Option<Label<T>> {
        let labels = read(&self.labels);
        match self.strategy() {
            DeadzoneStrategy::DoNothing => None,
            DeadzoneStrategy::PickTop => labels.first().cloned(),
            DeadzoneStrategy::PickPrevious => {
                let last = lock(&self.last_label).clone()?;
                labels.iter().find(|label| **label == last).cloned()
            }
        }
    }

    /// Commits `label`, or resolves a deadzone release when `None`.
    ///
    /// Returns the label whose value was written, if any.
    pub fn activate(&self, label: Option<&Label<T>>) -> Result<Option<Label<T>>, HostError> {
        let picked = match label {
            Some(label) => Some(label.clone()),
            None => self.selected_label(),
        };
        let Some(picked) = picked else {
            debug!("Deadzone release with {:?}, nothing to do", self.strategy());
            return Ok(None);
        };

        self.controller.set_value(picked.value.clone())?;
        *lock(&self.last_label) = Some(picked.clone());
        Ok(Some(picked))
    }

    /// Highlights the widget a deadzone release would pick.
    ///
    /// A selected label missing from the holder is skipped without a highlight.
    pub fn mark_selected_widget(&self, holder: &mut WidgetHolder<T>) {
        holder.clear_forced_widgets();
        let Some(label) = self.selected_label() else {
            return;
        };
        match holder.on_label(&label) {
            Ok(widget) => widget.forced = true,
            Err(PieError::LabelNotFound(name)) => {
                debug!("Selected label '{name}' is not shown, skipping highlight");
            }
        }
    }
}
