use super::{Label, PieError};
use crate::components::ControlledValue;
use crate::util::angle_distance;

/// Display state of one label.
#[derive(Debug, Clone)]
pub struct LabelWidget<T> {
    pub label: Label<T>,
    /// The pointer is over this label.
    pub active: bool,
    /// Highlighted because a deadzone release would pick it.
    pub forced: bool,
}

/// Label widgets of one open pie, in display order.
#[derive(Debug, Clone)]
pub struct WidgetHolder<T> {
    widgets: Vec<LabelWidget<T>>,
}

impl<T: ControlledValue> WidgetHolder<T> {
    pub fn new(labels: Vec<Label<T>>) -> Self {
        Self {
            widgets: labels
                .into_iter()
                .map(|label| LabelWidget {
                    label,
                    active: false,
                    forced: false,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn widgets(&self) -> &[LabelWidget<T>] {
        &self.widgets
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label<T>> {
        self.widgets.iter().map(|widget| &widget.label)
    }

    /// Widget showing `label`.
    ///
    /// # Errors
    /// Returns [`PieError::LabelNotFound`] when no widget holds that value.
    pub fn on_label(&mut self, label: &Label<T>) -> Result<&mut LabelWidget<T>, PieError> {
        self.widgets
            .iter_mut()
            .find(|widget| widget.label == *label)
            .ok_or_else(|| PieError::LabelNotFound(label.display_name.clone()))
    }

    /// Label whose angle is nearest to `angle`.
    pub fn on_angle(&self, angle: f64) -> Option<&Label<T>> {
        self.labels().min_by(|a, b| {
            angle_distance(a.angle, angle).total_cmp(&angle_distance(b.angle, angle))
        })
    }

    /// Marks `label` as the one under the pointer. Returns whether anything changed.
    pub fn set_active(&mut self, label: Option<&Label<T>>) -> bool {
        let mut changed = false;
        for widget in &mut self.widgets {
            let active = label.is_some_and(|label| widget.label == *label);
            changed |= widget.active != active;
            widget.active = active;
        }
        changed
    }

    pub fn active(&self) -> Option<&Label<T>> {
        self.widgets
            .iter()
            .find(|widget| widget.active)
            .map(|widget| &widget.label)
    }

    pub fn forced(&self) -> Option<&Label<T>> {
        self.widgets
            .iter()
            .find(|widget| widget.forced)
            .map(|widget| &widget.label)
    }

    pub fn clear_forced_widgets(&mut self) {
        for widget in &mut self.widgets {
            widget.forced = false;
        }
    }
}
