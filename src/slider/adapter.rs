//! Per-session state of a slider.

use log::debug;
use std::sync::Arc;

use super::{Numeric, Range, range_value, step_index};
use crate::components::{ControlledValue, Controller, ValueSource};
use crate::host::HostError;

/// Type-erased slider declaration.
pub(crate) trait SliderBinding: Send + Sync {
    fn open(&self) -> Result<Box<dyn ValueAdapter>, HostError>;
}

/// Applies pointer offsets to the controller during one session.
pub(crate) trait ValueAdapter: Send {
    /// Applies the value reached after moving `offset` pixels from the anchor.
    ///
    /// Returns `true` if a new value was written.
    fn apply(&mut self, offset: f64, sensitivity: f64) -> Result<bool, HostError>;
}

// ============================================================================
// Ordered domains
// ============================================================================

pub(crate) struct CycleBinding<T: ControlledValue> {
    pub controller: Arc<dyn Controller<T>>,
    pub source: Box<dyn ValueSource<T>>,
    pub default: Option<T>,
}

impl<T: ControlledValue> SliderBinding for CycleBinding<T> {
    fn open(&self) -> Result<Box<dyn ValueAdapter>, HostError> {
        self.controller.refresh()?;
        let values = self.source.values()?;
        let current = self.controller.get_value()?;

        let matched = values.iter().position(|value| *value == current);
        let start = matched
            .or_else(|| {
                let default = self.default.as_ref()?;
                values.iter().position(|value| value == default)
            })
            .unwrap_or(0);
        debug!(
            "Slider session over {} values, starting at index {start}",
            values.len()
        );

        Ok(Box::new(CycleAdapter {
            controller: Arc::clone(&self.controller),
            values,
            start,
            last: matched,
        }))
    }
}

struct CycleAdapter<T: ControlledValue> {
    controller: Arc<dyn Controller<T>>,
    values: Vec<T>,
    start: usize,
    last: Option<usize>,
}

impl<T: ControlledValue> ValueAdapter for CycleAdapter<T> {
    fn apply(&mut self, offset: f64, sensitivity: f64) -> Result<bool, HostError> {
        if self.values.is_empty() {
            return Ok(false);
        }
        let index = step_index(self.start, self.values.len(), offset, sensitivity);
        if self.last == Some(index) {
            return Ok(false);
        }
        self.controller.set_value(self.values[index].clone())?;
        self.last = Some(index);
        Ok(true)
    }
}

// ============================================================================
// Numeric ranges
// ============================================================================

pub(crate) struct RangeBinding<T: Numeric> {
    pub controller: Arc<dyn Controller<T>>,
    pub range: Range<T>,
    pub default: Option<T>,
}

impl<T: Numeric> SliderBinding for RangeBinding<T> {
    fn open(&self) -> Result<Box<dyn ValueAdapter>, HostError> {
        self.controller.refresh()?;
        let current = self.controller.get_value()?;

        let start = if (self.range.min..=self.range.max).contains(&current) {
            current.to_f64()
        } else {
            let fallback = self.default.unwrap_or(self.range.min);
            self.range.clamp(fallback.to_f64())
        };

        Ok(Box::new(RangeAdapter {
            controller: Arc::clone(&self.controller),
            range: self.range,
            start,
            last: Some(current),
        }))
    }
}

struct RangeAdapter<T: Numeric> {
    controller: Arc<dyn Controller<T>>,
    range: Range<T>,
    start: f64,
    last: Option<T>,
}

impl<T: Numeric> ValueAdapter for RangeAdapter<T> {
    fn apply(&mut self, offset: f64, sensitivity: f64) -> Result<bool, HostError> {
        let value = T::from_f64(range_value(self.start, offset, sensitivity, &self.range));
        if self.last == Some(value) {
            return Ok(false);
        }
        self.controller.set_value(value)?;
        self.last = Some(value);
        Ok(true)
    }
}
