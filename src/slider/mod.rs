//! Mapping pointer movement to controlled values.
//!
//! A [`Slider`] declares what a tracker changes: a controller plus either an
//! ordered list of values or a numeric [`Range`]. It holds no session state;
//! each key press opens a fresh adapter through [`SliderHandler::start`].
//!
//! Ordered domains advance one element per `PIXELS_PER_STEP / sensitivity`
//! pixels. Ranges move `sensitivity / PIXELS_PER_UNIT` units per pixel. Both
//! clamp at their ends.

mod adapter;
pub mod handler;

pub use handler::SliderHandler;

use std::fmt;
use std::sync::Arc;

use crate::components::{ControlledValue, Controller, ValueSource};
use crate::host::HostError;
use adapter::{CycleBinding, RangeBinding, SliderBinding, ValueAdapter};

/// Pointer travel needed to move one element in an ordered domain.
pub const PIXELS_PER_STEP: f64 = 50.0;

/// Pointer travel needed to move one unit in a range.
pub const PIXELS_PER_UNIT: f64 = 4.0;

/// Values a [`Range`] slider can produce.
pub trait Numeric: ControlledValue + Copy + PartialOrd {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

impl Numeric for i32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }
}

impl Numeric for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Closed numeric interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: Numeric> Range<T> {
    /// Creates a range, swapping the bounds if given in reverse.
    pub fn new(min: T, max: T) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min.to_f64(), self.max.to_f64())
    }
}

/// Index reached after moving `offset` pixels from `start` in a domain of
/// `len` elements.
pub fn step_index(start: usize, len: usize, offset: f64, sensitivity: f64) -> usize {
    if len == 0 {
        return 0;
    }
    let steps = (offset * sensitivity / PIXELS_PER_STEP).trunc();
    let target = start as f64 + steps;
    target.clamp(0.0, (len - 1) as f64) as usize
}

/// Value reached after moving `offset` pixels from `start` within `range`.
pub fn range_value<T: Numeric>(start: f64, offset: f64, sensitivity: f64, range: &Range<T>) -> f64 {
    range.clamp(start + offset * sensitivity / PIXELS_PER_UNIT)
}

/// Declarative description of what a tracker axis controls.
#[derive(Clone)]
pub struct Slider {
    binding: Arc<dyn SliderBinding>,
    sensitivity: f64,
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("sensitivity", &self.sensitivity)
            .finish_non_exhaustive()
    }
}

impl Slider {
    /// Steps through the ordered values of `source`.
    ///
    /// `default` is the starting point when the current value is not part of
    /// the domain; without it the first element is used.
    pub fn cycle<T, S>(controller: Arc<dyn Controller<T>>, source: S, default: Option<T>) -> Self
    where
        T: ControlledValue,
        S: ValueSource<T> + 'static,
    {
        Self {
            binding: Arc::new(CycleBinding {
                controller,
                source: Box::new(source),
                default,
            }),
            sensitivity: 1.0,
        }
    }

    /// Moves continuously within `range`.
    pub fn range<T: Numeric>(
        controller: Arc<dyn Controller<T>>,
        range: Range<T>,
        default: Option<T>,
    ) -> Self {
        Self {
            binding: Arc::new(RangeBinding {
                controller,
                range,
                default,
            }),
            sensitivity: 1.0,
        }
    }

    /// Scales how fast the value follows the pointer.
    pub fn with_sensitivity(mut self, scale: f64) -> Self {
        self.sensitivity = scale;
        self
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Refreshes the controller and snapshots the domain for one session.
    pub(crate) fn open(&self) -> Result<Box<dyn ValueAdapter>, HostError> {
        self.binding.open()
    }
}

#[cfg(test)]
mod tests;
