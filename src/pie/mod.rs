//! Pie menu state machine.
//!
//! While the key is held, a [`PieManager`] shows the widget under the pointer
//! and classifies the pointer every tick: inside the deadzone, or over the
//! label whose angle is nearest. On release the [`PieActuator`] commits the
//! label under the pointer, or resolves a deadzone release with the configured
//! [`DeadzoneStrategy`](crate::config::DeadzoneStrategy).

pub mod actuator;
pub mod config;
pub mod label;
pub mod manager;
pub mod widget_holder;

pub use actuator::PieActuator;
pub use config::{EnumPieConfig, NonPresetPieConfig, PieConfig, PieDefaults, PieSettings, PresetPieConfig};
pub use label::Label;
pub use manager::{PieGeometry, PieManager};
pub use widget_holder::{LabelWidget, WidgetHolder};

use thiserror::Error;

/// Pie radius at scale 1.0, in pixels.
pub const BASE_PIE_RADIUS: f64 = 165.0;

/// Deadzone radius at scale 1.0, in pixels.
pub const BASE_DEADZONE_RADIUS: f64 = 40.0;

/// Label icon radius at scale 1.0, in pixels.
pub const BASE_ICON_RADIUS: f64 = 50.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PieError {
    #[error("no widget shows label '{0}'")]
    LabelNotFound(String),
}
