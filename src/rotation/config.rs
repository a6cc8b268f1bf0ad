//! Persisted configuration of rotation selectors.

use std::sync::Arc;

use super::RotationParams;
use crate::config::{Color, ConfigStore, Field, FieldGroup, RotationDeadzoneStrategy};

/// Construction defaults of a rotation selector.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationDefaults {
    pub deadzone_strategy: RotationDeadzoneStrategy,
    pub inverse_zones: bool,
    pub divisions: u32,
    pub deadzone_scale: f64,
    pub inner_zone_scale: f64,
    /// `None` uses the highlight color of the host theme.
    pub active_color: Option<Color>,
    pub outline_opacity: u32,
    pub is_counterclockwise: bool,
    pub offset: i32,
}

impl Default for RotationDefaults {
    fn default() -> Self {
        Self {
            deadzone_strategy: RotationDeadzoneStrategy::KeepChange,
            inverse_zones: false,
            divisions: 24,
            deadzone_scale: 1.0,
            inner_zone_scale: 1.0,
            active_color: None,
            outline_opacity: 200,
            is_counterclockwise: false,
            offset: 0,
        }
    }
}

/// Settings of one rotation selector, stored in the action's group.
#[derive(Debug, Clone)]
pub struct RotationConfig {
    group: FieldGroup,
    pub deadzone_strategy: Field<RotationDeadzoneStrategy>,
    pub inverse_zones: Field<bool>,
    pub divisions: Field<u32>,
    pub deadzone_scale: Field<f64>,
    pub inner_zone_scale: Field<f64>,
    pub active_color: Field<Color>,
    pub outline_opacity: Field<u32>,
    pub is_counterclockwise: Field<bool>,
    pub offset: Field<i32>,
}

impl RotationConfig {
    pub fn new(store: &Arc<ConfigStore>, name: &str, defaults: &RotationDefaults) -> Self {
        let group = FieldGroup::new(store, name);
        Self {
            deadzone_strategy: group.field("Deadzone strategy", defaults.deadzone_strategy),
            inverse_zones: group.field("Inverse zones", defaults.inverse_zones),
            divisions: group.field("Divisions", defaults.divisions),
            deadzone_scale: group.field("Deadzone scale", defaults.deadzone_scale),
            inner_zone_scale: group.field("Inner zone scale", defaults.inner_zone_scale),
            active_color: group.field(
                "Active color",
                defaults.active_color.unwrap_or(Color::rgb(61, 174, 233)),
            ),
            outline_opacity: group.field("Outline opacity", defaults.outline_opacity),
            is_counterclockwise: group.field("Is counterclockwise", defaults.is_counterclockwise),
            offset: group.field("Offset", defaults.offset),
            group,
        }
    }

    pub fn group(&self) -> &FieldGroup {
        &self.group
    }

    /// Angle mapping settings as they are now. Divisions are kept in `1..=360`.
    pub fn params(&self) -> RotationParams {
        RotationParams {
            divisions: self.divisions.read().clamp(1, 360),
            offset: self.offset.read(),
            is_counterclockwise: self.is_counterclockwise.read(),
            inverse_zones: self.inverse_zones.read(),
        }
    }

    /// Outline color with the configured opacity.
    pub fn outline_color(&self) -> Color {
        let alpha = self.outline_opacity.read().min(255) as u8;
        self.active_color.read().with_alpha(alpha)
    }
}
