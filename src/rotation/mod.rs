//! Rotation selector: pick an angle by pointing around the press position.
//!
//! The widget is split by distance from its center into a deadzone, an inner
//! and an outer zone. One of the two outer rings snaps to `360 / divisions`
//! degree steps (intervallic), the other follows the pointer to the degree
//! (precise). `Inverse zones` swaps which is which.

pub mod actuator;
pub mod config;
pub mod manager;

pub use actuator::RotationActuator;
pub use config::{RotationConfig, RotationDefaults};
pub use manager::RotationManager;

use crate::config::GlobalConfig;
use crate::util::Point;

/// Deadzone radius at scale 1.0, in pixels.
pub const BASE_DEADZONE_RADIUS: f64 = 40.0;

/// Width of the inner zone at scale 1.0, in pixels.
pub const BASE_INNER_ZONE_WIDTH: f64 = 90.0;

/// Width of the painted outer ring at scale 1.0, in pixels.
pub const BASE_OUTER_ZONE_WIDTH: f64 = 60.0;

/// Region of the widget the pointer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Deadzone,
    /// Angles snap to `360 / divisions` degree steps.
    Intervallic,
    /// Angles are rounded to whole degrees.
    Precise,
}

/// Snapshot of the settings that map an angle to a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationParams {
    pub divisions: u32,
    pub offset: i32,
    pub is_counterclockwise: bool,
    pub inverse_zones: bool,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            divisions: 24,
            offset: 0,
            is_counterclockwise: false,
            inverse_zones: false,
        }
    }
}

/// Value selected by pointing at `angle` (degrees, zero up, clockwise) in `zone`.
///
/// Returns `None` in the deadzone.
pub fn rotation_value(angle: f64, zone: Zone, params: &RotationParams) -> Option<i32> {
    let directed = if params.is_counterclockwise {
        360.0 - angle
    } else {
        angle
    };
    let shifted = (directed + f64::from(params.offset)).rem_euclid(360.0);

    let value = match zone {
        Zone::Deadzone => return None,
        Zone::Precise => shifted.round(),
        Zone::Intervallic => {
            let step = 360.0 / f64::from(params.divisions.max(1));
            (shifted / step).round() * step
        }
    };
    Some((value.round() as i32).rem_euclid(360))
}

/// Zone radii of an open widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationGeometry {
    pub center: Point,
    pub deadzone_radius: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl RotationGeometry {
    pub fn new(center: Point, deadzone_scale: f64, inner_zone_scale: f64, global: &GlobalConfig) -> Self {
        let deadzone_radius = BASE_DEADZONE_RADIUS * deadzone_scale * global.pie_deadzone_scale();
        let inner_radius =
            deadzone_radius + BASE_INNER_ZONE_WIDTH * inner_zone_scale * global.pie_scale();
        Self {
            center,
            deadzone_radius,
            inner_radius,
            outer_radius: inner_radius + BASE_OUTER_ZONE_WIDTH * global.pie_scale(),
        }
    }

    /// Zone under `pointer`. Everything beyond the inner zone belongs to the
    /// outer one, painted ring or not.
    pub fn zone(&self, pointer: Point, inverse_zones: bool) -> Zone {
        let distance = self.center.distance(pointer);
        if distance < self.deadzone_radius {
            Zone::Deadzone
        } else if (distance < self.inner_radius) != inverse_zones {
            Zone::Intervallic
        } else {
            Zone::Precise
        }
    }
}
