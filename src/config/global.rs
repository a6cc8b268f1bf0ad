//! Plugin-wide settings.

use log::warn;
use std::sync::Arc;
use std::time::Duration;

use super::{ConfigStore, Field, FieldGroup};

/// Settings shared by every action.
///
/// | Field                        | Default | Valid range  |
/// |------------------------------|---------|--------------|
/// | `short_vs_long_press_time`   | 0.3 s   | 0.05 - 4.0   |
/// | `fps_limit`                  | 60      | 5 - 500      |
/// | `tracker_sensitivity_scale`  | 1.0     | 0.05 - 400.0 |
/// | `tracker_deadzone`           | 0 px    | 0 - 200      |
/// | `pie_global_scale`           | 1.0     | 0.05 - 4.0   |
/// | `pie_icon_global_scale`      | 1.0     | 0.05 - 4.0   |
/// | `pie_deadzone_global_scale`  | 1.0     | 0.05 - 4.0   |
/// | `pie_animation_time`         | 0.2 s   | 0.0 - 1.0    |
///
/// Out-of-range values are clamped on read and a warning is logged.
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    pub short_vs_long_press_time: Field<f64>,
    pub fps_limit: Field<u32>,
    pub tracker_sensitivity_scale: Field<f64>,
    pub tracker_deadzone: Field<u32>,
    pub pie_global_scale: Field<f64>,
    pub pie_icon_global_scale: Field<f64>,
    pub pie_deadzone_global_scale: Field<f64>,
    pub pie_animation_time: Field<f64>,
    pub tag_red: Field<String>,
    pub tag_green: Field<String>,
    pub tag_blue: Field<String>,
}

impl GlobalConfig {
    pub const GROUP: &'static str = "ShortcutComposer";

    pub fn new(store: &Arc<ConfigStore>) -> Self {
        let group = FieldGroup::new(store, Self::GROUP);
        Self {
            short_vs_long_press_time: group.field("Short vs long press time", 0.3),
            fps_limit: group.field("FPS limit", 60),
            tracker_sensitivity_scale: group.field("Tracker sensitivity scale", 1.0),
            tracker_deadzone: group.field("Tracker deadzone", 0),
            pie_global_scale: group.field("Pie global scale", 1.0),
            pie_icon_global_scale: group.field("Pie icon global scale", 1.0),
            pie_deadzone_global_scale: group.field("Pie deadzone global scale", 1.0),
            pie_animation_time: group.field("Pie animation time", 0.2),
            tag_red: group.field("Tag (red)", "★ My Favorites".to_string()),
            tag_green: group.field("Tag (green)", "RGBA".to_string()),
            tag_blue: group.field("Tag (blue)", "Erasers".to_string()),
        }
    }

    /// Hold time separating a short press from a long one.
    pub fn short_vs_long_press_time(&self) -> Duration {
        Duration::from_secs_f64(clamped(&self.short_vs_long_press_time, 0.05, 4.0))
    }

    /// Interval between two ticks of a tracking loop.
    pub fn tick_interval(&self) -> Duration {
        let fps = self.fps_limit.read();
        let clamped_fps = fps.clamp(5, 500);
        if clamped_fps != fps {
            warn!("Invalid FPS limit {fps}, clamping to 5-500 range");
        }
        Duration::from_secs_f64(1.0 / f64::from(clamped_fps))
    }

    pub fn tracker_sensitivity(&self) -> f64 {
        clamped(&self.tracker_sensitivity_scale, 0.05, 400.0)
    }

    /// Pointer travel ignored before a tracker starts changing values.
    pub fn tracker_deadzone(&self) -> i32 {
        let deadzone = self.tracker_deadzone.read();
        if deadzone > 200 {
            warn!("Invalid tracker deadzone {deadzone}, clamping to 0-200 range");
        }
        deadzone.min(200) as i32
    }

    pub fn pie_scale(&self) -> f64 {
        clamped(&self.pie_global_scale, 0.05, 4.0)
    }

    pub fn pie_icon_scale(&self) -> f64 {
        clamped(&self.pie_icon_global_scale, 0.05, 4.0)
    }

    pub fn pie_deadzone_scale(&self) -> f64 {
        clamped(&self.pie_deadzone_global_scale, 0.05, 4.0)
    }

    pub fn pie_animation_time(&self) -> Duration {
        Duration::from_secs_f64(clamped(&self.pie_animation_time, 0.0, 1.0))
    }
}

fn clamped(field: &Field<f64>, min: f64, max: f64) -> f64 {
    let value = field.read();
    if !(min..=max).contains(&value) {
        warn!(
            "Invalid {} {:.2}, clamping to {}-{} range",
            field.name(),
            value,
            min,
            max
        );
        return if value.is_nan() { min } else { value.clamp(min, max) };
    }
    value
}
