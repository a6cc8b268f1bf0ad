//! Controllers for the host properties used by the stock actions.

use std::sync::{Arc, Mutex};

use super::Controller;
use crate::config::EnumValue;
use crate::host::{BlendingMode, BrushProperty, Host, HostError, LayerId, LayerInfo, Tool, Toggle};
use crate::util::lock;

// ============================================================================
// Enumerated properties
// ============================================================================

/// Active tool.
#[derive(Clone)]
pub struct ToolController {
    host: Arc<dyn Host>,
}

impl ToolController {
    pub fn new(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
        }
    }
}

impl Controller<Tool> for ToolController {
    fn get_value(&self) -> Result<Tool, HostError> {
        self.host.tool()
    }

    fn set_value(&self, value: Tool) -> Result<(), HostError> {
        self.host.set_tool(value)
    }

    fn default_value(&self) -> Option<Tool> {
        Some(Tool::FreehandBrush)
    }

    fn pretty_name(&self, value: &Tool) -> String {
        value.pretty_name().to_string()
    }
}

/// One boolean host option.
#[derive(Clone)]
pub struct ToggleController {
    host: Arc<dyn Host>,
    toggle: Toggle,
}

impl ToggleController {
    pub fn new(host: &Arc<dyn Host>, toggle: Toggle) -> Self {
        Self {
            host: Arc::clone(host),
            toggle,
        }
    }
}

impl Controller<bool> for ToggleController {
    fn get_value(&self) -> Result<bool, HostError> {
        self.host.toggle(self.toggle)
    }

    fn set_value(&self, value: bool) -> Result<(), HostError> {
        self.host.set_toggle(self.toggle, value)
    }

    fn default_value(&self) -> Option<bool> {
        Some(false)
    }

    fn pretty_name(&self, value: &bool) -> String {
        let state = if *value { "on" } else { "off" };
        format!("{} {state}", self.toggle.pretty_name())
    }
}

/// Blending mode of the active brush.
#[derive(Clone)]
pub struct BlendingModeController {
    host: Arc<dyn Host>,
}

impl BlendingModeController {
    pub fn new(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
        }
    }
}

impl Controller<BlendingMode> for BlendingModeController {
    fn get_value(&self) -> Result<BlendingMode, HostError> {
        self.host.blending_mode()
    }

    fn set_value(&self, value: BlendingMode) -> Result<(), HostError> {
        self.host.set_blending_mode(value)
    }

    fn default_value(&self) -> Option<BlendingMode> {
        Some(BlendingMode::Normal)
    }

    fn pretty_name(&self, value: &BlendingMode) -> String {
        value.pretty_name().to_string()
    }
}

// ============================================================================
// Numeric brush properties
// ============================================================================

/// Brush property exposed to the user as a percentage (`0..=100`).
#[derive(Clone)]
pub struct PercentController {
    host: Arc<dyn Host>,
    property: BrushProperty,
}

impl PercentController {
    /// Brush opacity in percent.
    pub fn opacity(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
            property: BrushProperty::Opacity,
        }
    }

    /// Brush flow in percent.
    pub fn flow(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
            property: BrushProperty::Flow,
        }
    }
}

impl Controller<i32> for PercentController {
    fn get_value(&self) -> Result<i32, HostError> {
        let fraction = self.host.brush_property(self.property)?;
        Ok((fraction * 100.0).round() as i32)
    }

    fn set_value(&self, value: i32) -> Result<(), HostError> {
        self.host
            .set_brush_property(self.property, f64::from(value.clamp(0, 100)) / 100.0)
    }

    fn default_value(&self) -> Option<i32> {
        Some(100)
    }

    fn pretty_name(&self, value: &i32) -> String {
        format!("{value}%")
    }
}

/// Brush diameter in pixels.
#[derive(Clone)]
pub struct BrushSizeController {
    host: Arc<dyn Host>,
}

impl BrushSizeController {
    pub fn new(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
        }
    }
}

impl Controller<f64> for BrushSizeController {
    fn get_value(&self) -> Result<f64, HostError> {
        self.host.brush_property(BrushProperty::Size)
    }

    fn set_value(&self, value: f64) -> Result<(), HostError> {
        self.host
            .set_brush_property(BrushProperty::Size, value.max(0.01))
    }

    fn default_value(&self) -> Option<f64> {
        Some(100.0)
    }

    fn pretty_name(&self, value: &f64) -> String {
        format!("{value:.1}px")
    }
}

/// Brush rotation in whole degrees (`0..360`).
#[derive(Clone)]
pub struct BrushRotationController {
    host: Arc<dyn Host>,
}

impl BrushRotationController {
    pub fn new(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
        }
    }
}

impl Controller<i32> for BrushRotationController {
    fn get_value(&self) -> Result<i32, HostError> {
        let degrees = self.host.brush_property(BrushProperty::Rotation)?;
        Ok((degrees.round() as i32).rem_euclid(360))
    }

    fn set_value(&self, value: i32) -> Result<(), HostError> {
        self.host
            .set_brush_property(BrushProperty::Rotation, f64::from(value.rem_euclid(360)))
    }

    fn default_value(&self) -> Option<i32> {
        Some(0)
    }

    fn pretty_name(&self, value: &i32) -> String {
        format!("{value}°")
    }
}

// ============================================================================
// Document properties
// ============================================================================

/// Current animation frame.
#[derive(Clone)]
pub struct TimeController {
    host: Arc<dyn Host>,
}

impl TimeController {
    pub fn new(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
        }
    }
}

impl Controller<i32> for TimeController {
    fn get_value(&self) -> Result<i32, HostError> {
        self.host.current_time()
    }

    fn set_value(&self, value: i32) -> Result<(), HostError> {
        self.host.set_current_time(value)
    }

    fn default_value(&self) -> Option<i32> {
        Some(0)
    }

    fn pretty_name(&self, value: &i32) -> String {
        format!("Frame {value}")
    }
}

/// Active layer of the current document.
///
/// Layer names are cached on [`Controller::refresh`] for display.
pub struct LayerController {
    host: Arc<dyn Host>,
    layers: Mutex<Vec<LayerInfo>>,
}

impl LayerController {
    pub fn new(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
            layers: Mutex::new(Vec::new()),
        }
    }
}

impl Controller<LayerId> for LayerController {
    fn refresh(&self) -> Result<(), HostError> {
        *lock(&self.layers) = self.host.layers()?;
        Ok(())
    }

    fn get_value(&self) -> Result<LayerId, HostError> {
        self.host.current_layer()
    }

    fn set_value(&self, value: LayerId) -> Result<(), HostError> {
        self.host.set_current_layer(value)
    }

    fn pretty_name(&self, value: &LayerId) -> String {
        lock(&self.layers)
            .iter()
            .find(|info| info.id == *value)
            .map_or_else(|| format!("Layer {}", value.0), |info| info.name.clone())
    }
}

/// Active brush preset, by name.
#[derive(Clone)]
pub struct PresetController {
    host: Arc<dyn Host>,
}

impl PresetController {
    pub fn new(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
        }
    }
}

impl Controller<String> for PresetController {
    fn get_value(&self) -> Result<String, HostError> {
        self.host.preset()
    }

    fn set_value(&self, value: String) -> Result<(), HostError> {
        self.host.set_preset(&value)
    }

    fn pretty_name(&self, value: &String) -> String {
        value.clone()
    }
}
