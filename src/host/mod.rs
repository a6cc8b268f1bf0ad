//! Interface to the painting application.
//!
//! Everything the plugin does to the host goes through the [`Host`] trait:
//! reading and setting tools, brush properties, layers and presets, querying
//! the pointer, and showing the floating widgets. [`MemoryHost`] implements it
//! in memory for headless use and for tests.

pub mod enums;
pub mod memory;

pub use enums::{BlendingMode, BrushProperty, Tool, Toggle};
pub use memory::MemoryHost;

use thiserror::Error;

use crate::config::Color;
use crate::util::Point;

/// Errors reported by the host application.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    #[error("no document is open")]
    NoDocument,

    #[error("no active layer")]
    NoActiveLayer,

    #[error("layer {0:?} does not exist")]
    UnknownLayer(LayerId),

    #[error("brush preset '{0}' does not exist")]
    UnknownPreset(String),

    #[error("host rejected the request: {0}")]
    Rejected(String),
}

/// Stable identifier of a layer inside the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

/// Snapshot of one layer of the current document.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerInfo {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
}

/// Scripting API of the painting application.
///
/// Calls are made from the UI thread and from tracking workers, so
/// implementations must be thread-safe.
pub trait Host: Send + Sync {
    /// Pointer position in screen coordinates.
    fn cursor_position(&self) -> Point;

    fn tool(&self) -> Result<Tool, HostError>;
    fn set_tool(&self, tool: Tool) -> Result<(), HostError>;

    fn toggle(&self, toggle: Toggle) -> Result<bool, HostError>;
    fn set_toggle(&self, toggle: Toggle, on: bool) -> Result<(), HostError>;

    /// Current value of a numeric brush property, in host units.
    fn brush_property(&self, property: BrushProperty) -> Result<f64, HostError>;
    fn set_brush_property(&self, property: BrushProperty, value: f64) -> Result<(), HostError>;

    /// Current animation frame.
    fn current_time(&self) -> Result<i32, HostError>;
    fn set_current_time(&self, frame: i32) -> Result<(), HostError>;

    /// Layers of the current document, bottom first.
    fn layers(&self) -> Result<Vec<LayerInfo>, HostError>;
    fn current_layer(&self) -> Result<LayerId, HostError>;
    fn set_current_layer(&self, layer: LayerId) -> Result<(), HostError>;
    fn set_layer_visible(&self, layer: LayerId, visible: bool) -> Result<(), HostError>;

    /// Name of the active brush preset.
    fn preset(&self) -> Result<String, HostError>;
    fn set_preset(&self, name: &str) -> Result<(), HostError>;
    /// Presets carrying the given tag, in the host's order. Unknown tags are empty.
    fn tag_presets(&self, tag: &str) -> Vec<String>;

    fn blending_mode(&self) -> Result<BlendingMode, HostError>;
    fn set_blending_mode(&self, mode: BlendingMode) -> Result<(), HostError>;

    /// Background color of the host theme.
    fn main_theme_color(&self) -> Color {
        Color::rgb(49, 49, 49)
    }

    /// Highlight color of the host theme.
    fn active_theme_color(&self) -> Color {
        Color::rgb(61, 174, 233)
    }

    /// Shows the floating widget of action `_id` centered on `center`.
    fn show_widget(&self, _id: &str, _center: Point, _radius: u32) {}

    fn hide_widget(&self, _id: &str) {}

    /// Requests a repaint after the widget state changed.
    fn repaint_widget(&self, _id: &str) {}
}
