//! Enumerations of host application entities.

use crate::config::EnumValue;

/// Painting host tools that actions can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    FreehandBrush,
    Line,
    Rectangle,
    Ellipse,
    Gradient,
    MultiBrush,
    SmartPatch,
    Fill,
    ColorSampler,
    Move,
    Transform,
    Crop,
    Reference,
    FreehandSelection,
    RectangularSelection,
    EllipticalSelection,
    ContiguousSelection,
    PanCanvas,
}

impl Tool {
    /// Whether the tool paints on the active layer.
    pub fn is_paintable(self) -> bool {
        matches!(
            self,
            Tool::FreehandBrush
                | Tool::Line
                | Tool::Rectangle
                | Tool::Ellipse
                | Tool::Gradient
                | Tool::MultiBrush
                | Tool::SmartPatch
                | Tool::Fill
        )
    }
}

impl EnumValue for Tool {
    const ALL: &'static [Self] = &[
        Self::FreehandBrush,
        Self::Line,
        Self::Rectangle,
        Self::Ellipse,
        Self::Gradient,
        Self::MultiBrush,
        Self::SmartPatch,
        Self::Fill,
        Self::ColorSampler,
        Self::Move,
        Self::Transform,
        Self::Crop,
        Self::Reference,
        Self::FreehandSelection,
        Self::RectangularSelection,
        Self::EllipticalSelection,
        Self::ContiguousSelection,
        Self::PanCanvas,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::FreehandBrush => "FREEHAND_BRUSH",
            Self::Line => "LINE",
            Self::Rectangle => "RECTANGLE",
            Self::Ellipse => "ELLIPSE",
            Self::Gradient => "GRADIENT",
            Self::MultiBrush => "MULTI_BRUSH",
            Self::SmartPatch => "SMART_PATCH",
            Self::Fill => "FILL",
            Self::ColorSampler => "COLOR_SAMPLER",
            Self::Move => "MOVE",
            Self::Transform => "TRANSFORM",
            Self::Crop => "CROP",
            Self::Reference => "REFERENCE",
            Self::FreehandSelection => "FREEHAND_SELECTION",
            Self::RectangularSelection => "RECTANGULAR_SELECTION",
            Self::EllipticalSelection => "ELLIPTICAL_SELECTION",
            Self::ContiguousSelection => "CONTIGUOUS_SELECTION",
            Self::PanCanvas => "PAN",
        }
    }

    fn pretty_name(&self) -> &'static str {
        match self {
            Self::FreehandBrush => "Freehand brush",
            Self::Line => "Line",
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Ellipse",
            Self::Gradient => "Gradient",
            Self::MultiBrush => "Multi brush",
            Self::SmartPatch => "Smart patch",
            Self::Fill => "Fill",
            Self::ColorSampler => "Color sampler",
            Self::Move => "Move",
            Self::Transform => "Transform",
            Self::Crop => "Crop",
            Self::Reference => "Reference",
            Self::FreehandSelection => "Freehand selection",
            Self::RectangularSelection => "Rectangular selection",
            Self::EllipticalSelection => "Elliptical selection",
            Self::ContiguousSelection => "Contiguous selection",
            Self::PanCanvas => "Pan",
        }
    }
}

/// Boolean host options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Eraser,
    PreserveAlpha,
    IsolateLayer,
    MirrorHorizontal,
    MirrorVertical,
    SoftProofing,
}

impl EnumValue for Toggle {
    const ALL: &'static [Self] = &[
        Self::Eraser,
        Self::PreserveAlpha,
        Self::IsolateLayer,
        Self::MirrorHorizontal,
        Self::MirrorVertical,
        Self::SoftProofing,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Eraser => "ERASER",
            Self::PreserveAlpha => "PRESERVE_ALPHA",
            Self::IsolateLayer => "ISOLATE_LAYER",
            Self::MirrorHorizontal => "MIRROR_HORIZONTAL",
            Self::MirrorVertical => "MIRROR_VERTICAL",
            Self::SoftProofing => "SOFT_PROOFING",
        }
    }

    fn pretty_name(&self) -> &'static str {
        match self {
            Self::Eraser => "Eraser",
            Self::PreserveAlpha => "Preserve alpha",
            Self::IsolateLayer => "Isolate layer",
            Self::MirrorHorizontal => "Horizontal mirror",
            Self::MirrorVertical => "Vertical mirror",
            Self::SoftProofing => "Soft proofing",
        }
    }
}

/// Layer and brush blending modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendingMode {
    Normal,
    Overlay,
    Multiply,
    Color,
    Add,
    Behind,
    Darken,
    Lighten,
    Screen,
    Dodge,
    Burn,
    HardLight,
    SoftLight,
    Luminosity,
    Erase,
}

impl EnumValue for BlendingMode {
    const ALL: &'static [Self] = &[
        Self::Normal,
        Self::Overlay,
        Self::Multiply,
        Self::Color,
        Self::Add,
        Self::Behind,
        Self::Darken,
        Self::Lighten,
        Self::Screen,
        Self::Dodge,
        Self::Burn,
        Self::HardLight,
        Self::SoftLight,
        Self::Luminosity,
        Self::Erase,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Overlay => "OVERLAY",
            Self::Multiply => "MULTIPLY",
            Self::Color => "COLOR",
            Self::Add => "ADD",
            Self::Behind => "BEHIND",
            Self::Darken => "DARKEN",
            Self::Lighten => "LIGHTEN",
            Self::Screen => "SCREEN",
            Self::Dodge => "DODGE",
            Self::Burn => "BURN",
            Self::HardLight => "HARD_LIGHT",
            Self::SoftLight => "SOFT_LIGHT",
            Self::Luminosity => "LUMINOSITY",
            Self::Erase => "ERASE",
        }
    }

    fn pretty_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Overlay => "Overlay",
            Self::Multiply => "Multiply",
            Self::Color => "Color",
            Self::Add => "Addition",
            Self::Behind => "Behind",
            Self::Darken => "Darken",
            Self::Lighten => "Lighten",
            Self::Screen => "Screen",
            Self::Dodge => "Color dodge",
            Self::Burn => "Color burn",
            Self::HardLight => "Hard light",
            Self::SoftLight => "Soft light",
            Self::Luminosity => "Luminosity",
            Self::Erase => "Erase",
        }
    }
}

/// Numeric properties of the active brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrushProperty {
    /// Opacity in `0.0..=1.0`.
    Opacity,
    /// Flow in `0.0..=1.0`.
    Flow,
    /// Diameter in pixels.
    Size,
    /// Rotation in degrees.
    Rotation,
}

crate::enum_field_value!(Tool, Toggle, BlendingMode);
