//! Persisted configuration of pie menus.
//!
//! Each pie stores its settings in a group named after the action. The order
//! of values is a [`DualField`], so it can be kept per document when
//! `Save local` is enabled.

use std::sync::Arc;

use crate::components::ControlledValue;
use crate::config::{
    Callback, Color, ConfigError, ConfigStore, DeadzoneStrategy, DualField, EnumValue, Field,
    FieldGroup, ListElement,
};
use crate::host::Host;

/// Construction defaults of the settings shared by every pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieDefaults {
    pub pie_radius_scale: f64,
    pub icon_radius_scale: f64,
    pub save_local: bool,
    pub deadzone_strategy: DeadzoneStrategy,
    /// `None` follows the host theme.
    pub background_color: Option<Color>,
    /// `None` follows the host theme.
    pub active_color: Option<Color>,
    /// Opacity of the pie background in percent.
    pub pie_opacity: u32,
}

impl Default for PieDefaults {
    fn default() -> Self {
        Self {
            pie_radius_scale: 1.0,
            icon_radius_scale: 1.0,
            save_local: false,
            deadzone_strategy: DeadzoneStrategy::DoNothing,
            background_color: None,
            active_color: None,
            pie_opacity: 75,
        }
    }
}

/// Settings shared by every pie, stored in the action's group.
#[derive(Debug, Clone)]
pub struct PieSettings {
    group: FieldGroup,
    pub pie_radius_scale: Field<f64>,
    pub icon_radius_scale: Field<f64>,
    pub save_local: Field<bool>,
    pub deadzone_strategy: Field<DeadzoneStrategy>,
    pub use_default_theme: Field<bool>,
    pub background_color: Field<Color>,
    pub active_color: Field<Color>,
    pub pie_opacity: Field<u32>,
}

impl PieSettings {
    pub fn new(store: &Arc<ConfigStore>, name: &str, defaults: &PieDefaults) -> Self {
        let group = FieldGroup::new(store, name);
        let use_default_theme =
            defaults.background_color.is_none() && defaults.active_color.is_none();
        Self {
            pie_radius_scale: group.field("Pie scale", defaults.pie_radius_scale),
            icon_radius_scale: group.field("Icon scale", defaults.icon_radius_scale),
            save_local: group.field("Save local", defaults.save_local),
            deadzone_strategy: group.field("Deadzone strategy", defaults.deadzone_strategy),
            use_default_theme: group.field("Use default theme", use_default_theme),
            background_color: group.field(
                "Background color",
                defaults.background_color.unwrap_or(Color::rgb(49, 49, 49)),
            ),
            active_color: group.field(
                "Active color",
                defaults.active_color.unwrap_or(Color::rgb(61, 174, 233)),
            ),
            pie_opacity: group.field("Pie opacity", defaults.pie_opacity),
            group,
        }
    }

    pub fn group(&self) -> &FieldGroup {
        &self.group
    }

    /// Background color, taken from the host theme when the default theme is used.
    pub fn background_color(&self, host: &dyn Host) -> Color {
        let color = if self.use_default_theme.read() {
            host.main_theme_color()
        } else {
            self.background_color.read()
        };
        color.with_alpha(self.opacity_alpha())
    }

    /// Highlight color, taken from the host theme when the default theme is used.
    pub fn active_color(&self, host: &dyn Host) -> Color {
        if self.use_default_theme.read() {
            host.active_theme_color()
        } else {
            self.active_color.read()
        }
    }

    fn opacity_alpha(&self) -> u8 {
        let percent = self.pie_opacity.read().min(100);
        (f64::from(percent) * 2.55).round() as u8
    }
}

/// Configuration of one pie menu.
pub trait PieConfig<T: ControlledValue>: Send + Sync {
    fn settings(&self) -> &PieSettings;

    /// Values in display order.
    fn values(&self) -> Vec<T>;

    /// Persists a new order.
    fn set_values(&self, values: Vec<T>) -> Result<(), ConfigError>;

    /// Rewrites the persisted order to match [`PieConfig::values`].
    fn refresh_order(&self) -> Result<(), ConfigError> {
        self.set_values(self.values())
    }

    /// Stores the current order as the default.
    fn set_current_as_default(&self) -> Result<(), ConfigError>;

    /// Makes an empty pie the new default order.
    fn reset_the_default(&self) -> Result<(), ConfigError>;

    /// Replaces the current order with the default one.
    fn reset_to_default(&self) -> Result<(), ConfigError>;

    fn is_order_default(&self) -> bool;

    /// Registers `callback` on every field that affects the order.
    fn register_to_order_related(&self, callback: Callback);

    /// Whether the user may remove values from the pie.
    fn allow_remove(&self) -> bool;
}

// ============================================================================
// Fixed value lists
// ============================================================================

/// Pie over an arbitrary list of values stored in the action's group.
#[derive(Debug, Clone)]
pub struct NonPresetPieConfig<T: ListElement> {
    settings: PieSettings,
    order: DualField<Vec<T>>,
}

impl<T: ListElement> NonPresetPieConfig<T> {
    pub fn new(store: &Arc<ConfigStore>, name: &str, values: Vec<T>, defaults: &PieDefaults) -> Self {
        let settings = PieSettings::new(store, name, defaults);
        let order = settings
            .group()
            .dual_field("Values", values, &settings.save_local);
        Self { settings, order }
    }
}

impl<T: ListElement> PieConfig<T> for NonPresetPieConfig<T> {
    fn settings(&self) -> &PieSettings {
        &self.settings
    }

    fn values(&self) -> Vec<T> {
        self.order.read()
    }

    fn set_values(&self, values: Vec<T>) -> Result<(), ConfigError> {
        self.order.write(values)
    }

    fn set_current_as_default(&self) -> Result<(), ConfigError> {
        self.order.set_default(self.order.read())
    }

    fn reset_the_default(&self) -> Result<(), ConfigError> {
        self.order.set_default(Vec::new())
    }

    fn reset_to_default(&self) -> Result<(), ConfigError> {
        self.order.reset_default()
    }

    fn is_order_default(&self) -> bool {
        self.order.read() == self.order.default()
    }

    fn register_to_order_related(&self, callback: Callback) {
        self.order.register_callback(move || callback());
    }

    fn allow_remove(&self) -> bool {
        true
    }
}

/// Pie over variants of an enumeration.
#[derive(Debug, Clone)]
pub struct EnumPieConfig<T: EnumValue + ListElement> {
    inner: NonPresetPieConfig<T>,
}

impl<T: EnumValue + ListElement> EnumPieConfig<T> {
    pub fn new(store: &Arc<ConfigStore>, name: &str, values: Vec<T>, defaults: &PieDefaults) -> Self {
        Self {
            inner: NonPresetPieConfig::new(store, name, values, defaults),
        }
    }

    /// Variants not shown in the pie yet, in declaration order.
    pub fn available_values(&self) -> Vec<T> {
        let current = self.inner.values();
        T::ALL
            .iter()
            .copied()
            .filter(|variant| !current.contains(variant))
            .collect()
    }
}

impl<T: EnumValue + ListElement> PieConfig<T> for EnumPieConfig<T> {
    fn settings(&self) -> &PieSettings {
        self.inner.settings()
    }

    fn values(&self) -> Vec<T> {
        self.inner.values()
    }

    fn set_values(&self, values: Vec<T>) -> Result<(), ConfigError> {
        self.inner.set_values(values)
    }

    fn set_current_as_default(&self) -> Result<(), ConfigError> {
        self.inner.set_current_as_default()
    }

    fn reset_the_default(&self) -> Result<(), ConfigError> {
        self.inner.reset_the_default()
    }

    fn reset_to_default(&self) -> Result<(), ConfigError> {
        self.inner.reset_to_default()
    }

    fn is_order_default(&self) -> bool {
        self.inner.is_order_default()
    }

    fn register_to_order_related(&self, callback: Callback) {
        self.inner.register_to_order_related(callback);
    }

    fn allow_remove(&self) -> bool {
        true
    }
}

// ============================================================================
// Preset tags
// ============================================================================

/// Pie over the brush presets of a tag.
///
/// Membership follows the tag; the persisted order only arranges it. Presets
/// removed from the tag disappear and newly tagged ones are appended.
pub struct PresetPieConfig {
    settings: PieSettings,
    host: Arc<dyn Host>,
    tag_name: DualField<String>,
    order: DualField<Vec<String>>,
}

impl PresetPieConfig {
    pub fn new(
        store: &Arc<ConfigStore>,
        host: &Arc<dyn Host>,
        name: &str,
        tag_name: &str,
        defaults: &PieDefaults,
    ) -> Self {
        let settings = PieSettings::new(store, name, defaults);
        let group = settings.group().clone();
        Self {
            tag_name: group.dual_field("Tag", tag_name.to_string(), &settings.save_local),
            order: group.dual_field("Values", Vec::new(), &settings.save_local),
            host: Arc::clone(host),
            settings,
        }
    }

    pub fn tag_name(&self) -> String {
        self.tag_name.read()
    }

    pub fn set_tag_name(&self, tag: &str) -> Result<(), ConfigError> {
        self.tag_name.write(tag.to_string())
    }

    /// Switches the pie to whatever tag `source` names from now on.
    pub fn follow_tag(self, source: &Field<String>) -> Self {
        self.tag_name.follow(source);
        self
    }

    /// Current members of the tag, in the host's order.
    pub fn tag_members(&self) -> Vec<String> {
        self.host.tag_presets(&self.tag_name.read())
    }
}

/// Saved order restricted to `members`, followed by the members missing from it.
pub fn merge_preset_order(saved: &[String], members: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = saved
        .iter()
        .filter(|preset| members.contains(preset))
        .cloned()
        .collect();
    for preset in members {
        if !merged.contains(preset) {
            merged.push(preset.clone());
        }
    }
    merged
}

impl PieConfig<String> for PresetPieConfig {
    fn settings(&self) -> &PieSettings {
        &self.settings
    }

    fn values(&self) -> Vec<String> {
        merge_preset_order(&self.order.read(), &self.tag_members())
    }

    fn set_values(&self, values: Vec<String>) -> Result<(), ConfigError> {
        self.order.write(values)
    }

    fn set_current_as_default(&self) -> Result<(), ConfigError> {
        self.order.set_default(self.values())
    }

    fn reset_the_default(&self) -> Result<(), ConfigError> {
        self.order.set_default(Vec::new())
    }

    fn reset_to_default(&self) -> Result<(), ConfigError> {
        self.order.reset_default()
    }

    fn is_order_default(&self) -> bool {
        let members = self.tag_members();
        merge_preset_order(&self.order.default(), &members) == self.values()
    }

    fn register_to_order_related(&self, callback: Callback) {
        let on_order = Arc::clone(&callback);
        self.order.register_callback(move || on_order());
        self.tag_name.register_callback(move || callback());
    }

    fn allow_remove(&self) -> bool {
        false
    }
}
