//! In-memory host used headlessly and by tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use super::{BlendingMode, BrushProperty, Host, HostError, LayerId, LayerInfo, Tool, Toggle};
use crate::util::{Point, lock};

#[derive(Debug)]
struct State {
    document_open: bool,
    cursor: Point,
    tool: Tool,
    toggles: HashMap<Toggle, bool>,
    properties: HashMap<BrushProperty, f64>,
    time: i32,
    layers: Vec<LayerInfo>,
    current_layer: Option<LayerId>,
    next_layer_id: u64,
    preset: String,
    presets: BTreeSet<String>,
    tags: HashMap<String, Vec<String>>,
    blending_mode: BlendingMode,
    writes: usize,
    shown_widgets: BTreeSet<String>,
    repaints: usize,
}

/// A [`Host`] keeping the whole application state in memory.
///
/// Every successful setter increments [`MemoryHost::write_count`], which lets
/// tests assert that nothing was written after a session stopped.
#[derive(Debug)]
pub struct MemoryHost {
    state: Mutex<State>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Creates a host with one open document holding a single visible layer.
    pub fn new() -> Self {
        let properties = HashMap::from([
            (BrushProperty::Opacity, 1.0),
            (BrushProperty::Flow, 1.0),
            (BrushProperty::Size, 40.0),
            (BrushProperty::Rotation, 0.0),
        ]);
        let preset = "Basic-5 Size Opacity".to_string();
        let host = Self {
            state: Mutex::new(State {
                document_open: true,
                cursor: Point::default(),
                tool: Tool::FreehandBrush,
                toggles: HashMap::new(),
                properties,
                time: 0,
                layers: Vec::new(),
                current_layer: None,
                next_layer_id: 1,
                preset: preset.clone(),
                presets: BTreeSet::from([preset]),
                tags: HashMap::new(),
                blending_mode: BlendingMode::Normal,
                writes: 0,
                shown_widgets: BTreeSet::new(),
                repaints: 0,
            }),
        };
        host.add_layer("Background", true);
        host
    }

    /// Replaces the layer stack. The topmost layer becomes active.
    pub fn with_layers(self, layers: &[(&str, bool)]) -> Self {
        {
            let mut state = lock(&self.state);
            state.layers.clear();
            state.current_layer = None;
        }
        for (name, visible) in layers {
            self.add_layer(name, *visible);
        }
        self
    }

    /// Registers a tag and the presets carrying it.
    pub fn with_tag(self, tag: &str, presets: &[&str]) -> Self {
        {
            let mut state = lock(&self.state);
            let names: Vec<String> = presets.iter().map(|p| p.to_string()).collect();
            state.presets.extend(names.iter().cloned());
            state.tags.insert(tag.to_string(), names);
        }
        self
    }

    /// Adds a layer on top of the stack and makes it active.
    pub fn add_layer(&self, name: &str, visible: bool) -> LayerId {
        let mut state = lock(&self.state);
        let id = LayerId(state.next_layer_id);
        state.next_layer_id += 1;
        state.layers.push(LayerInfo {
            id,
            name: name.to_string(),
            visible,
        });
        state.current_layer = Some(id);
        id
    }

    /// Changes the members of a tag, as the user would in the preset docker.
    pub fn set_tag(&self, tag: &str, presets: &[&str]) {
        let mut state = lock(&self.state);
        let names: Vec<String> = presets.iter().map(|p| p.to_string()).collect();
        state.presets.extend(names.iter().cloned());
        state.tags.insert(tag.to_string(), names);
    }

    pub fn set_cursor(&self, position: Point) {
        lock(&self.state).cursor = position;
    }

    /// Simulates closing the last document; document-bound calls then fail.
    pub fn close_document(&self) {
        lock(&self.state).document_open = false;
    }

    /// Number of successful setter calls so far.
    pub fn write_count(&self) -> usize {
        lock(&self.state).writes
    }

    /// Identifiers of the widgets currently shown.
    pub fn shown_widgets(&self) -> Vec<String> {
        lock(&self.state).shown_widgets.iter().cloned().collect()
    }

    pub fn repaint_count(&self) -> usize {
        lock(&self.state).repaints
    }

    fn document<R>(&self, f: impl FnOnce(&mut State) -> Result<R, HostError>) -> Result<R, HostError> {
        let mut state = lock(&self.state);
        if !state.document_open {
            return Err(HostError::NoDocument);
        }
        f(&mut state)
    }

    fn modify(&self, f: impl FnOnce(&mut State) -> Result<(), HostError>) -> Result<(), HostError> {
        self.document(|state| {
            f(state)?;
            state.writes += 1;
            Ok(())
        })
    }
}

impl Host for MemoryHost {
    fn cursor_position(&self) -> Point {
        lock(&self.state).cursor
    }

    fn tool(&self) -> Result<Tool, HostError> {
        Ok(lock(&self.state).tool)
    }

    fn set_tool(&self, tool: Tool) -> Result<(), HostError> {
        let mut state = lock(&self.state);
        state.tool = tool;
        state.writes += 1;
        Ok(())
    }

    fn toggle(&self, toggle: Toggle) -> Result<bool, HostError> {
        Ok(lock(&self.state).toggles.get(&toggle).copied().unwrap_or(false))
    }

    fn set_toggle(&self, toggle: Toggle, on: bool) -> Result<(), HostError> {
        let mut state = lock(&self.state);
        state.toggles.insert(toggle, on);
        state.writes += 1;
        Ok(())
    }

    fn brush_property(&self, property: BrushProperty) -> Result<f64, HostError> {
        Ok(lock(&self.state)
            .properties
            .get(&property)
            .copied()
            .unwrap_or_default())
    }

    fn set_brush_property(&self, property: BrushProperty, value: f64) -> Result<(), HostError> {
        if !value.is_finite() {
            return Err(HostError::Rejected(format!("{property:?} must be finite")));
        }
        let mut state = lock(&self.state);
        state.properties.insert(property, value);
        state.writes += 1;
        Ok(())
    }

    fn current_time(&self) -> Result<i32, HostError> {
        self.document(|state| Ok(state.time))
    }

    fn set_current_time(&self, frame: i32) -> Result<(), HostError> {
        self.modify(|state| {
            state.time = frame.max(0);
            Ok(())
        })
    }

    fn layers(&self) -> Result<Vec<LayerInfo>, HostError> {
        self.document(|state| Ok(state.layers.clone()))
    }

    fn current_layer(&self) -> Result<LayerId, HostError> {
        self.document(|state| state.current_layer.ok_or(HostError::NoActiveLayer))
    }

    fn set_current_layer(&self, layer: LayerId) -> Result<(), HostError> {
        self.modify(|state| {
            if !state.layers.iter().any(|info| info.id == layer) {
                return Err(HostError::UnknownLayer(layer));
            }
            state.current_layer = Some(layer);
            Ok(())
        })
    }

    fn set_layer_visible(&self, layer: LayerId, visible: bool) -> Result<(), HostError> {
        self.modify(|state| {
            let info = state
                .layers
                .iter_mut()
                .find(|info| info.id == layer)
                .ok_or(HostError::UnknownLayer(layer))?;
            info.visible = visible;
            Ok(())
        })
    }

    fn preset(&self) -> Result<String, HostError> {
        Ok(lock(&self.state).preset.clone())
    }

    fn set_preset(&self, name: &str) -> Result<(), HostError> {
        let mut state = lock(&self.state);
        if !state.presets.contains(name) {
            return Err(HostError::UnknownPreset(name.to_string()));
        }
        state.preset = name.to_string();
        state.writes += 1;
        Ok(())
    }

    fn tag_presets(&self, tag: &str) -> Vec<String> {
        lock(&self.state).tags.get(tag).cloned().unwrap_or_default()
    }

    fn blending_mode(&self) -> Result<BlendingMode, HostError> {
        Ok(lock(&self.state).blending_mode)
    }

    fn set_blending_mode(&self, mode: BlendingMode) -> Result<(), HostError> {
        let mut state = lock(&self.state);
        state.blending_mode = mode;
        state.writes += 1;
        Ok(())
    }

    fn show_widget(&self, id: &str, _center: Point, _radius: u32) {
        lock(&self.state).shown_widgets.insert(id.to_string());
    }

    fn hide_widget(&self, id: &str) {
        lock(&self.state).shown_widgets.remove(id);
    }

    fn repaint_widget(&self, _id: &str) {
        lock(&self.state).repaints += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_host_has_one_active_layer() {
        let host = MemoryHost::new();
        let layers = host.layers().unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(host.current_layer().unwrap(), layers[0].id);
    }

    #[test]
    fn test_with_layers_activates_top() {
        let host = MemoryHost::new().with_layers(&[("a", true), ("b", false), ("c", true)]);
        let layers = host.layers().unwrap();
        assert_eq!(layers.len(), 3);
        assert_eq!(host.current_layer().unwrap(), layers[2].id);
    }

    #[test]
    fn test_closed_document_rejects_layer_calls() {
        let host = MemoryHost::new();
        host.close_document();
        assert_eq!(host.layers().unwrap_err(), HostError::NoDocument);
        assert_eq!(host.set_current_time(3).unwrap_err(), HostError::NoDocument);
        assert_eq!(host.write_count(), 0);
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        let host = MemoryHost::new().with_tag("Erasers", &["Eraser Soft"]);
        assert!(host.set_preset("Eraser Soft").is_ok());
        assert!(matches!(
            host.set_preset("Missing"),
            Err(HostError::UnknownPreset(_))
        ));
        assert_eq!(host.preset().unwrap(), "Eraser Soft");
    }

    #[test]
    fn test_widget_visibility_is_tracked() {
        let host = MemoryHost::new();
        host.show_widget("Pie", Point::new(1, 1), 10);
        assert_eq!(host.shown_widgets(), vec!["Pie".to_string()]);
        host.hide_widget("Pie");
        assert!(host.shown_widgets().is_empty());
    }
}
