//! Stock instructions.

use log::debug;
use std::sync::{Arc, Mutex};

use super::Instruction;
use crate::host::{Host, HostError, LayerId, Tool, Toggle};
use crate::util::lock;

/// Switches to the freehand brush if the active tool cannot paint.
pub struct SetBrushOnNonPaintable {
    host: Arc<dyn Host>,
}

impl SetBrushOnNonPaintable {
    pub fn new(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
        }
    }
}

impl Instruction for SetBrushOnNonPaintable {
    fn enter(&self) -> Result<(), HostError> {
        if !self.host.tool()?.is_paintable() {
            self.host.set_tool(Tool::FreehandBrush)?;
        }
        Ok(())
    }
}

/// Turns a toggle on when the action starts.
pub struct EnsureOn {
    host: Arc<dyn Host>,
    toggle: Toggle,
}

impl EnsureOn {
    pub fn new(host: &Arc<dyn Host>, toggle: Toggle) -> Self {
        Self {
            host: Arc::clone(host),
            toggle,
        }
    }
}

impl Instruction for EnsureOn {
    fn enter(&self) -> Result<(), HostError> {
        self.host.set_toggle(self.toggle, true)
    }
}

/// Turns a toggle off when the action starts.
pub struct EnsureOff {
    host: Arc<dyn Host>,
    toggle: Toggle,
}

impl EnsureOff {
    pub fn new(host: &Arc<dyn Host>, toggle: Toggle) -> Self {
        Self {
            host: Arc::clone(host),
            toggle,
        }
    }
}

impl Instruction for EnsureOff {
    fn enter(&self) -> Result<(), HostError> {
        self.host.set_toggle(self.toggle, false)
    }
}

/// Keeps a toggle on while the key is held, then restores its previous state.
pub struct TemporaryOn {
    host: Arc<dyn Host>,
    toggle: Toggle,
    was_on: Mutex<bool>,
}

impl TemporaryOn {
    pub fn new(host: &Arc<dyn Host>, toggle: Toggle) -> Self {
        Self {
            host: Arc::clone(host),
            toggle,
            was_on: Mutex::new(false),
        }
    }
}

impl Instruction for TemporaryOn {
    fn enter(&self) -> Result<(), HostError> {
        *lock(&self.was_on) = self.host.toggle(self.toggle)?;
        self.host.set_toggle(self.toggle, true)
    }

    fn exit(&self) -> Result<(), HostError> {
        if !*lock(&self.was_on) {
            self.host.set_toggle(self.toggle, false)?;
        }
        Ok(())
    }
}

/// Flips the visibility of the active layer for the duration of the action.
pub struct ToggleLayerVisibility {
    host: Arc<dyn Host>,
    affected: Mutex<Option<(LayerId, bool)>>,
}

impl ToggleLayerVisibility {
    pub fn new(host: &Arc<dyn Host>) -> Self {
        Self {
            host: Arc::clone(host),
            affected: Mutex::new(None),
        }
    }
}

impl Instruction for ToggleLayerVisibility {
    fn enter(&self) -> Result<(), HostError> {
        let layer = self.host.current_layer()?;
        let visible = self
            .host
            .layers()?
            .into_iter()
            .find(|info| info.id == layer)
            .map(|info| info.visible)
            .ok_or(HostError::UnknownLayer(layer))?;

        self.host.set_layer_visible(layer, !visible)?;
        *lock(&self.affected) = Some((layer, visible));
        debug!("Layer {layer:?} visibility flipped to {}", !visible);
        Ok(())
    }

    fn exit(&self) -> Result<(), HostError> {
        if let Some((layer, visible)) = lock(&self.affected).take() {
            self.host.set_layer_visible(layer, visible)?;
        }
        Ok(())
    }
}
