//! Ordered value domains that may change between key presses.

use std::sync::Arc;

use super::ControlledValue;
use crate::config::{Field, ListElement};
use crate::host::{Host, HostError, LayerId};

/// Produces the ordered values an action cycles through.
///
/// Sources are read again on every key press, so a domain backed by the host
/// (a preset tag, the layer stack) always reflects its current state.
pub trait ValueSource<T: ControlledValue>: Send + Sync {
    fn values(&self) -> Result<Vec<T>, HostError>;
}

impl<T: ControlledValue> ValueSource<T> for Vec<T> {
    fn values(&self) -> Result<Vec<T>, HostError> {
        Ok(self.clone())
    }
}

impl<T: ListElement> ValueSource<T> for Field<Vec<T>> {
    fn values(&self) -> Result<Vec<T>, HostError> {
        Ok(self.read())
    }
}

/// Brush presets carrying a tag, in the host's order.
pub struct Tag {
    host: Arc<dyn Host>,
    name: String,
}

impl Tag {
    pub fn new(host: &Arc<dyn Host>, name: impl Into<String>) -> Self {
        Self {
            host: Arc::clone(host),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ValueSource<String> for Tag {
    fn values(&self) -> Result<Vec<String>, HostError> {
        Ok(self.host.tag_presets(&self.name))
    }
}

/// Which layers of the stack a [`CurrentLayerStack`] yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickStrategy {
    /// Every layer.
    All,
    /// Visible layers only.
    Visible,
    /// Layers sharing the visibility of the active one.
    CurrentVisibility,
}

/// Layers of the current document, bottom first.
pub struct CurrentLayerStack {
    host: Arc<dyn Host>,
    strategy: PickStrategy,
}

impl CurrentLayerStack {
    pub fn new(host: &Arc<dyn Host>, strategy: PickStrategy) -> Self {
        Self {
            host: Arc::clone(host),
            strategy,
        }
    }
}

impl ValueSource<LayerId> for CurrentLayerStack {
    fn values(&self) -> Result<Vec<LayerId>, HostError> {
        let layers = self.host.layers()?;
        let current = self.host.current_layer()?;

        let picked = match self.strategy {
            PickStrategy::All => layers,
            PickStrategy::Visible => layers
                .into_iter()
                .filter(|info| info.visible || info.id == current)
                .collect(),
            PickStrategy::CurrentVisibility => {
                let visible = layers
                    .iter()
                    .find(|info| info.id == current)
                    .is_some_and(|info| info.visible);
                layers
                    .into_iter()
                    .filter(|info| info.visible == visible)
                    .collect()
            }
        };
        Ok(picked.into_iter().map(|info| info.id).collect())
    }
}
