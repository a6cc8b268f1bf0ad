//! Shortcut-driven tools for digital painting hosts.
//!
//! Actions are composed from a few reusable templates ([`templates`]) which
//! combine [`Controller`](components::Controller)s, instructions and tracking
//! state machines. The painting application is reached through the
//! [`Host`](host::Host) trait; settings live in an explicit
//! [`ConfigStore`](config::ConfigStore).

pub mod catalog;
pub mod components;
pub mod config;
pub mod host;
pub mod input;
pub mod pie;
pub mod rotation;
pub mod slider;
pub mod templates;
pub mod util;
pub mod worker;

use std::sync::Arc;

use config::{ConfigStore, GlobalConfig};
use host::Host;

pub use input::{ActionError, ActionRegistry, PluginAction};

/// Shared handles passed to every action at construction.
#[derive(Clone)]
pub struct PluginContext {
    pub host: Arc<dyn Host>,
    pub store: Arc<ConfigStore>,
    pub config: GlobalConfig,
}

impl PluginContext {
    pub fn new(host: Arc<dyn Host>, store: Arc<ConfigStore>) -> Self {
        let config = GlobalConfig::new(&store);
        Self {
            host,
            store,
            config,
        }
    }
}
