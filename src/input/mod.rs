//! Keyboard-facing side of the plugin.
//!
//! The host reports key presses and releases for registered action names. The
//! [`ActionRegistry`] routes them to a [`ShortcutAdapter`] per action, which
//! filters auto-repeat, classifies the hold as short or long and invokes the
//! [`PluginAction`] handlers.

pub mod action;
pub mod adapter;

pub use action::PluginAction;
pub use adapter::{ActionRegistry, ShortcutAdapter};

use thiserror::Error;

use crate::config::ConfigError;
use crate::host::HostError;

/// Errors raised while building or running an action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("host call failed: {0}")]
    Host(#[from] HostError),

    #[error("settings error: {0}")]
    Config(#[from] ConfigError),

    #[error("action '{0}' needs at least one slider")]
    MissingSlider(String),

    #[error("action '{0}' is already registered")]
    DuplicateAction(String),

    #[error("failed to spawn worker thread: {0}")]
    Worker(#[from] std::io::Error),
}
