//! Interface implemented by every action.

use std::time::Duration;

use super::ActionError;

/// Handlers invoked by the [`ShortcutAdapter`](super::ShortcutAdapter) of an action.
///
/// A key press calls [`on_key_press`](PluginAction::on_key_press). The release
/// calls either [`on_short_key_release`](PluginAction::on_short_key_release) or
/// [`on_long_key_release`](PluginAction::on_long_key_release), depending on how
/// long the key was held, followed by
/// [`on_every_key_release`](PluginAction::on_every_key_release).
pub trait PluginAction: Send + Sync {
    /// Unique name under which the host binds a shortcut.
    fn name(&self) -> &str;

    /// Hold time separating short and long presses for this action. `None`
    /// uses the global setting.
    fn short_vs_long_press_time(&self) -> Option<Duration> {
        None
    }

    fn on_key_press(&self) -> Result<(), ActionError> {
        Ok(())
    }

    fn on_short_key_release(&self) -> Result<(), ActionError> {
        Ok(())
    }

    fn on_long_key_release(&self) -> Result<(), ActionError> {
        Ok(())
    }

    fn on_every_key_release(&self) -> Result<(), ActionError> {
        Ok(())
    }
}
