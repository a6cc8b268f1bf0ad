//! Uniform access to one host property.

use std::fmt::Debug;

use crate::host::HostError;

/// Bound satisfied by every value a controller can handle.
pub trait ControlledValue: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Debug + Send + Sync + 'static> ControlledValue for T {}

/// Gets and sets one property of the host application.
///
/// Controllers hold no state of their own beyond cached host handles, so a
/// single instance can be shared between several actions.
pub trait Controller<T: ControlledValue>: Send + Sync {
    /// Resynchronizes cached host handles. Called before every use.
    fn refresh(&self) -> Result<(), HostError> {
        Ok(())
    }

    fn get_value(&self) -> Result<T, HostError>;

    fn set_value(&self, value: T) -> Result<(), HostError>;

    /// Value used when an action has no explicit default.
    fn default_value(&self) -> Option<T> {
        None
    }

    /// Name of `value` shown to the user.
    fn pretty_name(&self, value: &T) -> String {
        format!("{value:?}")
    }
}
