use log::debug;
use std::sync::{Arc, Mutex, RwLock};

use super::{RotationParams, Zone, rotation_value};
use crate::components::Controller;
use crate::config::{Field, RotationDeadzoneStrategy};
use crate::host::HostError;
use crate::util::{lock, read, write};

#[derive(Debug, Default)]
struct Session {
    armed: bool,
    value_at_press: Option<i32>,
    /// Last value known to be set: written by us or read at press.
    current: Option<i32>,
    in_deadzone: bool,
}

/// Writes the angle under the pointer to the controller while armed.
pub struct RotationActuator {
    controller: Arc<dyn Controller<i32>>,
    strategy: Arc<RwLock<RotationDeadzoneStrategy>>,
    session: Mutex<Session>,
}

impl RotationActuator {
    pub fn new(
        controller: Arc<dyn Controller<i32>>,
        strategy_field: &Field<RotationDeadzoneStrategy>,
    ) -> Self {
        let strategy = Arc::new(RwLock::new(strategy_field.read()));

        let cache = Arc::clone(&strategy);
        strategy_field.on_change(move |value| {
            *write(&cache) = value;
        });

        Self {
            controller,
            strategy,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn strategy(&self) -> RotationDeadzoneStrategy {
        *read(&self.strategy)
    }

    pub fn is_armed(&self) -> bool {
        lock(&self.session).armed
    }

    /// Arms the actuator, remembering the value at press.
    pub fn start(&self) -> Result<(), HostError> {
        self.controller.refresh()?;
        let value = self.controller.get_value()?;
        *lock(&self.session) = Session {
            armed: true,
            value_at_press: Some(value),
            current: Some(value),
            in_deadzone: true,
        };
        Ok(())
    }

    /// Follows the pointer. Returns whether a value was written.
    ///
    /// Coming back to the deadzone after leaving it applies the deadzone strategy.
    pub fn update(&self, zone: Zone, angle: f64, params: &RotationParams) -> Result<bool, HostError> {
        let mut session = lock(&self.session);
        if !session.armed {
            return Ok(false);
        }

        if zone == Zone::Deadzone {
            let entered = !session.in_deadzone;
            session.in_deadzone = true;
            if entered {
                return self.resolve_deadzone(&mut session);
            }
            return Ok(false);
        }

        session.in_deadzone = false;
        match rotation_value(angle, zone, params) {
            Some(value) => self.write_value(&mut session, value),
            None => Ok(false),
        }
    }

    /// Disarms the actuator. A release inside the deadzone applies the
    /// deadzone strategy.
    pub fn stop(&self, zone: Zone) -> Result<(), HostError> {
        let mut session = lock(&self.session);
        if !session.armed {
            return Ok(());
        }
        session.armed = false;
        if zone == Zone::Deadzone {
            self.resolve_deadzone(&mut session)?;
        }
        Ok(())
    }

    fn resolve_deadzone(&self, session: &mut Session) -> Result<bool, HostError> {
        let strategy = self.strategy();
        debug!("Rotation deadzone resolved with {strategy:?}");
        match strategy {
            RotationDeadzoneStrategy::KeepChange => Ok(false),
            RotationDeadzoneStrategy::DiscardChange => match session.value_at_press {
                Some(value) => self.write_value(session, value),
                None => Ok(false),
            },
            RotationDeadzoneStrategy::SetToZero => self.write_value(session, 0),
        }
    }

    fn write_value(&self, session: &mut Session, value: i32) -> Result<bool, HostError> {
        if session.current == Some(value) {
            return Ok(false);
        }
        self.controller.set_value(value)?;
        session.current = Some(value);
        Ok(true)
    }
}
