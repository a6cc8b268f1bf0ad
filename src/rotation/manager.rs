use log::{debug, warn};
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};

use super::{RotationActuator, RotationConfig, RotationGeometry, RotationParams, Zone};
use crate::config::GlobalConfig;
use crate::host::Host;
use crate::input::ActionError;
use crate::util::{Point, angle_from_center, lock};
use crate::worker::TrackingWorker;

#[derive(Debug, Clone, Copy)]
struct Session {
    geometry: RotationGeometry,
    params: RotationParams,
    zone: Zone,
}

impl Session {
    fn locate(&self, pointer: Point) -> (Zone, f64) {
        (
            self.geometry.zone(pointer, self.params.inverse_zones),
            angle_from_center(self.geometry.center, pointer),
        )
    }
}

/// Lifecycle of the rotation widget and of its tracking worker.
pub struct RotationManager {
    id: String,
    host: Arc<dyn Host>,
    global: GlobalConfig,
    config: RotationConfig,
    actuator: Arc<RotationActuator>,
    session: Arc<Mutex<Option<Session>>>,
    worker: Mutex<Option<TrackingWorker>>,
}

impl RotationManager {
    pub fn new(
        id: impl Into<String>,
        host: Arc<dyn Host>,
        global: GlobalConfig,
        config: RotationConfig,
        actuator: Arc<RotationActuator>,
    ) -> Self {
        Self {
            id: id.into(),
            host,
            global,
            config,
            actuator,
            session: Arc::new(Mutex::new(None)),
            worker: Mutex::new(None),
        }
    }

    /// Shows the widget at `center` and starts following the pointer.
    ///
    /// # Errors
    /// Returns an error if the controller cannot be read or the tracking thread
    /// cannot be spawned.
    pub fn start(&self, center: Point) -> Result<(), ActionError> {
        self.stop()?;

        let geometry = RotationGeometry::new(
            center,
            self.config.deadzone_scale.read(),
            self.config.inner_zone_scale.read(),
            &self.global,
        );
        let params = self.config.params();
        self.actuator.start()?;
        *lock(&self.session) = Some(Session {
            geometry,
            params,
            zone: Zone::Deadzone,
        });
        self.host
            .show_widget(&self.id, center, geometry.outer_radius.round() as u32);

        let host = Arc::clone(&self.host);
        let session = Arc::clone(&self.session);
        let actuator = Arc::clone(&self.actuator);
        let id = self.id.clone();
        let worker = TrackingWorker::spawn(
            &format!("{} rotation", self.id),
            self.global.tick_interval(),
            move || {
                let pointer = host.cursor_position();
                let (zone, angle, zone_changed) = {
                    let mut guard = lock(&session);
                    let Some(session) = guard.as_mut() else {
                        return ControlFlow::Break(());
                    };
                    let (zone, angle) = session.locate(pointer);
                    let zone_changed = session.zone != zone;
                    session.zone = zone;
                    (zone, angle, zone_changed)
                };

                match actuator.update(zone, angle, &params) {
                    Ok(written) => {
                        if written || zone_changed {
                            host.repaint_widget(&id);
                        }
                        ControlFlow::Continue(())
                    }
                    Err(err) => {
                        warn!("{id}: stopping rotation after host error: {err}");
                        ControlFlow::Break(())
                    }
                }
            },
        )?;
        *lock(&self.worker) = Some(worker);
        debug!("{}: rotation widget opened", self.id);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        lock(&self.session).is_some()
    }

    /// Zone under the pointer at the last tick.
    pub fn zone(&self) -> Option<Zone> {
        lock(&self.session).as_ref().map(|session| session.zone)
    }

    /// Stops tracking, resolves the release and hides the widget.
    ///
    /// # Errors
    /// Returns an error if the deadzone strategy fails to write its value.
    pub fn stop(&self) -> Result<(), ActionError> {
        let worker = lock(&self.worker).take();
        if let Some(mut worker) = worker {
            worker.stop();
        }

        let Some(session) = lock(&self.session).take() else {
            return Ok(());
        };
        let (zone, _) = session.locate(self.host.cursor_position());
        self.host.hide_widget(&self.id);
        debug!("{}: rotation widget closed in {zone:?}", self.id);
        self.actuator.stop(zone)?;
        Ok(())
    }
}

impl Drop for RotationManager {
    fn drop(&mut self) {
        let worker = lock(&self.worker).take();
        if let Some(mut worker) = worker {
            worker.stop();
        }
    }
}
