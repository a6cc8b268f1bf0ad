use log::debug;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};

use super::label::layout_labels;
use super::{
    BASE_DEADZONE_RADIUS, BASE_ICON_RADIUS, BASE_PIE_RADIUS, Label, PieActuator, WidgetHolder,
};
use crate::components::ControlledValue;
use crate::config::GlobalConfig;
use crate::host::Host;
use crate::input::ActionError;
use crate::util::{Point, angle_from_center, lock};
use crate::worker::TrackingWorker;

/// Size and position of an open pie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieGeometry {
    pub center: Point,
    pub radius: f64,
    pub deadzone_radius: f64,
    pub icon_radius: f64,
}

impl PieGeometry {
    /// Geometry of a pie opened at `center` with the given per-pie scales.
    pub fn new(center: Point, pie_scale: f64, icon_scale: f64, global: &GlobalConfig) -> Self {
        let radius = BASE_PIE_RADIUS * pie_scale * global.pie_scale();
        Self {
            center,
            radius,
            deadzone_radius: BASE_DEADZONE_RADIUS * global.pie_deadzone_scale(),
            icon_radius: BASE_ICON_RADIUS * icon_scale * global.pie_icon_scale() * pie_scale,
        }
    }

    pub fn in_deadzone(&self, point: Point) -> bool {
        self.center.distance(point) < self.deadzone_radius
    }

    /// Radius of the circle the label centers lie on.
    pub fn label_radius(&self) -> f64 {
        (self.radius - self.icon_radius).max(self.deadzone_radius)
    }
}

#[derive(Debug)]
struct Session<T> {
    geometry: PieGeometry,
    holder: WidgetHolder<T>,
}

impl<T: ControlledValue> Session<T> {
    /// Updates the active label for the pointer at `pointer`. Returns whether
    /// the display changed.
    fn track(&mut self, pointer: Point) -> bool {
        let label = if self.geometry.in_deadzone(pointer) {
            None
        } else {
            let angle = angle_from_center(self.geometry.center, pointer);
            self.holder.on_angle(angle).cloned()
        };
        self.holder.set_active(label.as_ref())
    }
}

/// Lifecycle of the pie widget: show, track the pointer, hide.
pub struct PieManager<T: ControlledValue> {
    id: String,
    host: Arc<dyn Host>,
    config: GlobalConfig,
    actuator: Arc<PieActuator<T>>,
    session: Arc<Mutex<Option<Session<T>>>>,
    worker: Mutex<Option<TrackingWorker>>,
}

impl<T: ControlledValue> PieManager<T> {
    pub fn new(
        id: impl Into<String>,
        host: Arc<dyn Host>,
        config: GlobalConfig,
        actuator: Arc<PieActuator<T>>,
    ) -> Self {
        Self {
            id: id.into(),
            host,
            config,
            actuator,
            session: Arc::new(Mutex::new(None)),
            worker: Mutex::new(None),
        }
    }

    /// Shows the pie and starts following the pointer.
    ///
    /// # Errors
    /// Returns an error if the tracking thread cannot be spawned.
    pub fn start(&self, geometry: PieGeometry, mut labels: Vec<Label<T>>) -> Result<(), ActionError> {
        self.stop();

        layout_labels(&mut labels, geometry.center, geometry.label_radius());
        self.actuator.set_labels(labels.clone());
        let mut holder = WidgetHolder::new(labels);
        self.actuator.mark_selected_widget(&mut holder);
        *lock(&self.session) = Some(Session { geometry, holder });

        self.host
            .show_widget(&self.id, geometry.center, geometry.radius.round() as u32);

        let host = Arc::clone(&self.host);
        let session = Arc::clone(&self.session);
        let id = self.id.clone();
        let worker = TrackingWorker::spawn(
            &format!("{} pie", self.id),
            self.config.tick_interval(),
            move || {
                let pointer = host.cursor_position();
                let changed = match lock(&session).as_mut() {
                    Some(session) => session.track(pointer),
                    None => return ControlFlow::Break(()),
                };
                if changed {
                    host.repaint_widget(&id);
                }
                ControlFlow::Continue(())
            },
        )?;
        *lock(&self.worker) = Some(worker);
        debug!("{}: pie opened", self.id);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        lock(&self.session).is_some()
    }

    /// Label currently under the pointer.
    pub fn active_label(&self) -> Option<Label<T>> {
        lock(&self.session)
            .as_ref()
            .and_then(|session| session.holder.active().cloned())
    }

    /// Label highlighted as the deadzone pick.
    pub fn forced_label(&self) -> Option<Label<T>> {
        lock(&self.session)
            .as_ref()
            .and_then(|session| session.holder.forced().cloned())
    }

    /// Hides the pie and returns the label under the pointer, or `None` when
    /// the pointer is in the deadzone. Returns `None` if the pie was not open.
    pub fn stop(&self) -> Option<Label<T>> {
        let worker = lock(&self.worker).take();
        if let Some(mut worker) = worker {
            worker.stop();
        }

        let mut session = lock(&self.session).take()?;
        session.track(self.host.cursor_position());
        self.host.hide_widget(&self.id);
        debug!("{}: pie closed", self.id);
        session.holder.active().cloned()
    }
}

impl<T: ControlledValue> Drop for PieManager<T> {
    fn drop(&mut self) {
        let worker = lock(&self.worker).take();
        if let Some(mut worker) = worker {
            worker.stop();
        }
    }
}
