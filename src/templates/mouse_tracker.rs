use log::{debug, error};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::PluginContext;
use crate::components::InstructionHolder;
use crate::host::Host;
use crate::input::{ActionError, PluginAction};
use crate::slider::{Slider, SliderHandler};
use crate::util::{Point, lock};
use crate::worker::TrackingWorker;

/// Interval between cursor samples while picking an axis.
pub const AXIS_DECISION_INTERVAL: Duration = Duration::from_millis(50);

/// Difference between horizontal and vertical travel that picks an axis.
pub const AXIS_SNAP_THRESHOLD: i32 = 10;

/// Pointer axis followed by a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Signal growing when the pointer moves right (horizontal) or up (vertical).
    pub fn signal(self, host: &Arc<dyn Host>) -> impl Fn() -> i32 + Send + use<> {
        let host = Arc::clone(host);
        move || {
            let cursor = host.cursor_position();
            match self {
                Axis::Horizontal => cursor.x,
                Axis::Vertical => -cursor.y,
            }
        }
    }
}

/// Axis to follow once the pointer moved `delta` from the press point, if the
/// movement is decisive yet.
pub fn pick_axis(delta: Point) -> Option<Axis> {
    let horizontal = delta.x.abs();
    let vertical = delta.y.abs();
    if (horizontal - vertical).abs() < AXIS_SNAP_THRESHOLD {
        return None;
    }
    Some(if horizontal > vertical {
        Axis::Horizontal
    } else {
        Axis::Vertical
    })
}

/// Tracker changing values with pointer movement while the key is held.
pub enum MouseTracker {
    Single(SingleAxisTracker),
    Double(DoubleAxisTracker),
}

/// Builds the tracker matching the given sliders.
///
/// A horizontal slider alone follows the x coordinate, a vertical one alone
/// follows the negated y coordinate, and both together snap to the axis of the
/// first decisive movement.
///
/// # Errors
/// Returns [`ActionError::MissingSlider`] when no slider is given.
pub fn mouse_tracker(
    ctx: &PluginContext,
    name: &str,
    horizontal: Option<Slider>,
    vertical: Option<Slider>,
    instructions: InstructionHolder,
) -> Result<MouseTracker, ActionError> {
    let handler = |slider: Slider, axis: &str| {
        SliderHandler::new(
            format!("{name} ({axis})"),
            slider,
            ctx.config.clone(),
            instructions.clone(),
        )
    };

    match (horizontal, vertical) {
        (Some(slider), None) => Ok(MouseTracker::Single(SingleAxisTracker::new(
            ctx,
            name,
            Axis::Horizontal,
            handler(slider, "horizontal"),
            instructions.clone(),
        ))),
        (None, Some(slider)) => Ok(MouseTracker::Single(SingleAxisTracker::new(
            ctx,
            name,
            Axis::Vertical,
            handler(slider, "vertical"),
            instructions.clone(),
        ))),
        (Some(horizontal), Some(vertical)) => Ok(MouseTracker::Double(DoubleAxisTracker::new(
            ctx,
            name,
            handler(horizontal, "horizontal"),
            handler(vertical, "vertical"),
            instructions.clone(),
        ))),
        (None, None) => Err(ActionError::MissingSlider(name.to_string())),
    }
}

impl MouseTracker {
    fn action(&self) -> &dyn PluginAction {
        match self {
            MouseTracker::Single(tracker) => tracker,
            MouseTracker::Double(tracker) => tracker,
        }
    }
}

impl PluginAction for MouseTracker {
    fn name(&self) -> &str {
        self.action().name()
    }

    fn on_key_press(&self) -> Result<(), ActionError> {
        self.action().on_key_press()
    }

    fn on_every_key_release(&self) -> Result<(), ActionError> {
        self.action().on_every_key_release()
    }
}

// ============================================================================
// Single axis
// ============================================================================

/// Follows one pointer axis with one slider.
pub struct SingleAxisTracker {
    name: String,
    host: Arc<dyn Host>,
    axis: Axis,
    handler: SliderHandler,
    instructions: InstructionHolder,
    in_session: AtomicBool,
}

impl SingleAxisTracker {
    pub fn new(
        ctx: &PluginContext,
        name: &str,
        axis: Axis,
        handler: SliderHandler,
        instructions: InstructionHolder,
    ) -> Self {
        Self {
            name: name.to_string(),
            host: Arc::clone(&ctx.host),
            axis,
            handler,
            instructions,
            in_session: AtomicBool::new(false),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_tracking(&self) -> bool {
        self.handler.is_active()
    }

    fn close_session(&self) -> Result<(), ActionError> {
        self.handler.stop();
        if self.in_session.swap(false, Ordering::AcqRel) {
            debug!("{}: session closed", self.name);
        }
        self.instructions.exit()?;
        Ok(())
    }
}

impl PluginAction for SingleAxisTracker {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_key_press(&self) -> Result<(), ActionError> {
        if self.in_session.load(Ordering::Acquire) {
            self.close_session()?;
        }
        self.in_session.store(true, Ordering::Release);
        self.instructions.enter()?;
        self.handler.start(self.axis.signal(&self.host))
    }

    fn on_every_key_release(&self) -> Result<(), ActionError> {
        self.close_session()
    }
}

// ============================================================================
// Double axis
// ============================================================================

/// Follows whichever axis the pointer first moves along decisively.
pub struct DoubleAxisTracker {
    name: String,
    host: Arc<dyn Host>,
    horizontal: Arc<SliderHandler>,
    vertical: Arc<SliderHandler>,
    instructions: InstructionHolder,
    decision: Mutex<Option<TrackingWorker>>,
    active_axis: Arc<Mutex<Option<Axis>>>,
}

impl DoubleAxisTracker {
    pub fn new(
        ctx: &PluginContext,
        name: &str,
        horizontal: SliderHandler,
        vertical: SliderHandler,
        instructions: InstructionHolder,
    ) -> Self {
        Self {
            name: name.to_string(),
            host: Arc::clone(&ctx.host),
            horizontal: Arc::new(horizontal),
            vertical: Arc::new(vertical),
            instructions,
            decision: Mutex::new(None),
            active_axis: Arc::new(Mutex::new(None)),
        }
    }

    /// Axis picked in the current session, if decided yet.
    pub fn active_axis(&self) -> Option<Axis> {
        *lock(&self.active_axis)
    }

    /// Whether the handler of `axis` is currently following the pointer.
    pub fn is_tracking(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.horizontal.is_active(),
            Axis::Vertical => self.vertical.is_active(),
        }
    }

    fn stop_tracking(&self) {
        let decision = lock(&self.decision).take();
        if let Some(mut worker) = decision {
            worker.stop();
        }
        self.horizontal.stop();
        self.vertical.stop();
    }
}

impl PluginAction for DoubleAxisTracker {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_key_press(&self) -> Result<(), ActionError> {
        if lock(&self.decision).is_some() {
            self.stop_tracking();
            self.instructions.exit()?;
        }
        *lock(&self.active_axis) = None;
        self.instructions.enter()?;

        let start = self.host.cursor_position();
        let host = Arc::clone(&self.host);
        let horizontal = Arc::clone(&self.horizontal);
        let vertical = Arc::clone(&self.vertical);
        let active_axis = Arc::clone(&self.active_axis);
        let name = self.name.clone();

        let worker = TrackingWorker::spawn(
            &format!("{} axis decision", self.name),
            AXIS_DECISION_INTERVAL,
            move || {
                let Some(axis) = pick_axis(host.cursor_position() - start) else {
                    return ControlFlow::Continue(());
                };
                let handler = match axis {
                    Axis::Horizontal => &horizontal,
                    Axis::Vertical => &vertical,
                };
                debug!("{name}: following {axis:?} axis");
                *lock(&active_axis) = Some(axis);
                if let Err(err) = handler.start(axis.signal(&host)) {
                    error!("{name}: could not start tracking: {err}");
                }
                ControlFlow::Break(())
            },
        )?;
        *lock(&self.decision) = Some(worker);
        Ok(())
    }

    fn on_every_key_release(&self) -> Result<(), ActionError> {
        self.stop_tracking();
        self.instructions.exit()?;
        Ok(())
    }
}
