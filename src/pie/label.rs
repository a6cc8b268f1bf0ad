use crate::components::ControlledValue;
use crate::util::{Point, point_on_circle};

/// One selectable slot of a pie.
///
/// Two labels are equal when they carry the same value, wherever they are
/// placed on the circle.
#[derive(Debug, Clone)]
pub struct Label<T> {
    pub value: T,
    pub display_name: String,
    /// Angle on the circle in degrees, zero at the top, clockwise.
    pub angle: f64,
    pub center: Point,
}

impl<T: ControlledValue> Label<T> {
    pub fn new(value: T, display_name: impl Into<String>) -> Self {
        Self {
            value,
            display_name: display_name.into(),
            angle: 0.0,
            center: Point::default(),
        }
    }
}

impl<T: PartialEq> PartialEq for Label<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Spreads labels evenly on a circle, the first one at the top.
pub fn layout_labels<T>(labels: &mut [Label<T>], center: Point, radius: f64) {
    let step = 360.0 / labels.len().max(1) as f64;
    for (index, label) in labels.iter_mut().enumerate() {
        label.angle = step * index as f64;
        label.center = point_on_circle(center, radius, label.angle);
    }
}
