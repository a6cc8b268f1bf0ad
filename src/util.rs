//! Utility functions for pointer geometry and shared-state locking.
//!
//! This module provides:
//! - Screen point type and circle geometry used by pie menus and rotation widgets
//! - Poison-tolerant lock helpers shared by the tracking workers

use std::ops::{Add, Sub};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// ============================================================================
// Geometry
// ============================================================================

/// Screen position in pixels. The y axis grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Angle of `point` seen from `center`, in degrees.
///
/// Zero points straight up and the angle grows clockwise, so the result is in
/// `[0, 360)`. A point equal to the center yields zero.
pub fn angle_from_center(center: Point, point: Point) -> f64 {
    let dx = f64::from(point.x - center.x);
    let dy = f64::from(point.y - center.y);
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    // atan2(dx, -dy) measures from "up" towards "right".
    dx.atan2(-dy).to_degrees().rem_euclid(360.0)
}

/// Point lying on a circle around `center` at the given angle (same convention
/// as [`angle_from_center`]).
pub fn point_on_circle(center: Point, radius: f64, angle_degrees: f64) -> Point {
    let radians = angle_degrees.to_radians();
    Point::new(
        center.x + (radius * radians.sin()).round() as i32,
        center.y - (radius * radians.cos()).round() as i32,
    )
}

/// Shortest distance between two angles, in degrees (`0..=180`).
pub fn angle_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

// ============================================================================
// Locking
// ============================================================================

/// Locks a mutex, recovering the data if a tracking thread panicked while holding it.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read-locks an `RwLock`, recovering from poisoning.
pub fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Write-locks an `RwLock`, recovering from poisoning.
pub fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
