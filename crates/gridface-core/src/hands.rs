//! Hand geometry: angle + length + pivot to a grid endpoint.

use embedded_graphics::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::GRID_WIDTH;
use crate::time::{DIAL_POSITIONS, HOUR_POSITIONS};
use crate::trig::{TRIG_MAX_ANGLE, TRIG_MAX_RATIO, cos_lookup, sin_lookup};

/// Rotation point of all three hands
pub const HAND_PIVOT: Point = Point::new(GRID_WIDTH / 2, GRID_WIDTH / 2 - 1);

pub const SECOND_HAND_LENGTH: i32 = GRID_WIDTH / 2 - 3;
pub const MINUTE_HAND_LENGTH: i32 = GRID_WIDTH / 2 - 6;
pub const HOUR_HAND_LENGTH: i32 = GRID_WIDTH / 2 - 9;

/// cos(45 deg) in lookup units
const SQRT_HALF_RATIO: i32 = 46341;

/// Shape traced by the hand tips as they sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectMode {
    /// Tips on a circle of radius `length`
    #[default]
    Round,
    /// Tips on the perimeter of a square with half-side `length`
    Square,
}

/// A hand as drawn for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    pub angle: i32,
    pub length: i32,
    pub pivot: Point,
}

impl Hand {
    pub fn new(angle: i32, length: i32, pivot: Point) -> Self {
        Self {
            angle,
            length,
            pivot,
        }
    }

    pub fn endpoint(&self, aspect: AspectMode) -> Point {
        match aspect {
            AspectMode::Round => compute_endpoint(self.angle, self.length, self.pivot),
            AspectMode::Square => compute_square_endpoint(self.angle, self.length, self.pivot),
        }
    }
}

/// Integer division rounding half away from zero. `den` must be positive.
fn div_round(num: i64, den: i64) -> i64 {
    if num >= 0 {
        (num + den / 2) / den
    } else {
        -((-num + den / 2) / den)
    }
}

/// Tip of a hand of `length` cells at `angle` around `pivot`.
///
/// Angle 0 points straight up; y grows downwards.
pub fn compute_endpoint(angle: i32, length: i32, pivot: Point) -> Point {
    scaled_endpoint(angle, length, pivot, i64::from(TRIG_MAX_RATIO))
}

/// Tip of a hand whose locus is a square instead of a circle.
///
/// The trig output is normalised by the dominant axis instead of the unit
/// radius, which pushes diagonal tips out into the corners.
pub fn compute_square_endpoint(angle: i32, length: i32, pivot: Point) -> Point {
    let sin = sin_lookup(angle).abs();
    let cos = cos_lookup(angle).abs();
    // One of the two is always at least cos(45 deg), so neither branch divides by zero.
    let divisor = if cos >= SQRT_HALF_RATIO { cos } else { sin };
    scaled_endpoint(angle, length, pivot, i64::from(divisor.max(1)))
}

fn scaled_endpoint(angle: i32, length: i32, pivot: Point, divisor: i64) -> Point {
    let length = i64::from(length);
    let dx = div_round(i64::from(sin_lookup(angle)) * length, divisor);
    let dy = div_round(-i64::from(cos_lookup(angle)) * length, divisor);
    Point::new(pivot.x + dx as i32, pivot.y + dy as i32)
}

/// Angle of the second or minute hand at dial position `position` (0..60).
pub fn dial_angle(position: i32) -> i32 {
    TRIG_MAX_ANGLE * position.rem_euclid(DIAL_POSITIONS) / DIAL_POSITIONS
}

/// Angle of the hour hand at `position` (0..72, six per hour).
pub fn hour_angle(position: i32) -> i32 {
    TRIG_MAX_ANGLE * position.rem_euclid(HOUR_POSITIONS) / HOUR_POSITIONS
}
