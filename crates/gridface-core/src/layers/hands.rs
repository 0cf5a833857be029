//! Hour, minute and second hands plus the PM indicator.

use embedded_graphics::prelude::*;
use log::debug;

use super::layer::{Layer, LayerId, LayerState};
use super::FaceFrame;
use crate::colors::YELLOW;
use crate::glyphs::{PM_POINTS, draw_shape};
use crate::grid::{GRID_WIDTH, GridSurface};
use crate::hands::{
    AspectMode, HAND_PIVOT, HOUR_HAND_LENGTH, Hand, MINUTE_HAND_LENGTH, SECOND_HAND_LENGTH,
    dial_angle, hour_angle,
};
use crate::raster::draw_line;
use crate::time::HandPositions;

/// Where the PM lettering sits, below and right of the dial
pub const PM_ORIGIN: Point = Point::new(GRID_WIDTH - 10, GRID_WIDTH - 2);

/// Endpoints for one frame's hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandGeometry {
    pub hour: Point,
    pub minute: Point,
    pub second: Point,
}

impl HandGeometry {
    pub fn from_positions(positions: &HandPositions, aspect: AspectMode) -> Self {
        Self {
            hour: Hand::new(hour_angle(positions.hour), HOUR_HAND_LENGTH, HAND_PIVOT)
                .endpoint(aspect),
            minute: Hand::new(dial_angle(positions.minute), MINUTE_HAND_LENGTH, HAND_PIVOT)
                .endpoint(aspect),
            second: Hand::new(dial_angle(positions.second), SECOND_HAND_LENGTH, HAND_PIVOT)
                .endpoint(aspect),
        }
    }
}

/// Full-grid layer drawing the three hands.
#[derive(Debug, Default)]
pub struct HandsLayer {
    state: LayerState,
}

impl HandsLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for HandsLayer {
    fn id(&self) -> LayerId {
        LayerId::Hands
    }

    fn origin(&self) -> Point {
        Point::zero()
    }

    fn is_hidden(&self) -> bool {
        self.state.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.state.set_hidden(hidden);
    }

    fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    fn mark_clean(&mut self) {
        self.state.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.state.dirty = true;
    }

    fn draw_layer<S: GridSurface>(
        &self,
        frame: &FaceFrame,
        surface: &mut S,
    ) -> Result<(), S::Error> {
        let config = frame.config;
        let geometry = HandGeometry::from_positions(&frame.hands, config.style.aspect);
        debug!(
            "Hands h={:?} m={:?} s={:?}",
            geometry.hour, geometry.minute, geometry.second
        );

        draw_line(surface, HAND_PIVOT, geometry.hour, config.hour_hue, true)?;
        draw_line(surface, HAND_PIVOT, geometry.minute, config.minute_hue, true)?;
        if !config.hide_seconds {
            draw_line(surface, HAND_PIVOT, geometry.second, config.second_hue, false)?;
        }

        if frame.time.is_pm() {
            draw_shape(surface, PM_POINTS, PM_ORIGIN, YELLOW)?;
        }
        Ok(())
    }
}
