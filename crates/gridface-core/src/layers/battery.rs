//! Battery gauge in the bottom-left corner.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use serde::{Deserialize, Serialize};

use super::layer::{Layer, LayerId, LayerState};
use super::FaceFrame;
use crate::colors::{GREEN, RED, WHITE, YELLOW};
use crate::glyphs::{BAT_CASE_POINTS, CHARGE_POINTS, draw_shape};
use crate::grid::{GRID_WIDTH, GridSurface};

/// Charge at or above this draws a green fill
pub const BAT_WARN_LEVEL: u8 = 50;

/// Charge at or below this draws a red fill
pub const BAT_ALERT_LEVEL: u8 = 20;

pub const BATTERY_ORIGIN: Point = Point::new(1, GRID_WIDTH + 3);

/// Battery status as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryState {
    /// 0-100
    pub charge_percent: u8,
    pub is_charging: bool,
    pub is_plugged: bool,
}

impl Default for BatteryState {
    fn default() -> Self {
        Self {
            charge_percent: 100,
            is_charging: false,
            is_plugged: false,
        }
    }
}

impl BatteryState {
    pub fn case_color(&self) -> Rgb565 {
        if self.is_plugged { GREEN } else { WHITE }
    }

    pub fn charge_color(&self) -> Rgb565 {
        if self.charge_percent >= BAT_WARN_LEVEL {
            GREEN
        } else if self.charge_percent > BAT_ALERT_LEVEL {
            YELLOW
        } else {
            RED
        }
    }

    /// Number of fill cells inside the case (one per 10%).
    pub fn fill_cells(&self) -> i32 {
        i32::from(self.charge_percent.min(100) / 10)
    }
}

#[derive(Debug, Default)]
pub struct BatteryLayer {
    state: LayerState,
}

impl BatteryLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for BatteryLayer {
    fn id(&self) -> LayerId {
        LayerId::Battery
    }

    fn origin(&self) -> Point {
        BATTERY_ORIGIN
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
        let battery = frame.battery;
        draw_shape(surface, BAT_CASE_POINTS, Point::zero(), battery.case_color())?;

        let fill = battery.charge_color();
        for i in 0..battery.fill_cells() {
            surface.paint_cell(Point::new(i + 1, 1), Some(fill))?;
        }

        if battery.is_charging {
            draw_shape(surface, CHARGE_POINTS, Point::new(3, 0), YELLOW)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaceConfig;
    use crate::recording::RecordingGrid;
    use crate::time::{ClockTime, HandPositions};

    fn draw(battery: BatteryState) -> RecordingGrid {
        let config = FaceConfig::default();
        let time = ClockTime::hms(10, 0, 0);
        let frame = FaceFrame {
            time: &time,
            hands: HandPositions::from_time(&time),
            config: &config,
            battery,
            bluetooth_connected: false,
        };
        let mut grid = RecordingGrid::reference();
        BatteryLayer::new().draw_layer(&frame, &mut grid).unwrap();
        grid
    }

    #[test]
    fn test_charge_colors() {
        let level = |charge_percent| BatteryState {
            charge_percent,
            ..Default::default()
        };
        assert_eq!(level(100).charge_color(), GREEN);
        assert_eq!(level(50).charge_color(), GREEN);
        assert_eq!(level(49).charge_color(), YELLOW);
        assert_eq!(level(21).charge_color(), YELLOW);
        assert_eq!(level(20).charge_color(), RED);
        assert_eq!(level(0).charge_color(), RED);
    }

    #[test]
    fn test_fill_length() {
        let grid = draw(BatteryState {
            charge_percent: 37,
            ..Default::default()
        });
        assert_eq!(grid.color_at(Point::new(1, 1)), Some(YELLOW));
        assert_eq!(grid.color_at(Point::new(3, 1)), Some(YELLOW));
        assert!(!grid.touched(Point::new(4, 1)));
        assert_eq!(grid.color_at(Point::new(0, 0)), Some(WHITE));
    }

    #[test]
    fn test_plugged_and_charging() {
        let grid = draw(BatteryState {
            charge_percent: 80,
            is_charging: true,
            is_plugged: true,
        });
        assert_eq!(grid.color_at(Point::new(0, 0)), Some(GREEN));
        // Bolt drawn last over the fill
        assert_eq!(grid.color_at(Point::new(8, 1)), Some(YELLOW));
        assert_eq!(grid.color_at(Point::new(9, 4)), None);
    }
}
