use embedded_graphics::prelude::*;

use super::layer::{Layer, LayerId, LayerState};
use super::FaceFrame;
use crate::colors::BLUE_MOON;
use crate::glyphs::{BT_LOGO_POINTS, draw_shape};
use crate::grid::{GRID_WIDTH, GridSurface};

pub const BLUETOOTH_ORIGIN: Point = Point::new(1, GRID_WIDTH - 4);

/// Bluetooth rune, shown only while the phone is connected.
#[derive(Debug, Default)]
pub struct BluetoothLayer {
    state: LayerState,
}

impl BluetoothLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for BluetoothLayer {
    fn id(&self) -> LayerId {
        LayerId::Bluetooth
    }

    fn origin(&self) -> Point {
        BLUETOOTH_ORIGIN
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
        if frame.bluetooth_connected {
            draw_shape(surface, BT_LOGO_POINTS, Point::zero(), BLUE_MOON)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaceConfig;
    use crate::layers::BatteryState;
    use crate::recording::RecordingGrid;
    use crate::time::{ClockTime, HandPositions};

    fn draw(connected: bool) -> RecordingGrid {
        let config = FaceConfig::default();
        let time = ClockTime::hms(8, 15, 0);
        let frame = FaceFrame {
            time: &time,
            hands: HandPositions::from_time(&time),
            config: &config,
            battery: BatteryState::default(),
            bluetooth_connected: connected,
        };
        let mut grid = RecordingGrid::reference();
        BluetoothLayer::new().draw_layer(&frame, &mut grid).unwrap();
        grid
    }

    #[test]
    fn test_connected_draws_logo() {
        let grid = draw(true);
        assert_eq!(grid.calls().len(), BT_LOGO_POINTS.len());
        assert_eq!(grid.color_at(Point::new(2, 2)), Some(BLUE_MOON));
    }

    #[test]
    fn test_disconnected_draws_nothing() {
        assert!(draw(false).calls().is_empty());
    }
}
