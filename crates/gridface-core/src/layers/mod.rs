//! Drawable parts of the face.
//!
//! Each layer paints from a shared [`FaceFrame`] snapshot so that drawing
//! never needs mutable access to the face.

pub mod layer;

mod battery;
mod bluetooth;
mod hands;

pub use battery::{BAT_ALERT_LEVEL, BAT_WARN_LEVEL, BATTERY_ORIGIN, BatteryLayer, BatteryState};
pub use bluetooth::{BLUETOOTH_ORIGIN, BluetoothLayer};
pub use hands::{HandGeometry, HandsLayer, PM_ORIGIN};
pub use layer::{Layer, LayerId, LayerState, LayerWrapper};

use crate::config::FaceConfig;
use crate::time::{ClockTime, HandPositions};

/// Read-only view of the face state handed to every layer for one redraw.
#[derive(Debug, Clone, Copy)]
pub struct FaceFrame<'a> {
    pub time: &'a ClockTime,
    /// Hand positions to draw, animated or live
    pub hands: HandPositions,
    pub config: &'a FaceConfig,
    pub battery: BatteryState,
    pub bluetooth_connected: bool,
}
