//! Core layer abstraction and type-erased wrapper for the face's layers.
//!
//! This module defines the [`Layer`] trait that every part of the face
//! implements, along with [`LayerWrapper`], an enum-based wrapper that lets
//! the [`ClockFace`](crate::face::ClockFace) keep a heterogeneous
//! `heapless::Vec` of layers without dynamic dispatch (`dyn`).
//!
//! Layers draw in their own cell coordinates; the face hands each one an
//! [`OffsetGrid`](crate::grid::OffsetGrid) anchored at [`Layer::origin`].

use embedded_graphics::prelude::*;

use super::{BatteryLayer, BluetoothLayer, FaceFrame, HandsLayer};
use crate::grid::GridSurface;

/// Identifier used to look layers up on the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerId {
    Hands,
    Battery,
    Bluetooth,
}

// ---------------------------------------------------------------------------
// Layer trait
// ---------------------------------------------------------------------------

/// Trait that all face layers implement.
///
/// The face calls these in a fixed order each redraw:
///
/// 1. **`is_hidden`**: hidden layers are skipped entirely.
/// 2. **`draw_layer`**: paints the layer from the shared [`FaceFrame`].
/// 3. **`mark_clean`**: after every visible layer has been drawn.
pub trait Layer {
    fn id(&self) -> LayerId;

    /// Top-left cell of the layer on the face grid.
    fn origin(&self) -> Point;

    fn is_hidden(&self) -> bool;

    fn set_hidden(&mut self, hidden: bool);

    /// Whether the layer changed since the last redraw.
    fn is_dirty(&self) -> bool;

    fn mark_clean(&mut self);

    fn mark_dirty(&mut self);

    /// Paint the layer in layer-local cell coordinates.
    fn draw_layer<S: GridSurface>(&self, frame: &FaceFrame, surface: &mut S)
    -> Result<(), S::Error>;
}

// ---------------------------------------------------------------------------
// LayerWrapper
// ---------------------------------------------------------------------------

/// Enum-based wrapper that stores one of the concrete layer types.
///
/// When adding a layer to the face, add a variant here and the delegation
/// in the [`Layer`] impl below.
pub enum LayerWrapper {
    Hands(HandsLayer),
    Battery(BatteryLayer),
    Bluetooth(BluetoothLayer),
}

impl Layer for LayerWrapper {
    fn id(&self) -> LayerId {
        match self {
            LayerWrapper::Hands(layer) => layer.id(),
            LayerWrapper::Battery(layer) => layer.id(),
            LayerWrapper::Bluetooth(layer) => layer.id(),
        }
    }

    fn origin(&self) -> Point {
        match self {
            LayerWrapper::Hands(layer) => layer.origin(),
            LayerWrapper::Battery(layer) => layer.origin(),
            LayerWrapper::Bluetooth(layer) => layer.origin(),
        }
    }

    fn is_hidden(&self) -> bool {
        match self {
            LayerWrapper::Hands(layer) => layer.is_hidden(),
            LayerWrapper::Battery(layer) => layer.is_hidden(),
            LayerWrapper::Bluetooth(layer) => layer.is_hidden(),
        }
    }

    fn set_hidden(&mut self, hidden: bool) {
        match self {
            LayerWrapper::Hands(layer) => layer.set_hidden(hidden),
            LayerWrapper::Battery(layer) => layer.set_hidden(hidden),
            LayerWrapper::Bluetooth(layer) => layer.set_hidden(hidden),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            LayerWrapper::Hands(layer) => layer.is_dirty(),
            LayerWrapper::Battery(layer) => layer.is_dirty(),
            LayerWrapper::Bluetooth(layer) => layer.is_dirty(),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            LayerWrapper::Hands(layer) => layer.mark_clean(),
            LayerWrapper::Battery(layer) => layer.mark_clean(),
            LayerWrapper::Bluetooth(layer) => layer.mark_clean(),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            LayerWrapper::Hands(layer) => layer.mark_dirty(),
            LayerWrapper::Battery(layer) => layer.mark_dirty(),
            LayerWrapper::Bluetooth(layer) => layer.mark_dirty(),
        }
    }

    fn draw_layer<S: GridSurface>(
        &self,
        frame: &FaceFrame,
        surface: &mut S,
    ) -> Result<(), S::Error> {
        match self {
            LayerWrapper::Hands(layer) => layer.draw_layer(frame, surface),
            LayerWrapper::Battery(layer) => layer.draw_layer(frame, surface),
            LayerWrapper::Bluetooth(layer) => layer.draw_layer(frame, surface),
        }
    }
}

/// Visibility and dirty flags shared by every concrete layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerState {
    pub hidden: bool,
    pub dirty: bool,
}

impl Default for LayerState {
    fn default() -> Self {
        Self {
            hidden: false,
            dirty: true,
        }
    }
}

impl LayerState {
    /// Change visibility, dirtying the layer if it flipped.
    pub fn set_hidden(&mut self, hidden: bool) {
        if self.hidden != hidden {
            self.hidden = hidden;
            self.dirty = true;
        }
    }
}
