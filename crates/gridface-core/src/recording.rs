//! A grid surface that records paint calls instead of drawing them.
//!
//! The rendering contract of the face is the sequence of cells it paints,
//! so hosts and tests can compare frames without a physical display.

extern crate alloc;

use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::grid::{GRID_HEIGHT, GRID_WIDTH, GridSurface};

/// Records every filled cell in call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingGrid {
    size: Size,
    calls: Vec<(Point, Rgb565)>,
}

impl RecordingGrid {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    /// A recorder with the reference 36x42 grid.
    pub fn reference() -> Self {
        Self::new(Size::new(GRID_WIDTH as u32, GRID_HEIGHT as u32))
    }

    /// All fills so far, oldest first.
    pub fn calls(&self) -> &[(Point, Rgb565)] {
        &self.calls
    }

    /// Color of the last fill that touched `cell`.
    pub fn color_at(&self, cell: Point) -> Option<Rgb565> {
        self.calls
            .iter()
            .rev()
            .find(|(p, _)| *p == cell)
            .map(|(_, color)| *color)
    }

    /// Whether any fill touched `cell`.
    pub fn touched(&self, cell: Point) -> bool {
        self.calls.iter().any(|(p, _)| *p == cell)
    }

    /// Distinct touched cells, in first-touch order.
    pub fn touched_cells(&self) -> Vec<Point> {
        let mut cells: Vec<Point> = Vec::new();
        for (p, _) in &self.calls {
            if !cells.contains(p) {
                cells.push(*p);
            }
        }
        cells
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl GridSurface for RecordingGrid {
    type Error = Infallible;

    fn grid_size(&self) -> Size {
        self.size
    }

    fn fill_cell(&mut self, cell: Point, color: Rgb565) -> Result<(), Self::Error> {
        self.calls.push((cell, color));
        Ok(())
    }
}
