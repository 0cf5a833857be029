//! In-RAM copy of the watch display with per-pixel change detection.
//!
//! The face redraws every cell each frame, but between two ticks usually
//! only the second hand moves. Rendering into this buffer first and then
//! flushing only the bounding box of changed pixels keeps display traffic
//! proportional to what actually changed.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::grid::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

const STRIDE: usize = DISPLAY_WIDTH_PX as usize;

/// Total number of pixels in the framebuffer (144 x 168 = 24,192).
const PIXEL_COUNT: usize = STRIDE * DISPLAY_HEIGHT_PX as usize;

/// Inclusive corners of the pixels changed since the last flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirtyBounds {
    min: Point,
    max: Point,
}

impl DirtyBounds {
    fn include(bounds: Option<Self>, point: Point) -> Self {
        match bounds {
            Some(b) => Self {
                min: b.min.component_min(point),
                max: b.max.component_max(point),
            },
            None => Self {
                min: point,
                max: point,
            },
        }
    }

    fn rectangle(self) -> Rectangle {
        Rectangle::with_corners(self.min, self.max)
    }
}

/// Display-sized buffer implementing `DrawTarget<Color = Rgb565>`.
///
/// Heap-allocates a 144x168x2 = 48,384-byte pixel buffer and tracks a dirty
/// bounding box so that only changed pixels reach the real display.
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyBounds>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Allocate a new framebuffer filled with black pixels.
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; PIXEL_COUNT],
            dirty: None,
        }
    }

    /// Buffer index of an on-screen point.
    fn index(&self, point: Point) -> Option<usize> {
        self.bounding_box()
            .contains(point)
            .then(|| point.y as usize * STRIDE + point.x as usize)
    }

    /// Store `color` at an on-screen point, growing the dirty bounds on change.
    fn store(&mut self, point: Point, color: Rgb565) {
        let Some(idx) = self.index(point) else {
            return;
        };
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            self.dirty = Some(DirtyBounds::include(self.dirty, point));
        }
    }

    /// Color currently stored at `point`, or `None` off-screen.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).map(|idx| self.pixels[idx])
    }

    /// Bounding box of pixels changed since the last flush.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty.map(DirtyBounds::rectangle)
    }

    /// Flush the dirty region to the display, then reset the dirty state.
    ///
    /// Only the bounding rectangle of changed pixels is sent, via
    /// `fill_contiguous`. If nothing changed, this is a no-op.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(bounds) = self.dirty.take() else {
            return Ok(());
        };
        let area = bounds.rectangle();
        debug!(
            "Flushing {}x{} dirty region at {:?}",
            area.size.width, area.size.height, area.top_left
        );

        let pixels = &self.pixels;
        let colors = area
            .points()
            .map(|p| pixels[p.y as usize * STRIDE + p.x as usize]);
        display.fill_contiguous(&area, colors)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.store(point, color);
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Colors map to the unclipped area in row-major order; off-screen
        // points still consume theirs.
        for (point, color) in area.points().zip(colors) {
            self.store(point, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        if clipped.size.width == 0 || clipped.size.height == 0 {
            return Ok(());
        }
        for point in clipped.points() {
            self.store(point, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let screen = self.bounding_box();
        self.fill_solid(&screen, color)
    }
}
