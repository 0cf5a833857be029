//! Coarse "super-pixel" grid the face is drawn on.
//!
//! Every logical cell is a `CELL_SIZE_PX` x `CELL_SIZE_PX` block of physical
//! pixels. A painted cell fills all but its last row and column, which leaves
//! a one-pixel grid line between neighbouring cells.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Physical width of the reference panel
pub const DISPLAY_WIDTH_PX: u32 = 144;

/// Physical height of the reference panel
pub const DISPLAY_HEIGHT_PX: u32 = 168;

/// Edge length of one logical cell in physical pixels
pub const CELL_SIZE_PX: u32 = 4;

/// Logical grid width (36 cells on the reference panel)
pub const GRID_WIDTH: i32 = (DISPLAY_WIDTH_PX / CELL_SIZE_PX) as i32;

/// Logical grid height (42 cells on the reference panel)
pub const GRID_HEIGHT: i32 = (DISPLAY_HEIGHT_PX / CELL_SIZE_PX) as i32;

/// An addressable grid of logical cells.
///
/// Implementors only need to fill cells that are known to be in range;
/// [`paint_cell`](GridSurface::paint_cell) filters empty shades and
/// out-of-range coordinates before calling [`fill_cell`](GridSurface::fill_cell).
pub trait GridSurface {
    type Error;

    /// Grid dimensions in cells.
    fn grid_size(&self) -> Size;

    /// Fill one in-range cell with `color`.
    fn fill_cell(&mut self, cell: Point, color: Rgb565) -> Result<(), Self::Error>;

    /// Whether `cell` lies on the grid.
    fn contains(&self, cell: Point) -> bool {
        let size = self.grid_size();
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < size.width && (cell.y as u32) < size.height
    }

    /// Paint `cell`, silently ignoring `None` shades and off-grid cells.
    fn paint_cell(&mut self, cell: Point, color: Option<Rgb565>) -> Result<(), Self::Error> {
        match color {
            Some(color) if self.contains(cell) => self.fill_cell(cell, color),
            _ => Ok(()),
        }
    }
}

impl<S: GridSurface + ?Sized> GridSurface for &mut S {
    type Error = S::Error;

    fn grid_size(&self) -> Size {
        (**self).grid_size()
    }

    fn fill_cell(&mut self, cell: Point, color: Rgb565) -> Result<(), Self::Error> {
        (**self).fill_cell(cell, color)
    }

    fn contains(&self, cell: Point) -> bool {
        (**self).contains(cell)
    }
}

/// Grid view over any RGB565 draw target.
pub struct PixelGrid<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    display: &'a mut D,
    size: Size,
}

impl<'a, D> PixelGrid<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap `display`, sizing the grid to the whole cells that fit in it.
    pub fn new(display: &'a mut D) -> Self {
        let bounds = display.bounding_box().size;
        let size = Size::new(bounds.width / CELL_SIZE_PX, bounds.height / CELL_SIZE_PX);
        Self { display, size }
    }

    /// Physical rectangle painted for `cell` (the block minus its grid line).
    pub fn cell_rect(cell: Point) -> Rectangle {
        let step = CELL_SIZE_PX as i32;
        Rectangle::new(
            Point::new(cell.x * step, cell.y * step),
            Size::new(CELL_SIZE_PX - 1, CELL_SIZE_PX - 1),
        )
    }
}

impl<D> GridSurface for PixelGrid<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn grid_size(&self) -> Size {
        self.size
    }

    fn fill_cell(&mut self, cell: Point, color: Rgb565) -> Result<(), Self::Error> {
        self.display.fill_solid(&Self::cell_rect(cell), color)
    }
}

/// Layer-local view of a parent grid, shifted by `origin` cells.
pub struct OffsetGrid<'a, S: GridSurface> {
    parent: &'a mut S,
    origin: Point,
}

impl<'a, S: GridSurface> OffsetGrid<'a, S> {
    pub fn new(parent: &'a mut S, origin: Point) -> Self {
        Self { parent, origin }
    }
}

impl<S: GridSurface> GridSurface for OffsetGrid<'_, S> {
    type Error = S::Error;

    fn grid_size(&self) -> Size {
        self.parent.grid_size()
    }

    fn contains(&self, cell: Point) -> bool {
        self.parent.contains(cell + self.origin)
    }

    fn fill_cell(&mut self, cell: Point, color: Rgb565) -> Result<(), Self::Error> {
        self.parent.fill_cell(cell + self.origin, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{RED, WHITE};
    use crate::recording::RecordingGrid;
    use embedded_graphics::mock_display::MockDisplay;

    #[test]
    fn test_reference_grid_dimensions() {
        assert_eq!(GRID_WIDTH, 36);
        assert_eq!(GRID_HEIGHT, 42);
    }

    #[test]
    fn test_cell_leaves_grid_line() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        let mut grid = PixelGrid::new(&mut display);
        assert_eq!(grid.grid_size(), Size::new(16, 16));

        grid.paint_cell(Point::new(1, 2), Some(RED)).unwrap();

        // Cell (1, 2) covers physical x 4..7, y 8..11; only 3x3 is filled.
        for y in 0..64 {
            for x in 0..64 {
                let inside = (4..7).contains(&x) && (8..11).contains(&y);
                let expected = if inside { Some(RED) } else { None };
                assert_eq!(display.get_pixel(Point::new(x, y)), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_paint_none_and_out_of_range_is_noop() {
        let mut grid = RecordingGrid::new(Size::new(4, 4));
        grid.paint_cell(Point::new(0, 0), None).unwrap();
        grid.paint_cell(Point::new(-1, 0), Some(WHITE)).unwrap();
        grid.paint_cell(Point::new(0, 4), Some(WHITE)).unwrap();
        grid.paint_cell(Point::new(4, 0), Some(WHITE)).unwrap();
        assert!(grid.calls().is_empty());

        grid.paint_cell(Point::new(3, 3), Some(WHITE)).unwrap();
        assert_eq!(grid.calls(), &[(Point::new(3, 3), WHITE)]);
    }

    #[test]
    fn test_offset_grid_translates_and_clips() {
        let mut grid = RecordingGrid::new(Size::new(10, 10));
        {
            let mut layer = OffsetGrid::new(&mut grid, Point::new(8, 8));
            layer.paint_cell(Point::new(1, 1), Some(RED)).unwrap();
            // (2, 0) lands on (10, 8), off the parent grid.
            layer.paint_cell(Point::new(2, 0), Some(RED)).unwrap();
        }
        assert_eq!(grid.calls(), &[(Point::new(9, 9), RED)]);
    }
}
