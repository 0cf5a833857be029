//! Fixed cell-art glyphs drawn directly on the grid.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::grid::GridSurface;

/// "PM" lettering, 9x3 cells
pub const PM_POINTS: &[Point] = &[
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(1, 2),
    Point::new(2, 0),
    Point::new(2, 1),
    Point::new(3, 0),
    Point::new(3, 1),
    Point::new(5, 0),
    Point::new(5, 1),
    Point::new(5, 2),
    Point::new(6, 0),
    Point::new(7, 0),
    Point::new(7, 1),
    Point::new(8, 0),
    Point::new(8, 1),
    Point::new(8, 2),
];

/// Battery outline with the terminal nub on the right, 13x3 cells
pub const BAT_CASE_POINTS: &[Point] = &[
    Point::new(0, 0),
    Point::new(1, 0),
    Point::new(2, 0),
    Point::new(3, 0),
    Point::new(4, 0),
    Point::new(5, 0),
    Point::new(6, 0),
    Point::new(7, 0),
    Point::new(8, 0),
    Point::new(9, 0),
    Point::new(10, 0),
    Point::new(11, 0),
    Point::new(0, 2),
    Point::new(1, 2),
    Point::new(2, 2),
    Point::new(3, 2),
    Point::new(4, 2),
    Point::new(5, 2),
    Point::new(6, 2),
    Point::new(7, 2),
    Point::new(8, 2),
    Point::new(9, 2),
    Point::new(10, 2),
    Point::new(11, 2),
    Point::new(0, 1),
    Point::new(11, 1),
    Point::new(12, 1),
];

/// Lightning bolt overlaid on the battery while charging
pub const CHARGE_POINTS: &[Point] = &[
    Point::new(6, 0),
    Point::new(5, 1),
    Point::new(5, 2),
    Point::new(6, 2),
    Point::new(6, 3),
    Point::new(5, 4),
];

/// Bluetooth rune, 5x5 cells
pub const BT_LOGO_POINTS: &[Point] = &[
    Point::new(0, 0),
    Point::new(2, 0),
    Point::new(3, 0),
    Point::new(1, 1),
    Point::new(2, 1),
    Point::new(4, 1),
    Point::new(2, 2),
    Point::new(3, 2),
    Point::new(1, 3),
    Point::new(2, 3),
    Point::new(4, 3),
    Point::new(0, 4),
    Point::new(2, 4),
    Point::new(3, 4),
];

/// Date separator between day and month digits
pub const SLASH_POINTS: &[Point] = &[
    Point::new(8, 2),
    Point::new(8, 3),
    Point::new(9, 0),
    Point::new(9, 1),
];

/// Fill every cell of `points`, shifted by `origin`, in a single color.
pub fn draw_shape<S: GridSurface>(
    surface: &mut S,
    points: &[Point],
    origin: Point,
    color: Rgb565,
) -> Result<(), S::Error> {
    for point in points {
        surface.paint_cell(origin + *point, Some(color))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::YELLOW;
    use crate::recording::RecordingGrid;

    #[test]
    fn test_glyph_sizes() {
        assert_eq!(PM_POINTS.len(), 16);
        assert_eq!(BAT_CASE_POINTS.len(), 27);
        assert_eq!(CHARGE_POINTS.len(), 6);
        assert_eq!(BT_LOGO_POINTS.len(), 14);
        assert_eq!(SLASH_POINTS.len(), 4);
    }

    #[test]
    fn test_draw_shape_offsets_points() {
        let mut grid = RecordingGrid::reference();
        draw_shape(&mut grid, PM_POINTS, Point::new(26, 34), YELLOW).unwrap();
        assert_eq!(grid.calls().len(), 16);
        assert_eq!(grid.calls()[0], (Point::new(27, 34), YELLOW));
        assert!(grid.touched(Point::new(34, 36)));
    }
}
