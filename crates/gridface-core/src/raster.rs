//! Anti-aliased line rasterizer for the cell grid.
//!
//! A fixed-point take on Xiaolin Wu's algorithm: the line steps one cell at a
//! time along its longer axis while a 16.16 accumulator tracks the exact
//! position on the shorter axis. The two cells straddling that position are
//! painted with complementary coverage, which the shade selector turns into
//! discrete palette shades.

use embedded_graphics::prelude::*;

use crate::grid::GridSurface;
use crate::shade::{Hue, select_shade};

const FRAC_BITS: u32 = 16;
const FIXED_ONE: i64 = 1 << FRAC_BITS;

/// Fractional part of a 16.16 value as a coverage in [0, 1).
#[inline]
fn fpart(value: i64) -> f32 {
    value.rem_euclid(FIXED_ONE) as f32 / FIXED_ONE as f32
}

/// One minus the fractional part.
#[inline]
fn rfpart(value: i64) -> f32 {
    1.0 - fpart(value)
}

/// Integer part of a 16.16 value, rounded toward negative infinity.
#[inline]
fn ipart(value: i64) -> i32 {
    (value >> FRAC_BITS) as i32
}

/// Map (major, minor) axis coordinates back to grid (x, y).
#[inline]
fn orient(steep: bool, major: i32, minor: i32) -> Point {
    if steep {
        Point::new(minor, major)
    } else {
        Point::new(major, minor)
    }
}

/// Paint one cell at the shade matching `coverage`.
#[inline]
fn plot<S: GridSurface>(
    surface: &mut S,
    cell: Point,
    coverage: f32,
    hue: Hue,
) -> Result<(), S::Error> {
    surface.paint_cell(cell, select_shade(coverage, hue))
}

/// Draw an anti-aliased line from `from` to `to` (inclusive) in `hue`.
///
/// Thick lines add a half-coverage cell before the primary cell and force the
/// primary cell to full coverage. Cells that fall off the grid are skipped.
pub fn draw_line<S: GridSurface>(
    surface: &mut S,
    from: Point,
    to: Point,
    hue: Hue,
    thick: bool,
) -> Result<(), S::Error> {
    let (mut x0, mut y0, mut x1, mut y1) = (from.x, from.y, to.x, to.y);

    // Exact diagonals stay shallow.
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        core::mem::swap(&mut x0, &mut y0);
        core::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        core::mem::swap(&mut x0, &mut x1);
        core::mem::swap(&mut y0, &mut y1);
    }

    let dx = i64::from(x1) - i64::from(x0);
    let dy = i64::from(y1) - i64::from(y0);

    // |dy| <= dx after normalisation, so dx == 0 means the endpoints coincide.
    if dx == 0 {
        return plot(surface, orient(steep, x1, y1), 1.0, hue);
    }

    let gradient = (dy << FRAC_BITS) / dx;
    let mut intery = i64::from(y0) << FRAC_BITS;

    for x in x0..=x1 {
        let y = ipart(intery);
        if thick {
            plot(surface, orient(steep, x, y - 1), rfpart(intery) / 2.0, hue)?;
            plot(surface, orient(steep, x, y), 1.0, hue)?;
        } else {
            plot(surface, orient(steep, x, y), rfpart(intery), hue)?;
        }
        plot(surface, orient(steep, x, y + 1), fpart(intery), hue)?;
        intery += gradient;
    }

    // The accumulator can undershoot the last cell; paint the endpoint solid.
    plot(surface, orient(steep, x1, y1), 1.0, hue)
}
