//! Layout of the date, temperature and weekday readouts.
//!
//! The digit artwork belongs to the host; the face only decides which glyph
//! goes where, in cells relative to the readout's origin.

use embedded_graphics::prelude::*;
use heapless::Vec;

use crate::grid::GRID_WIDTH;
use crate::time::ClockTime;

/// Top-left cell of the date readout (also used by the weekday name)
pub const DATE_ORIGIN: Point = Point::new(GRID_WIDTH / 2 - 1, GRID_WIDTH + 2);

/// Top-left cell of the temperature readout shown during the tap display
pub const TEMPERATURE_ORIGIN: Point = Point::new(2, GRID_WIDTH + 2);

/// Cells between consecutive temperature glyphs
pub const GLYPH_ADVANCE: i32 = 4;

/// Weekday name offset inside the date area
pub const WEEKDAY_OFFSET: Point = Point::new(6, 0);

/// Largest magnitude the three-digit readout can show
pub const TEMPERATURE_LIMIT: i32 = 999;

/// A host-rendered bitmap glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// 0-9
    Digit(u8),
    Slash,
    Minus,
    Degree,
    /// 0 = Sunday
    Weekday(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPlacement {
    pub glyph: Glyph,
    /// Cell offset from the readout origin
    pub offset: Point,
}

impl GlyphPlacement {
    const fn at(glyph: Glyph, x: i32) -> Self {
        Self {
            glyph,
            offset: Point::new(x, 0),
        }
    }
}

/// Day then month, `dd/mm`.
pub fn date_glyphs(time: &ClockTime) -> [GlyphPlacement; 5] {
    let day = time.day;
    let month = time.month;
    [
        GlyphPlacement::at(Glyph::Digit(day / 10), 0),
        GlyphPlacement::at(Glyph::Digit(day % 10), 4),
        GlyphPlacement::at(Glyph::Slash, 8),
        GlyphPlacement::at(Glyph::Digit(month / 10), 11),
        GlyphPlacement::at(Glyph::Digit(month % 10), 15),
    ]
}

/// Up to four glyphs: hundreds digit or minus sign, tens, units, degree.
///
/// A hundreds digit takes the minus sign's slot, so readings at or below
/// -100 lose their sign. Magnitudes above [`TEMPERATURE_LIMIT`] are clamped.
pub fn temperature_glyphs(degrees: i32) -> Vec<GlyphPlacement, 4> {
    let negative = degrees < 0;
    let magnitude = degrees.unsigned_abs().min(TEMPERATURE_LIMIT as u32);
    let hundreds = (magnitude / 100) as u8;
    let tens = (magnitude % 100 / 10) as u8;
    let units = (magnitude % 10) as u8;

    let mut glyphs = Vec::new();
    let mut x = 0;
    if hundreds != 0 {
        glyphs.push(GlyphPlacement::at(Glyph::Digit(hundreds), x)).ok();
        x += GLYPH_ADVANCE;
    } else if negative {
        glyphs.push(GlyphPlacement::at(Glyph::Minus, x)).ok();
        x += GLYPH_ADVANCE;
    }
    glyphs.push(GlyphPlacement::at(Glyph::Digit(tens), x)).ok();
    x += GLYPH_ADVANCE;
    glyphs.push(GlyphPlacement::at(Glyph::Digit(units), x)).ok();
    x += GLYPH_ADVANCE;
    glyphs.push(GlyphPlacement::at(Glyph::Degree, x)).ok();
    glyphs
}

/// Weekday name, placed relative to [`DATE_ORIGIN`].
pub fn weekday_glyph(time: &ClockTime) -> GlyphPlacement {
    GlyphPlacement {
        glyph: Glyph::Weekday(time.weekday % 7),
        offset: WEEKDAY_OFFSET,
    }
}
