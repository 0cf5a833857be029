//! Discrete shade selection used to fake anti-aliasing.
//!
//! The panel has no alpha blending, so a partially covered cell is drawn in
//! one of three fixed shades of its hue instead of a blended color. Coverage
//! at or below [`LO_COLOR_THRESHOLD`] draws nothing and the background shows
//! through.

use embedded_graphics::pixelcolor::Rgb565;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::colors::*;

/// Coverage above this draws the brightest shade
pub const HI_COLOR_THRESHOLD: f32 = 0.7;

/// Coverage above this (and up to [`HI_COLOR_THRESHOLD`]) draws the middle shade
pub const MID_COLOR_THRESHOLD: f32 = 0.35;

/// Coverage at or below this is not drawn at all
pub const LO_COLOR_THRESHOLD: f32 = 0.1;

/// Number of selectable hues
pub const NUM_HUES: u8 = 8;

/// Three shades per hue, brightest first.
const COLOR_SETS: [[Rgb565; 3]; NUM_HUES as usize] = [
    [WHITE, LIGHT_GRAY, DARK_GRAY],
    [RED, DARK_CANDY_APPLE_RED, BULGARIAN_ROSE],
    [BLUE_MOON, BLUE, DUKE_BLUE],
    [GREEN, ISLAMIC_GREEN, DARK_GREEN],
    [YELLOW, LIMERICK, ARMY_GREEN],
    [MAGENTA, PURPLE, IMPERIAL_PURPLE],
    [CYAN, TIFFANY_BLUE, MIDNIGHT_GREEN],
    [CHROME_YELLOW, ORANGE, WINDSOR_TAN],
];

/// A color family with three brightness shades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Hue {
    #[default]
    White = 0,
    Red = 1,
    Blue = 2,
    Green = 3,
    Yellow = 4,
    Purple = 5,
    Cyan = 6,
    Orange = 7,
}

impl Hue {
    /// Every hue in index order
    pub const ALL: [Hue; NUM_HUES as usize] = [
        Hue::White,
        Hue::Red,
        Hue::Blue,
        Hue::Green,
        Hue::Yellow,
        Hue::Purple,
        Hue::Cyan,
        Hue::Orange,
    ];

    /// Look up a hue by palette index.
    ///
    /// Out-of-range indices fail closed to [`Hue::White`].
    pub fn from_index(index: i32) -> Self {
        match usize::try_from(index).ok().and_then(|i| Self::ALL.get(i)) {
            Some(hue) => *hue,
            None => {
                warn!("Invalid hue index {}, falling back to white", index);
                Hue::White
            }
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Step through the hue list, wrapping at both ends.
    pub fn cycle(self, delta: i32) -> Self {
        let next = (i32::from(self.index()) + delta).rem_euclid(i32::from(NUM_HUES));
        Self::from_index(next)
    }

    /// The hue's shades, brightest first.
    pub const fn shades(self) -> [Rgb565; 3] {
        COLOR_SETS[self as usize]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Cyan => "cyan",
            Self::Orange => "orange",
        }
    }
}

/// Coverage band a cell falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ShadeBand {
    Bright = 0,
    Mid = 1,
    Dim = 2,
}

impl ShadeBand {
    /// Classify a coverage fraction. `None` means "leave the background".
    ///
    /// NaN compares false against every threshold and lands in `None`.
    pub fn from_coverage(coverage: f32) -> Option<Self> {
        if coverage > HI_COLOR_THRESHOLD {
            Some(Self::Bright)
        } else if coverage > MID_COLOR_THRESHOLD {
            Some(Self::Mid)
        } else if coverage > LO_COLOR_THRESHOLD {
            Some(Self::Dim)
        } else {
            None
        }
    }
}

/// Pick the palette shade for a cell with the given coverage.
pub fn select_shade(coverage: f32, hue: Hue) -> Option<Rgb565> {
    ShadeBand::from_coverage(coverage).map(|band| hue.shades()[band as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(ShadeBand::from_coverage(1.0), Some(ShadeBand::Bright));
        assert_eq!(ShadeBand::from_coverage(0.71), Some(ShadeBand::Bright));
        assert_eq!(ShadeBand::from_coverage(0.7), Some(ShadeBand::Mid));
        assert_eq!(ShadeBand::from_coverage(0.36), Some(ShadeBand::Mid));
        assert_eq!(ShadeBand::from_coverage(0.35), Some(ShadeBand::Dim));
        assert_eq!(ShadeBand::from_coverage(0.11), Some(ShadeBand::Dim));
        assert_eq!(ShadeBand::from_coverage(0.1), None);
        assert_eq!(ShadeBand::from_coverage(0.0), None);
        assert_eq!(ShadeBand::from_coverage(-0.5), None);
        assert_eq!(ShadeBand::from_coverage(f32::NAN), None);
    }

    #[test]
    fn test_select_shade_uses_hue_palette() {
        assert_eq!(select_shade(0.9, Hue::Red), Some(RED));
        assert_eq!(select_shade(0.5, Hue::Red), Some(DARK_CANDY_APPLE_RED));
        assert_eq!(select_shade(0.2, Hue::Red), Some(BULGARIAN_ROSE));
        assert_eq!(select_shade(0.05, Hue::Red), None);
        assert_eq!(select_shade(1.0, Hue::Orange), Some(CHROME_YELLOW));
    }

    #[test]
    fn test_invalid_index_fails_closed() {
        assert_eq!(Hue::from_index(3), Hue::Green);
        assert_eq!(Hue::from_index(8), Hue::White);
        assert_eq!(Hue::from_index(-1), Hue::White);
        assert_eq!(Hue::from_index(i32::MAX), Hue::White);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Hue::Orange.cycle(1), Hue::White);
        assert_eq!(Hue::White.cycle(-1), Hue::Orange);
        assert_eq!(Hue::Green.cycle(2), Hue::Purple);
        assert_eq!(Hue::Blue.cycle(-10), Hue::White);
    }
}
