//! Color definitions for the watch face
//!
//! The face was designed against a 64-color panel with two bits per channel
//! (0x00, 0x55, 0xAA, 0xFF). Every entry here is one of those colors
//! converted to RGB565 so the core can target any `Rgb565` draw target.
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Background
// ============================================================================

/// Face background; also the "no-draw" shade of the anti-aliasing palette
pub const OXFORD_BLUE: Rgb565 = Rgb565::new(0x00 >> 3, 0x00 >> 2, 0x55 >> 3);

/// Letterbox color around host bitmap layers
pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

// ============================================================================
// Grays
// ============================================================================

pub const WHITE: Rgb565 = Rgb565::new(0xFF >> 3, 0xFF >> 2, 0xFF >> 3);
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(0xAA >> 3, 0xAA >> 2, 0xAA >> 3);
pub const DARK_GRAY: Rgb565 = Rgb565::new(0x55 >> 3, 0x55 >> 2, 0x55 >> 3);

// ============================================================================
// Reds
// ============================================================================

pub const RED: Rgb565 = Rgb565::new(0xFF >> 3, 0x00 >> 2, 0x00 >> 3);
pub const DARK_CANDY_APPLE_RED: Rgb565 = Rgb565::new(0xAA >> 3, 0x00 >> 2, 0x00 >> 3);
pub const BULGARIAN_ROSE: Rgb565 = Rgb565::new(0x55 >> 3, 0x00 >> 2, 0x00 >> 3);

// ============================================================================
// Blues
// ============================================================================

pub const BLUE_MOON: Rgb565 = Rgb565::new(0x00 >> 3, 0x55 >> 2, 0xFF >> 3);
pub const BLUE: Rgb565 = Rgb565::new(0x00 >> 3, 0x00 >> 2, 0xFF >> 3);
pub const DUKE_BLUE: Rgb565 = Rgb565::new(0x00 >> 3, 0x00 >> 2, 0xAA >> 3);

// ============================================================================
// Greens
// ============================================================================

pub const GREEN: Rgb565 = Rgb565::new(0x00 >> 3, 0xFF >> 2, 0x00 >> 3);
pub const ISLAMIC_GREEN: Rgb565 = Rgb565::new(0x00 >> 3, 0xAA >> 2, 0x00 >> 3);
pub const DARK_GREEN: Rgb565 = Rgb565::new(0x00 >> 3, 0x55 >> 2, 0x00 >> 3);

// ============================================================================
// Yellows
// ============================================================================

pub const YELLOW: Rgb565 = Rgb565::new(0xFF >> 3, 0xFF >> 2, 0x00 >> 3);
pub const LIMERICK: Rgb565 = Rgb565::new(0xAA >> 3, 0xAA >> 2, 0x00 >> 3);
pub const ARMY_GREEN: Rgb565 = Rgb565::new(0x55 >> 3, 0x55 >> 2, 0x00 >> 3);

// ============================================================================
// Purples
// ============================================================================

pub const MAGENTA: Rgb565 = Rgb565::new(0xFF >> 3, 0x00 >> 2, 0xFF >> 3);
pub const PURPLE: Rgb565 = Rgb565::new(0xAA >> 3, 0x00 >> 2, 0xAA >> 3);
pub const IMPERIAL_PURPLE: Rgb565 = Rgb565::new(0x55 >> 3, 0x00 >> 2, 0x55 >> 3);

// ============================================================================
// Cyans
// ============================================================================

pub const CYAN: Rgb565 = Rgb565::new(0x00 >> 3, 0xFF >> 2, 0xFF >> 3);
pub const TIFFANY_BLUE: Rgb565 = Rgb565::new(0x00 >> 3, 0xAA >> 2, 0xAA >> 3);
pub const MIDNIGHT_GREEN: Rgb565 = Rgb565::new(0x00 >> 3, 0x55 >> 2, 0x55 >> 3);

// ============================================================================
// Oranges
// ============================================================================

pub const CHROME_YELLOW: Rgb565 = Rgb565::new(0xFF >> 3, 0xAA >> 2, 0x00 >> 3);
pub const ORANGE: Rgb565 = Rgb565::new(0xFF >> 3, 0x55 >> 2, 0x00 >> 3);
pub const WINDSOR_TAN: Rgb565 = Rgb565::new(0xAA >> 3, 0x55 >> 2, 0x00 >> 3);
