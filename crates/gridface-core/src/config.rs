//! Face configuration and the companion-app settings message.
//!
//! [`FaceConfig`] is what the host persists (as a postcard blob) and hands
//! back at face load. [`SettingsUpdate`] is a partial update decoded from
//! the key/value message the phone sends when the user changes settings.

extern crate alloc;

use alloc::vec::Vec;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::hands::AspectMode;
use crate::shade::Hue;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to encode face config")]
    Encode,
    #[error("failed to decode face config")]
    Decode,
    #[error("value {value} is not valid for settings key {key}")]
    InvalidValue { key: u32, value: i32 },
}

/// Unit the temperature readout is shown in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TempScale {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempScale {
    /// Convert a whole-degree Celsius reading into this scale.
    ///
    /// Readings whose Fahrenheit value leaves the `i32` range saturate.
    pub fn from_celsius(self, celsius: i32) -> i32 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => {
                let fahrenheit = i64::from(celsius) * 9 / 5 + 32;
                fahrenheit.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
            }
        }
    }
}

/// Size of the host's Bluetooth-disconnected image.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BtIcon {
    Small,
    #[default]
    Large,
}

/// Variant-level look of the face.
///
/// Collapses the per-variant differences (background layering, dial shape,
/// default hand colors) into one parameter set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceStyle {
    /// Hands are composited over host bitmap layers instead of a solid fill
    pub layered_background: bool,
    pub aspect: AspectMode,
    pub default_hour_hue: Hue,
    pub default_minute_hue: Hue,
    pub default_second_hue: Hue,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self::classic()
    }
}

impl FaceStyle {
    /// Round dial drawn over the host's background artwork.
    pub const fn classic() -> Self {
        Self {
            layered_background: true,
            aspect: AspectMode::Round,
            default_hour_hue: Hue::White,
            default_minute_hue: Hue::White,
            default_second_hue: Hue::Green,
        }
    }

    /// Square dial on a solid background, hands reaching into the corners.
    pub const fn square() -> Self {
        Self {
            layered_background: false,
            aspect: AspectMode::Square,
            default_hour_hue: Hue::White,
            default_minute_hue: Hue::Cyan,
            default_second_hue: Hue::Red,
        }
    }
}

/// Everything the face needs to know about user preferences.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceConfig {
    pub style: FaceStyle,
    pub hour_hue: Hue,
    pub minute_hue: Hue,
    pub second_hue: Hue,
    pub hide_seconds: bool,
    pub animate_on_load: bool,
    pub temp_scale: TempScale,
    pub bt_icon: BtIcon,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::with_style(FaceStyle::classic())
    }
}

impl FaceConfig {
    /// Config using the style's default hand hues.
    pub fn with_style(style: FaceStyle) -> Self {
        Self {
            style,
            hour_hue: style.default_hour_hue,
            minute_hue: style.default_minute_hue,
            second_hue: style.default_second_hue,
            hide_seconds: false,
            animate_on_load: true,
            temp_scale: TempScale::Celsius,
            bt_icon: BtIcon::Large,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)
    }

    /// Apply a settings message. Returns `true` if anything changed.
    pub fn apply(&mut self, update: &SettingsUpdate) -> bool {
        let before = *self;
        if let Some(hide) = update.hide_seconds {
            self.hide_seconds = hide;
        }
        if let Some(hue) = update.hour_hue {
            self.hour_hue = hue;
        }
        if let Some(hue) = update.minute_hue {
            self.minute_hue = hue;
        }
        if let Some(hue) = update.second_hue {
            self.second_hue = hue;
        }
        if let Some(scale) = update.temp_scale {
            self.temp_scale = scale;
        }
        *self != before
    }
}

/// Keys of the phone-to-watch message dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum MessageKey {
    Temperature = 0,
    Conditions = 1,
    MessageType = 2,
    HideSeconds = 3,
    HourColor = 4,
    MinuteColor = 5,
    SecondColor = 6,
    TempScale = 7,
}

impl MessageKey {
    pub fn from_u32(key: u32) -> Option<Self> {
        match key {
            0 => Some(Self::Temperature),
            1 => Some(Self::Conditions),
            2 => Some(Self::MessageType),
            3 => Some(Self::HideSeconds),
            4 => Some(Self::HourColor),
            5 => Some(Self::MinuteColor),
            6 => Some(Self::SecondColor),
            7 => Some(Self::TempScale),
            _ => None,
        }
    }
}

/// Partial settings change; `None` fields keep their current value.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsUpdate {
    pub hide_seconds: Option<bool>,
    pub hour_hue: Option<Hue>,
    pub minute_hue: Option<Hue>,
    pub second_hue: Option<Hue>,
    pub temp_scale: Option<TempScale>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A decoded phone message: settings and/or a weather reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InboxMessage {
    pub settings: SettingsUpdate,
    /// Whole degrees Celsius
    pub temperature: Option<i32>,
}

impl InboxMessage {
    /// Decode `(key, value)` tuples.
    ///
    /// Unknown keys and free-text fields (conditions) are skipped. Hue values
    /// outside the palette fall back to white.
    pub fn from_tuples(tuples: &[(u32, i32)]) -> Result<Self, ConfigError> {
        let mut message = Self::default();
        for &(key, value) in tuples {
            let Some(known) = MessageKey::from_u32(key) else {
                warn!("Settings key {} not recognized", key);
                continue;
            };
            match known {
                MessageKey::Temperature => message.temperature = Some(value),
                MessageKey::Conditions | MessageKey::MessageType => {}
                MessageKey::HideSeconds => message.settings.hide_seconds = Some(value != 0),
                MessageKey::HourColor => message.settings.hour_hue = Some(Hue::from_index(value)),
                MessageKey::MinuteColor => {
                    message.settings.minute_hue = Some(Hue::from_index(value))
                }
                MessageKey::SecondColor => {
                    message.settings.second_hue = Some(Hue::from_index(value))
                }
                MessageKey::TempScale => {
                    message.settings.temp_scale = Some(match value {
                        0 => TempScale::Celsius,
                        1 => TempScale::Fahrenheit,
                        _ => return Err(ConfigError::InvalidValue { key, value }),
                    })
                }
            }
        }
        Ok(message)
    }
}
