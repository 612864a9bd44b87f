//! Lighting effect descriptors.

use std::fmt::{self, Debug, Formatter};
use std::ops::BitOr;

/// Optional parameters accepted by a mode.
#[derive(Default, PartialEq, Eq, Hash, Copy, Clone)]
pub struct ModeFlags(u8);

impl ModeFlags {
    pub const NONE: Self = Self(0);
    pub const HAS_SPEED: Self = Self(1 << 0);
    pub const HAS_PER_LED_COLOR: Self = Self(1 << 1);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for ModeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl Debug for ModeFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_set();
        if self.contains(Self::HAS_SPEED) {
            list.entry(&"HAS_SPEED");
        }
        if self.contains(Self::HAS_PER_LED_COLOR) {
            list.entry(&"HAS_PER_LED_COLOR");
        }
        list.finish()
    }
}

/// Whether per-LED colors are meaningful for a mode.
#[derive(Default, PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum ColorMode {
    #[default]
    None,
    PerLed,
}

/// Hardware speed limits.
///
/// The hardware counts speed downwards, so `min` is usually numerically larger than `max`.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct SpeedRange {
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl SpeedRange {
    /// Check if a speed lies between both limits, in either direction.
    pub fn contains(&self, speed: u8) -> bool {
        let (low, high) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        (low..=high).contains(&speed)
    }
}

/// Lighting effect supported by the hardware.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Mode {
    pub name: &'static str,
    /// Hardware identifier, sent verbatim.
    pub value: u8,
    pub flags: ModeFlags,
    pub color_mode: ColorMode,
    pub speed_range: Option<SpeedRange>,
}

impl Mode {
    pub fn supports_speed(&self) -> bool {
        self.flags.contains(ModeFlags::HAS_SPEED)
    }

    pub fn supports_per_led_color(&self) -> bool {
        self.flags.contains(ModeFlags::HAS_PER_LED_COLOR)
    }

    /// Speed sent when the mode is activated, zero without speed control.
    pub fn default_speed(&self) -> u8 {
        self.speed_range.map_or(0, |range| range.default)
    }
}
