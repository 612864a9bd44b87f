//! Per-variant mode tables.

use std::ops::Index;
use std::slice;

use crate::adapter::Variant;
use crate::mode::{ColorMode, Mode, ModeFlags, SpeedRange};

const SPEED: ModeFlags = ModeFlags::HAS_SPEED;
const PER_LED: ModeFlags = ModeFlags::HAS_PER_LED_COLOR;
const NONE: ModeFlags = ModeFlags::NONE;

/// Index of the direct color control mode in every table.
pub const STATIC_MODE_INDEX: usize = 1;

/// Static description of one mode.
#[derive(Debug, Copy, Clone)]
struct ModeDescriptor {
    name: &'static str,
    value: u8,
    flags: ModeFlags,
}

const fn mode(name: &'static str, value: u8, flags: ModeFlags) -> ModeDescriptor {
    ModeDescriptor { name, value, flags }
}

/// Modes of one hardware family sharing a single speed range.
#[derive(Debug)]
struct ModeTable {
    speed: SpeedRange,
    modes: &'static [ModeDescriptor],
}

static ASRLED: ModeTable = ModeTable {
    speed: SpeedRange { min: 0x05, max: 0x00, default: 0x03 },
    modes: &[
        mode("Off", 0x10, NONE),
        mode("Static", 0x11, PER_LED),
        mode("Breathing", 0x12, SPEED.union(PER_LED)),
        mode("Strobe", 0x13, SPEED.union(PER_LED)),
        mode("Spectrum Cycle", 0x14, SPEED),
        mode("Random", 0x15, SPEED),
        mode("Music", 0x17, PER_LED),
        mode("Wave", 0x18, SPEED),
    ],
};

static POLYCHROME: ModeTable = ModeTable {
    speed: SpeedRange { min: 0xff, max: 0x00, default: 0xe0 },
    modes: &[
        mode("Off", 0x10, NONE),
        mode("Static", 0x11, PER_LED),
        mode("Breathing", 0x12, SPEED.union(PER_LED)),
        mode("Strobe", 0x13, SPEED.union(PER_LED)),
        mode("Spectrum Cycle", 0x14, SPEED),
        mode("Random", 0x15, SPEED),
        mode("Wave", 0x17, SPEED),
        mode("Spring", 0x18, SPEED),
        mode("Stack", 0x19, SPEED),
        mode("Cram", 0x1a, SPEED),
        mode("Scan", 0x1b, SPEED),
        mode("Neon", 0x1c, NONE),
        mode("Water", 0x1d, SPEED),
        mode("Rainbow", 0x1e, SPEED),
    ],
};

/// Mode table for a hardware variant.
fn table(variant: Variant) -> &'static ModeTable {
    match variant {
        Variant::AsrLed => &ASRLED,
        Variant::PolychromeV1 | Variant::PolychromeV2 => &POLYCHROME,
    }
}

impl ModeTable {
    fn build(&self) -> Vec<Mode> {
        self.modes
            .iter()
            .map(|desc| {
                let speed_range = desc.flags.contains(SPEED).then_some(self.speed);
                let color_mode =
                    if desc.flags.contains(PER_LED) { ColorMode::PerLed } else { ColorMode::None };

                Mode {
                    name: desc.name,
                    value: desc.value,
                    flags: desc.flags,
                    color_mode,
                    speed_range,
                }
            })
            .collect()
    }
}

/// Ordered, immutable list of the modes a controller supports.
#[derive(Debug, Clone)]
pub struct ModeCatalog {
    variant: Variant,
    modes: Vec<Mode>,
}

impl ModeCatalog {
    pub fn new(variant: Variant) -> Self {
        Self { variant, modes: table(variant).build() }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Mode> {
        self.modes.get(index)
    }

    /// Find a mode by its display name, ignoring ASCII case.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.modes.iter().position(|mode| mode.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> slice::Iter<'_, Mode> {
        self.modes.iter()
    }

    pub fn as_slice(&self) -> &[Mode] {
        &self.modes
    }
}

impl Index<usize> for ModeCatalog {
    type Output = Mode;

    fn index(&self, index: usize) -> &Mode {
        &self.modes[index]
    }
}

impl<'a> IntoIterator for &'a ModeCatalog {
    type IntoIter = slice::Iter<'a, Mode>;
    type Item = &'a Mode;

    fn into_iter(self) -> Self::IntoIter {
        self.modes.iter()
    }
}
