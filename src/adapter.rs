//! Hardware adapter abstraction.
//!
//! An adapter owns the wire protocol to one ASRock lighting controller. This crate never talks to
//! the bus itself; it only issues the primitives below.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// Hardware revision of the ASRock motherboard lighting family.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum Variant {
    /// ASR LED, single zone without LED configuration register.
    AsrLed,
    PolychromeV1,
    PolychromeV2,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::AsrLed, Variant::PolychromeV1, Variant::PolychromeV2];

    /// Whether the hardware reports per-zone LED counts.
    pub const fn has_zone_register(self) -> bool {
        !matches!(self, Self::AsrLed)
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::AsrLed => f.write_str("ASR LED"),
            Self::PolychromeV1 => f.write_str("Polychrome V1"),
            Self::PolychromeV2 => f.write_str("Polychrome V2"),
        }
    }
}

/// Physical zone slot on the LED configuration register.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum ZoneSlot {
    FanHeader,
    LedHeader,
    Audio,
    Pch,
    IoCover,
    /// Addressable RGB header, not exposed as a zone.
    Addressable,
}

impl ZoneSlot {
    /// Slots turned into zones, in LED addressing order.
    pub const HEADERS: [ZoneSlot; 5] = [
        ZoneSlot::FanHeader,
        ZoneSlot::LedHeader,
        ZoneSlot::Audio,
        ZoneSlot::Pch,
        ZoneSlot::IoCover,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::FanHeader => "RGB Fan Header",
            Self::LedHeader => "RGB LED Header",
            Self::Audio => "Audio",
            Self::Pch => "PCH",
            Self::IoCover => "IO Cover",
            Self::Addressable => "Addressable Header",
        }
    }
}

/// Opaque failure reported by the transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("adapter I/O failure: {0}")]
pub struct AdapterError(pub String);

impl From<&str> for AdapterError {
    fn from(msg: &str) -> Self {
        Self(msg.into())
    }
}

impl From<String> for AdapterError {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

/// Outcome of a single adapter transaction.
pub type AdapterResult = Result<(), AdapterError>;

/// Driver for one ASRock lighting controller.
pub trait Adapter {
    /// Hardware revision.
    fn variant(&self) -> Variant;

    /// LED count read from the configuration register.
    ///
    /// Only queried for variants with [`Variant::has_zone_register`].
    fn zone_led_count(&self, slot: ZoneSlot) -> u8;

    /// Human readable device name.
    fn device_name(&self) -> String;

    /// Firmware version string.
    fn firmware_version(&self) -> String;

    /// Switch the hardware effect.
    fn set_mode(&mut self, mode: u8, speed: u8) -> AdapterResult;

    /// Write the color of a single LED.
    fn set_colors_and_speed(&mut self, led: usize, r: u8, g: u8, b: u8) -> AdapterResult;
}
