//! Packed 24-bit RGB color.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// RGB color packed as `0x00BBGGRR`.
#[derive(Default, PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct RgbColor(u32);

impl RgbColor {
    pub const BLACK: Self = Self(0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((b as u32) << 16) | ((g as u32) << 8) | r as u32)
    }

    pub const fn r(self) -> u8 {
        self.0 as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Split into `(red, green, blue)`.
    pub const fn components(self) -> (u8, u8, u8) {
        (self.r(), self.g(), self.b())
    }

    /// Raw packed value.
    pub const fn packed(self) -> u32 {
        self.0
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Color string did not match `0xRRGGBB`.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("color '{0}' does not match format 0xRRGGBB")]
pub struct ParseColorError(String);

impl FromStr for RgbColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = match s.strip_prefix("0x") {
            Some(chars) if chars.len() == 6 && chars.bytes().all(|c| c.is_ascii_hexdigit()) => {
                chars
            },
            _ => return Err(ParseColorError(s.into())),
        };

        let color = u32::from_str_radix(chars, 16).map_err(|_| ParseColorError(s.into()))?;
        let r = (color >> 16) as u8;
        let g = (color >> 8) as u8;
        let b = color as u8;

        Ok(Self::new(r, g, b))
    }
}

impl Display for RgbColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_unpack() {
        let color = RgbColor::new(0x12, 0x34, 0x56);
        assert_eq!(color.packed(), 0x0056_3412);
        assert_eq!(color.components(), (0x12, 0x34, 0x56));
    }

    #[test]
    fn parse_hex() {
        let color: RgbColor = "0xff8000".parse().unwrap();
        assert_eq!(color.components(), (0xff, 0x80, 0x00));
        assert_eq!(color.to_string(), "0xff8000");
    }

    #[test]
    fn reject_malformed() {
        assert!("ff8000".parse::<RgbColor>().is_err());
        assert!("0xff80".parse::<RgbColor>().is_err());
        assert!("0xgg8000".parse::<RgbColor>().is_err());
    }
}
