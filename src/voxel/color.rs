//! Voxel color type

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Error;
use crate::core::types::Result;

/// RGBA color, 8 bits per channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully cleared color. Storing it in a grid removes the voxel.
    pub const CLEAR: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// Create color from RGBA channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create opaque color from RGB channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Unpack from `0xRRGGBBAA`
    pub fn from_rgba_u32(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Pack into `0xRRGGBBAA`
    pub fn to_rgba_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Check if this is the cleared sentinel
    pub fn is_clear(&self) -> bool {
        *self == Self::CLEAR
    }

    /// Parse `#RRGGBBAA` or `#RRGGBB` (opaque). The leading `#` is optional.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        let bad = || Error::format(format!("invalid color '{}'", text));

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| bad())?;
        match digits.len() {
            8 => Ok(Self::from_rgba_u32(value)),
            6 => Ok(Self::from_rgba_u32((value << 8) | 0xFF)),
            _ => Err(bad()),
        }
    }

    /// Format as `#RRGGBBAA`
    pub fn to_hex(self) -> String {
        format!("#{:08X}", self.to_rgba_u32())
    }

    /// Darken RGB by 10%, rounding down. Alpha is kept.
    pub fn darker(self) -> Self {
        self.map_rgb(|c| (u16::from(c) * 9 / 10) as u8)
    }

    /// Lighten RGB by 10%, rounding up and saturating at 255. Alpha is kept.
    pub fn lighter(self) -> Self {
        self.map_rgb(|c| (u16::from(c) * 11).div_ceil(10).min(255) as u8)
    }

    fn map_rgb(self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
            a: self.a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_rgba_u32())
    }
}
