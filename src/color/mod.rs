// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color math for WCAG computations.
//!
//! sRGB⇄linear conversion and relative luminance per WCAG 2.x, using the
//! exact piecewise constants WCAG defines (threshold 0.03928, exponent
//! 2.4). Contrast checks and deficiency simulation build on these.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub mod contrast;
pub mod simulate;

/// sRGB-to-linear piecewise threshold from the WCAG relative-luminance
/// definition
const SRGB_THRESHOLD: f64 = 0.03928;

/// Linear-side cutoff, the image of `SRGB_THRESHOLD` under `v / 12.92`
const LINEAR_THRESHOLD: f64 = 0.0030402477;

/// An 8-bit-per-channel sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from channel values
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string.
    ///
    /// Accepts an optional leading `#` followed by exactly six hex digits,
    /// case-insensitive. Anything else is `InvalidColorFormat`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColorFormat(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| Error::InvalidColorFormat(hex.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl std::fmt::Display for Rgb {
    /// Canonical lowercase `#rrggbb` form
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Convert one sRGB channel (normalized to [0,1]) to linear light
pub fn srgb_to_linear(v: f64) -> f64 {
    if v <= SRGB_THRESHOLD {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert linear light back to an sRGB channel value in [0,1]
pub fn linear_to_srgb(v: f64) -> f64 {
    if v <= LINEAR_THRESHOLD {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Relative luminance per WCAG 2.x
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(color: Rgb) -> f64 {
    let linear = [color.r, color.g, color.b].map(|c| srgb_to_linear(c as f64 / 255.0));
    0.2126 * linear[0] + 0.7152 * linear[1] + 0.0722 * linear[2]
}
