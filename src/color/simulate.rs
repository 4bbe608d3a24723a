// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color vision deficiency simulation.
//!
//! Dichromacy simulation multiplies the linearized color by a severity-1.0
//! transform from Machado, Oliveira & Fernandes (2009), "A
//! Physiologically-based Model for Simulation of Color Vision Deficiency".
//! Achromatopsia collapses the color to its relative luminance instead, since
//! a transform matrix cannot express total loss of hue discrimination.

use super::{linear_to_srgb, relative_luminance, srgb_to_linear, Rgb};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Form of color vision deficiency to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeficiencyKind {
    /// Unaltered trichromatic vision
    Normal,
    /// Missing L (long wavelength) cones - red-blind
    Protanopia,
    /// Missing M (medium wavelength) cones - green-blind
    Deuteranopia,
    /// Missing S (short wavelength) cones - blue-blind
    Tritanopia,
    /// No functional cones - total color blindness
    Achromatopsia,
}

impl std::fmt::Display for DeficiencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeficiencyKind::Normal => "normal",
            DeficiencyKind::Protanopia => "protanopia",
            DeficiencyKind::Deuteranopia => "deuteranopia",
            DeficiencyKind::Tritanopia => "tritanopia",
            DeficiencyKind::Achromatopsia => "achromatopsia",
        };
        write!(f, "{}", name)
    }
}

// Machado et al. severity-1.0 matrices, applied in linear RGB.
// Rows sum to 1.0 so grays stay fixed points of the transform.
const PROTANOPIA: [[f64; 3]; 3] = [
    [0.152286, 1.052583, -0.204868],
    [0.114503, 0.786281, 0.099216],
    [-0.003882, -0.048116, 1.051998],
];

const DEUTERANOPIA: [[f64; 3]; 3] = [
    [0.367322, 0.860646, -0.227968],
    [0.280085, 0.672501, 0.047413],
    [-0.011820, 0.042940, 0.968881],
];

const TRITANOPIA: [[f64; 3]; 3] = [
    [1.255528, -0.076749, -0.178779],
    [-0.078411, 0.930809, 0.147602],
    [0.004733, 0.691367, 0.303900],
];

fn apply_matrix(color: Rgb, matrix: &[[f64; 3]; 3]) -> Rgb {
    let r = srgb_to_linear(color.r as f64 / 255.0);
    let g = srgb_to_linear(color.g as f64 / 255.0);
    let b = srgb_to_linear(color.b as f64 / 255.0);

    let channels = [
        matrix[0][0] * r + matrix[0][1] * g + matrix[0][2] * b,
        matrix[1][0] * r + matrix[1][1] * g + matrix[1][2] * b,
        matrix[2][0] * r + matrix[2][1] * g + matrix[2][2] * b,
    ];

    // Out-of-gamut results clamp before gamma encoding; a negative linear
    // value would otherwise produce NaN under the fractional power.
    let encode = |linear: f64| -> u8 {
        let v = linear_to_srgb(linear.clamp(0.0, 1.0));
        (v * 255.0).round() as u8
    };

    Rgb {
        r: encode(channels[0]),
        g: encode(channels[1]),
        b: encode(channels[2]),
    }
}

fn desaturate(color: Rgb) -> Rgb {
    let gray = (linear_to_srgb(relative_luminance(color)) * 255.0).round() as u8;
    Rgb {
        r: gray,
        g: gray,
        b: gray,
    }
}

/// Simulate how a parsed color appears under a given deficiency
pub fn simulate_rgb(color: Rgb, kind: DeficiencyKind) -> Rgb {
    match kind {
        DeficiencyKind::Normal => color,
        DeficiencyKind::Protanopia => apply_matrix(color, &PROTANOPIA),
        DeficiencyKind::Deuteranopia => apply_matrix(color, &DEUTERANOPIA),
        DeficiencyKind::Tritanopia => apply_matrix(color, &TRITANOPIA),
        DeficiencyKind::Achromatopsia => desaturate(color),
    }
}

/// Simulate a hex color string, tagged-result form
pub fn try_simulate(color: &str, kind: DeficiencyKind) -> Result<Rgb> {
    Ok(simulate_rgb(Rgb::from_hex(color)?, kind))
}

/// Simulate how a hex color string appears under a given deficiency.
///
/// `Normal` returns the input string unchanged, byte for byte, without
/// parsing it. Malformed input also comes back unchanged, so swatch
/// renderers can pass anything through without a validation pass first.
pub fn simulate(color: &str, kind: DeficiencyKind) -> String {
    if kind == DeficiencyKind::Normal {
        return color.to_string();
    }
    match try_simulate(color, kind) {
        Ok(rgb) => rgb.to_string(),
        Err(_) => color.to_string(),
    }
}
