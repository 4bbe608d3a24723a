// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrast ratio calculation and WCAG conformance thresholds.
//!
//! Ratios follow the WCAG formula `(Lmax + 0.05) / (Lmin + 0.05)` and land
//! in [1, 21] regardless of argument order.
//! - AA: 4.5:1 for normal text, 3:1 for large text
//! - AAA: 7:1 for normal text, 4.5:1 for large text

use super::{relative_luminance, Rgb};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// WCAG conformance level for contrast checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// Text size category for threshold selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    /// Body text
    Normal,
    /// At least 18pt, or 14pt bold
    Large,
}

impl std::fmt::Display for TextSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextSize::Normal => write!(f, "normal"),
            TextSize::Large => write!(f, "large"),
        }
    }
}

/// Minimum contrast ratio for a (level, size) pairing
pub fn minimum_ratio(level: WcagLevel, size: TextSize) -> f64 {
    match (level, size) {
        (WcagLevel::AA, TextSize::Large) => 3.0,
        (WcagLevel::AA, TextSize::Normal) => 4.5,
        (WcagLevel::AAA, TextSize::Large) => 4.5,
        (WcagLevel::AAA, TextSize::Normal) => 7.0,
    }
}

/// Contrast ratio between two parsed colors.
/// Symmetric in its arguments; black on white is 21:1, same on same is 1:1.
pub fn contrast_ratio_rgb(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la > lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex color strings, tagged-result form.
/// `contrast_ratio` is the fail-soft boundary over this.
pub fn try_contrast_ratio(foreground: &str, background: &str) -> Result<f64> {
    Ok(contrast_ratio_rgb(
        Rgb::from_hex(foreground)?,
        Rgb::from_hex(background)?,
    ))
}

/// Contrast ratio between two hex color strings.
///
/// Malformed input degrades to the minimum ratio 1.0 instead of failing,
/// so display-only callers never need their own error handling.
pub fn contrast_ratio(foreground: &str, background: &str) -> f64 {
    try_contrast_ratio(foreground, background).unwrap_or(1.0)
}

/// Whether a ratio satisfies the threshold for the given level and size
pub fn meets_standard(ratio: f64, level: WcagLevel, size: TextSize) -> bool {
    ratio >= minimum_ratio(level, size)
}
