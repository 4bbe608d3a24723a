// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for empathybot

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for empathybot
///
/// Most public entry points fail soft (see the color and audit modules);
/// these variants are the tagged layer underneath, so tests and strict
/// callers can tell a degraded default from a real success.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid color format: {0}")]
    InvalidColorFormat(String),

    #[error("Rule engine failure: {0}")]
    RuleEngineFailure(String),

    #[error("Score denominator is zero: no rules were evaluated")]
    DegenerateRatioInput,

    #[error("Invalid selector: {0}")]
    Selector(String),
}
