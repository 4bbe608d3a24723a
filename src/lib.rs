// SPDX-License-Identifier: PMPL-1.0-or-later
//! Empathybot - Perception Simulation and WCAG Audit Bot
//!
//! Part of the gitbot-fleet ecosystem. Empathybot approximates how a page
//! is perceived under different abilities: how colors look with a color
//! vision deficiency, what a screen reader would announce, where keyboard
//! navigation breaks down, and how a page scores against WCAG rules.
//!
//! ## Components
//!
//! - **Color Math** (1.4.3): sRGB⇄linear conversion and relative luminance
//! - **Contrast** (1.4.3/1.4.6): Contrast ratios and WCAG AA/AAA thresholds
//! - **Simulate**: Color vision deficiency transforms (Machado et al. 2009)
//! - **Announce** (4.1.2): Accessible name, role, and state synthesis
//! - **Keyboard** (2.1.1/2.4.7): Focus affordance defect detection
//! - **Audit**: Rule-engine orchestration, issue normalization, 0-100 score
//! - **Rules**: Built-in static rule engine
//! - **Report**: Text, JSON, and SARIF rendering

pub mod announce;
pub mod audit;
pub mod color;
pub mod dom;
pub mod error;
pub mod keyboard;
pub mod report;
pub mod rules;

pub use audit::{
    run_audit, AccessibilityIssue, AccessibilityReport, IssueSeverity, RuleEngine,
};
pub use color::contrast::{contrast_ratio, meets_standard, TextSize, WcagLevel};
pub use color::simulate::{simulate, DeficiencyKind};
pub use color::Rgb;
pub use dom::{ElementDescriptor, HtmlPage};
pub use error::{Error, Result};
pub use rules::{BuiltinEngine, RuleConfig};
