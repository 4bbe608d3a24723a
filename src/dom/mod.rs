// SPDX-License-Identifier: PMPL-1.0-or-later
//! DOM-like element views consumed by the analysis passes.
//!
//! The announcement synthesizer and the keyboard detector run against the
//! [`ElementDescriptor`] trait so tests can drive them with plain structs and
//! future embedders can adapt whatever tree they already have.
//! [`html::HtmlPage`] is the scraper-backed implementation used everywhere
//! else in this crate.

pub mod html;

pub use html::{HtmlElement, HtmlPage};

/// Read-only view of a single element.
///
/// Attribute and style lookups return owned strings; descriptors are
/// expected to be cheap handles into a larger tree.
pub trait ElementDescriptor {
    /// Lowercase tag name ("button", "input", ...)
    fn tag_name(&self) -> String;

    /// Attribute value if the attribute is present, including when empty
    fn attr(&self, name: &str) -> Option<String>;

    /// Concatenated descendant text, whitespace-normalized
    fn text_content(&self) -> String;

    /// One declaration out of the inline `style` attribute
    fn style_property(&self, name: &str) -> Option<String>;

    /// Estimated rendered box as (width, height)
    fn box_size(&self) -> (f64, f64);

    /// Whether the markup retains a visible focus indication.
    ///
    /// Static markup cannot prove a focus ring exists, so this reports
    /// absence of suppression: inline `outline: none` (or `0`) without a
    /// focus-styling class means no indicator.
    fn has_focus_indicator(&self) -> bool;

    /// CSS-like selector locating this element within its document
    fn selector(&self) -> String;

    /// Whether the attribute is present at all, regardless of value
    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }
}
