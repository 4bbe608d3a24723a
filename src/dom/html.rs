// SPDX-License-Identifier: PMPL-1.0-or-later
//! scraper-backed implementation of the element view.
//!
//! `HtmlPage` owns the parsed document; `HtmlElement` is a copyable handle
//! into it. Selectors produced here are axe-style paths
//! (`html > body > button:nth-of-type(2)`, or `tag#id` when an id exists)
//! so report consumers can locate the node in the source markup.

use crate::dom::ElementDescriptor;
use crate::error::{Error, Result};
use scraper::{ElementRef, Html, Selector};

/// Nominal edge length for elements whose markup does not constrain size.
/// Static analysis cannot compute layout; anything not explicitly zero or
/// hidden is treated as occupying space.
const DEFAULT_BOX_EDGE: f64 = 1.0;

/// A parsed HTML document
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    /// Parse a complete document. Parsing never fails; malformed markup is
    /// recovered the same way browsers recover it.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Every element in document order
    pub fn elements(&self) -> Vec<HtmlElement<'_>> {
        let all = Selector::parse("*").expect("valid selector");
        self.document.select(&all).map(HtmlElement).collect()
    }

    /// Elements matching a CSS selector, in document order
    pub fn select(&self, css: &str) -> Result<Vec<HtmlElement<'_>>> {
        let selector = Selector::parse(css)
            .map_err(|e| Error::Selector(format!("{}: {}", css, e)))?;
        Ok(self.document.select(&selector).map(HtmlElement).collect())
    }

    /// Trimmed `<title>` text, if a non-empty one exists
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").expect("valid selector");
        self.document
            .select(&selector)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// One element inside an [`HtmlPage`]
#[derive(Clone, Copy)]
pub struct HtmlElement<'a>(pub(crate) ElementRef<'a>);

impl<'a> HtmlElement<'a> {
    /// Whether any ancestor element has the given tag name
    pub fn has_ancestor(&self, tag: &str) -> bool {
        self.0
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| el.value().name().eq_ignore_ascii_case(tag))
    }
}

impl ElementDescriptor for HtmlElement<'_> {
    fn tag_name(&self) -> String {
        self.0.value().name().to_ascii_lowercase()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(String::from)
    }

    fn text_content(&self) -> String {
        // Collapse the whitespace that pretty-printed markup introduces
        self.0
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn style_property(&self, name: &str) -> Option<String> {
        let style = self.0.value().attr("style")?;
        for declaration in style.split(';') {
            if let Some((property, value)) = declaration.split_once(':') {
                if property.trim().eq_ignore_ascii_case(name) {
                    return Some(value.trim().to_string());
                }
            }
        }
        None
    }

    fn box_size(&self) -> (f64, f64) {
        if self.has_attr("hidden") || self.attr("type").as_deref() == Some("hidden") {
            return (0.0, 0.0);
        }
        let width = self.dimension("width").unwrap_or(DEFAULT_BOX_EDGE);
        let height = self.dimension("height").unwrap_or(DEFAULT_BOX_EDGE);
        (width, height)
    }

    fn has_focus_indicator(&self) -> bool {
        let classes = self.attr("class").unwrap_or_default();
        if classes
            .split_whitespace()
            .any(|c| c == "focus-visible" || c == "focus-ring")
        {
            return true;
        }
        match self.style_property("outline") {
            Some(outline) => {
                let value = outline.to_ascii_lowercase();
                value != "none" && value != "0"
            }
            // Browsers draw a default focus ring unless styling removes it
            None => true,
        }
    }

    fn selector(&self) -> String {
        if let Some(id) = self.0.value().attr("id") {
            if !id.is_empty() {
                return format!("{}#{}", self.tag_name(), id);
            }
        }

        let mut segments = Vec::new();
        let mut current = Some(self.0);
        while let Some(el) = current {
            segments.push(path_segment(el));
            current = el.parent().and_then(ElementRef::wrap);
        }
        segments.reverse();
        segments.join(" > ")
    }
}

impl HtmlElement<'_> {
    fn dimension(&self, name: &str) -> Option<f64> {
        let raw = self.style_property(name).or_else(|| self.attr(name))?;
        parse_dimension(&raw)
    }
}

/// Leading numeric portion of a CSS length ("120px" -> 120.0); `None` for
/// non-numeric values like `auto`
fn parse_dimension(raw: &str) -> Option<f64> {
    let numeric: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    numeric.parse().ok()
}

fn path_segment(el: ElementRef<'_>) -> String {
    let name = el.value().name();

    let nth = 1 + el
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sib| sib.value().name() == name)
        .count();
    let only_of_type = nth == 1
        && !el
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .any(|sib| sib.value().name() == name);

    if only_of_type {
        name.to_string()
    } else {
        format!("{}:nth-of-type({})", name, nth)
    }
}
