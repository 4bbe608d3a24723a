// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard navigation defect detection - WCAG 2.1.1 Keyboard (Level A),
//! 2.4.7 Focus Visible (Level AA)
//!
//! Flags interactive elements a keyboard user would lose: focusable things
//! with their focus ring suppressed, and elements pulled out of the tab
//! order with a negative tabindex while still exposed to assistive
//! technology. The result is an advisory list in document order, not a
//! pass/fail verdict.

use crate::dom::{ElementDescriptor, HtmlElement, HtmlPage};

/// Tags that are keyboard-focusable without any tabindex
pub const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

/// Whether the element participates in keyboard interaction at all:
/// natively interactive, or opted in via a tabindex other than `-1`.
/// The aria-hidden focusability rule shares this predicate.
pub fn is_focus_candidate<N: ElementDescriptor>(element: &N) -> bool {
    if INTERACTIVE_TAGS.contains(&element.tag_name().as_str()) {
        return true;
    }
    element
        .attr("tabindex")
        .map(|t| t != "-1")
        .unwrap_or(false)
}

/// Visibility per inline styling and estimated box: `display: none`,
/// `visibility: hidden`, or a zero-area box means not visible
fn is_visible<N: ElementDescriptor>(element: &N) -> bool {
    if element.style_property("display").as_deref() == Some("none") {
        return false;
    }
    if element.style_property("visibility").as_deref() == Some("hidden") {
        return false;
    }
    let (width, height) = element.box_size();
    width > 0.0 && height > 0.0
}

fn has_negative_tabindex<N: ElementDescriptor>(element: &N) -> bool {
    element
        .attr("tabindex")
        .and_then(|t| t.trim().parse::<i32>().ok())
        .map(|t| t < 0)
        .unwrap_or(false)
}

/// Scan elements (document order in, document order out) and return the
/// ones a keyboard user would struggle with: visible interactive elements
/// that either lack a focus indication or sit at a negative tabindex
/// without being hidden from assistive technology.
pub fn detect_keyboard_issues<N: ElementDescriptor>(
    elements: impl IntoIterator<Item = N>,
) -> Vec<N> {
    elements
        .into_iter()
        .filter(|el| is_focus_candidate(el) && is_visible(el))
        .filter(|el| {
            !el.has_focus_indicator()
                || (has_negative_tabindex(el) && !el.has_attr("aria-hidden"))
        })
        .collect()
}

/// Keyboard scan over a whole parsed page
pub fn page_keyboard_issues(page: &HtmlPage) -> Vec<HtmlElement<'_>> {
    detect_keyboard_issues(page.elements())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementDescriptor;

    /// Minimal descriptor for driving the detector without parsing HTML
    #[derive(Debug, Clone, Default)]
    struct TestElement {
        tag: &'static str,
        attrs: Vec<(&'static str, &'static str)>,
        styles: Vec<(&'static str, &'static str)>,
        box_size: Option<(f64, f64)>,
        focus_indicator: bool,
    }

    impl TestElement {
        fn new(tag: &'static str) -> Self {
            Self {
                tag,
                box_size: Some((10.0, 10.0)),
                focus_indicator: true,
                ..Self::default()
            }
        }

        fn with_attr(mut self, name: &'static str, value: &'static str) -> Self {
            self.attrs.push((name, value));
            self
        }

        fn with_style(mut self, name: &'static str, value: &'static str) -> Self {
            self.styles.push((name, value));
            self
        }

        fn with_box(mut self, width: f64, height: f64) -> Self {
            self.box_size = Some((width, height));
            self
        }

        fn without_focus_indicator(mut self) -> Self {
            self.focus_indicator = false;
            self
        }
    }

    impl ElementDescriptor for TestElement {
        fn tag_name(&self) -> String {
            self.tag.to_string()
        }

        fn attr(&self, name: &str) -> Option<String> {
            self.attrs
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.to_string())
        }

        fn text_content(&self) -> String {
            String::new()
        }

        fn style_property(&self, name: &str) -> Option<String> {
            self.styles
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.to_string())
        }

        fn box_size(&self) -> (f64, f64) {
            self.box_size.unwrap_or((0.0, 0.0))
        }

        fn has_focus_indicator(&self) -> bool {
            self.focus_indicator
        }

        fn selector(&self) -> String {
            self.tag.to_string()
        }
    }

    #[test]
    fn test_healthy_interactive_elements_pass() {
        let elements = vec![
            TestElement::new("button"),
            TestElement::new("a").with_attr("href", "/x"),
            TestElement::new("input").with_attr("type", "text"),
        ];
        assert!(detect_keyboard_issues(elements).is_empty());
    }

    #[test]
    fn test_suppressed_focus_ring_is_flagged() {
        let elements = vec![
            TestElement::new("button").without_focus_indicator(),
            TestElement::new("button"),
        ];
        let flagged = detect_keyboard_issues(elements);
        assert_eq!(flagged.len(), 1);
        assert!(!flagged[0].focus_indicator);
    }

    #[test]
    fn test_negative_tabindex_is_flagged_unless_aria_hidden() {
        let trapped = TestElement::new("button").with_attr("tabindex", "-1");
        let deliberate = TestElement::new("button")
            .with_attr("tabindex", "-1")
            .with_attr("aria-hidden", "true");
        let flagged = detect_keyboard_issues(vec![trapped, deliberate]);
        assert_eq!(flagged.len(), 1);
        assert!(!flagged[0].has_attr("aria-hidden"));
    }

    #[test]
    fn test_invisible_elements_are_skipped() {
        let elements = vec![
            TestElement::new("button")
                .without_focus_indicator()
                .with_style("display", "none"),
            TestElement::new("button")
                .without_focus_indicator()
                .with_style("visibility", "hidden"),
            TestElement::new("button")
                .without_focus_indicator()
                .with_box(0.0, 0.0),
        ];
        assert!(detect_keyboard_issues(elements).is_empty());
    }

    #[test]
    fn test_non_interactive_elements_are_ignored() {
        let elements = vec![
            TestElement::new("div").without_focus_indicator(),
            TestElement::new("span").without_focus_indicator(),
        ];
        assert!(detect_keyboard_issues(elements).is_empty());
    }

    #[test]
    fn test_tabindex_opts_a_div_in() {
        let widget = TestElement::new("div")
            .with_attr("tabindex", "0")
            .without_focus_indicator();
        let excluded = TestElement::new("div")
            .with_attr("tabindex", "-1")
            .without_focus_indicator();
        let flagged = detect_keyboard_issues(vec![widget, excluded]);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].attr("tabindex").as_deref(), Some("0"));
    }

    #[test]
    fn test_document_order_is_preserved() {
        let elements = vec![
            TestElement::new("a")
                .with_attr("href", "/1")
                .without_focus_indicator(),
            TestElement::new("button"),
            TestElement::new("textarea").without_focus_indicator(),
        ];
        let flagged = detect_keyboard_issues(elements);
        let tags: Vec<String> = flagged.iter().map(|e| e.tag_name()).collect();
        assert_eq!(tags, vec!["a", "textarea"]);
    }

    #[test]
    fn test_page_scan_finds_inline_suppression() {
        let page = HtmlPage::parse(
            r#"<html><body>
                <button style="outline: none">Bad</button>
                <button>Good</button>
                <a href="/x" tabindex="-1">Skipped link</a>
            </body></html>"#,
        );
        let flagged = page_keyboard_issues(&page);
        let selectors: Vec<String> = flagged.iter().map(|e| e.selector()).collect();
        assert_eq!(
            selectors,
            vec![
                "html > body > button:nth-of-type(1)".to_string(),
                "html > body > a".to_string(),
            ]
        );
    }
}
