// SPDX-License-Identifier: PMPL-1.0-or-later
//! Screen-reader announcement synthesis - WCAG 4.1.2 Name, Role, Value
//!
//! Produces the single line of text an assistive technology would announce
//! for an element: accessible name, resolved role, and ARIA state
//! annotations. The name priority chain and the state ordering are fixed;
//! downstream snapshots depend on both.

use crate::dom::{ElementDescriptor, HtmlPage};

/// Implicit ARIA roles keyed by tag name
const TAG_ROLES: &[(&str, &str)] = &[
    ("button", "button"),
    ("h1", "heading"),
    ("h2", "heading"),
    ("h3", "heading"),
    ("h4", "heading"),
    ("h5", "heading"),
    ("h6", "heading"),
    ("img", "img"),
    ("ul", "list"),
    ("ol", "list"),
    ("li", "listitem"),
    ("nav", "navigation"),
    ("main", "main"),
    ("footer", "contentinfo"),
    ("header", "banner"),
    ("aside", "complementary"),
    ("section", "region"),
    ("article", "article"),
    ("dialog", "dialog"),
    ("menu", "menu"),
];

/// Implicit roles for `<input>` keyed by the `type` attribute
const INPUT_ROLES: &[(&str, &str)] = &[
    ("checkbox", "checkbox"),
    ("radio", "radio"),
    ("range", "slider"),
    ("button", "button"),
    ("search", "searchbox"),
    ("text", "textbox"),
    ("email", "textbox"),
    ("tel", "textbox"),
    ("url", "textbox"),
    ("password", "textbox"),
];

/// Inputs with an unrecognized or missing `type` behave as text fields
const DEFAULT_INPUT_ROLE: &str = "textbox";

/// Elements worth announcing when previewing a whole page
const ANNOUNCEABLE_SELECTOR: &str =
    "a, button, input, select, textarea, img, h1, h2, h3, h4, h5, h6, [role], [aria-label]";

/// Implicit role for an element, per the HTML-AAM tag mappings this crate
/// covers. Anchors only map to `link` when they carry an `href`.
pub fn implicit_role<N: ElementDescriptor>(element: &N) -> Option<String> {
    let tag = element.tag_name();
    match tag.as_str() {
        "a" => element.has_attr("href").then(|| "link".to_string()),
        "input" => {
            let subtype = element.attr("type").unwrap_or_default().to_ascii_lowercase();
            let role = INPUT_ROLES
                .iter()
                .find(|(t, _)| *t == subtype)
                .map(|(_, role)| *role)
                .unwrap_or(DEFAULT_INPUT_ROLE);
            Some(role.to_string())
        }
        _ => TAG_ROLES
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, role)| role.to_string()),
    }
}

/// Role announced for an element: the explicit `role` attribute when
/// non-empty, the implicit mapping otherwise
pub fn resolve_role<N: ElementDescriptor>(element: &N) -> Option<String> {
    element
        .attr("role")
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .or_else(|| implicit_role(element))
}

/// Accessible name, first non-empty source wins:
/// `aria-label`, then `alt`, then rendered text
pub fn accessible_name<N: ElementDescriptor>(element: &N) -> String {
    for source in ["aria-label", "alt"] {
        if let Some(value) = element.attr(source) {
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }
    element.text_content()
}

/// Full announcement for one element: `"role: name"` (or bare name when no
/// role maps), followed by ARIA state annotations in fixed order.
pub fn accessible_text<N: ElementDescriptor>(element: &N) -> String {
    let name = accessible_name(element);
    let mut announced = match resolve_role(element) {
        Some(role) => format!("{}: {}", role, name),
        None => name,
    };

    if let Some(expanded) = element.attr("aria-expanded") {
        announced.push_str(if expanded == "true" {
            " (expanded)"
        } else {
            " (collapsed)"
        });
    }
    if let Some(checked) = element.attr("aria-checked") {
        announced.push_str(if checked == "true" {
            " (checked)"
        } else {
            " (not checked)"
        });
    }
    if element.attr("aria-required").as_deref() == Some("true") {
        announced.push_str(" (required)");
    }
    if element.has_attr("disabled") || element.attr("aria-disabled").as_deref() == Some("true") {
        announced.push_str(" (disabled)");
    }

    announced.trim().to_string()
}

/// Announcements for every announceable element on a page, document order,
/// empty ones skipped
pub fn page_announcements(page: &HtmlPage) -> Vec<String> {
    page.select(ANNOUNCEABLE_SELECTOR)
        .expect("valid selector")
        .iter()
        .map(accessible_text)
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(page: &'a HtmlPage, css: &str) -> crate::dom::HtmlElement<'a> {
        page.select(css).expect("valid selector")[0]
    }

    #[test]
    fn test_button_announces_role_and_text() {
        let page = HtmlPage::parse(r#"<html><body><button>Click me</button></body></html>"#);
        assert_eq!(accessible_text(&first(&page, "button")), "button: Click me");
    }

    #[test]
    fn test_aria_label_beats_text_content() {
        let page = HtmlPage::parse(
            r#"<html><body><button aria-label="Submit form">Click me</button></body></html>"#,
        );
        assert_eq!(
            accessible_text(&first(&page, "button")),
            "button: Submit form"
        );
    }

    #[test]
    fn test_alt_names_an_image() {
        let page =
            HtmlPage::parse(r#"<html><body><img src="logo.png" alt="Company logo"></body></html>"#);
        assert_eq!(accessible_text(&first(&page, "img")), "img: Company logo");
    }

    #[test]
    fn test_anchor_role_requires_href() {
        let page = HtmlPage::parse(
            r#"<html><body><a href="/docs">Docs</a><a>Placeholder</a></body></html>"#,
        );
        let anchors = page.select("a").expect("valid selector");
        assert_eq!(accessible_text(&anchors[0]), "link: Docs");
        assert_eq!(accessible_text(&anchors[1]), "Placeholder");
    }

    #[test]
    fn test_explicit_role_wins() {
        let page = HtmlPage::parse(r#"<html><body><div role="tab">Settings</div></body></html>"#);
        assert_eq!(accessible_text(&first(&page, "div")), "tab: Settings");
    }

    #[test]
    fn test_input_subtype_roles() {
        let cases = [
            (r#"<input type="checkbox">"#, "checkbox"),
            (r#"<input type="radio">"#, "radio"),
            (r#"<input type="range">"#, "slider"),
            (r#"<input type="button" value="Go">"#, "button"),
            (r#"<input type="search">"#, "searchbox"),
            (r#"<input type="email">"#, "textbox"),
            (r#"<input type="password">"#, "textbox"),
            (r#"<input type="zzz-unknown">"#, "textbox"),
            (r#"<input>"#, "textbox"),
        ];
        for (markup, expected) in cases {
            let page = HtmlPage::parse(&format!("<html><body>{}</body></html>", markup));
            assert_eq!(
                resolve_role(&first(&page, "input")).as_deref(),
                Some(expected),
                "for {}",
                markup
            );
        }
    }

    #[test]
    fn test_unmapped_tag_has_no_role_prefix() {
        let page = HtmlPage::parse(r#"<html><body><span>Just text</span></body></html>"#);
        assert_eq!(accessible_text(&first(&page, "span")), "Just text");
    }

    #[test]
    fn test_expanded_states() {
        let page = HtmlPage::parse(
            r#"<html><body>
                <button aria-expanded="true">Menu</button>
                <button aria-expanded="false">Menu</button>
            </body></html>"#,
        );
        let buttons = page.select("button").expect("valid selector");
        assert_eq!(accessible_text(&buttons[0]), "button: Menu (expanded)");
        assert_eq!(accessible_text(&buttons[1]), "button: Menu (collapsed)");
    }

    #[test]
    fn test_disabled_from_attribute_or_aria() {
        let page = HtmlPage::parse(
            r#"<html><body>
                <button disabled>Save</button>
                <button aria-disabled="true">Save</button>
            </body></html>"#,
        );
        for button in page.select("button").expect("valid selector") {
            assert_eq!(accessible_text(&button), "button: Save (disabled)");
        }
    }

    #[test]
    fn test_state_ordering_is_fixed() {
        let page = HtmlPage::parse(
            r#"<html><body>
                <div role="combobox" aria-expanded="true" aria-required="true" aria-disabled="true">Country</div>
            </body></html>"#,
        );
        assert_eq!(
            accessible_text(&first(&page, "div")),
            "combobox: Country (expanded) (required) (disabled)"
        );
    }

    #[test]
    fn test_checked_states() {
        let page = HtmlPage::parse(
            r#"<html><body>
                <div role="checkbox" aria-checked="true">Subscribe</div>
                <div role="checkbox" aria-checked="false">Subscribe</div>
            </body></html>"#,
        );
        let boxes = page.select("div").expect("valid selector");
        assert_eq!(accessible_text(&boxes[0]), "checkbox: Subscribe (checked)");
        assert_eq!(
            accessible_text(&boxes[1]),
            "checkbox: Subscribe (not checked)"
        );
    }

    #[test]
    fn test_nameless_element_announces_empty() {
        let page = HtmlPage::parse(r#"<html><body><span></span></body></html>"#);
        assert_eq!(accessible_text(&first(&page, "span")), "");
    }

    #[test]
    fn test_page_announcements_skip_empty_lines() {
        let page = HtmlPage::parse(
            r#"<html><body>
                <h1>Welcome</h1>
                <a href="/start">Get started</a>
                <a id="top"></a>
            </body></html>"#,
        );
        let lines = page_announcements(&page);
        assert_eq!(
            lines,
            vec!["heading: Welcome".to_string(), "link: Get started".to_string()]
        );
    }
}
