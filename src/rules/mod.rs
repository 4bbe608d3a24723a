// SPDX-License-Identifier: PMPL-1.0-or-later
//! Built-in rule engine.
//!
//! A self-contained [`RuleEngine`] covering the checks this crate can
//! evaluate from static markup. Rule ids, impact labels, and result shapes
//! follow the conventions of browser audit engines so a report reads the
//! same whichever engine produced it. Checks that need information static
//! markup cannot provide (computed styles behind custom properties, for
//! example) report themselves incomplete rather than guessing.

use crate::announce::accessible_name;
use crate::audit::engine::{EngineOutcome, RuleEngine, RuleSummary, Violation, ViolationNode};
use crate::color::contrast::{contrast_ratio_rgb, minimum_ratio, TextSize, WcagLevel};
use crate::color::Rgb;
use crate::dom::{ElementDescriptor, HtmlElement, HtmlPage};
use crate::error::Result;
use crate::keyboard::is_focus_candidate;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Static identity of a built-in rule
#[derive(Debug, Clone, Copy)]
pub struct RuleMeta {
    pub id: &'static str,
    pub impact: &'static str,
    pub description: &'static str,
    pub help: &'static str,
    pub help_url: &'static str,
    pub tags: &'static [&'static str],
}

pub const IMAGE_ALT: RuleMeta = RuleMeta {
    id: "image-alt",
    impact: "critical",
    description: "Images must have alternate text so screen readers can describe them",
    help: "Images must have an alt attribute",
    help_url: "https://www.w3.org/WAI/WCAG21/Understanding/non-text-content",
    tags: &["wcag2a", "wcag111"],
};

pub const BUTTON_NAME: RuleMeta = RuleMeta {
    id: "button-name",
    impact: "critical",
    description: "Buttons must have discernible text so assistive technology can announce their purpose",
    help: "Buttons must have discernible text",
    help_url: "https://www.w3.org/WAI/WCAG21/Understanding/name-role-value",
    tags: &["wcag2a", "wcag412"],
};

pub const LINK_NAME: RuleMeta = RuleMeta {
    id: "link-name",
    impact: "serious",
    description: "Links must have discernible text so users know where they lead",
    help: "Links must have discernible text",
    help_url: "https://www.w3.org/WAI/WCAG21/Understanding/link-purpose-in-context",
    tags: &["wcag2a", "wcag244"],
};

pub const FORM_LABEL: RuleMeta = RuleMeta {
    id: "label",
    impact: "critical",
    description: "Form elements must have labels so users know what input is expected",
    help: "Form elements must have labels",
    help_url: "https://www.w3.org/WAI/WCAG21/Understanding/labels-or-instructions",
    tags: &["wcag2a", "wcag332"],
};

pub const DOCUMENT_TITLE: RuleMeta = RuleMeta {
    id: "document-title",
    impact: "serious",
    description: "Documents must have a title element so users can orient themselves",
    help: "Document must have a non-empty <title>",
    help_url: "https://www.w3.org/WAI/WCAG21/Understanding/page-titled",
    tags: &["wcag2a", "wcag242"],
};

pub const HTML_LANG: RuleMeta = RuleMeta {
    id: "html-has-lang",
    impact: "serious",
    description: "The html element must have a lang attribute so screen readers pick the right voice",
    help: "<html> element must have a lang attribute",
    help_url: "https://www.w3.org/WAI/WCAG21/Understanding/language-of-page",
    tags: &["wcag2a", "wcag311"],
};

pub const COLOR_CONTRAST: RuleMeta = RuleMeta {
    id: "color-contrast",
    impact: "serious",
    description: "Text must have sufficient contrast against its background",
    help: "Elements must have sufficient color contrast",
    help_url: "https://www.w3.org/WAI/WCAG21/Understanding/contrast-minimum",
    tags: &["wcag2aa", "wcag143"],
};

pub const TABINDEX: RuleMeta = RuleMeta {
    id: "tabindex",
    impact: "serious",
    description: "Positive tabindex values disrupt the natural tab order",
    help: "Elements should not have tabindex greater than zero",
    help_url: "https://www.w3.org/WAI/WCAG21/Understanding/focus-order",
    tags: &["best-practice"],
};

pub const ARIA_HIDDEN_FOCUS: RuleMeta = RuleMeta {
    id: "aria-hidden-focus",
    impact: "serious",
    description: "Elements hidden from assistive technology must not remain keyboard-focusable",
    help: "aria-hidden elements must not be focusable",
    help_url: "https://www.w3.org/WAI/WCAG21/Understanding/name-role-value",
    tags: &["wcag2a", "wcag412"],
};

/// Input types that do not need a visible label
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden", "submit", "reset", "button", "image"];

/// Result of evaluating one rule against one page
enum RuleStatus {
    Passed,
    Violated(Vec<ViolationNode>),
    /// Present on the page but not statically decidable
    Incomplete,
    /// Nothing on the page for this rule to examine
    NotApplicable,
}

/// Audit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Conformance level contrast is judged against
    pub level: WcagLevel,
    /// Rule ids to skip entirely
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            level: WcagLevel::AA,
            disabled_rules: Vec::new(),
        }
    }
}

/// Rule engine backed by this crate's own static checks
#[derive(Debug, Default)]
pub struct BuiltinEngine {
    config: RuleConfig,
}

impl BuiltinEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RuleConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl RuleEngine for BuiltinEngine {
    fn name(&self) -> &str {
        "builtin"
    }

    async fn run(&self, page: &HtmlPage) -> Result<EngineOutcome> {
        Ok(run_checks(page, &self.config))
    }
}

type CheckFn = fn(&HtmlPage, &RuleConfig) -> RuleStatus;

const CHECKS: &[(&RuleMeta, CheckFn)] = &[
    (&IMAGE_ALT, check_image_alt),
    (&BUTTON_NAME, check_button_name),
    (&LINK_NAME, check_link_name),
    (&FORM_LABEL, check_form_label),
    (&DOCUMENT_TITLE, check_document_title),
    (&HTML_LANG, check_html_lang),
    (&COLOR_CONTRAST, check_color_contrast),
    (&TABINDEX, check_tabindex),
    (&ARIA_HIDDEN_FOCUS, check_aria_hidden_focus),
];

/// Evaluate every enabled rule against a page and bucket the results.
/// Not-applicable rules contribute nothing, matching how browser engines
/// omit rules with no matching nodes.
pub fn run_checks(page: &HtmlPage, config: &RuleConfig) -> EngineOutcome {
    let mut outcome = EngineOutcome::default();

    for &(meta, check) in CHECKS {
        if config.disabled_rules.iter().any(|d| d == meta.id) {
            tracing::debug!("Rule {} disabled, skipping", meta.id);
            continue;
        }
        match check(page, config) {
            RuleStatus::Passed => outcome.passes.push(rule_summary(meta)),
            RuleStatus::Violated(nodes) => outcome.violations.push(violation_from(meta, nodes)),
            RuleStatus::Incomplete => outcome.incomplete.push(rule_summary(meta)),
            RuleStatus::NotApplicable => {}
        }
    }

    outcome
}

fn rule_summary(meta: &RuleMeta) -> RuleSummary {
    RuleSummary {
        id: meta.id.to_string(),
        description: meta.description.to_string(),
    }
}

fn violation_from(meta: &RuleMeta, nodes: Vec<ViolationNode>) -> Violation {
    Violation {
        id: meta.id.to_string(),
        impact: Some(meta.impact.to_string()),
        description: meta.description.to_string(),
        help: meta.help.to_string(),
        help_url: Some(meta.help_url.to_string()),
        tags: meta.tags.iter().map(|t| t.to_string()).collect(),
        nodes,
    }
}

fn node_for(element: &HtmlElement<'_>, failure: String) -> ViolationNode {
    ViolationNode {
        target: element.selector(),
        failure_summary: Some(failure),
    }
}

fn status_from_nodes(nodes: Vec<ViolationNode>) -> RuleStatus {
    if nodes.is_empty() {
        RuleStatus::Passed
    } else {
        RuleStatus::Violated(nodes)
    }
}

fn check_image_alt(page: &HtmlPage, _config: &RuleConfig) -> RuleStatus {
    let images = page.select("img").expect("valid selector");
    if images.is_empty() {
        return RuleStatus::NotApplicable;
    }
    let nodes: Vec<ViolationNode> = images
        .iter()
        .filter(|img| !img.has_attr("alt"))
        .map(|img| node_for(img, "Element does not have an alt attribute".to_string()))
        .collect();
    status_from_nodes(nodes)
}

fn check_button_name(page: &HtmlPage, _config: &RuleConfig) -> RuleStatus {
    let buttons = page.select("button").expect("valid selector");
    if buttons.is_empty() {
        return RuleStatus::NotApplicable;
    }
    let nodes: Vec<ViolationNode> = buttons
        .iter()
        .filter(|button| {
            accessible_name(*button).is_empty()
                && !button.has_attr("aria-labelledby")
                && !button.has_attr("title")
        })
        .map(|button| node_for(button, "Element has no discernible text".to_string()))
        .collect();
    status_from_nodes(nodes)
}

fn check_link_name(page: &HtmlPage, _config: &RuleConfig) -> RuleStatus {
    let links = page.select("a[href]").expect("valid selector");
    if links.is_empty() {
        return RuleStatus::NotApplicable;
    }
    let nodes: Vec<ViolationNode> = links
        .iter()
        .filter(|link| {
            accessible_name(*link).is_empty()
                && !link.has_attr("aria-labelledby")
                && !link.has_attr("title")
        })
        .map(|link| node_for(link, "Element has no discernible link text".to_string()))
        .collect();
    status_from_nodes(nodes)
}

fn check_form_label(page: &HtmlPage, _config: &RuleConfig) -> RuleStatus {
    let label_fors: Vec<String> = page
        .select("label[for]")
        .expect("valid selector")
        .iter()
        .filter_map(|label| label.attr("for"))
        .collect();

    let controls = page
        .select("input, select, textarea")
        .expect("valid selector");

    let mut nodes = Vec::new();
    let mut applicable = false;
    for control in &controls {
        if control.tag_name() == "input" {
            let subtype = control.attr("type").unwrap_or_default().to_ascii_lowercase();
            if EXEMPT_INPUT_TYPES.contains(&subtype.as_str()) {
                continue;
            }
        }
        applicable = true;

        let labeled = control.has_attr("aria-label")
            || control.has_attr("aria-labelledby")
            || control.has_attr("title")
            || control
                .attr("id")
                .map(|id| label_fors.iter().any(|f| *f == id))
                .unwrap_or(false)
            || control.has_ancestor("label");

        if !labeled {
            nodes.push(node_for(
                control,
                "Form element does not have an associated label".to_string(),
            ));
        }
    }

    if !applicable {
        return RuleStatus::NotApplicable;
    }
    status_from_nodes(nodes)
}

fn check_document_title(page: &HtmlPage, _config: &RuleConfig) -> RuleStatus {
    if page.title().is_some() {
        RuleStatus::Passed
    } else {
        RuleStatus::Violated(vec![ViolationNode {
            target: "html".to_string(),
            failure_summary: Some("Document does not have a non-empty <title> element".to_string()),
        }])
    }
}

fn check_html_lang(page: &HtmlPage, _config: &RuleConfig) -> RuleStatus {
    let has_lang = page
        .select("html")
        .expect("valid selector")
        .first()
        .and_then(|el| el.attr("lang"))
        .map(|lang| !lang.trim().is_empty())
        .unwrap_or(false);

    if has_lang {
        RuleStatus::Passed
    } else {
        RuleStatus::Violated(vec![ViolationNode {
            target: "html".to_string(),
            failure_summary: Some("<html> element does not have a lang attribute".to_string()),
        }])
    }
}

fn check_color_contrast(page: &HtmlPage, config: &RuleConfig) -> RuleStatus {
    let required = minimum_ratio(config.level, TextSize::Normal);
    let styled = page.select("[style]").expect("valid selector");

    let mut nodes = Vec::new();
    let mut examined = false;
    let mut indeterminate = false;

    for element in &styled {
        let foreground = element.style_property("color");
        let background = element
            .style_property("background-color")
            .or_else(|| element.style_property("background"));
        let (fg_raw, bg_raw) = match (foreground, background) {
            (Some(f), Some(b)) => (f, b),
            _ => continue,
        };
        examined = true;

        match (parse_css_color(&fg_raw), parse_css_color(&bg_raw)) {
            (Some(fg), Some(bg)) => {
                let ratio = contrast_ratio_rgb(fg, bg);
                if ratio < required {
                    nodes.push(node_for(
                        element,
                        format!(
                            "Element has insufficient color contrast of {:.2} (foreground: {}, background: {}, required: {}:1)",
                            ratio, fg_raw, bg_raw, required
                        ),
                    ));
                }
            }
            // Custom properties, gradients and the like resolve at render
            // time, out of reach of static analysis
            _ => indeterminate = true,
        }
    }

    if !nodes.is_empty() {
        RuleStatus::Violated(nodes)
    } else if indeterminate {
        RuleStatus::Incomplete
    } else if examined {
        RuleStatus::Passed
    } else {
        RuleStatus::NotApplicable
    }
}

fn check_tabindex(page: &HtmlPage, _config: &RuleConfig) -> RuleStatus {
    let elements = page.select("[tabindex]").expect("valid selector");
    if elements.is_empty() {
        return RuleStatus::NotApplicable;
    }
    let nodes: Vec<ViolationNode> = elements
        .iter()
        .filter(|el| {
            el.attr("tabindex")
                .and_then(|t| t.trim().parse::<i32>().ok())
                .map(|t| t > 0)
                .unwrap_or(false)
        })
        .map(|el| node_for(el, "Element has a tabindex greater than 0".to_string()))
        .collect();
    status_from_nodes(nodes)
}

fn check_aria_hidden_focus(page: &HtmlPage, _config: &RuleConfig) -> RuleStatus {
    let hidden = page
        .select("[aria-hidden=\"true\"]")
        .expect("valid selector");
    if hidden.is_empty() {
        return RuleStatus::NotApplicable;
    }

    // Same focusability predicate as the keyboard scan; tabindex="-1"
    // removes the element from the tab order, which is the fix
    let nodes: Vec<ViolationNode> = hidden
        .iter()
        .filter(|el| is_focus_candidate(*el) && el.attr("tabindex").as_deref() != Some("-1"))
        .map(|el| {
            node_for(
                el,
                "Focusable element is hidden from assistive technology".to_string(),
            )
        })
        .collect();
    status_from_nodes(nodes)
}

/// Parse any CSS color value this crate understands
fn parse_css_color(value: &str) -> Option<Rgb> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.starts_with('#') {
        parse_css_hex(&trimmed)
    } else if trimmed.starts_with("rgb") {
        parse_css_rgb(&trimmed)
    } else {
        parse_named_color(&trimmed)
    }
}

/// Parse a CSS hex color, 3- or 6-digit form
fn parse_css_hex(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    match hex.len() {
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            Rgb::from_hex(&expanded).ok()
        }
        6 => Rgb::from_hex(hex).ok(),
        _ => None,
    }
}

/// Parse an rgb() or rgba() color
fn parse_css_rgb(value: &str) -> Option<Rgb> {
    let re = Regex::new(r"rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").ok()?;
    let caps = re.captures(value)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    Some(Rgb::new(r, g, b))
}

/// Parse a named CSS color (the common subset)
fn parse_named_color(name: &str) -> Option<Rgb> {
    match name {
        "white" => Some(Rgb::new(255, 255, 255)),
        "black" => Some(Rgb::new(0, 0, 0)),
        "red" => Some(Rgb::new(255, 0, 0)),
        "green" => Some(Rgb::new(0, 128, 0)),
        "blue" => Some(Rgb::new(0, 0, 255)),
        "yellow" => Some(Rgb::new(255, 255, 0)),
        "gray" | "grey" => Some(Rgb::new(128, 128, 128)),
        "silver" => Some(Rgb::new(192, 192, 192)),
        "maroon" => Some(Rgb::new(128, 0, 0)),
        "olive" => Some(Rgb::new(128, 128, 0)),
        "lime" => Some(Rgb::new(0, 255, 0)),
        "aqua" | "cyan" => Some(Rgb::new(0, 255, 255)),
        "teal" => Some(Rgb::new(0, 128, 128)),
        "navy" => Some(Rgb::new(0, 0, 128)),
        "fuchsia" | "magenta" => Some(Rgb::new(255, 0, 255)),
        "purple" => Some(Rgb::new(128, 0, 128)),
        "orange" => Some(Rgb::new(255, 165, 0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(summaries: &[RuleSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.id.as_str()).collect()
    }

    fn violation_ids(outcome: &EngineOutcome) -> Vec<&str> {
        outcome.violations.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn test_parse_css_color_forms() {
        assert_eq!(parse_css_color("#fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(parse_css_color("#ff0000"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(parse_css_color("rgb(255, 0, 0)"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(
            parse_css_color("rgba(0, 128, 0, 0.5)"),
            Some(Rgb::new(0, 128, 0))
        );
        assert_eq!(parse_css_color("  White "), Some(Rgb::new(255, 255, 255)));
        assert_eq!(parse_css_color("orange"), Some(Rgb::new(255, 165, 0)));
        assert_eq!(parse_css_color("var(--ink)"), None);
        assert_eq!(parse_css_color("#12"), None);
    }

    #[test]
    fn test_missing_alt_is_violated() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>t</title></head><body>
                <img src="a.png" alt="Chart">
                <img src="b.png">
            </body></html>"#,
        );
        let outcome = run_checks(&page, &RuleConfig::default());
        assert!(violation_ids(&outcome).contains(&"image-alt"));
        let violation = &outcome.violations[0];
        assert_eq!(violation.nodes.len(), 1);
        assert!(violation.nodes[0].target.contains("img"));
    }

    #[test]
    fn test_empty_alt_passes() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>t</title></head><body>
                <img src="divider.png" alt="">
            </body></html>"#,
        );
        let outcome = run_checks(&page, &RuleConfig::default());
        assert!(ids(&outcome.passes).contains(&"image-alt"));
    }

    #[test]
    fn test_icon_button_without_name_is_violated() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>t</title></head><body>
                <button><svg viewBox="0 0 16 16"></svg></button>
                <button aria-label="Close"><svg viewBox="0 0 16 16"></svg></button>
            </body></html>"#,
        );
        let outcome = run_checks(&page, &RuleConfig::default());
        assert!(violation_ids(&outcome).contains(&"button-name"));
        let violation = outcome
            .violations
            .iter()
            .find(|v| v.id == "button-name")
            .expect("button-name violation");
        assert_eq!(violation.nodes.len(), 1);
    }

    #[test]
    fn test_unlabeled_input_is_violated() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>t</title></head><body>
                <label for="email">Email</label>
                <input type="email" id="email">
                <input type="text" placeholder="Unlabeled">
                <label>Wrapped <input type="text"></label>
                <input type="hidden" name="csrf" value="x">
            </body></html>"#,
        );
        let outcome = run_checks(&page, &RuleConfig::default());
        let violation = outcome
            .violations
            .iter()
            .find(|v| v.id == "label")
            .expect("label violation");
        assert_eq!(violation.nodes.len(), 1, "only the placeholder-only input fails");
    }

    #[test]
    fn test_document_title_and_lang() {
        let page = HtmlPage::parse("<html><head></head><body><p>hi</p></body></html>");
        let outcome = run_checks(&page, &RuleConfig::default());
        let violated = violation_ids(&outcome);
        assert!(violated.contains(&"document-title"));
        assert!(violated.contains(&"html-has-lang"));
    }

    #[test]
    fn test_inline_contrast_violation_carries_ratio() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>t</title></head><body>
                <p style="color: #777777; background-color: #888888">mud</p>
            </body></html>"#,
        );
        let outcome = run_checks(&page, &RuleConfig::default());
        let violation = outcome
            .violations
            .iter()
            .find(|v| v.id == "color-contrast")
            .expect("contrast violation");
        let summary = violation.nodes[0]
            .failure_summary
            .as_deref()
            .expect("failure summary");
        assert!(summary.contains("insufficient color contrast"), "{}", summary);
        assert!(summary.contains("required: 4.5:1"), "{}", summary);
    }

    #[test]
    fn test_unresolvable_contrast_is_incomplete() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>t</title></head><body>
                <p style="color: var(--ink); background-color: #ffffff">themed</p>
            </body></html>"#,
        );
        let outcome = run_checks(&page, &RuleConfig::default());
        assert!(ids(&outcome.incomplete).contains(&"color-contrast"));
    }

    #[test]
    fn test_aaa_level_tightens_contrast() {
        // 4.54:1 passes AA but misses AAA's 7:1
        let html = r#"<html lang="en"><head><title>t</title></head><body>
            <p style="color: #767676; background-color: #ffffff">borderline</p>
        </body></html>"#;
        let page = HtmlPage::parse(html);

        let aa = run_checks(&page, &RuleConfig::default());
        assert!(ids(&aa.passes).contains(&"color-contrast"));

        let aaa_config = RuleConfig {
            level: WcagLevel::AAA,
            ..RuleConfig::default()
        };
        let aaa = run_checks(&page, &aaa_config);
        assert!(violation_ids(&aaa).contains(&"color-contrast"));
    }

    #[test]
    fn test_positive_tabindex_is_violated() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>t</title></head><body>
                <div tabindex="5">jumpy</div>
                <div tabindex="0">fine</div>
                <div tabindex="-1">skipped</div>
            </body></html>"#,
        );
        let outcome = run_checks(&page, &RuleConfig::default());
        let violation = outcome
            .violations
            .iter()
            .find(|v| v.id == "tabindex")
            .expect("tabindex violation");
        assert_eq!(violation.nodes.len(), 1);
    }

    #[test]
    fn test_aria_hidden_focusable_is_violated() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>t</title></head><body>
                <button aria-hidden="true">ghost</button>
                <button aria-hidden="true" tabindex="-1">properly removed</button>
                <div aria-hidden="true"><span>decoration</span></div>
            </body></html>"#,
        );
        let outcome = run_checks(&page, &RuleConfig::default());
        let violation = outcome
            .violations
            .iter()
            .find(|v| v.id == "aria-hidden-focus")
            .expect("aria-hidden-focus violation");
        assert_eq!(violation.nodes.len(), 1);
    }

    #[test]
    fn test_aria_hidden_on_tabindex_widget_is_violated() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>t</title></head><body>
                <div tabindex="0" aria-hidden="true">ghost widget</div>
                <button aria-hidden="true">ghost button</button>
            </body></html>"#,
        );
        let outcome = run_checks(&page, &RuleConfig::default());
        let violation = outcome
            .violations
            .iter()
            .find(|v| v.id == "aria-hidden-focus")
            .expect("aria-hidden-focus violation");
        assert_eq!(violation.nodes.len(), 2, "tabindex widget and button both flagged");
        // Nodes come back in document order, the div widget first
        assert!(violation.nodes[0].target.ends_with("div"));
        assert!(violation.nodes[1].target.ends_with("button"));
    }

    #[test]
    fn test_disabled_rules_are_skipped() {
        let page = HtmlPage::parse("<html><head></head><body><p>hi</p></body></html>");
        let config = RuleConfig {
            disabled_rules: vec!["document-title".to_string(), "html-has-lang".to_string()],
            ..RuleConfig::default()
        };
        let outcome = run_checks(&page, &config);
        assert!(outcome.violations.is_empty());
        assert_eq!(outcome.total_rules(), 0);
    }

    #[test]
    fn test_clean_page_passes_everything_applicable() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>Clean</title></head><body>
                <a href="/home">Home</a>
                <button>Save</button>
                <img src="x.png" alt="Diagram">
                <label for="q">Search</label>
                <input type="search" id="q">
                <p style="color: #111111; background-color: #ffffff">readable</p>
                <div tabindex="0" role="button">widget</div>
                <i aria-hidden="true">icon</i>
            </body></html>"#,
        );
        let outcome = run_checks(&page, &RuleConfig::default());
        assert!(
            outcome.violations.is_empty(),
            "unexpected violations: {:?}",
            violation_ids(&outcome)
        );
        assert_eq!(outcome.total_rules(), outcome.passes.len());
        assert_eq!(outcome.passes.len(), 9, "all nine rules applicable and passing");
    }

    #[tokio::test]
    async fn test_builtin_engine_runs() {
        let page = HtmlPage::parse(
            r#"<html lang="en"><head><title>t</title></head><body><button>Go</button></body></html>"#,
        );
        let outcome = BuiltinEngine::new()
            .run(&page)
            .await
            .expect("builtin engine never fails");
        assert!(outcome.violations.is_empty());
    }
}
