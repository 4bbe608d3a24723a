// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report rendering for audit results.
//!
//! Supports multiple output formats:
//! - Text: human-readable summary grouped by severity
//! - JSON: the full report structure for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::audit::{AccessibilityReport, IssueSeverity};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render a report in the requested format
pub fn generate_report(report: &AccessibilityReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(report),
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Sarif => generate_sarif_report(report),
    }
}

/// All severities, most severe first, for grouped output
const SEVERITY_ORDER: &[IssueSeverity] = &[
    IssueSeverity::Critical,
    IssueSeverity::Serious,
    IssueSeverity::Moderate,
    IssueSeverity::Minor,
];

/// Generate human-readable text report
fn generate_text_report(report: &AccessibilityReport) -> String {
    let mut output = String::new();

    output.push_str("=== Empathybot Accessibility Audit ===\n\n");
    output.push_str(&format!(
        "Score: {}/100 ({} of {} rules passed)\n\n",
        report.score, report.passed_rules, report.total_rules
    ));

    if report.issues.is_empty() {
        output.push_str("No accessibility issues found. All checks passed.\n");
        return output;
    }

    output.push_str(&format!(
        "Found {} issue(s): {} critical, {} serious, {} moderate, {} minor\n\n",
        report.issues.len(),
        report.by_severity(IssueSeverity::Critical).len(),
        report.by_severity(IssueSeverity::Serious).len(),
        report.by_severity(IssueSeverity::Moderate).len(),
        report.by_severity(IssueSeverity::Minor).len(),
    ));

    for severity in SEVERITY_ORDER {
        let issues = report.by_severity(*severity);
        if issues.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, issues.len()));

        for issue in issues {
            output.push_str(&format!("[{}] {}\n", issue.id, issue.message));
            output.push_str(&format!("  Node: {}\n", issue.selector));

            for fix in &issue.fixes {
                output.push_str(&format!("  Fix: {}\n", fix));
            }

            if let Some(ref url) = issue.help_url {
                output.push_str(&format!("  Help: {}\n", url));
            }

            output.push('\n');
        }
    }

    if report.has_blockers() {
        output.push_str("RESULT: FAIL (critical or serious issues found)\n");
    } else {
        output.push_str("RESULT: PASS WITH ISSUES\n");
    }

    output
}

/// Generate JSON report
fn generate_json_report(report: &AccessibilityReport) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize report: {}\"}}", e))
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "logicalLocations")]
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
struct SarifLogicalLocation {
    #[serde(rename = "fullyQualifiedName")]
    fully_qualified_name: String,
}

/// Generate SARIF report.
///
/// Audited nodes live in a document, not a file, so results carry logical
/// locations (the node's selector) instead of physical ones.
fn generate_sarif_report(report: &AccessibilityReport) -> String {
    let results: Vec<SarifResult> = report
        .issues
        .iter()
        .map(|issue| {
            let level = match issue.severity {
                IssueSeverity::Critical | IssueSeverity::Serious => "error",
                IssueSeverity::Moderate => "warning",
                IssueSeverity::Minor => "note",
            };

            // Issue ids end in a uuid fragment; SARIF wants the stable rule id
            let rule_id = issue
                .id
                .rsplit_once('-')
                .map(|(head, _)| head)
                .unwrap_or(&issue.id);

            SarifResult {
                rule_id: rule_id.to_string(),
                level: level.to_string(),
                message: SarifMessage {
                    text: issue.message.clone(),
                },
                locations: vec![SarifLocation {
                    logical_locations: vec![SarifLogicalLocation {
                        fully_qualified_name: issue.selector.clone(),
                    }],
                }],
            }
        })
        .collect();

    let sarif = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "empathybot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/hyperpolymath/empathybot".to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&sarif)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e))
}
