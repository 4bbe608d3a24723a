// SPDX-License-Identifier: PMPL-1.0-or-later
//! Audit aggregation: run a rule engine against a page, normalize its
//! violations into typed issues, and score the result 0-100.
//!
//! The aggregator never panics and never propagates engine failures; a
//! broken engine yields a degraded zero report so callers can always
//! render something.

pub mod engine;

use crate::dom::HtmlPage;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use engine::{EngineOutcome, RuleEngine, RuleSummary, Violation, ViolationNode};

/// Severity of one reported issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Blocks access entirely for affected users
    Critical,
    /// Major barrier, must be addressed
    Serious,
    /// Degrades the experience
    Moderate,
    /// Minor friction
    Minor,
}

impl IssueSeverity {
    /// Map an engine impact label; unrecognized or missing labels land on
    /// `Moderate`
    pub fn from_impact(impact: Option<&str>) -> Self {
        match impact {
            Some("critical") => IssueSeverity::Critical,
            Some("serious") => IssueSeverity::Serious,
            Some("moderate") => IssueSeverity::Moderate,
            Some("minor") => IssueSeverity::Minor,
            _ => IssueSeverity::Moderate,
        }
    }

    /// Whether issues of this severity should fail a gating check
    pub fn blocks_release(&self) -> bool {
        matches!(self, IssueSeverity::Critical | IssueSeverity::Serious)
    }
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueSeverity::Critical => write!(f, "CRITICAL"),
            IssueSeverity::Serious => write!(f, "SERIOUS"),
            IssueSeverity::Moderate => write!(f, "MODERATE"),
            IssueSeverity::Minor => write!(f, "MINOR"),
        }
    }
}

/// One normalized accessibility defect on one node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityIssue {
    /// Rule id plus a short unique suffix, e.g. `image-alt-3fa84c21`
    pub id: String,
    /// Severity mapped from the engine's impact label
    pub severity: IssueSeverity,
    /// Impact label exactly as the engine reported it, empty when the
    /// engine omitted one
    pub impact: String,
    /// Short, actionable summary of the failure
    pub message: String,
    /// Longer explanation of the requirement
    pub help: String,
    /// Documentation link, when the engine supplied one
    pub help_url: Option<String>,
    /// Selector locating the affected node
    pub selector: String,
    /// Category tags carried over from the rule
    pub tags: Vec<String>,
    /// Suggested remediations for this node
    pub fixes: Vec<String>,
}

/// Aggregated result of one audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityReport {
    /// 0-100, the share of evaluated rules that passed
    pub score: u8,
    /// One issue per (violation, node) pair
    pub issues: Vec<AccessibilityIssue>,
    /// Rules that passed
    pub passed_rules: usize,
    /// Rules evaluated in total (passed + violated + indeterminate)
    pub total_rules: usize,
    /// When the audit ran
    pub generated_at: DateTime<Utc>,
}

impl AccessibilityReport {
    /// Shape returned when the engine itself fails: zero score, no issues
    pub fn degraded() -> Self {
        Self {
            score: 0,
            issues: Vec::new(),
            passed_rules: 0,
            total_rules: 0,
            generated_at: Utc::now(),
        }
    }

    /// Issues at one severity
    pub fn by_severity(&self, severity: IssueSeverity) -> Vec<&AccessibilityIssue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }

    /// Whether any issue is severe enough to fail a gating check
    pub fn has_blockers(&self) -> bool {
        self.issues.iter().any(|i| i.severity.blocks_release())
    }
}

/// Fresh issue id: the rule id plus the first eight hex digits of a v4 uuid
fn issue_id(rule_id: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}-{}", rule_id, &uuid[..8])
}

/// Fan a violation out into one issue per affected node.
///
/// The engine's `help` is the short line and its `description` the long
/// one, so `message` stays terse and `help` carries the background. The
/// raw impact label rides along next to the severity it mapped to. A
/// node's failure summary becomes that issue's single fix suggestion.
pub fn issues_from_violation(violation: &Violation) -> Vec<AccessibilityIssue> {
    let severity = IssueSeverity::from_impact(violation.impact.as_deref());
    let impact = violation.impact.clone().unwrap_or_default();
    violation
        .nodes
        .iter()
        .map(|node| AccessibilityIssue {
            id: issue_id(&violation.id),
            severity,
            impact: impact.clone(),
            message: violation.help.clone(),
            help: violation.description.clone(),
            help_url: violation.help_url.clone(),
            selector: node.target.clone(),
            tags: violation.tags.clone(),
            fixes: node.failure_summary.clone().into_iter().collect(),
        })
        .collect()
}

/// Compliance score from raw rule counts. Zero rules evaluated is a
/// degenerate input the caller must decide about.
pub fn score_from_counts(passed: usize, violations: usize, incomplete: usize) -> Result<u8> {
    let total = passed + violations + incomplete;
    if total == 0 {
        return Err(Error::DegenerateRatioInput);
    }
    Ok((100.0 * passed as f64 / total as f64).round() as u8)
}

/// Build a report from a completed engine run.
///
/// A run that evaluated no rules at all scores 100: nothing was checked,
/// so nothing failed.
pub fn report_from_outcome(outcome: &EngineOutcome) -> AccessibilityReport {
    let issues: Vec<AccessibilityIssue> = outcome
        .violations
        .iter()
        .flat_map(issues_from_violation)
        .collect();
    let score = score_from_counts(
        outcome.passes.len(),
        outcome.violations.len(),
        outcome.incomplete.len(),
    )
    .unwrap_or(100);

    AccessibilityReport {
        score,
        issues,
        passed_rules: outcome.passes.len(),
        total_rules: outcome.total_rules(),
        generated_at: Utc::now(),
    }
}

/// Run one audit over a parsed page.
///
/// Engine failures are logged and degrade to [`AccessibilityReport::degraded`]
/// instead of propagating; an audit must never take the caller down.
pub async fn run_audit(engine: &dyn RuleEngine, page: &HtmlPage) -> AccessibilityReport {
    match engine.run(page).await {
        Ok(outcome) => {
            let report = report_from_outcome(&outcome);
            tracing::debug!(
                "Audit via {} complete: score {}, {} issue(s)",
                engine.name(),
                report.score,
                report.issues.len()
            );
            report
        }
        Err(e) => {
            tracing::error!(
                "Rule engine {} failed, returning degraded report: {}",
                engine.name(),
                e
            );
            AccessibilityReport::degraded()
        }
    }
}
