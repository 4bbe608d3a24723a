// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule-engine boundary.
//!
//! An audit delegates rule evaluation to a [`RuleEngine`]. The outcome
//! types mirror the result shape established by browser audit engines
//! (axe and friends), camelCase on the wire, so externally produced JSON
//! can be fed straight into the aggregator.

use crate::dom::HtmlPage;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A rule that passed or could not be determined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSummary {
    pub id: String,
    pub description: String,
}

/// One affected node within a violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationNode {
    /// Selector locating the node in the audited document
    pub target: String,
    /// Engine-provided explanation of what failed on this node
    pub failure_summary: Option<String>,
}

/// One failed rule, with every node it failed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub id: String,
    /// Engine impact label ("critical", "serious", ...); free-form
    pub impact: Option<String>,
    /// Long-form explanation of the requirement
    pub description: String,
    /// Short, actionable summary
    pub help: String,
    pub help_url: Option<String>,
    /// Category tags ("wcag2a", "forms", ...)
    pub tags: Vec<String>,
    pub nodes: Vec<ViolationNode>,
}

/// Everything a single engine run produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineOutcome {
    pub passes: Vec<RuleSummary>,
    pub violations: Vec<Violation>,
    pub incomplete: Vec<RuleSummary>,
}

impl EngineOutcome {
    /// Rules evaluated in total, whatever their result
    pub fn total_rules(&self) -> usize {
        self.passes.len() + self.violations.len() + self.incomplete.len()
    }
}

/// A source of audit results.
///
/// Marked `?Send` because [`HtmlPage`] wraps a scraper document, which is
/// not thread-sendable; audits run to completion on the caller's task.
#[async_trait(?Send)]
pub trait RuleEngine: Send + Sync {
    /// Engine name, used in logs and report output
    fn name(&self) -> &str;

    /// Evaluate every applicable rule against the page
    async fn run(&self, page: &HtmlPage) -> Result<EngineOutcome>;
}
