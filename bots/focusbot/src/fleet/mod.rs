// SPDX-License-Identifier: PMPL-1.0-or-later
//! Fleet integration types for gitbot-fleet shared-context compatibility.
//!
//! Findings produced here use the same shape as the other fleet bots so the
//! coordinator can merge them without translation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Severity levels for findings (mirrors gitbot-shared-context::Severity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical issue - blocks release
    Error,
    /// Should be addressed
    Warning,
    /// Informational
    Info,
}

impl Severity {
    /// Whether this severity blocks releases
    pub fn blocks_release(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    A,
    AA,
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// A finding raised on one markup element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unique identifier
    pub id: Uuid,
    /// Source bot identifier
    pub source: String,
    /// Rule/check identifier (e.g., "WCAG-2.1.1-onclick-has-focus")
    pub rule_id: String,
    /// Human-readable rule name
    pub rule_name: String,
    pub severity: Severity,
    pub message: String,
    /// Category (e.g., "accessibility/wcag-a")
    pub category: String,
    /// Syntax-tree file the element came from
    pub file: Option<PathBuf>,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Tag of the offending element
    pub element: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
    pub created_at: DateTime<Utc>,
    /// WCAG criterion reference
    pub wcag_criterion: Option<String>,
    pub wcag_level: Option<WcagLevel>,
}

impl Finding {
    /// Create a new finding
    pub fn new(rule_id: &str, severity: Severity, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: "focusbot".to_string(),
            rule_id: rule_id.to_string(),
            rule_name: rule_id.to_string(),
            severity,
            message: message.to_string(),
            category: String::new(),
            file: None,
            line: None,
            column: None,
            element: None,
            suggestion: None,
            created_at: Utc::now(),
            wcag_criterion: None,
            wcag_level: None,
        }
    }

    /// Set the WCAG criterion and level
    pub fn with_wcag(mut self, criterion: &str, level: WcagLevel) -> Self {
        self.wcag_criterion = Some(criterion.to_string());
        self.wcag_level = Some(level);
        self.category = match level {
            WcagLevel::A => "accessibility/wcag-a".to_string(),
            WcagLevel::AA => "accessibility/wcag-aa".to_string(),
            WcagLevel::AAA => "accessibility/wcag-aaa".to_string(),
        };
        self
    }

    pub fn with_rule_name(mut self, name: &str) -> Self {
        self.rule_name = name.to_string();
        self
    }

    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }

    /// Set line and column
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    /// Get location string for display
    pub fn location_string(&self) -> String {
        match (&self.file, self.line, self.column) {
            (Some(f), Some(l), Some(c)) => format!("{}:{}:{}", f.display(), l, c),
            (Some(f), Some(l), None) => format!("{}:{}", f.display(), l),
            (Some(f), None, _) => f.display().to_string(),
            _ => "<unknown>".to_string(),
        }
    }
}

/// A collection of findings with aggregation methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingSet {
    pub findings: Vec<Finding>,
}

impl FindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    pub fn errors(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Check if release should be blocked
    pub fn blocks_release(&self) -> bool {
        self.findings.iter().any(|f| f.severity.blocks_release())
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_string() {
        let finding = Finding::new("R", Severity::Error, "m")
            .with_file(PathBuf::from("app.ast.json"))
            .with_position(3, 9);
        assert_eq!(finding.location_string(), "app.ast.json:3:9");
        assert_eq!(Finding::new("R", Severity::Info, "m").location_string(), "<unknown>");
    }

    #[test]
    fn test_wcag_category() {
        let finding = Finding::new("R", Severity::Error, "m").with_wcag("2.1.1", WcagLevel::A);
        assert_eq!(finding.category, "accessibility/wcag-a");
        assert_eq!(finding.wcag_criterion.as_deref(), Some("2.1.1"));
    }

    #[test]
    fn test_finding_set_aggregates() {
        let mut set = FindingSet::new();
        assert!(set.is_empty());
        set.add(Finding::new("A", Severity::Warning, "w"));
        assert!(!set.blocks_release());
        set.extend(vec![Finding::new("B", Severity::Error, "e")]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.errors().len(), 1);
        assert_eq!(set.warnings().len(), 1);
        assert!(set.has_errors());
        assert!(set.blocks_release());
    }
}
