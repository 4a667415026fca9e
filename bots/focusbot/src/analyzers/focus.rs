// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard focus analyzer - WCAG 2.1.1 Keyboard (Level A)
//!
//! Flags markup elements that carry an `onClick` handler but can never
//! receive keyboard focus.

use crate::analyzers::{has_suffix, Analyzer};
use crate::config::Config;
use crate::engine::{CollectingSink, Engine, Report};
use crate::error::{MarkupError, Result};
use crate::fleet::{Finding, Severity, WcagLevel};
use crate::markup::estree::{is_tree_root, TREE_ROOTS};
use crate::rule::FocusabilityChecker;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Rule identifier used in findings
pub const RULE_ID: &str = "WCAG-2.1.1-onclick-has-focus";

/// Runs the onclick-has-focus rule over JSON syntax trees
pub struct FocusAnalyzer {
    engine: Engine,
    suffixes: Vec<String>,
}

impl FocusAnalyzer {
    pub fn new(config: &Config) -> Self {
        let checker = FocusabilityChecker::from_settings(&config.settings);
        Self {
            engine: Engine::new(vec![Box::new(checker)]),
            suffixes: config.scan.extensions.clone(),
        }
    }

    /// Parse and check one tree, returning the raw reports.
    pub fn check_tree(&self, content: &str) -> Result<Vec<Report>> {
        let tree: Value = serde_json::from_str(content)?;
        if !is_tree_root(&tree) {
            return Err(MarkupError::NotATree(format!(
                "root is not one of {}",
                TREE_ROOTS.join(", ")
            ))
            .into());
        }

        let mut sink = CollectingSink::default();
        let stats = self.engine.run(&tree, &mut sink);
        debug!(
            rules = self.engine.rules().len(),
            visited = stats.elements_visited,
            rejected = stats.elements_rejected,
            reports = sink.reports.len(),
            "tree checked"
        );
        Ok(sink.reports)
    }
}

impl Default for FocusAnalyzer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Analyzer for FocusAnalyzer {
    fn name(&self) -> &str {
        "Keyboard Focus Analyzer"
    }

    fn description(&self) -> &str {
        "Checks that click handlers sit on keyboard-focusable elements (WCAG 2.1.1)"
    }

    fn analyze_file(&self, path: &Path, content: &str) -> Result<Vec<Finding>> {
        let findings = self
            .check_tree(content)?
            .into_iter()
            .map(|report| to_finding(path, report))
            .collect();
        Ok(findings)
    }

    fn applies_to(&self, path: &Path) -> bool {
        has_suffix(path, &self.suffixes)
    }
}

fn to_finding(path: &Path, report: Report) -> Finding {
    let mut finding = Finding::new(RULE_ID, Severity::Error, &report.message)
        .with_wcag("2.1.1", WcagLevel::A)
        .with_rule_name("Keyboard: Click Handler Not Focusable")
        .with_file(path.to_path_buf())
        .with_element(&report.element)
        .with_suggestion(&format!(
            "Use a <button> instead of <{}>, or add tabIndex={{0}} together with a keyboard handler",
            report.element
        ));
    if let Some(span) = report.span {
        finding = finding.with_position(span.line, span.column);
    }
    finding
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ONCLICK_HAS_FOCUS_MESSAGE;

    const TREE: &str = r#"{
        "type": "Program",
        "body": [{
            "type": "ExpressionStatement",
            "expression": {
                "type": "JSXElement",
                "openingElement": {
                    "type": "JSXOpeningElement",
                    "loc": { "start": { "line": 2, "column": 2 } },
                    "name": { "type": "JSXIdentifier", "name": "div" },
                    "attributes": [{
                        "type": "JSXAttribute",
                        "name": { "type": "JSXIdentifier", "name": "onClick" },
                        "value": {
                            "type": "JSXExpressionContainer",
                            "expression": { "type": "Identifier", "name": "open" }
                        }
                    }]
                },
                "children": []
            }
        }]
    }"#;

    #[test]
    fn test_violation_becomes_finding() {
        let findings = FocusAnalyzer::default()
            .analyze_file(Path::new("App.ast.json"), TREE)
            .unwrap();
        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert_eq!(finding.rule_id, RULE_ID);
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.message, ONCLICK_HAS_FOCUS_MESSAGE);
        assert_eq!(finding.line, Some(2));
        assert_eq!(finding.column, Some(3));
        assert_eq!(finding.element.as_deref(), Some("div"));
        assert_eq!(finding.wcag_level, Some(WcagLevel::A));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(FocusAnalyzer::default()
            .analyze_file(Path::new("App.ast.json"), "{ not json")
            .is_err());
    }

    #[test]
    fn test_root_must_be_a_node() {
        assert!(FocusAnalyzer::default()
            .analyze_file(Path::new("App.ast.json"), r#"{"name": "pkg"}"#)
            .is_err());
        assert!(FocusAnalyzer::default()
            .analyze_file(Path::new("App.ast.json"), "[1, 2]")
            .is_err());
    }

    #[test]
    fn test_root_must_be_file_or_program() {
        let analyzer = FocusAnalyzer::default();
        let err = analyzer
            .check_tree(r#"{"name": "pkg", "type": "module"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("File, Program"));
        assert!(analyzer
            .check_tree(r#"{"type": "JSXElement", "children": []}"#)
            .is_err());

        let babel = format!(r#"{{"type": "File", "program": {}}}"#, TREE);
        assert_eq!(analyzer.check_tree(&babel).unwrap().len(), 1);
    }

    #[test]
    fn test_applies_to_configured_suffixes() {
        let analyzer = FocusAnalyzer::default();
        assert!(analyzer.applies_to(Path::new("src/App.ast.json")));
        assert!(!analyzer.applies_to(Path::new("src/App.jsx")));
    }
}
