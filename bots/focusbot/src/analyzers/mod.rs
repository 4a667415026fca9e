// SPDX-License-Identifier: PMPL-1.0-or-later
//! Analyzers that turn syntax-tree files into fleet findings.

pub mod focus;

use crate::config::Config;
use crate::error::Result;
use crate::fleet::{Finding, FindingSet};
use crate::markup::estree::is_tree_root;
use serde_json::Value;
use std::path::Path;

/// Trait implemented by all analyzers
pub trait Analyzer: Send + Sync {
    /// Human-readable name of this analyzer
    fn name(&self) -> &str;

    /// Short description of what this analyzer checks
    fn description(&self) -> &str;

    /// Analyze a single file and return findings
    fn analyze_file(&self, path: &Path, content: &str) -> Result<Vec<Finding>>;

    /// Whether this analyzer reads the given file
    fn applies_to(&self, path: &Path) -> bool;
}

fn analyzers(config: &Config) -> Vec<Box<dyn Analyzer>> {
    vec![Box::new(focus::FocusAnalyzer::new(config))]
}

/// Run all applicable analyzers on a file
pub fn analyze_file(path: &Path, content: &str, config: &Config) -> Result<FindingSet> {
    let mut findings = FindingSet::new();

    for analyzer in &analyzers(config) {
        if analyzer.applies_to(path) {
            findings.extend(analyzer.analyze_file(path, content)?);
        }
    }

    Ok(findings)
}

/// Run every analyzer on a file the caller named explicitly, whatever its name
pub fn analyze_tree(path: &Path, content: &str, config: &Config) -> Result<FindingSet> {
    let mut findings = FindingSet::new();

    for analyzer in &analyzers(config) {
        findings.extend(analyzer.analyze_file(path, content)?);
    }

    Ok(findings)
}

/// Whether `content` parses as JSON with a `File` or `Program` root.
pub fn is_tree_document(content: &str) -> bool {
    serde_json::from_str::<Value>(content)
        .map(|value| is_tree_root(&value))
        .unwrap_or(false)
}

/// Whether the file name ends with one of `suffixes` (`ast.json` matches
/// `App.ast.json` but not `ast.json.bak`).
pub fn has_suffix(path: &Path, suffixes: &[String]) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    suffixes.iter().any(|suffix| {
        let suffix = suffix.trim_start_matches('.');
        name.len() > suffix.len()
            && name.ends_with(suffix)
            && name[..name.len() - suffix.len()].ends_with('.')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_suffix() {
        let suffixes = vec!["ast.json".to_string()];
        assert!(has_suffix(Path::new("src/App.ast.json"), &suffixes));
        assert!(!has_suffix(Path::new("src/App.json"), &suffixes));
        assert!(!has_suffix(Path::new("ast.json"), &suffixes));
        assert!(!has_suffix(Path::new("src/App.ast.json.bak"), &suffixes));
        assert!(has_suffix(Path::new("tree.json"), &[".json".to_string()]));
    }

    #[test]
    fn test_tree_documents() {
        assert!(is_tree_document(r#"{"type": "Program", "body": []}"#));
        assert!(is_tree_document(r#"{"type": "File", "program": {}}"#));
        assert!(!is_tree_document(r#"{"name": "app", "type": "module"}"#));
        assert!(!is_tree_document("not json"));
    }

    #[test]
    fn test_inapplicable_file_yields_nothing() {
        let findings = analyze_file(Path::new("README.md"), "# hi", &Config::default()).unwrap();
        assert!(findings.is_empty());
    }
}
