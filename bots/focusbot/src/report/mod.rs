// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for focusability findings.
//!
//! Supports multiple output formats:
//! - Text: human-readable findings grouped by file
//! - JSON: structured findings for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::fleet::{Finding, FindingSet, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

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

/// Generate a report from findings
pub fn generate_report(findings: &FindingSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(findings),
        OutputFormat::Json => generate_json_report(findings),
        OutputFormat::Sarif => generate_sarif_report(findings),
    }
}

/// Generate human-readable text report, one block per file
fn generate_text_report(findings: &FindingSet) -> String {
    let mut output = String::new();

    output.push_str("=== Focusbot Keyboard Focus Report ===\n\n");

    if findings.is_empty() {
        output.push_str("No unfocusable click handlers found. All checks passed.\n");
        return output;
    }

    let mut by_file: BTreeMap<String, Vec<&Finding>> = BTreeMap::new();
    for finding in &findings.findings {
        let file = finding
            .file
            .as_ref()
            .map(|f| f.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        by_file.entry(file).or_default().push(finding);
    }

    let errors = findings.errors().len();
    let warnings = findings.warnings().len();
    output.push_str(&format!(
        "Found {} issue(s) in {} file(s): {} error(s), {} warning(s)\n\n",
        findings.len(),
        by_file.len(),
        errors,
        warnings
    ));

    for (file, mut file_findings) in by_file {
        file_findings.sort_by_key(|f| (f.line, f.column));
        output.push_str(&format!("--- {} ({}) ---\n", file, file_findings.len()));

        for finding in file_findings {
            let position = match (finding.line, finding.column) {
                (Some(l), Some(c)) => format!("{}:{}", l, c),
                (Some(l), None) => l.to_string(),
                _ => "-".to_string(),
            };
            let element = finding
                .element
                .as_deref()
                .map(|e| format!(" <{}>", e))
                .unwrap_or_default();
            output.push_str(&format!(
                "  {} {}{} [{}]\n    {}\n",
                position, finding.severity, element, finding.rule_id, finding.message
            ));

            if let (Some(criterion), Some(level)) = (&finding.wcag_criterion, finding.wcag_level) {
                output.push_str(&format!("    WCAG: {} (Level {})\n", criterion, level));
            }
            if let Some(ref suggestion) = finding.suggestion {
                output.push_str(&format!("    Fix: {}\n", suggestion));
            }
        }
        output.push('\n');
    }

    if findings.blocks_release() {
        output.push_str("RESULT: RELEASE BLOCKED (errors found)\n");
    } else if warnings > 0 {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

/// Generate JSON report
fn generate_json_report(findings: &FindingSet) -> String {
    serde_json::to_string_pretty(findings).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize findings: {}\"}}", e)
    })
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
    rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
struct SarifRule {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
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
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
    region: Option<SarifRegion>,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
    #[serde(rename = "startColumn", skip_serializing_if = "Option::is_none")]
    start_column: Option<usize>,
}

/// Generate SARIF report
fn generate_sarif_report(findings: &FindingSet) -> String {
    let results: Vec<SarifResult> = findings.findings.iter().map(|f| {
        let level = match f.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "note",
        };

        let mut locations = Vec::new();
        if let Some(ref file) = f.file {
            locations.push(SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation {
                        uri: file.display().to_string(),
                    },
                    region: f.line.map(|l| SarifRegion {
                        start_line: l,
                        start_column: f.column,
                    }),
                },
            });
        }

        SarifResult {
            rule_id: f.rule_id.clone(),
            level: level.to_string(),
            message: SarifMessage { text: f.message.clone() },
            locations,
        }
    }).collect();

    // One descriptor per distinct rule, in first-seen order
    let mut rules: Vec<SarifRule> = Vec::new();
    for f in &findings.findings {
        if !rules.iter().any(|r| r.id == f.rule_id) {
            rules.push(SarifRule {
                id: f.rule_id.clone(),
                name: f.rule_name.clone(),
                short_description: SarifMessage { text: f.message.clone() },
            });
        }
    }

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "focusbot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/hyperpolymath/gitbot-fleet".to_string(),
                    rules,
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::WcagLevel;
    use std::path::PathBuf;

    fn sample_finding() -> Finding {
        Finding::new("WCAG-2.1.1-onclick-has-focus", Severity::Error, "Not focusable")
            .with_wcag("2.1.1", WcagLevel::A)
            .with_file(PathBuf::from("src/App.ast.json"))
            .with_position(10, 5)
            .with_element("div")
    }

    #[test]
    fn test_text_report_empty() {
        let findings = FindingSet::new();
        let report = generate_report(&findings, OutputFormat::Text);
        assert!(report.contains("No unfocusable click handlers found"));
    }

    #[test]
    fn test_text_report_with_findings() {
        let mut findings = FindingSet::new();
        findings.add(sample_finding());
        let report = generate_report(&findings, OutputFormat::Text);
        assert!(report.contains("WCAG-2.1.1-onclick-has-focus"));
        assert!(report.contains("--- src/App.ast.json (1) ---"));
        assert!(report.contains("10:5 ERROR <div>"));
        assert!(report.contains("RELEASE BLOCKED"));
    }

    #[test]
    fn test_json_report() {
        let mut findings = FindingSet::new();
        findings.add(sample_finding());
        let report = generate_report(&findings, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert!(parsed["findings"].is_array());
        assert_eq!(parsed["findings"][0]["element"], "div");
    }

    #[test]
    fn test_sarif_report() {
        let mut findings = FindingSet::new();
        findings.add(sample_finding());
        let report = generate_report(&findings, OutputFormat::Sarif);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["version"], "2.1.0");
        let region = &parsed["runs"][0]["results"][0]["locations"][0]["physicalLocation"]["region"];
        assert_eq!(region["startLine"], 10);
        assert_eq!(region["startColumn"], 5);
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "focusbot");
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["rules"][0]["id"], "WCAG-2.1.1-onclick-has-focus");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
