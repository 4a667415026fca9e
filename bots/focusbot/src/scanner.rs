// SPDX-License-Identifier: PMPL-1.0-or-later
//! Directory scanner for running focus analysis across a project.
//!
//! Walks directory trees, picks up serialized syntax trees, and runs
//! analyzers on each.

use crate::analyzers::{self, has_suffix};
use crate::config::Config;
use crate::error::Result;
use crate::fleet::FindingSet;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Scan a directory for unfocusable click handlers
pub fn scan_directory(dir: &Path, config: &Config) -> Result<FindingSet> {
    let mut all_findings = FindingSet::new();
    let mut files_scanned = 0;
    let plain_json = ["json".to_string()];

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden and excluded directories, but never the root itself
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_str().unwrap_or("");
            !config.scan.exclude.iter().any(|x| x == name) && !name.starts_with('.')
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let named_tree = has_suffix(path, &config.scan.extensions);
        if !named_tree && !has_suffix(path, &plain_json) {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                info!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        // Other JSON files count only when they hold a whole tree
        let result = if named_tree {
            analyzers::analyze_file(path, &content, config)
        } else if analyzers::is_tree_document(&content) {
            analyzers::analyze_tree(path, &content, config)
        } else {
            debug!("Not a syntax tree: {}", path.display());
            continue;
        };

        match result {
            Ok(file_findings) => all_findings.extend(file_findings.findings),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        }
        files_scanned += 1;
    }

    info!("Scanned {} files, found {} issues", files_scanned, all_findings.len());

    Ok(all_findings)
}

/// Scan a single file for unfocusable click handlers
pub fn scan_file(path: &Path, config: &Config) -> Result<FindingSet> {
    let content = std::fs::read_to_string(path)?;
    analyzers::analyze_tree(path, &content, config)
}
