/*!
 * Scan orchestration: rules, walk, content, report
 */

use std::fs;
use std::path::Path;

use indicatif::ProgressBar;

use crate::classifier::Category;
use crate::error::Result;
use crate::reader::ContentReader;
use crate::report::{tree_line, ContentBlock, Report, ScanStatistics};
use crate::rules::{RuleOverrides, RuleSet, RuleSource};
use crate::types::Entry;
use crate::walker::TreeWalker;

/// Receives human-readable progress messages. Purely advisory.
pub trait StatusSink {
    fn status(&self, message: &str);
}

impl<F: Fn(&str)> StatusSink for F {
    fn status(&self, message: &str) {
        self(message)
    }
}

impl StatusSink for ProgressBar {
    fn status(&self, message: &str) {
        self.set_message(message.to_string());
        self.tick();
    }
}

/// Builds reports. Rules are reloaded from the source on every call so edits
/// to the settings file between scans are picked up.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    source: RuleSource,
    overrides: RuleOverrides,
    reader: ContentReader,
}

impl Aggregator {
    /// Create an aggregator reading its rules from `source`
    pub fn new(source: RuleSource) -> Self {
        Self {
            source,
            overrides: RuleOverrides::default(),
            reader: ContentReader::default(),
        }
    }

    /// Apply front-end overrides after each rules load
    pub fn with_overrides(mut self, overrides: RuleOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Replace the content reader limits
    pub fn with_reader(mut self, reader: ContentReader) -> Self {
        self.reader = reader;
        self
    }

    /// Rules as they would be used by the next scan
    pub fn rules(&self) -> RuleSet {
        RuleSet::load_with(&self.source, self.overrides)
    }

    /// Scan `root` and assemble the report.
    ///
    /// Fails only when the root itself cannot be walked; unreadable files end
    /// up as error placeholders inside the report.
    pub fn generate(&self, root: &Path, status: &dyn StatusSink) -> Result<Report> {
        let rules = self.rules();

        status.status("Generating directory structure...");
        let walker = TreeWalker::new(root, &rules);
        let entries: Vec<Entry> = walker.walk()?.collect();

        let mut statistics = ScanStatistics::default();
        let mut tree = Vec::with_capacity(entries.len());
        for entry in &entries {
            statistics.record_entry(entry);
            tree.push(tree_line(entry));
        }

        status.status("Reading file contents...");
        let mut blocks = Vec::new();
        for entry in entries
            .iter()
            .filter(|e| !e.is_dir && e.category == Category::Full)
        {
            status.status(&format!("Reading: {}", entry.name()));
            let body = self.reader.read(&entry.path);
            statistics.record_body(&body);
            blocks.push(ContentBlock {
                header: entry.label(),
                body,
            });
        }

        status.status("Finalizing output...");
        log::debug!(
            "Scanned {}: {} directories, {} files, {} read",
            root.display(),
            statistics.directories,
            statistics.files_listed,
            statistics.files_read
        );

        Ok(Report {
            project_name: project_name(root),
            tree,
            blocks,
            statistics,
        })
    }
}

/// Name used when the root has no final component, such as `/`
pub const FALLBACK_PROJECT_NAME: &str = "root";

/// Final component of the root as the caller named it. Symlinks are not
/// resolved; `.` and `..` are resolved against the working directory.
pub fn project_name(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().to_string();
    }
    match fs::canonicalize(root) {
        Ok(resolved) => resolved
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string()),
        Err(_) => FALLBACK_PROJECT_NAME.to_string(),
    }
}
