/*!
 * The assembled scan report and its plain-text layout
 */

use std::fmt;

use crate::reader::ContentBody;
use crate::types::Entry;

const HEAVY_RULE_WIDTH: usize = 80;

/// One file's section in the content part of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    /// Forward-slash path relative to the root
    pub header: String,
    pub body: ContentBody,
}

impl fmt::Display for ContentBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--- FILE: {} ---\n\n{}\n", self.header, self.body)
    }
}

/// Counters gathered while building a report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Directories listed in the tree
    pub directories: usize,
    /// Files listed in the tree
    pub files_listed: usize,
    /// Files listed without content
    pub path_only: usize,
    /// Files whose text was embedded, fully or truncated
    pub files_read: usize,
    pub binary_skipped: usize,
    pub truncated: usize,
    pub read_errors: usize,
    /// Lines of embedded file text
    pub total_lines: usize,
    /// Chars of embedded file text
    pub total_chars: usize,
}

impl ScanStatistics {
    pub(crate) fn record_entry(&mut self, entry: &Entry) {
        if entry.is_dir {
            self.directories += 1;
        } else {
            self.files_listed += 1;
            if entry.category == crate::classifier::Category::PathOnly {
                self.path_only += 1;
            }
        }
    }

    pub(crate) fn record_body(&mut self, body: &ContentBody) {
        match body {
            ContentBody::Text(_) => self.files_read += 1,
            ContentBody::Truncated { .. } => {
                self.files_read += 1;
                self.truncated += 1;
            }
            ContentBody::Binary => self.binary_skipped += 1,
            ContentBody::Error(_) => self.read_errors += 1,
        }
        self.total_lines += body.line_count();
        self.total_chars += body.char_count();
    }
}

/// Result of one scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub project_name: String,
    /// Rendered tree lines, without the root line
    pub tree: Vec<String>,
    pub blocks: Vec<ContentBlock>,
    pub statistics: ScanStatistics,
}

impl Report {
    /// The full report text
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(HEAVY_RULE_WIDTH);
        let light = "-".repeat(HEAVY_RULE_WIDTH);
        let blocks: Vec<String> = self.blocks.iter().map(|b| b.to_string()).collect();

        writeln!(f, "PROJECT NAME: {}", self.project_name)?;
        writeln!(f, "{}", heavy)?;
        writeln!(f, "DIRECTORY STRUCTURE:")?;
        writeln!(f, "{}", light)?;
        writeln!(f, "{}/", self.project_name)?;
        writeln!(f, "{}", self.tree.join("\n"))?;
        writeln!(f)?;
        writeln!(f, "{}", heavy)?;
        writeln!(f, "FILE CONTENTS:")?;
        writeln!(f, "{}", light)?;
        write!(f, "{}", blocks.join("\n"))
    }
}

/// Render one tree line: four spaces per depth level, then the branch marker
pub fn tree_line(entry: &Entry) -> String {
    let marker = if entry.is_dir { "/" } else { "" };
    format!("{}├── {}{}", "    ".repeat(entry.depth), entry.name(), marker)
}
