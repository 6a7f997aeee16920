/*!
 * Core types shared by the walker and the aggregator
 */

use std::path::PathBuf;

use crate::classifier::Category;
use crate::utils::slash_label;

/// One classified filesystem entry produced by a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
    /// Number of components in `relative_path`; root children have depth 1
    pub depth: usize,
    pub is_dir: bool,
    pub category: Category,
}

impl Entry {
    /// Forward-slash label used in report output
    pub fn label(&self) -> String {
        slash_label(&self.relative_path)
    }

    /// Final path component
    pub fn name(&self) -> String {
        self.relative_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}
