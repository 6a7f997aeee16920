/*!
 * Classification rules for projdump
 *
 * `RuleSettings` is the on-disk JSON document; `RuleSet` is the compiled,
 * immutable form handed to the classifier and walker for one scan.
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::{Result, ScanError};
use crate::utils::normalize_prefix;

/// Default settings file name, resolved against the working directory
pub const SETTINGS_FILENAME: &str = "settings.json";

/// How `ignore_patterns` entries are matched against a file name
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PatternMatch {
    /// Pattern may occur anywhere in the file name
    #[default]
    Substring,
    /// Pattern must end the file name
    Suffix,
}

/// The settings document as stored on disk.
///
/// Missing keys are filled from [`RuleSettings::default`], so a partial file
/// only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    pub ignore_dirs: Vec<String>,
    pub ignore_filenames: Vec<String>,
    pub ignore_extensions: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub ignore_paths: Vec<String>,
    pub path_only_extensions: Vec<String>,
    pub path_only_filenames: Vec<String>,
    /// Exclude every path with a segment starting with `.`
    pub exclude_hidden: bool,
    pub pattern_match: PatternMatch,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static DEFAULT_SETTINGS: Lazy<RuleSettings> = Lazy::new(|| RuleSettings {
    ignore_dirs: strings(&[
        ".git",
        ".idea",
        ".vscode",
        "venv",
        "env",
        "node_modules",
        "__pycache__",
        "bin",
        "obj",
        "build",
        "dist",
        "target",
        ".vs",
    ]),
    ignore_filenames: strings(&[
        ".gitignore",
        ".gitattributes",
        "package-lock.json",
        "yarn.lock",
    ]),
    ignore_extensions: strings(&[
        ".dll", ".exe", ".pdb", ".db", ".log", ".tmp", ".zip", ".rar", ".pyc", ".class", ".o",
        ".so", ".a", ".lib", ".mp4",
    ]),
    ignore_patterns: strings(&[".min.js", ".min.css", ".Designer.cs", ".g.cs"]),
    ignore_paths: Vec::new(),
    // Images are listed so the tree stays complete, but never read
    path_only_extensions: strings(&[
        ".sln", ".svg", ".lock", ".png", ".jpg", ".jpeg", ".gif", ".ico",
    ]),
    path_only_filenames: strings(&["LICENSE", "README.md"]),
    exclude_hidden: false,
    pattern_match: PatternMatch::Substring,
});

impl Default for RuleSettings {
    fn default() -> Self {
        (*DEFAULT_SETTINGS).clone()
    }
}

impl RuleSettings {
    /// Parse a settings document, backfilling missing keys from defaults
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read settings from a file without any fallback
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| ScanError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&text)
            .map_err(|e| ScanError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Write these settings as pretty-printed JSON
    pub fn write(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

/// Where a scan obtains its rules
#[derive(Debug, Clone)]
pub enum RuleSource {
    /// Built-in defaults only
    Defaults,
    /// Settings supplied directly by the caller
    Inline(RuleSettings),
    /// A JSON settings file, created with defaults when missing
    File(PathBuf),
}

impl Default for RuleSource {
    fn default() -> Self {
        Self::File(PathBuf::from(SETTINGS_FILENAME))
    }
}

/// Front-end overrides applied on top of the loaded settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleOverrides {
    pub exclude_hidden: Option<bool>,
    pub pattern_match: Option<PatternMatch>,
}

/// Compiled rules for one scan. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub(crate) ignore_dirs: HashSet<String>,
    pub(crate) ignore_filenames: HashSet<String>,
    pub(crate) ignore_extensions: HashSet<String>,
    pub(crate) ignore_patterns: Vec<String>,
    pub(crate) ignore_paths: Vec<String>,
    pub(crate) path_only_extensions: HashSet<String>,
    pub(crate) path_only_filenames: HashSet<String>,
    pub(crate) exclude_hidden: bool,
    pub(crate) pattern_match: PatternMatch,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_settings(&RuleSettings::default())
    }
}

impl RuleSet {
    /// Compile a settings document. Extensions and patterns are lowercased here.
    pub fn from_settings(settings: &RuleSettings) -> Self {
        let lower = |items: &[String]| -> HashSet<String> {
            items.iter().map(|s| s.to_lowercase()).collect()
        };
        let exact = |items: &[String]| -> HashSet<String> { items.iter().cloned().collect() };

        let mut ignore_patterns: Vec<String> = settings
            .ignore_patterns
            .iter()
            .map(|p| p.to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        ignore_patterns.sort();
        ignore_patterns.dedup();

        let mut ignore_paths: Vec<String> = settings
            .ignore_paths
            .iter()
            .map(|p| normalize_prefix(p))
            .filter(|p| !p.is_empty())
            .collect();
        ignore_paths.sort();
        ignore_paths.dedup();

        Self {
            ignore_dirs: exact(settings.ignore_dirs.as_slice()),
            ignore_filenames: exact(settings.ignore_filenames.as_slice()),
            ignore_extensions: lower(settings.ignore_extensions.as_slice()),
            ignore_patterns,
            ignore_paths,
            path_only_extensions: lower(settings.path_only_extensions.as_slice()),
            path_only_filenames: exact(settings.path_only_filenames.as_slice()),
            exclude_hidden: settings.exclude_hidden,
            pattern_match: settings.pattern_match,
        }
    }

    /// Load rules from a source. Never fails: unreadable or malformed
    /// settings fall back to the defaults with a warning.
    pub fn load(source: &RuleSource) -> Self {
        let settings = match source {
            RuleSource::Defaults => RuleSettings::default(),
            RuleSource::Inline(settings) => settings.clone(),
            RuleSource::File(path) => load_settings_file(path),
        };
        Self::from_settings(&settings)
    }

    /// Load rules and apply front-end overrides
    pub fn load_with(source: &RuleSource, overrides: RuleOverrides) -> Self {
        let mut rules = Self::load(source);
        if let Some(exclude_hidden) = overrides.exclude_hidden {
            rules.exclude_hidden = exclude_hidden;
        }
        if let Some(pattern_match) = overrides.pattern_match {
            rules.pattern_match = pattern_match;
        }
        rules
    }

    /// Whether hidden path segments are excluded
    pub fn exclude_hidden(&self) -> bool {
        self.exclude_hidden
    }

    /// Policy used for `ignore_patterns`
    pub fn pattern_match(&self) -> PatternMatch {
        self.pattern_match
    }
}

fn load_settings_file(path: &Path) -> RuleSettings {
    if !path.exists() {
        log::info!(
            "Settings file {} not found, creating it with defaults",
            path.display()
        );
        let defaults = RuleSettings::default();
        if let Err(e) = defaults.write(path) {
            log::warn!(
                "Could not create default settings file {}: {}",
                path.display(),
                e
            );
        }
        return defaults;
    }

    match RuleSettings::read(path) {
        Ok(settings) => {
            log::debug!("Loaded settings from {}", path.display());
            settings
        }
        Err(e) => {
            log::warn!("{}. Using default rules.", e);
            RuleSettings::default()
        }
    }
}
