/*!
 * Path classification
 *
 * Decides, from the relative path alone, whether an entry is left out, listed
 * without content, or listed with its content. No filesystem access happens
 * here.
 */

use strum::Display;

use crate::rules::{PatternMatch, RuleSet};
use crate::utils::{lowercase_extension, path_segments};

/// Outcome of classifying one path. Variants are declared in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Category {
    /// Absent from tree and content; prunes the subtree of a directory
    Excluded,
    /// Listed in the tree, content never read
    PathOnly,
    /// Listed in the tree with its content embedded
    Full,
}

impl Category {
    /// Whether the entry shows up in the tree listing
    pub fn is_listed(self) -> bool {
        self != Category::Excluded
    }
}

/// Classify a path relative to the scan root.
///
/// Rules are tried in a fixed order and the first match wins: hidden segments
/// (when enabled), path prefixes, directory names, file names, extensions,
/// name patterns, then the path-only lists. Directories never become
/// `PathOnly`.
pub fn classify(relative_path: &str, is_dir: bool, rules: &RuleSet) -> Category {
    let segments = path_segments(relative_path);
    let Some(&file_name) = segments.last() else {
        // The root itself
        return Category::Full;
    };

    if rules.exclude_hidden && segments.iter().any(|s| s.len() > 1 && s.starts_with('.')) {
        return Category::Excluded;
    }

    if !rules.ignore_paths.is_empty() {
        let normalized = segments.join("/");
        let under_prefix = rules.ignore_paths.iter().any(|prefix| {
            normalized == *prefix
                || (normalized.starts_with(prefix.as_str())
                    && normalized.as_bytes().get(prefix.len()) == Some(&b'/'))
        });
        if under_prefix {
            return Category::Excluded;
        }
    }

    if segments.iter().any(|s| rules.ignore_dirs.contains(*s)) {
        return Category::Excluded;
    }

    if rules.ignore_filenames.contains(file_name) {
        return Category::Excluded;
    }

    let extension = lowercase_extension(file_name);
    if let Some(ext) = &extension {
        if rules.ignore_extensions.contains(ext) {
            return Category::Excluded;
        }
    }

    if !rules.ignore_patterns.is_empty() {
        let lower_name = file_name.to_lowercase();
        let matched = rules.ignore_patterns.iter().any(|pattern| match rules.pattern_match {
            PatternMatch::Substring => lower_name.contains(pattern.as_str()),
            PatternMatch::Suffix => lower_name.ends_with(pattern.as_str()),
        });
        if matched {
            return Category::Excluded;
        }
    }

    if is_dir {
        return Category::Full;
    }

    let path_only_ext = extension
        .as_ref()
        .is_some_and(|ext| rules.path_only_extensions.contains(ext));
    if path_only_ext || rules.path_only_filenames.contains(file_name) {
        return Category::PathOnly;
    }

    Category::Full
}
