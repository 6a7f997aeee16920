/*!
 * Utility functions for projdump
 */

use std::path::{Component, Path};

/// Split a relative path into its normal segments, accepting either separator.
///
/// Empty segments and `.` markers are dropped so `./src//lib.rs` and
/// `src\lib.rs` both yield `["src", "lib.rs"]`.
pub fn path_segments(relative_path: &str) -> Vec<&str> {
    relative_path
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// Forward-slash label for a path relative to the scan root
pub fn slash_label(relative_path: &Path) -> String {
    relative_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Lowercased extension of a file name including the leading dot.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn lowercase_extension(file_name: &str) -> Option<String> {
    let stem_start = file_name.trim_start_matches('.').len();
    let offset = file_name.len() - stem_start;
    file_name[offset..]
        .rfind('.')
        .map(|idx| file_name[offset + idx..].to_lowercase())
}

/// Normalize a configured path prefix: forward slashes, no leading `./`,
/// no trailing separator.
pub fn normalize_prefix(prefix: &str) -> String {
    path_segments(prefix).join("/")
}

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
