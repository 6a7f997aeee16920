/*!
 * File content reading with binary detection and size bounding
 */

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Bytes inspected for a NUL before a file is treated as binary
pub const BINARY_PROBE_LEN: usize = 1024;
/// Decoded length (in chars) above which content gets truncated
pub const MAX_CONTENT_CHARS: usize = 500_000;
/// Chars kept from a truncated file
pub const TRUNCATED_KEEP_CHARS: usize = 5_000;

/// Body of one content block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBody {
    /// Full decoded text
    Text(String),
    /// Leading part of an oversized file
    Truncated { original_chars: usize, kept: String },
    /// File looked binary and was not read past the probe
    Binary,
    /// Reading failed; holds the reason
    Error(String),
}

impl ContentBody {
    /// Lines contributed to the report by this body
    pub fn line_count(&self) -> usize {
        match self {
            ContentBody::Text(text) => text.lines().count(),
            ContentBody::Truncated { kept, .. } => kept.lines().count(),
            _ => 0,
        }
    }

    /// Chars contributed to the report by this body
    pub fn char_count(&self) -> usize {
        match self {
            ContentBody::Text(text) => text.chars().count(),
            ContentBody::Truncated { kept, .. } => kept.chars().count(),
            _ => 0,
        }
    }
}

impl fmt::Display for ContentBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentBody::Text(text) => f.write_str(text),
            ContentBody::Truncated {
                original_chars,
                kept,
            } => write!(
                f,
                "[File too large ({} chars) - Truncated]\n{}\n...[Truncated]...",
                original_chars, kept
            ),
            ContentBody::Binary => f.write_str("[Binary File - Content Skipped]"),
            ContentBody::Error(reason) => write!(f, "[Error reading file: {}]", reason),
        }
    }
}

/// Reads file bodies for the content section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentReader {
    pub binary_probe_len: usize,
    pub max_chars: usize,
    pub keep_chars: usize,
}

impl Default for ContentReader {
    fn default() -> Self {
        Self {
            binary_probe_len: BINARY_PROBE_LEN,
            max_chars: MAX_CONTENT_CHARS,
            keep_chars: TRUNCATED_KEEP_CHARS,
        }
    }
}

impl ContentReader {
    /// Read a file into a content body. Never fails; I/O problems become
    /// [`ContentBody::Error`].
    pub fn read(&self, path: &Path) -> ContentBody {
        match self.try_read(path) {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                ContentBody::Error(e.to_string())
            }
        }
    }

    fn try_read(&self, path: &Path) -> io::Result<ContentBody> {
        if self.is_binary(path)? {
            log::debug!("Skipping binary file {}", path.display());
            return Ok(ContentBody::Binary);
        }

        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        let original_chars = text.chars().count();

        if original_chars > self.max_chars {
            log::debug!(
                "Truncating {} ({} chars)",
                path.display(),
                original_chars
            );
            let kept: String = text.chars().take(self.keep_chars).collect();
            return Ok(ContentBody::Truncated {
                original_chars,
                kept,
            });
        }

        Ok(ContentBody::Text(text.into_owned()))
    }

    /// A NUL byte within the probe window marks the file as binary
    fn is_binary(&self, path: &Path) -> io::Result<bool> {
        let mut probe = Vec::with_capacity(self.binary_probe_len);
        File::open(path)?
            .take(self.binary_probe_len as u64)
            .read_to_end(&mut probe)?;
        Ok(probe.contains(&0))
    }
}
