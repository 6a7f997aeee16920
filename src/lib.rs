/*!
 * projdump - Generate a plain-text snapshot of a project for LLM context
 *
 * This library classifies every path of a project tree with configurable
 * rules, renders the tree, and concatenates the contents of source files
 * into a single bounded, deterministic report.
 */

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod error;
pub mod reader;
pub mod report;
pub mod rules;
pub mod summary;
pub mod types;
pub mod utils;
pub mod walker;
pub mod writer;


// Re-export main components for easier access
pub use aggregator::{Aggregator, StatusSink};
pub use classifier::{classify, Category};
pub use config::Config;
pub use error::{Result, ScanError};
pub use reader::{ContentBody, ContentReader};
pub use report::{ContentBlock, Report, ScanStatistics};
pub use rules::{PatternMatch, RuleOverrides, RuleSet, RuleSettings, RuleSource};
pub use types::Entry;
pub use walker::TreeWalker;
pub use writer::{OutputTarget, ReportWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
