/*!
 * Front-end configuration for projdump
 *
 * Scan rules live in `rules`; this module only covers what the command line
 * decides: which directory to scan, where the settings file is, and where the
 * report goes.
 */

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::ensure;
use crate::error::Result;
use crate::rules::{PatternMatch, RuleOverrides, RuleSource, SETTINGS_FILENAME};
use crate::writer::{default_output_name, OutputTarget};

/// Command-line arguments for projdump
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "projdump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a text snapshot of a project's tree and file contents",
    long_about = "Scans a project directory, lists its structure and concatenates the contents of source files into one plain-text report, designed for providing context to Large Language Models (LLMs)."
)]
pub struct Args {
    /// Project directory to scan
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output file (default: <project>_prompt_context.txt)
    #[clap(short, long)]
    pub output: Option<String>,

    /// JSON settings file with the classification rules; created with defaults if missing
    #[clap(long, default_value = SETTINGS_FILENAME)]
    pub settings: String,

    /// Ignore any settings file and use the built-in rules
    #[clap(long, conflicts_with = "settings")]
    pub no_settings: bool,

    /// Exclude every path with a segment starting with '.' (overrides the settings file)
    #[clap(long)]
    pub exclude_hidden: Option<bool>,

    /// How ignore_patterns match file names (overrides the settings file)
    #[clap(long, value_enum)]
    pub pattern_match: Option<PatternMatch>,

    /// Print the report to stdout instead of writing a file
    #[clap(long, conflicts_with = "output")]
    pub stdout: bool,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan
    pub target_dir: PathBuf,

    /// Explicit output file, if any
    pub output_file: Option<PathBuf>,

    /// Where scan rules come from
    pub rule_source: RuleSource,

    /// Command-line rule overrides
    pub overrides: RuleOverrides,

    /// Print instead of writing a file
    pub stdout: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let rule_source = if args.no_settings {
            RuleSource::Defaults
        } else {
            RuleSource::File(PathBuf::from(args.settings))
        };

        Self {
            target_dir: PathBuf::from(args.directory_path),
            output_file: args.output.map(PathBuf::from),
            rule_source,
            overrides: RuleOverrides {
                exclude_hidden: args.exclude_hidden,
                pattern_match: args.pattern_match,
            },
            stdout: args.stdout,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            InvalidArgument,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        if let Some(parent) = self.output_file.as_deref().and_then(Path::parent) {
            ensure!(
                parent.as_os_str().is_empty() || parent.is_dir(),
                InvalidArgument,
                "Output directory not found: {}",
                parent.display()
            );
        }

        Ok(())
    }

    /// Where the report for `project_name` goes
    pub fn output_target(&self, project_name: &str) -> OutputTarget {
        if self.stdout {
            return OutputTarget::Stdout;
        }
        let path = self
            .output_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_output_name(project_name)));
        OutputTarget::File(path)
    }
}
