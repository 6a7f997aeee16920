/*!
 * Report output for projdump
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, ResultExt};
use crate::report::Report;

/// Where a report ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to a file, replacing it
    File(PathBuf),
    /// Print to standard output
    Stdout,
}

/// Writes rendered reports
pub struct ReportWriter {
    target: OutputTarget,
}

impl ReportWriter {
    /// Create a new writer
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }

    /// Output target
    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Write the report text
    pub fn write(&self, report: &Report) -> Result<()> {
        match &self.target {
            OutputTarget::File(path) => write_file(path, report),
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                write_to(&mut handle, report)?;
                Ok(())
            }
        }
    }
}

fn write_file(path: &Path, report: &Report) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, report)
        .with_context(|| format!("Cannot write {}", path.display()))?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

fn write_to<W: Write>(writer: &mut W, report: &Report) -> io::Result<()> {
    writer.write_all(report.text().as_bytes())?;
    writer.flush()
}

/// Default output file name for a project, `<name>_prompt_context.txt`
pub fn default_output_name(project_name: &str) -> String {
    format!("{}_prompt_context.txt", project_name)
}
