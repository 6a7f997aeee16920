/*!
 * Command-line interface for projdump
 */

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use projdump::aggregator::{project_name, Aggregator};
use projdump::config::{Args, Config};
use projdump::summary::{print_summary, ScanSummary};
use projdump::writer::{OutputTarget, ReportWriter};

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command line arguments
    let args = Args::parse();

    // Create configuration
    let config = Config::from_args(args);

    // Validate configuration
    config.validate()?;

    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} ⏱️  {elapsed_precise}")
    {
        progress.set_style(style);
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Scanning");
    progress.set_message(format!(
        "📂 Scanning directory: {}",
        config.target_dir.display()
    ));

    let aggregator = Aggregator::new(config.rule_source.clone()).with_overrides(config.overrides);

    let start_time = Instant::now();
    let report = match aggregator.generate(&config.target_dir, &progress) {
        Ok(report) => report,
        Err(e) => {
            progress.finish_and_clear();
            log::error!("Failed to scan directory: {}", e);
            return Err(e.into());
        }
    };

    progress.finish_and_clear();

    let writer = ReportWriter::new(config.output_target(&project_name(&config.target_dir)));
    writer.write(&report)?;
    let duration = start_time.elapsed();

    // Keep stdout clean for piping when the report itself goes there
    if let OutputTarget::File(path) = writer.target() {
        let text = report.text();
        let summary = ScanSummary::new(
            path.display().to_string(),
            duration,
            report.statistics.clone(),
            &text,
        );
        print_summary(&summary);
    }

    Ok(())
}
