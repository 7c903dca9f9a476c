//! Report command - build the alphabetical report for one day.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use kuitti_core::{Pipeline, ReportFormat};

use super::config::load_config;
use super::ReceiptArgs;

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    receipt: ReceiptArgs,

    /// Output directory for the report
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Re-extract the raw receipt even if its structured data is current
    #[arg(long)]
    reparse: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// PDF document
    Pdf,
    /// Plain text document
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Pdf => ReportFormat::Pdf,
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let mut config = load_config(config_path)?;
    args.receipt.apply(&mut config);
    if let Some(dir) = &args.output_dir {
        config.paths.output_dir = dir.clone();
    }

    let date = args.receipt.date();
    let format = args.format.map(ReportFormat::from).unwrap_or(config.report.format);
    info!("Building {:?} report for {}", format, date);

    let pipeline = Pipeline::from_config(&config);
    let report = pipeline.build_report(date, args.reparse)?;

    let renderer = format.renderer(&config.report.currency_suffix);
    let path = pipeline.write_report(&report, renderer.as_ref())?;

    println!(
        "{} Report created: {}",
        style("✓").green(),
        path.display()
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
