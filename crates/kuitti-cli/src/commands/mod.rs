//! CLI commands.

pub mod config;
pub mod preprocess;
pub mod report;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;

use kuitti_core::KuittiConfig;

/// Receipt selection shared by the commands that read receipts.
#[derive(Args)]
pub struct ReceiptArgs {
    /// Receipt date as YYYY-MM-DD (default: today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Directory with raw receipts and structured-data files
    #[arg(short, long)]
    input_dir: Option<PathBuf>,
}

impl ReceiptArgs {
    pub fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn apply(&self, config: &mut KuittiConfig) {
        if let Some(dir) = &self.input_dir {
            config.paths.input_dir = dir.clone();
        }
    }
}
