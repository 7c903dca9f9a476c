//! Date-based discovery of receipt files.
//!
//! For a date `D` the store looks for `<input_dir>/D.txt` (raw receipt text)
//! and `<input_dir>/D.csv` (extracted items), and writes reports to
//! `<output_dir>/<prefix>_D_alphabetical.<ext>`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::KuittiError;
use crate::models::config::KuittiConfig;
use crate::Result;

/// Where the items for a date should be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSource {
    /// Up-to-date structured-data file.
    Cache(PathBuf),
    /// Raw receipt text that needs extraction.
    Raw(PathBuf),
}

/// Receipt file locations.
#[derive(Debug, Clone)]
pub struct ReceiptStore {
    input_dir: PathBuf,
    output_dir: PathBuf,
    raw_extension: String,
    cache_extension: String,
    report_prefix: String,
}

impl ReceiptStore {
    /// Create a store with default extensions and report prefix.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let defaults = KuittiConfig::default();
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            raw_extension: defaults.paths.raw_extension,
            cache_extension: defaults.paths.cache_extension,
            report_prefix: defaults.report.file_prefix,
        }
    }

    pub fn from_config(config: &KuittiConfig) -> Self {
        Self {
            input_dir: config.paths.input_dir.clone(),
            output_dir: config.paths.output_dir.clone(),
            raw_extension: config.paths.raw_extension.clone(),
            cache_extension: config.paths.cache_extension.clone(),
            report_prefix: config.report.file_prefix.clone(),
        }
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Raw receipt text for `date`.
    pub fn raw_path(&self, date: NaiveDate) -> PathBuf {
        self.input_dir
            .join(format!("{}.{}", iso(date), self.raw_extension))
    }

    /// Structured-data file for `date`.
    pub fn cache_path(&self, date: NaiveDate) -> PathBuf {
        self.input_dir
            .join(format!("{}.{}", iso(date), self.cache_extension))
    }

    /// Rendered report for `date`.
    pub fn report_path(&self, date: NaiveDate, extension: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}_alphabetical.{}",
            self.report_prefix,
            iso(date),
            extension
        ))
    }

    /// Decide where to read the items for `date` from.
    ///
    /// The cache is used when there is no raw text, or when reparsing is not
    /// forced and the cache is not older than the raw text.
    pub fn locate(&self, date: NaiveDate, force_reparse: bool) -> Result<ItemSource> {
        let raw = self.raw_path(date);
        let cache = self.cache_path(date);

        let raw_exists = raw.is_file();
        let cache_exists = cache.is_file();

        let use_cache =
            cache_exists && (!raw_exists || (!force_reparse && !is_older(&cache, &raw)));

        if use_cache {
            debug!("Using structured data from {}", cache.display());
            return Ok(ItemSource::Cache(cache));
        }

        if raw_exists {
            debug!("Using raw receipt {}", raw.display());
            return Ok(ItemSource::Raw(raw));
        }

        Err(KuittiError::DataFileNotFound { date, raw, cache })
    }

    /// Read the raw receipt text for `date`.
    pub fn read_raw(&self, date: NaiveDate) -> Result<String> {
        let raw = self.raw_path(date);
        if !raw.is_file() {
            return Err(KuittiError::DataFileNotFound {
                date,
                raw,
                cache: self.cache_path(date),
            });
        }
        Ok(fs::read_to_string(raw)?)
    }

    /// Write a rendered report, creating the output directory if needed.
    pub fn write_report(&self, date: NaiveDate, extension: &str, content: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.report_path(date, extension);
        fs::write(&path, content)?;
        info!("Wrote report to {}", path.display());

        Ok(path)
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Whether `a` was modified before `b`. Unknown times count as not older.
fn is_older(a: &Path, b: &Path) -> bool {
    match (modified(a), modified(b)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}
