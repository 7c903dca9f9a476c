//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the kuitti pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KuittiConfig {
    /// Input and output locations.
    pub paths: PathConfig,

    /// Receipt text extraction configuration.
    pub extraction: ExtractionConfig,

    /// Material / non-material classification.
    pub categories: CategoryConfig,

    /// Output document configuration.
    pub report: ReportConfig,
}

/// Directories and file extensions used for date-based discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Directory holding raw receipts and their structured-data files.
    pub input_dir: PathBuf,

    /// Directory receiving rendered reports. Created when missing.
    pub output_dir: PathBuf,

    /// Extension of raw receipt text files.
    pub raw_extension: String,

    /// Extension of structured-data cache files.
    pub cache_extension: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("raw_data"),
            output_dir: PathBuf::from("results"),
            raw_extension: "txt".to_string(),
            cache_extension: "csv".to_string(),
        }
    }
}

/// Receipt text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum number of leading dashes that make a header delimiter line.
    pub delimiter_min_len: usize,

    /// Keywords that end the itemized section.
    pub terminators: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            delimiter_min_len: 20,
            terminators: vec!["VÄLISUMMA".to_string(), "YHTEENSÄ".to_string()],
        }
    }
}

/// Item categorization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Case-sensitive name prefixes of fees, deposits and surcharges.
    pub non_material_prefixes: Vec<String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            non_material_prefixes: vec![
                "PANTTI".to_string(),
                "KOTIINKULJETUS".to_string(),
                "TOIMITUSMAKSU".to_string(),
                "PAKKAUSMAKSU".to_string(),
                "KERÄILYMAKSU".to_string(),
            ],
        }
    }
}

/// Output document configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Default output format.
    pub format: crate::report::ReportFormat,

    /// File name prefix of rendered reports.
    pub file_prefix: String,

    /// Suffix appended to every currency value.
    pub currency_suffix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: crate::report::ReportFormat::Pdf,
            file_prefix: "receipt".to_string(),
            currency_suffix: "€".to_string(),
        }
    }
}

impl KuittiConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
