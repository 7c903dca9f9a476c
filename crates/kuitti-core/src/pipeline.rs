//! The receipt-to-report pipeline.
//!
//! raw text → [`ReceiptParser`] → [`CategoryRules`] → [`aggregate`] →
//! [`ReportRenderer`]. Each stage is also callable on its own.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::cache::{read_cache, write_cache};
use crate::models::config::KuittiConfig;
use crate::models::receipt::ItemRecord;
use crate::receipt::{CategoryRules, ReceiptParser};
use crate::report::ReportRenderer;
use crate::store::{ItemSource, ReceiptStore};
use crate::summary::{aggregate, Report};
use crate::Result;

/// Configured pipeline for one receipt layout and file layout.
#[derive(Debug, Clone)]
pub struct Pipeline {
    parser: ReceiptParser,
    rules: CategoryRules,
    store: ReceiptStore,
}

impl Pipeline {
    pub fn new(parser: ReceiptParser, rules: CategoryRules, store: ReceiptStore) -> Self {
        Self {
            parser,
            rules,
            store,
        }
    }

    pub fn from_config(config: &KuittiConfig) -> Self {
        Self::new(
            ReceiptParser::from_config(&config.extraction),
            CategoryRules::from_config(&config.categories),
            ReceiptStore::from_config(config),
        )
    }

    pub fn store(&self) -> &ReceiptStore {
        &self.store
    }

    /// Extract items from receipt text.
    pub fn extract(&self, text: &str) -> Result<Vec<ItemRecord>> {
        let result = self.parser.parse(text)?;
        for warning in &result.warnings {
            warn!("{}", warning);
        }
        Ok(result.items)
    }

    /// Split and aggregate items into a report.
    pub fn summarize(&self, date: NaiveDate, items: Vec<ItemRecord>) -> Result<Report> {
        let (material, non_material) = self.rules.split(items);
        aggregate(date, material, non_material)
    }

    /// Build a report straight from receipt text.
    pub fn run_text(&self, date: NaiveDate, text: &str) -> Result<Report> {
        let items = self.extract(text)?;
        self.summarize(date, items)
    }

    /// Extract the raw receipt for `date` and write its structured-data file.
    pub fn preprocess(&self, date: NaiveDate) -> Result<Vec<ItemRecord>> {
        let text = self.store.read_raw(date)?;
        let items = self.extract(&text)?;
        let cache = self.store.cache_path(date);
        write_cache(&cache, &items)?;
        info!("Cached {} items in {}", items.len(), cache.display());
        Ok(items)
    }

    /// Load the items for `date`, from the cache when it is current.
    pub fn load_items(&self, date: NaiveDate, force_reparse: bool) -> Result<Vec<ItemRecord>> {
        match self.store.locate(date, force_reparse)? {
            ItemSource::Cache(path) => read_cache(&path),
            ItemSource::Raw(_) => self.preprocess(date),
        }
    }

    /// Load the items for `date` and build its report.
    pub fn build_report(&self, date: NaiveDate, force_reparse: bool) -> Result<Report> {
        let items = self.load_items(date, force_reparse)?;
        self.summarize(date, items)
    }

    /// Render a report into the output directory.
    pub fn write_report(&self, report: &Report, renderer: &dyn ReportRenderer) -> Result<PathBuf> {
        let start = Instant::now();
        let content = renderer.render(report)?;
        let path = self
            .store
            .write_report(report.date, renderer.extension(), &content)?;
        info!(
            "Rendered {} items for {} in {:?}",
            report.item_count(),
            report.date,
            start.elapsed()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractionError, KuittiError};
    use crate::report::TextRenderer;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::fs;
    use std::str::FromStr;

    const RECEIPT: &str = "\
K-Market Esimerkki
------------------------------------------
MAITO 1L                              1,95
    2 KG      0,98 €/KG
PANTTI                                0,40
KAURAHIUTALE                          1,49
TOIMITUSMAKSU                         5,90
------------------------------------------
YHTEENSÄ                              9,74
";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 5).unwrap()
    }

    fn pipeline(dir: &std::path::Path) -> Pipeline {
        let mut config = KuittiConfig::default();
        config.paths.input_dir = dir.join("raw_data");
        config.paths.output_dir = dir.join("results");
        fs::create_dir_all(&config.paths.input_dir).unwrap();
        Pipeline::from_config(&config)
    }

    #[test]
    fn test_run_text() {
        let pipeline = Pipeline::from_config(&KuittiConfig::default());
        let report = pipeline.run_text(date(), RECEIPT).unwrap();

        let names: Vec<&str> = report.material.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["KAURAHIUTALE", "MAITO 1L"]);
        assert_eq!(report.material.items[1].quantity, "2 kg");

        let non_material = report.non_material.as_ref().unwrap();
        let names: Vec<&str> = non_material.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["PANTTI", "TOIMITUSMAKSU"]);

        assert_eq!(report.material_total, Decimal::from_str("3.44").unwrap());
        assert_eq!(report.non_material_total, Decimal::from_str("6.30").unwrap());
        assert_eq!(report.grand_total, Decimal::from_str("9.74").unwrap());
    }

    #[test]
    fn test_single_item_scenario() {
        let pipeline = Pipeline::from_config(&KuittiConfig::default());
        let report = pipeline
            .run_text(date(), "MAITO 1,95\n  2 KG  0,98 €/KG\nYHTEENSÄ 1,95\n")
            .unwrap();

        assert_eq!(
            report.material.items,
            vec![ItemRecord::new("MAITO", "2 kg", Decimal::from_str("1.95").unwrap())]
        );
        assert_eq!(report.material.total, Decimal::from_str("1.95").unwrap());
        assert!(report.non_material.is_none());
    }

    #[test]
    fn test_preprocess_then_report() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(dir.path());
        fs::write(pipeline.store().raw_path(date()), RECEIPT).unwrap();

        let items = pipeline.preprocess(date()).unwrap();
        assert_eq!(items.len(), 4);
        assert!(pipeline.store().cache_path(date()).is_file());

        let report = pipeline.build_report(date(), false).unwrap();
        let path = pipeline.write_report(&report, &TextRenderer::default()).unwrap();

        assert_eq!(
            path,
            dir.path().join("results").join("receipt_2025-09-05_alphabetical.txt")
        );
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("KAURAHIUTALE"));
        assert!(text.contains("Kaikki yhteensä"));
        assert!(text.contains("9,74 €"));
    }

    #[test]
    fn test_report_from_cache_only() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(dir.path());
        fs::write(
            pipeline.store().cache_path(date()),
            "name,quantity,price\nVOI,1 kpl,3.89\nPANTTI,1 kpl,0.15\n",
        )
        .unwrap();

        let report = pipeline.build_report(date(), false).unwrap();
        assert_eq!(report.grand_total, Decimal::from_str("4.04").unwrap());
    }

    #[test]
    fn test_missing_data() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(dir.path());

        assert!(matches!(
            pipeline.build_report(date(), false),
            Err(KuittiError::DataFileNotFound { .. })
        ));
        assert!(matches!(
            pipeline.preprocess(date()),
            Err(KuittiError::DataFileNotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_number_leaves_no_cache() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(dir.path());
        let text = format!("MAITO 1,95\nJUUSTO {},00\n", "9".repeat(40));
        fs::write(pipeline.store().raw_path(date()), text).unwrap();

        let err = pipeline.build_report(date(), false).unwrap_err();
        assert!(matches!(
            err,
            KuittiError::Extraction(ExtractionError::MalformedNumber { .. })
        ));
        assert!(!pipeline.store().cache_path(date()).exists());
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let pipeline = Pipeline::from_config(&KuittiConfig::default());
        let huge = format!("5{},00", "0".repeat(28));
        let text = format!("A {}\nB {}\n", huge, huge);

        assert_eq!(pipeline.extract(&text).unwrap().len(), 2);
        assert!(matches!(
            pipeline.run_text(date(), &text),
            Err(KuittiError::TotalOverflow(_))
        ));
    }
}
