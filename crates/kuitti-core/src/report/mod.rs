//! Report rendering.
//!
//! Renderers consume a [`Report`] and produce the bytes of the output
//! document. The layout is shared: a title with the receipt date, the
//! merchandise table and its subtotal, an optional table of fees and
//! deposits with its subtotal, and the grand total.

mod pdf;
mod text;

pub use pdf::PdfRenderer;
pub use text::TextRenderer;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::receipt::rules::format_price;
use crate::summary::{Partition, Report};

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Trait for output document renderers.
pub trait ReportRenderer {
    /// Render the report into document bytes.
    fn render(&self, report: &Report) -> Result<Vec<u8>>;

    /// File extension of the produced document.
    fn extension(&self) -> &'static str;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// A4 PDF document.
    #[default]
    Pdf,
    /// Plain text.
    Text,
    /// Pretty-printed JSON of the report.
    Json,
}

impl ReportFormat {
    /// Create the renderer for this format.
    pub fn renderer(self, currency_suffix: &str) -> Box<dyn ReportRenderer> {
        match self {
            Self::Pdf => Box::new(PdfRenderer::new(currency_suffix)),
            Self::Text => Box::new(TextRenderer::new(currency_suffix)),
            Self::Json => Box::new(JsonRenderer),
        }
    }
}

/// Renders the report as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(report)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

pub(crate) const GRAND_TOTAL_LABEL: &str = "Kaikki yhteensä";

/// Document title with the date in Finnish notation.
pub(crate) fn title(date: NaiveDate) -> String {
    format!(
        "Ostoskuitti {} – tuotteet aakkosjärjestyksessä",
        date.format("%-d.%-m.%Y")
    )
}

/// A table ready for layout: header, body rows and subtotal line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Table {
    pub header: [String; 3],
    pub rows: Vec<[String; 3]>,
    pub subtotal: (String, String),
}

impl Table {
    fn from_partition(partition: &Partition, currency_suffix: &str) -> Self {
        let category = partition.category;
        Self {
            header: [
                category.name_column().to_string(),
                "Määrä".to_string(),
                "Hinta".to_string(),
            ],
            rows: partition
                .items
                .iter()
                .map(|item| {
                    [
                        item.name.clone(),
                        item.quantity.clone(),
                        format_price(item.price, currency_suffix),
                    ]
                })
                .collect(),
            subtotal: (
                category.subtotal_label().to_string(),
                format_price(partition.total, currency_suffix),
            ),
        }
    }
}

/// Tables in document order. The merchandise table is always present.
pub(crate) fn tables(report: &Report, currency_suffix: &str) -> Vec<Table> {
    let mut tables = vec![Table::from_partition(&report.material, currency_suffix)];
    if let Some(non_material) = &report.non_material {
        tables.push(Table::from_partition(non_material, currency_suffix));
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::ItemRecord;
    use crate::summary::aggregate;
    use rust_decimal::Decimal;

    pub(crate) fn sample_report() -> Report {
        aggregate(
            NaiveDate::from_ymd_opt(2025, 9, 5).unwrap(),
            vec![
                ItemRecord::new("RUISLEIPÄ", "1 kpl", Decimal::new(249, 2)),
                ItemRecord::new("BANAANI", "1,256 kg", Decimal::new(123, 2)),
            ],
            vec![ItemRecord::new("PANTTI", "1 kpl", Decimal::new(40, 2))],
        )
        .unwrap()
    }

    #[test]
    fn test_title() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 5).unwrap();
        assert_eq!(title(date), "Ostoskuitti 5.9.2025 – tuotteet aakkosjärjestyksessä");
    }

    #[test]
    fn test_tables() {
        let tables = tables(&sample_report(), "€");

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].header[0], "Tuote");
        assert_eq!(
            tables[0].rows,
            vec![
                ["BANAANI".to_string(), "1,256 kg".to_string(), "1,23 €".to_string()],
                ["RUISLEIPÄ".to_string(), "1 kpl".to_string(), "2,49 €".to_string()],
            ]
        );
        assert_eq!(
            tables[0].subtotal,
            ("Tuotteet yhteensä".to_string(), "3,72 €".to_string())
        );
        assert_eq!(tables[1].header[0], "Kuvaus");
        assert_eq!(tables[1].subtotal.1, "0,40 €");
    }

    #[test]
    fn test_json_renderer() {
        let bytes = JsonRenderer.render(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["date"], "2025-09-05");
        assert_eq!(value["material"]["items"][0]["name"], "BANAANI");
        assert_eq!(value["grand_total"], "4.12");
    }

    #[test]
    fn test_format_renderers() {
        assert_eq!(ReportFormat::Pdf.renderer("€").extension(), "pdf");
        assert_eq!(ReportFormat::Text.renderer("€").extension(), "txt");
        assert_eq!(ReportFormat::Json.renderer("€").extension(), "json");
    }
}
