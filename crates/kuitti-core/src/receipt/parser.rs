//! Receipt item extraction.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::receipt::ItemRecord;

use super::rules::{
    amounts::{format_quantity, parse_price, parse_quantity_number},
    lines::{LineClassifier, LineKind},
    patterns::QUANTITY_FIELD,
};
use super::{ReceiptExtractor, Result};

/// Result of receipt extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    /// Extracted items in receipt order.
    pub items: Vec<ItemRecord>,
    /// Lenient recoveries made while reading the item block.
    pub warnings: Vec<String>,
    /// Number of lines read before the section terminator (or end of text).
    pub lines_scanned: usize,
    /// Whether a section terminator was reached.
    pub terminated: bool,
}

/// An item whose quantity has not been normalized yet.
struct PendingItem<'a> {
    name: &'a str,
    quantity: &'a str,
    price: Decimal,
}

/// Line-oriented receipt parser.
#[derive(Debug, Clone, Default)]
pub struct ReceiptParser {
    classifier: LineClassifier,
}

impl ReceiptParser {
    /// Create a new parser with default delimiter and terminators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            classifier: LineClassifier::new(config.delimiter_min_len, config.terminators.clone()),
        }
    }

    /// Set the keywords that end the itemized section.
    pub fn with_terminators(mut self, terminators: Vec<String>) -> Self {
        self.classifier = LineClassifier::new(self.delimiter_min_len(), terminators);
        self
    }

    /// Set the minimum dash run that closes the header.
    pub fn with_delimiter_min_len(mut self, len: usize) -> Self {
        self.classifier = LineClassifier::new(len, self.terminators().to_vec());
        self
    }

    fn delimiter_min_len(&self) -> usize {
        self.classifier.delimiter_min_len()
    }

    fn terminators(&self) -> &[String] {
        self.classifier.terminators()
    }

    /// Parse receipt text into items.
    ///
    /// A quantity detail line amends the most recently emitted item. If more
    /// than one detail line follows an item, the last one wins.
    pub fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let mut pending: Vec<PendingItem<'_>> = Vec::new();
        let mut current: Option<usize> = None;
        let mut amended: Option<usize> = None;
        let mut warnings = Vec::new();
        let mut lines_scanned = 0;
        let mut terminated = false;
        let mut unrecognized = 0;

        for line in self.classifier.classify_lines(text) {
            lines_scanned += 1;

            match line.kind {
                LineKind::Header | LineKind::Blank => {}
                LineKind::Unrecognized => unrecognized += 1,
                LineKind::SectionTerminator => {
                    terminated = true;
                    break;
                }
                LineKind::ItemWithPrice { name, price } => {
                    let price = parse_price(price)?;
                    pending.push(PendingItem {
                        name,
                        quantity: "1",
                        price,
                    });
                    current = Some(pending.len() - 1);
                }
                LineKind::QuantityDetail { quantity, .. } => {
                    let Some(index) = current else {
                        warnings.push(format!(
                            "line {}: quantity detail without a preceding item",
                            line.number
                        ));
                        continue;
                    };

                    validate_quantity(quantity)?;

                    if amended == Some(index) {
                        warnings.push(format!(
                            "line {}: quantity of {:?} given twice, keeping the last",
                            line.number, pending[index].name
                        ));
                    }
                    pending[index].quantity = quantity;
                    amended = Some(index);
                }
            }
        }

        let items: Vec<ItemRecord> = pending
            .into_iter()
            .map(|item| ItemRecord::new(item.name, format_quantity(item.quantity), item.price))
            .collect();

        debug!(
            "Scanned {} lines ({} unrecognized), terminator reached: {}",
            lines_scanned, unrecognized, terminated
        );
        info!("Extracted {} items from receipt", items.len());

        Ok(ExtractionResult {
            items,
            warnings,
            lines_scanned,
            terminated,
        })
    }
}

/// Check that the numeric part of a quantity field parses.
fn validate_quantity(quantity: &str) -> Result<()> {
    let number = QUANTITY_FIELD
        .captures(quantity.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(quantity);
    parse_quantity_number(number).map(|_| ())
}

impl ReceiptExtractor for ReceiptParser {
    fn extract(&self, text: &str) -> Result<Vec<ItemRecord>> {
        self.parse(text).map(|r| r.items)
    }
}
