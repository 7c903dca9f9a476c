//! Line classification for receipt exports.
//!
//! A receipt export starts with a free-form header (store name, address,
//! cashier) closed by a row of dashes. The item block follows: priced item
//! lines, optionally each followed by a quantity detail line, until a
//! subtotal or total keyword ends the itemized content.

use tracing::trace;

use super::patterns::{QUANTITY_DETAIL, TRAILING_PRICE};

/// Classification of a single receipt line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Part of the header block, up to and including the first delimiter.
    Header,
    /// A product or fee line ending in its price.
    ItemWithPrice { name: &'a str, price: &'a str },
    /// Weight or count of the preceding item, with its unit price.
    QuantityDetail { quantity: &'a str, unit_price: &'a str },
    /// A subtotal or total line. Nothing after it is itemized.
    SectionTerminator,
    /// Empty or whitespace-only line.
    Blank,
    /// Anything else; skipped.
    Unrecognized,
}

/// A line of receipt text with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// Line number (1-indexed).
    pub number: usize,
    /// Line text without the line terminator.
    pub text: &'a str,
    /// Classification.
    pub kind: LineKind<'a>,
}

/// Classifies receipt lines against a delimiter and terminator keywords.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    delimiter_min_len: usize,
    terminators: Vec<String>,
}

impl LineClassifier {
    pub fn new(delimiter_min_len: usize, terminators: Vec<String>) -> Self {
        Self {
            delimiter_min_len,
            terminators,
        }
    }

    pub fn delimiter_min_len(&self) -> usize {
        self.delimiter_min_len
    }

    pub fn terminators(&self) -> &[String] {
        &self.terminators
    }

    /// Whether the line starts with a run of at least `delimiter_min_len` dashes.
    pub fn is_delimiter(&self, line: &str) -> bool {
        line.chars().take_while(|c| *c == '-').count() >= self.delimiter_min_len
    }

    /// Classify every line of `text`.
    ///
    /// Lines up to and including the first delimiter are [`LineKind::Header`].
    /// Without any delimiter the whole text is treated as the item block.
    pub fn classify_lines<'a>(&self, text: &'a str) -> Vec<RawLine<'a>> {
        let lines: Vec<&str> = text.lines().collect();
        let body_start = lines
            .iter()
            .position(|line| self.is_delimiter(line))
            .map(|i| i + 1)
            .unwrap_or(0);

        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let kind = if i < body_start {
                    LineKind::Header
                } else {
                    self.classify_body_line(line)
                };
                trace!("line {}: {:?}", i + 1, kind);
                RawLine {
                    number: i + 1,
                    text: line,
                    kind,
                }
            })
            .collect()
    }

    /// Classify a line from the item block.
    pub fn classify_body_line<'a>(&self, line: &'a str) -> LineKind<'a> {
        if line.trim().is_empty() {
            return LineKind::Blank;
        }

        // Repeated delimiters inside the item block carry no data.
        if self.is_delimiter(line) {
            return LineKind::Unrecognized;
        }

        if self.terminators.iter().any(|t| line.contains(t.as_str())) {
            return LineKind::SectionTerminator;
        }

        if let Some(caps) = TRAILING_PRICE.captures(line) {
            if let Some(price) = caps.get(1) {
                let name = line[..price.start()].trim();
                if name.is_empty() {
                    return LineKind::Unrecognized;
                }
                return LineKind::ItemWithPrice {
                    name,
                    price: price.as_str(),
                };
            }
        }

        if let Some(caps) = QUANTITY_DETAIL.captures(line) {
            if let (Some(quantity), Some(unit_price)) = (caps.get(1), caps.get(2)) {
                return LineKind::QuantityDetail {
                    quantity: quantity.as_str(),
                    unit_price: unit_price.as_str(),
                };
            }
        }

        LineKind::Unrecognized
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(20, vec!["VÄLISUMMA".to_string(), "YHTEENSÄ".to_string()])
    }
}
