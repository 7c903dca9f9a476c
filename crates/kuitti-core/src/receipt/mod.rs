//! Receipt text extraction and item categorization.

mod parser;
mod categories;
pub mod rules;

pub use parser::{ExtractionResult, ReceiptParser};
pub use categories::CategoryRules;

use crate::error::ExtractionError;
use crate::models::receipt::ItemRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for receipt item extractors.
pub trait ReceiptExtractor {
    /// Extract the ordered item list from raw receipt text.
    fn extract(&self, text: &str) -> Result<Vec<ItemRecord>>;
}
