//! Core library for grocery receipt processing.
//!
//! This crate provides:
//! - Receipt text extraction (line classification, quantity/price parsing)
//! - Material / non-material categorization and alphabetical totals
//! - A CSV cache of extracted items and date-based file discovery
//! - Report rendering (PDF, plain text, JSON)

pub mod error;
pub mod models;
pub mod receipt;
pub mod summary;
pub mod cache;
pub mod store;
pub mod report;
pub mod pipeline;

pub use error::{KuittiError, Result};
pub use models::receipt::{Category, ItemRecord};
pub use models::config::KuittiConfig;
pub use receipt::{ReceiptExtractor, ReceiptParser, CategoryRules};
pub use summary::{aggregate, Partition, Report};
pub use store::ReceiptStore;
pub use report::{JsonRenderer, PdfRenderer, ReportFormat, ReportRenderer, TextRenderer};
pub use pipeline::Pipeline;
