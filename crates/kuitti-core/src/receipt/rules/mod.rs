//! Rule-based line handling for grocery receipt exports.

pub mod amounts;
pub mod lines;
pub mod patterns;

pub use amounts::{format_amount, format_price, format_quantity, parse_price};
pub use lines::{LineClassifier, LineKind, RawLine};
pub use patterns::*;
