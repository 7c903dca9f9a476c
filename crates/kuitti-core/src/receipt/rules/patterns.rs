//! Common regex patterns for receipt line classification.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Priced item line: "MAITO 1L                1,95"
    pub static ref TRAILING_PRICE: Regex = Regex::new(
        r"\s+(\d+,\d{2})$"
    ).unwrap();

    // Quantity detail line: "   0,512 KG    3,90 €/KG"
    pub static ref QUANTITY_DETAIL: Regex = Regex::new(
        r"^\s+(\d+(?:,\d+)?\s+(?:KG|KPL))\s+(\d+,\d{2})\s+€/(?:KG|KPL)"
    ).unwrap();

    // Number and unit of a quantity field
    pub static ref QUANTITY_FIELD: Regex = Regex::new(
        r"^(\d+(?:,\d+)?)\s+(\S+)$"
    ).unwrap();
}
