//! Receipt item data model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single purchased line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Product or fee label, trimmed, never empty.
    pub name: String,

    /// Display quantity: a bare count or `"<number> <unit>"` with a
    /// lowercase unit (`kpl`, `kg`).
    pub quantity: String,

    /// Line price, never negative.
    pub price: Decimal,
}

impl ItemRecord {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            price,
        }
    }
}

/// Which part of the report an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Physical merchandise.
    Material,
    /// Fees, deposits and surcharges.
    NonMaterial,
}

impl Category {
    /// Finnish heading used for the category's subtotal line.
    pub fn subtotal_label(&self) -> &'static str {
        match self {
            Self::Material => "Tuotteet yhteensä",
            Self::NonMaterial => "Muut maksut yhteensä",
        }
    }

    /// Finnish heading of the first table column.
    pub fn name_column(&self) -> &'static str {
        match self {
            Self::Material => "Tuote",
            Self::NonMaterial => "Kuvaus",
        }
    }
}
