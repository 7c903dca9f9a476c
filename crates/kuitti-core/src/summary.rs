//! Alphabetical ordering and totals for the report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::KuittiError;
use crate::models::receipt::{Category, ItemRecord};
use crate::Result;

const GRAND_TOTAL: &str = "all items";

/// Items of one category, sorted by name, with their price total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub category: Category,
    pub items: Vec<ItemRecord>,
    pub total: Decimal,
}

impl Partition {
    /// Build a partition, sorting the items by name.
    pub fn new(category: Category, items: Vec<ItemRecord>) -> Result<Self> {
        let total = items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.price))
            .ok_or_else(|| KuittiError::TotalOverflow(category.subtotal_label().to_string()))?;
        let mut partition = Self {
            category,
            items,
            total,
        };
        partition.sort();
        Ok(partition)
    }

    /// Stable sort by name in code-point order.
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Everything a renderer needs for one day's receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Receipt date.
    pub date: NaiveDate,

    /// Merchandise.
    pub material: Partition,

    /// Fees, deposits and surcharges. `None` when there are none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_material: Option<Partition>,

    pub material_total: Decimal,
    pub non_material_total: Decimal,
    pub grand_total: Decimal,
}

impl Report {
    /// Total number of items across both partitions.
    pub fn item_count(&self) -> usize {
        self.material.len() + self.non_material.as_ref().map_or(0, Partition::len)
    }
}

/// Sort both categories and compute the subtotals and grand total.
pub fn aggregate(
    date: NaiveDate,
    material: Vec<ItemRecord>,
    non_material: Vec<ItemRecord>,
) -> Result<Report> {
    let material = Partition::new(Category::Material, material)?;
    let non_material = Partition::new(Category::NonMaterial, non_material)?;

    let material_total = material.total;
    let non_material_total = non_material.total;
    let grand_total = material_total
        .checked_add(non_material_total)
        .ok_or_else(|| KuittiError::TotalOverflow(GRAND_TOTAL.to_string()))?;

    debug!(
        "Totals for {}: material {}, non-material {}, grand {}",
        date, material_total, non_material_total, grand_total
    );

    Ok(Report {
        date,
        material,
        non_material: (!non_material.is_empty()).then_some(non_material),
        material_total,
        non_material_total,
        grand_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn item(name: &str, price: &str) -> ItemRecord {
        ItemRecord::new(name, "1 kpl", Decimal::from_str(price).unwrap())
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 5).unwrap()
    }

    fn names(partition: &Partition) -> Vec<&str> {
        partition.items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_sorts_by_code_point() {
        let report = aggregate(
            date(),
            vec![
                item("ÄYRÄM", "1.00"),
                item("maito", "1.00"),
                item("MAITO", "1.00"),
                item("BANAANI", "1.00"),
                item("ZUCCHINI", "1.00"),
            ],
            vec![],
        )
        .unwrap();

        assert_eq!(
            names(&report.material),
            vec!["BANAANI", "MAITO", "ZUCCHINI", "maito", "ÄYRÄM"]
        );
    }

    #[test]
    fn test_sort_is_stable() {
        let report = aggregate(
            date(),
            vec![
                ItemRecord::new("OMENA", "1 kpl", Decimal::new(100, 2)),
                ItemRecord::new("BANAANI", "1 kpl", Decimal::new(50, 2)),
                ItemRecord::new("OMENA", "2 kpl", Decimal::new(200, 2)),
            ],
            vec![],
        )
        .unwrap();

        let omenat: Vec<&str> = report
            .material
            .items
            .iter()
            .filter(|i| i.name == "OMENA")
            .map(|i| i.quantity.as_str())
            .collect();
        assert_eq!(omenat, vec!["1 kpl", "2 kpl"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut partition = Partition::new(
            Category::Material,
            vec![item("C", "3.00"), item("A", "1.00"), item("B", "2.00"), item("A", "0.50")],
        )
        .unwrap();
        let sorted = partition.clone();

        partition.sort();
        assert_eq!(partition, sorted);
        assert_eq!(partition.total, Decimal::from_str("6.50").unwrap());
    }

    #[test]
    fn test_totals_are_exact() {
        let material: Vec<ItemRecord> = (0..1000).map(|_| item("KARKKI", "0.10")).collect();
        let non_material = vec![item("PANTTI", "0.20"), item("PANTTI", "0.10")];

        let report = aggregate(date(), material, non_material).unwrap();

        assert_eq!(report.material_total, Decimal::from_str("100.00").unwrap());
        assert_eq!(report.non_material_total, Decimal::from_str("0.30").unwrap());
        assert_eq!(report.grand_total, Decimal::from_str("100.30").unwrap());
        assert_eq!(
            report.material_total + report.non_material_total,
            report.grand_total
        );
    }

    #[test]
    fn test_empty_non_material_is_omitted() {
        let report = aggregate(date(), vec![item("MAITO", "1.95")], vec![]).unwrap();

        assert!(report.non_material.is_none());
        assert_eq!(report.non_material_total, Decimal::ZERO);
        assert_eq!(report.grand_total, Decimal::from_str("1.95").unwrap());
        assert_eq!(report.item_count(), 1);
    }

    #[test]
    fn test_non_material_partition_is_sorted() {
        let report = aggregate(
            date(),
            vec![],
            vec![item("PANTTI", "0.40"), item("KOTIINKULJETUS", "9.90")],
        )
        .unwrap();

        let non_material = report.non_material.unwrap();
        assert_eq!(names(&non_material), vec!["KOTIINKULJETUS", "PANTTI"]);
        assert_eq!(non_material.total, Decimal::from_str("10.30").unwrap());
        assert_eq!(report.material_total, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let huge = "50000000000000000000000000000.00";

        let err = aggregate(date(), vec![item("A", huge), item("B", huge)], vec![]).unwrap_err();
        assert!(matches!(err, KuittiError::TotalOverflow(_)));

        let err = aggregate(date(), vec![item("A", huge)], vec![item("PANTTI", huge)]).unwrap_err();
        assert!(matches!(err, KuittiError::TotalOverflow(ref what) if what == "all items"));
    }
}
