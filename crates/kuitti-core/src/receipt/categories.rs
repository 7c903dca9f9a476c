//! Material / non-material item categorization.

use tracing::debug;

use crate::models::config::CategoryConfig;
use crate::models::receipt::{Category, ItemRecord};

/// Name-prefix rules that route fees, deposits and surcharges away from
/// merchandise.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    non_material_prefixes: Vec<String>,
}

impl CategoryRules {
    pub fn new(non_material_prefixes: Vec<String>) -> Self {
        Self {
            non_material_prefixes,
        }
    }

    pub fn from_config(config: &CategoryConfig) -> Self {
        Self::new(config.non_material_prefixes.clone())
    }

    /// Categorize an item name. Matching is case-sensitive and anchored at
    /// the start of the name.
    pub fn category_of(&self, name: &str) -> Category {
        if self
            .non_material_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
        {
            Category::NonMaterial
        } else {
            Category::Material
        }
    }

    /// Split items into `(material, non_material)`, keeping receipt order
    /// within each side.
    pub fn split(&self, items: Vec<ItemRecord>) -> (Vec<ItemRecord>, Vec<ItemRecord>) {
        let (non_material, material): (Vec<_>, Vec<_>) = items
            .into_iter()
            .partition(|item| self.category_of(&item.name) == Category::NonMaterial);

        debug!(
            "Split items: {} material, {} non-material",
            material.len(),
            non_material.len()
        );

        (material, non_material)
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::from_config(&CategoryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn item(name: &str, cents: i64) -> ItemRecord {
        ItemRecord::new(name, "1 kpl", Decimal::new(cents, 2))
    }

    #[test]
    fn test_deposit_is_non_material() {
        let rules = CategoryRules::default();

        assert_eq!(rules.category_of("PANTTI"), Category::NonMaterial);
        assert_eq!(rules.category_of("PANTTI 0,15"), Category::NonMaterial);
        assert_eq!(rules.category_of("PANTTIPULLO"), Category::NonMaterial);
        assert_eq!(rules.category_of("KOTIINKULJETUS"), Category::NonMaterial);
        assert_eq!(rules.category_of("MAITO"), Category::Material);
    }

    #[test]
    fn test_matching_is_case_sensitive_and_anchored() {
        let rules = CategoryRules::default();

        assert_eq!(rules.category_of("pantti"), Category::Material);
        assert_eq!(rules.category_of("OLUT PANTTI"), Category::Material);
        assert_eq!(rules.category_of(" PANTTI"), Category::Material);
    }

    #[test]
    fn test_split_preserves_order() {
        let rules = CategoryRules::default();
        let items = vec![
            item("VOI", 389),
            item("PANTTI", 40),
            item("KAHVI", 599),
            item("PAKKAUSMAKSU", 25),
            item("PANTTI", 15),
        ];

        let (material, non_material) = rules.split(items);

        assert_eq!(material, vec![item("VOI", 389), item("KAHVI", 599)]);
        assert_eq!(
            non_material,
            vec![item("PANTTI", 40), item("PAKKAUSMAKSU", 25), item("PANTTI", 15)]
        );
    }

    #[test]
    fn test_deposit_routing_ignores_price_and_quantity() {
        let rules = CategoryRules::default();
        let items = vec![
            ItemRecord::new("PANTTI", "12 kpl", Decimal::new(180, 2)),
            ItemRecord::new("PANTTI", "1 kpl", Decimal::ZERO),
            ItemRecord::new("PANTTI LASI", "0,5 kg", Decimal::new(99999, 2)),
        ];

        let (material, non_material) = rules.split(items);
        assert!(material.is_empty());
        assert_eq!(non_material.len(), 3);
    }

    #[test]
    fn test_custom_prefixes() {
        let rules = CategoryRules::new(vec!["FEE".to_string()]);

        assert_eq!(rules.category_of("FEE DELIVERY"), Category::NonMaterial);
        assert_eq!(rules.category_of("PANTTI"), Category::Material);
    }
}
