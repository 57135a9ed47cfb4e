//! Static menu data: pizza sizes and flavors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::order::{FlavorId, Money, SizeId};

/// A pizza size tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub id: SizeId,
    pub name: String,
    pub diameter_cm: u32,
    pub base_price: Money,
    /// How many flavor slots a pizza of this size has (1 to 4).
    pub max_flavors: u8,
}

impl SizeOption {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        diameter_cm: u32,
        base_price: Money,
        max_flavors: u8,
    ) -> Self {
        Self {
            id: SizeId::new(id),
            name: name.into(),
            diameter_cm,
            base_price,
            max_flavors,
        }
    }
}

impl std::fmt::Display for SizeOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} ({}cm) - {} ({} flavors)",
            self.id, self.name, self.diameter_cm, self.base_price, self.max_flavors
        )
    }
}

/// A selectable flavor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorOption {
    pub id: FlavorId,
    pub name: String,
}

impl FlavorOption {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: FlavorId::new(id),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for FlavorOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id, self.name)
    }
}

/// Read-only catalog of sizes and flavors, keyed and ordered by id.
///
/// Built once at startup and shared between sessions behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    sizes: BTreeMap<SizeId, SizeOption>,
    flavors: BTreeMap<FlavorId, FlavorOption>,
}

impl Catalog {
    /// Builds a catalog from arbitrary entries. Later duplicates of an id win.
    pub fn new(
        sizes: impl IntoIterator<Item = SizeOption>,
        flavors: impl IntoIterator<Item = FlavorOption>,
    ) -> Self {
        Self {
            sizes: sizes.into_iter().map(|s| (s.id, s)).collect(),
            flavors: flavors.into_iter().map(|f| (f.id, f)).collect(),
        }
    }

    /// The shop's fixed menu: four sizes and fifteen flavors.
    pub fn standard() -> Self {
        let sizes = [
            SizeOption::new(1, "Pequena Mimo", 40, Money::from_cents(5990), 2),
            SizeOption::new(2, "Média Saborosa", 50, Money::from_cents(7990), 3),
            SizeOption::new(3, "Grande Tentação", 60, Money::from_cents(9990), 4),
            SizeOption::new(4, "Gigante Supremo", 70, Money::from_cents(12990), 4),
        ];

        let flavors = [
            "Margherita Clássica",
            "Pepperoni Picante",
            "Frango com Catupiry",
            "Quatro Queijos",
            "Portuguesa Tradicional",
            "Calabresa Apimentada",
            "Vegetariana Garden",
            "Chocolate com Morango",
            "Atum Especial",
            "Bacon Crocante",
            "Camarão Deluxe",
            "Cheddar com Cebola",
            "Brócolis com Alho",
            "Marguerita Vegana",
            "Carne Seca com Catupiry",
        ];

        Self::new(
            sizes,
            (1u32..)
                .zip(flavors)
                .map(|(id, name)| FlavorOption::new(id, name)),
        )
    }

    /// Sizes in id order.
    pub fn sizes(&self) -> impl Iterator<Item = &SizeOption> {
        self.sizes.values()
    }

    /// Flavors in id order.
    pub fn flavors(&self) -> impl Iterator<Item = &FlavorOption> {
        self.flavors.values()
    }

    pub fn size(&self, id: SizeId) -> Option<&SizeOption> {
        self.sizes.get(&id)
    }

    pub fn flavor(&self, id: FlavorId) -> Option<&FlavorOption> {
        self.flavors.get(&id)
    }

    /// One line per size, as shown on the size selection step.
    pub fn menu(&self) -> String {
        self.sizes()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_has_four_sizes_and_fifteen_flavors() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.sizes().count(), 4);
        assert_eq!(catalog.flavors().count(), 15);
    }

    #[test]
    fn test_sizes_are_ordered_by_id() {
        let catalog = Catalog::standard();
        let ids: Vec<u32> = catalog.sizes().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_size_lookup() {
        let catalog = Catalog::standard();
        let size = catalog.size(SizeId::new(3)).unwrap();
        assert_eq!(size.name, "Grande Tentação");
        assert_eq!(size.diameter_cm, 60);
        assert_eq!(size.base_price, Money::from_cents(9990));
        assert_eq!(size.max_flavors, 4);

        assert!(catalog.size(SizeId::new(0)).is_none());
        assert!(catalog.size(SizeId::new(5)).is_none());
    }

    #[test]
    fn test_flavor_lookup() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.flavor(FlavorId::new(1)).unwrap().name,
            "Margherita Clássica"
        );
        assert_eq!(
            catalog.flavor(FlavorId::new(15)).unwrap().name,
            "Carne Seca com Catupiry"
        );
        assert!(catalog.flavor(FlavorId::new(16)).is_none());
    }

    #[test]
    fn test_max_flavors_within_bounds() {
        let catalog = Catalog::standard();
        assert!(catalog.sizes().all(|s| (1..=4).contains(&s.max_flavors)));
    }

    #[test]
    fn test_menu_rendering() {
        let menu = Catalog::standard().menu();
        let first = menu.lines().next().unwrap();
        assert_eq!(first, "1 - Pequena Mimo (40cm) - R$59.90 (2 flavors)");
        assert_eq!(menu.lines().count(), 4);
    }
}
