//! Step-by-step configuration of a single pizza.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, FlavorOption, SizeOption};
use crate::pricing::{self, MAX_SODAS_PER_PIZZA};

use super::{
    AddOn, BuilderStep, FlavorId, Money, OrderError, PizzaSummary, Prompt, SelectionKind, SizeId,
};

/// A finished pizza, as appended to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaConfig {
    pub size: SizeOption,

    /// Chosen flavors in slot order. Repeats are allowed.
    pub flavors: Vec<FlavorOption>,

    pub soda_count: u8,

    pub has_stuffed_crust: bool,

    /// Size base price plus add-ons.
    pub price: Money,
}

impl PizzaConfig {
    pub fn summary(&self) -> PizzaSummary {
        PizzaSummary::new(&self.size, &self.flavors, self.soda_count, self.has_stuffed_crust)
    }
}

/// Accumulates one pizza's configuration.
///
/// Walks `ChoosingSize → ChoosingFlavor(1..=max) → ChoosingAddOns → Complete`.
/// Rejected operations leave the builder exactly as it was.
#[derive(Debug, Clone)]
pub struct PizzaBuilder {
    catalog: Arc<Catalog>,
    step: BuilderStep,
    size: Option<SizeOption>,
    flavors: Vec<FlavorOption>,
    soda_count: u8,
    has_stuffed_crust: bool,
}

// Query methods
impl PizzaBuilder {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            step: BuilderStep::ChoosingSize,
            size: None,
            flavors: Vec::new(),
            soda_count: 0,
            has_stuffed_crust: false,
        }
    }

    pub fn step(&self) -> BuilderStep {
        self.step
    }

    pub fn size(&self) -> Option<&SizeOption> {
        self.size.as_ref()
    }

    pub fn flavors(&self) -> &[FlavorOption] {
        &self.flavors
    }

    pub fn soda_count(&self) -> u8 {
        self.soda_count
    }

    pub fn has_stuffed_crust(&self) -> bool {
        self.has_stuffed_crust
    }

    /// Running price; zero until a size is chosen.
    pub fn price(&self) -> Money {
        self.size
            .as_ref()
            .map(|size| pricing::pizza_price(size, self.soda_count, self.has_stuffed_crust))
            .unwrap_or_default()
    }

    /// What to ask next, or `None` once the pizza is complete.
    pub fn prompt(&self) -> Option<Prompt> {
        match self.step {
            BuilderStep::ChoosingSize => Some(Prompt::ChooseSize),
            BuilderStep::ChoosingFlavor { slot, of } => Some(Prompt::ChooseFlavor { slot, of }),
            BuilderStep::ChoosingAddOns => Some(Prompt::ChooseAddOns),
            BuilderStep::Complete => None,
        }
    }

    /// Renderable view of the pizza so far; `None` until a size is chosen.
    pub fn summary(&self) -> Option<PizzaSummary> {
        self.size.as_ref().map(|size| {
            PizzaSummary::new(size, &self.flavors, self.soda_count, self.has_stuffed_crust)
        })
    }
}

// Command methods
impl PizzaBuilder {
    /// Picks the size and opens the first flavor slot.
    pub fn choose_size(&mut self, size_id: SizeId) -> Result<BuilderStep, OrderError> {
        if self.step != BuilderStep::ChoosingSize {
            return Err(OrderError::builder_transition(self.step, "choose size"));
        }

        let size = self
            .catalog
            .size(size_id)
            .cloned()
            .ok_or(OrderError::InvalidSelection {
                kind: SelectionKind::Size,
                id: size_id.get(),
            })?;

        self.step = if size.max_flavors == 0 {
            BuilderStep::ChoosingAddOns
        } else {
            BuilderStep::ChoosingFlavor {
                slot: 1,
                of: size.max_flavors,
            }
        };
        self.size = Some(size);
        Ok(self.step)
    }

    /// Fills the current flavor slot and advances to the next one, or to the
    /// add-ons once every slot is filled.
    pub fn choose_flavor(&mut self, flavor_id: FlavorId) -> Result<BuilderStep, OrderError> {
        let BuilderStep::ChoosingFlavor { slot, of } = self.step else {
            return Err(OrderError::builder_transition(self.step, "choose flavor"));
        };

        let flavor = self
            .catalog
            .flavor(flavor_id)
            .cloned()
            .ok_or(OrderError::InvalidSelection {
                kind: SelectionKind::Flavor,
                id: flavor_id.get(),
            })?;

        self.flavors.push(flavor);
        self.step = if slot < of {
            BuilderStep::ChoosingFlavor { slot: slot + 1, of }
        } else {
            BuilderStep::ChoosingAddOns
        };
        Ok(self.step)
    }

    /// Adds one soda, up to two per pizza. Returns the new running price.
    pub fn add_soda(&mut self) -> Result<Money, OrderError> {
        self.ensure_add_ons("add soda")?;
        if self.soda_count >= MAX_SODAS_PER_PIZZA {
            return Err(OrderError::LimitReached {
                add_on: AddOn::Soda,
            });
        }

        self.soda_count += 1;
        Ok(self.price())
    }

    /// Adds the stuffed crust, once per pizza. Returns the new running price.
    pub fn add_stuffed_crust(&mut self) -> Result<Money, OrderError> {
        self.ensure_add_ons("add stuffed crust")?;
        if self.has_stuffed_crust {
            return Err(OrderError::LimitReached {
                add_on: AddOn::StuffedCrust,
            });
        }

        self.has_stuffed_crust = true;
        Ok(self.price())
    }

    /// Finishes the pizza. The builder accepts nothing afterwards.
    pub fn complete(&mut self) -> Result<PizzaConfig, OrderError> {
        self.ensure_add_ons("complete pizza")?;
        let Some(size) = self.size.clone() else {
            return Err(OrderError::builder_transition(self.step, "complete pizza"));
        };

        self.step = BuilderStep::Complete;
        Ok(PizzaConfig {
            price: self.price(),
            size,
            flavors: self.flavors.clone(),
            soda_count: self.soda_count,
            has_stuffed_crust: self.has_stuffed_crust,
        })
    }

    fn ensure_add_ons(&self, action: &'static str) -> Result<(), OrderError> {
        if self.step == BuilderStep::ChoosingAddOns {
            Ok(())
        } else {
            Err(OrderError::builder_transition(self.step, action))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> PizzaBuilder {
        PizzaBuilder::new(Arc::new(Catalog::standard()))
    }

    fn builder_at_add_ons(size: u32, flavors: &[u32]) -> PizzaBuilder {
        let mut builder = builder();
        builder.choose_size(SizeId::new(size)).unwrap();
        for id in flavors {
            builder.choose_flavor(FlavorId::new(*id)).unwrap();
        }
        assert_eq!(builder.step(), BuilderStep::ChoosingAddOns);
        builder
    }

    #[test]
    fn test_new_builder_waits_for_size() {
        let builder = builder();
        assert_eq!(builder.step(), BuilderStep::ChoosingSize);
        assert_eq!(builder.prompt(), Some(Prompt::ChooseSize));
        assert!(builder.price().is_zero());
        assert!(builder.summary().is_none());
    }

    #[test]
    fn test_choose_size_opens_first_flavor_slot() {
        let mut builder = builder();
        let step = builder.choose_size(SizeId::new(2)).unwrap();
        assert_eq!(step, BuilderStep::ChoosingFlavor { slot: 1, of: 3 });
        assert_eq!(builder.price(), Money::from_cents(7990));
    }

    #[test]
    fn test_choose_unknown_size_fails_and_keeps_step() {
        let mut builder = builder();
        let result = builder.choose_size(SizeId::new(9));
        assert_eq!(
            result,
            Err(OrderError::InvalidSelection {
                kind: SelectionKind::Size,
                id: 9
            })
        );
        assert_eq!(builder.step(), BuilderStep::ChoosingSize);
    }

    #[test]
    fn test_flavor_slots_advance_until_full() {
        let mut builder = builder();
        builder.choose_size(SizeId::new(3)).unwrap();

        for slot in 1..=4u8 {
            assert_eq!(builder.prompt(), Some(Prompt::ChooseFlavor { slot, of: 4 }));
            builder.choose_flavor(FlavorId::new(5)).unwrap();
        }

        assert_eq!(builder.step(), BuilderStep::ChoosingAddOns);
        assert_eq!(builder.flavors().len(), 4);
        assert!(builder.flavors().iter().all(|f| f.name == "Portuguesa Tradicional"));
    }

    #[test]
    fn test_choose_unknown_flavor_fails_and_keeps_slot() {
        let mut builder = builder();
        builder.choose_size(SizeId::new(1)).unwrap();
        builder.choose_flavor(FlavorId::new(1)).unwrap();

        let result = builder.choose_flavor(FlavorId::new(0));
        assert!(matches!(result, Err(OrderError::InvalidSelection { .. })));
        assert_eq!(builder.step(), BuilderStep::ChoosingFlavor { slot: 2, of: 2 });
        assert_eq!(builder.flavors().len(), 1);
    }

    #[test]
    fn test_flavor_before_size_is_invalid_transition() {
        let mut builder = builder();
        let result = builder.choose_flavor(FlavorId::new(1));
        assert!(matches!(result, Err(OrderError::InvalidTransition { .. })));
    }

    #[test]
    fn test_add_ons_before_flavors_are_invalid_transitions() {
        let mut builder = builder();
        builder.choose_size(SizeId::new(1)).unwrap();

        assert!(matches!(
            builder.add_soda(),
            Err(OrderError::InvalidTransition { .. })
        ));
        assert!(matches!(
            builder.add_stuffed_crust(),
            Err(OrderError::InvalidTransition { .. })
        ));
        assert!(matches!(
            builder.complete(),
            Err(OrderError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_third_soda_hits_limit() {
        let mut builder = builder_at_add_ons(1, &[1, 2]);
        builder.add_soda().unwrap();
        builder.add_soda().unwrap();

        let result = builder.add_soda();
        assert_eq!(
            result,
            Err(OrderError::LimitReached {
                add_on: AddOn::Soda
            })
        );
        assert_eq!(builder.soda_count(), 2);
        assert_eq!(builder.price(), Money::from_cents(5990 + 3000));
    }

    #[test]
    fn test_second_crust_hits_limit() {
        let mut builder = builder_at_add_ons(1, &[1, 2]);
        assert_eq!(builder.add_stuffed_crust().unwrap(), Money::from_cents(6990));

        let result = builder.add_stuffed_crust();
        assert!(matches!(
            result,
            Err(OrderError::LimitReached {
                add_on: AddOn::StuffedCrust
            })
        ));
        assert_eq!(builder.price(), Money::from_cents(6990));
    }

    #[test]
    fn test_price_invariant_after_every_mutation() {
        for sodas in 0..=2u8 {
            for crust in [false, true] {
                let mut builder = builder_at_add_ons(4, &[1, 2, 3, 4]);
                for _ in 0..sodas {
                    builder.add_soda().unwrap();
                }
                if crust {
                    builder.add_stuffed_crust().unwrap();
                }

                let expected = 12990 + 1500 * i64::from(sodas) + if crust { 1000 } else { 0 };
                assert_eq!(builder.price().cents(), expected);

                let pizza = builder.complete().unwrap();
                assert_eq!(pizza.price.cents(), expected);
                assert_eq!(pizza.soda_count, sodas);
                assert_eq!(pizza.has_stuffed_crust, crust);
            }
        }
    }

    #[test]
    fn test_complete_fills_every_flavor_slot() {
        let catalog = Catalog::standard();
        for size in catalog.sizes() {
            let mut builder = builder();
            builder.choose_size(size.id).unwrap();
            while let BuilderStep::ChoosingFlavor { slot, .. } = builder.step() {
                builder.choose_flavor(FlavorId::new(u32::from(slot))).unwrap();
            }
            let pizza = builder.complete().unwrap();
            assert_eq!(pizza.flavors.len(), usize::from(size.max_flavors));
            assert_eq!(pizza.price, size.base_price);
        }
    }

    #[test]
    fn test_completed_builder_rejects_everything() {
        let mut builder = builder_at_add_ons(1, &[1, 2]);
        builder.complete().unwrap();

        assert_eq!(builder.step(), BuilderStep::Complete);
        assert_eq!(builder.prompt(), None);
        assert!(builder.add_soda().is_err());
        assert!(builder.complete().is_err());
        assert!(builder.choose_size(SizeId::new(1)).is_err());
    }

    #[test]
    fn test_size_without_flavor_slots_skips_to_add_ons() {
        let catalog = Catalog::new(
            [SizeOption::new(7, "Broto", 25, Money::from_cents(2990), 0)],
            [FlavorOption::new(1, "Margherita Clássica")],
        );
        let mut builder = PizzaBuilder::new(Arc::new(catalog));
        assert_eq!(
            builder.choose_size(SizeId::new(7)).unwrap(),
            BuilderStep::ChoosingAddOns
        );
    }
}
