//! Renderable views of a pizza and of a whole order.

use serde::{Deserialize, Serialize};

use crate::catalog::{FlavorOption, SizeOption};
use crate::pricing::{self, DELIVERY_FEE, SODA_PRICE, STUFFED_CRUST_PRICE};

use super::{Money, PizzaConfig};

/// What the add-ons screen shows for the pizza being built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaSummary {
    pub size_name: String,
    pub base_price: Money,
    pub flavors: Vec<String>,
    pub soda_count: u8,
    pub has_stuffed_crust: bool,
    pub price: Money,
}

impl PizzaSummary {
    pub fn new(
        size: &SizeOption,
        flavors: &[FlavorOption],
        soda_count: u8,
        has_stuffed_crust: bool,
    ) -> Self {
        Self {
            size_name: size.name.clone(),
            base_price: size.base_price,
            flavors: flavors.iter().map(|f| f.name.clone()).collect(),
            soda_count,
            has_stuffed_crust,
            price: pricing::pizza_price(size, soda_count, has_stuffed_crust),
        }
    }
}

impl std::fmt::Display for PizzaSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} - {}", self.size_name, self.base_price)?;
        write!(f, "Flavors:")?;
        for flavor in &self.flavors {
            write!(f, "\n- {flavor}")?;
        }
        if self.soda_count > 0 {
            write!(f, "\nSoda(s): {} x {}", self.soda_count, SODA_PRICE)?;
        }
        if self.has_stuffed_crust {
            write!(f, "\nStuffed crust: {STUFFED_CRUST_PRICE}")?;
        }
        write!(f, "\nPizza total: {}", self.price)
    }
}

/// One pizza line in an order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub description: String,
    pub price: Money,
}

/// Order-level view: one line per pizza, delivery, and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub has_delivery: bool,
    pub subtotal: Money,
    pub total: Money,
}

impl OrderSummary {
    pub fn new(pizzas: &[PizzaConfig], has_delivery: bool) -> Self {
        let subtotal: Money = pizzas.iter().map(|p| p.price).sum();
        Self {
            lines: pizzas
                .iter()
                .map(|p| OrderLine {
                    description: p.size.name.clone(),
                    price: p.price,
                })
                .collect(),
            has_delivery,
            subtotal,
            total: pricing::order_total(subtotal, has_delivery),
        }
    }
}

impl std::fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{} - {}", line.description, line.price)?;
        }
        if self.has_delivery {
            writeln!(f, "Delivery - {DELIVERY_FEE}")?;
        }
        write!(f, "\nSubtotal: {}\nTOTAL: {}", self.subtotal, self.total)
    }
}
