//! Domain layer for the pizzaria order flow.
//!
//! This crate provides:
//! - The static catalog of sizes and flavors
//! - Pricing rules for add-ons, delivery, and the PIX discount
//! - `PizzaBuilder`, the per-pizza state machine
//! - `OrderSession`, the event-driven aggregate that walks an order from the
//!   first pizza to payment confirmation

pub mod aggregate;
pub mod catalog;
pub mod order;
pub mod pricing;

pub use aggregate::{Aggregate, DomainEvent};
pub use catalog::{Catalog, FlavorOption, SizeOption};
pub use order::{
    AddOn, BuilderStep, FlavorId, Money, Order, OrderError, OrderSession, OrderSummary,
    PaymentInstructions, PaymentMethod, PizzaBuilder, PizzaConfig, PizzaSummary, Prompt,
    SessionEvent, SessionState, SizeId, Transition,
};
