//! Order session domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::{Money, PaymentInstructions, PaymentMethod, PizzaConfig};

/// Events that can occur on an order session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SessionEvent {
    /// A fresh pizza builder was opened.
    PizzaStarted(PizzaStartedData),

    /// A finished pizza was appended to the order.
    PizzaAdded(PizzaAddedData),

    /// Customer answered whether to add another pizza.
    MorePizzasAnswered(MorePizzasAnsweredData),

    /// Customer chose between delivery and pickup.
    DeliveryChosen(DeliveryChosenData),

    /// Customer picked a payment method and was shown instructions.
    PaymentSelected(PaymentSelectedData),

    /// Customer answered whether the payment went through.
    PaymentAnswered(PaymentAnsweredData),

    /// Order was confirmed.
    OrderFinalized(OrderFinalizedData),

    /// Session was cleared for the next order.
    SessionReset(SessionResetData),
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::PizzaStarted(_) => "PizzaStarted",
            SessionEvent::PizzaAdded(_) => "PizzaAdded",
            SessionEvent::MorePizzasAnswered(_) => "MorePizzasAnswered",
            SessionEvent::DeliveryChosen(_) => "DeliveryChosen",
            SessionEvent::PaymentSelected(_) => "PaymentSelected",
            SessionEvent::PaymentAnswered(_) => "PaymentAnswered",
            SessionEvent::OrderFinalized(_) => "OrderFinalized",
            SessionEvent::SessionReset(_) => "SessionReset",
        }
    }
}

/// Data for PizzaStarted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaStartedData {
    pub started_at: DateTime<Utc>,
}

/// Data for PizzaAdded event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaAddedData {
    pub pizza: PizzaConfig,
    pub added_at: DateTime<Utc>,
}

/// Data for MorePizzasAnswered event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorePizzasAnsweredData {
    pub wants_more: bool,
    pub answered_at: DateTime<Utc>,
}

/// Data for DeliveryChosen event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryChosenData {
    pub wants_delivery: bool,

    /// Fee charged; zero for pickup.
    pub fee: Money,

    pub chosen_at: DateTime<Utc>,
}

/// Data for PaymentSelected event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSelectedData {
    pub instructions: PaymentInstructions,
    pub selected_at: DateTime<Utc>,
}

/// Data for PaymentAnswered event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAnsweredData {
    pub method: PaymentMethod,
    pub confirmed: bool,
    pub answered_at: DateTime<Utc>,
}

/// Data for OrderFinalized event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFinalizedData {
    pub method: PaymentMethod,

    /// Total before the payment discount.
    pub total: Money,

    /// Amount actually paid.
    pub amount_paid: Money,

    pub has_delivery: bool,
    pub pizza_count: usize,
    pub finalized_at: DateTime<Utc>,
}

/// Data for SessionReset event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResetData {
    pub reset_at: DateTime<Utc>,
}

// Constructors
impl SessionEvent {
    pub fn pizza_started() -> Self {
        SessionEvent::PizzaStarted(PizzaStartedData {
            started_at: Utc::now(),
        })
    }

    pub fn pizza_added(pizza: PizzaConfig) -> Self {
        SessionEvent::PizzaAdded(PizzaAddedData {
            pizza,
            added_at: Utc::now(),
        })
    }

    pub fn more_pizzas_answered(wants_more: bool) -> Self {
        SessionEvent::MorePizzasAnswered(MorePizzasAnsweredData {
            wants_more,
            answered_at: Utc::now(),
        })
    }

    pub fn delivery_chosen(wants_delivery: bool, fee: Money) -> Self {
        SessionEvent::DeliveryChosen(DeliveryChosenData {
            wants_delivery,
            fee,
            chosen_at: Utc::now(),
        })
    }

    pub fn payment_selected(instructions: PaymentInstructions) -> Self {
        SessionEvent::PaymentSelected(PaymentSelectedData {
            instructions,
            selected_at: Utc::now(),
        })
    }

    pub fn payment_answered(method: PaymentMethod, confirmed: bool) -> Self {
        SessionEvent::PaymentAnswered(PaymentAnsweredData {
            method,
            confirmed,
            answered_at: Utc::now(),
        })
    }

    pub fn order_finalized(
        instructions: &PaymentInstructions,
        has_delivery: bool,
        pizza_count: usize,
    ) -> Self {
        SessionEvent::OrderFinalized(OrderFinalizedData {
            method: instructions.method,
            total: instructions.total,
            amount_paid: instructions.amount_due,
            has_delivery,
            pizza_count,
            finalized_at: Utc::now(),
        })
    }

    pub fn session_reset() -> Self {
        SessionEvent::SessionReset(SessionResetData {
            reset_at: Utc::now(),
        })
    }
}
