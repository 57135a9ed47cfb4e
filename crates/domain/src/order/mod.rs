//! Pizza builder, order session, and related types.

mod builder;
mod events;
mod payment;
mod session;
mod state;
mod summary;
mod value_objects;

pub use builder::{PizzaBuilder, PizzaConfig};
pub use events::{
    DeliveryChosenData, MorePizzasAnsweredData, OrderFinalizedData, PaymentAnsweredData,
    PaymentSelectedData, PizzaAddedData, PizzaStartedData, SessionEvent, SessionResetData,
};
pub use payment::{CARD_CHECKOUT_URL, PIX_KEY, PaymentInstructions, PaymentMethod};
pub use session::{DELIVERY_MESSAGE, Order, OrderSession, PICKUP_MESSAGE, Transition};
pub use state::{BuilderStep, Prompt, SessionState};
pub use summary::{OrderLine, OrderSummary, PizzaSummary};
pub use value_objects::{FlavorId, Money, SizeId};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A per-pizza extra with a quantity limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOn {
    Soda,
    StuffedCrust,
}

impl std::fmt::Display for AddOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddOn::Soda => write!(f, "soda"),
            AddOn::StuffedCrust => write!(f, "stuffed crust"),
        }
    }
}

/// Which catalog a rejected id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Size,
    Flavor,
}

impl std::fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionKind::Size => write!(f, "size"),
            SelectionKind::Flavor => write!(f, "flavor"),
        }
    }
}

/// The state a rejected operation was attempted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTag {
    Session(SessionState),
    Builder(BuilderStep),
}

impl std::fmt::Display for StateTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateTag::Session(state) => write!(f, "{state}"),
            StateTag::Builder(step) => write!(f, "{step}"),
        }
    }
}

/// Errors that can occur while building a pizza or an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The id is not in the catalog.
    #[error("Invalid selection: no {kind} with id {id}")]
    InvalidSelection { kind: SelectionKind, id: u32 },

    /// The operation is not valid in the current state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidTransition {
        current_state: StateTag,
        action: &'static str,
    },

    /// An add-on is already at its per-pizza limit. Nothing was changed.
    #[error("{}", limit_message(.add_on))]
    LimitReached { add_on: AddOn },
}

impl OrderError {
    /// Returns true for soft notices that leave the state untouched and need
    /// no corrective action beyond telling the customer.
    pub fn is_notice(&self) -> bool {
        matches!(self, OrderError::LimitReached { .. })
    }

    pub(crate) fn session_transition(current_state: SessionState, action: &'static str) -> Self {
        OrderError::InvalidTransition {
            current_state: StateTag::Session(current_state),
            action,
        }
    }

    pub(crate) fn builder_transition(current_step: BuilderStep, action: &'static str) -> Self {
        OrderError::InvalidTransition {
            current_state: StateTag::Builder(current_step),
            action,
        }
    }
}

fn limit_message(add_on: &AddOn) -> &'static str {
    match add_on {
        AddOn::Soda => "You can only add up to 2 sodas per pizza.",
        AddOn::StuffedCrust => "You can only add 1 stuffed crust per pizza.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_reached_messages() {
        let soda = OrderError::LimitReached { add_on: AddOn::Soda };
        assert_eq!(soda.to_string(), "You can only add up to 2 sodas per pizza.");
        assert!(soda.is_notice());

        let crust = OrderError::LimitReached {
            add_on: AddOn::StuffedCrust,
        };
        assert_eq!(crust.to_string(), "You can only add 1 stuffed crust per pizza.");
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = OrderError::session_transition(SessionState::Idle, "confirm payment");
        assert_eq!(
            err.to_string(),
            "Invalid state transition: cannot confirm payment from Idle state"
        );
        assert!(!err.is_notice());
    }

    #[test]
    fn test_invalid_selection_message() {
        let err = OrderError::InvalidSelection {
            kind: SelectionKind::Flavor,
            id: 99,
        };
        assert_eq!(err.to_string(), "Invalid selection: no flavor with id 99");
    }
}
