//! Order session and pizza builder state machines.

use serde::{Deserialize, Serialize};

use super::{Money, PaymentMethod};

/// The state of an order session.
///
/// State transitions:
/// ```text
/// Idle ──► BuildingPizza ──► AskMoreOrDeliver ──► ChoosingDelivery ──► ChoosingPayment
///               ▲                   │                                     ▲     │
///               └───── more ────────┘                            declined │     ▼
///                                                  AwaitingPaymentConfirmation ──► Finalized
///
/// Finalized ──reset──► Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SessionState {
    /// Waiting for the customer to start an order.
    #[default]
    Idle,

    /// A pizza builder is active.
    BuildingPizza,

    /// A pizza was just added; asking whether to add another.
    AskMoreOrDeliver,

    /// Asking whether the order should be delivered.
    ChoosingDelivery,

    /// Asking for the payment method.
    ChoosingPayment,

    /// Payment instructions shown, waiting for the customer to confirm.
    AwaitingPaymentConfirmation,

    /// Order confirmed (terminal until reset).
    Finalized,
}

impl SessionState {
    pub fn can_start_pizza(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    /// Returns true if builder operations are accepted in this state.
    pub fn can_build(&self) -> bool {
        matches!(self, SessionState::BuildingPizza)
    }

    pub fn can_continue_or_deliver(&self) -> bool {
        matches!(self, SessionState::AskMoreOrDeliver)
    }

    pub fn can_set_delivery(&self) -> bool {
        matches!(self, SessionState::ChoosingDelivery)
    }

    pub fn can_select_payment(&self) -> bool {
        matches!(self, SessionState::ChoosingPayment)
    }

    pub fn can_confirm_payment(&self) -> bool {
        matches!(self, SessionState::AwaitingPaymentConfirmation)
    }

    pub fn can_reset(&self) -> bool {
        matches!(self, SessionState::Finalized)
    }

    /// Returns true once the order has been confirmed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Finalized)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::BuildingPizza => "BuildingPizza",
            SessionState::AskMoreOrDeliver => "AskMoreOrDeliver",
            SessionState::ChoosingDelivery => "ChoosingDelivery",
            SessionState::ChoosingPayment => "ChoosingPayment",
            SessionState::AwaitingPaymentConfirmation => "AwaitingPaymentConfirmation",
            SessionState::Finalized => "Finalized",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The step a pizza builder is on.
///
/// ```text
/// ChoosingSize ──► ChoosingFlavor(1..=of) ──► ChoosingAddOns ──► Complete
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuilderStep {
    #[default]
    ChoosingSize,

    /// Choosing the flavor for slot `slot` out of `of` (1-based).
    ChoosingFlavor { slot: u8, of: u8 },

    ChoosingAddOns,

    Complete,
}

impl BuilderStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuilderStep::ChoosingSize => "ChoosingSize",
            BuilderStep::ChoosingFlavor { .. } => "ChoosingFlavor",
            BuilderStep::ChoosingAddOns => "ChoosingAddOns",
            BuilderStep::Complete => "Complete",
        }
    }
}

impl std::fmt::Display for BuilderStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuilderStep::ChoosingFlavor { slot, of } => write!(f, "ChoosingFlavor({slot}/{of})"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// What the presentation layer should ask the customer next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "prompt", rename_all = "snake_case")]
pub enum Prompt {
    StartOrder,
    ChooseSize,
    ChooseFlavor { slot: u8, of: u8 },
    ChooseAddOns,
    AddAnotherPizza,
    ChooseDelivery { fee: Money },
    ChoosePayment { total: Money },
    ConfirmPayment { method: PaymentMethod },
    Done { message: String },
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prompt::StartOrder => write!(f, "Start a new order?"),
            Prompt::ChooseSize => write!(f, "Choose the pizza size:"),
            Prompt::ChooseFlavor { slot, of } => write!(f, "Choose flavor {slot} of {of}:"),
            Prompt::ChooseAddOns => write!(f, "Add-ons for this pizza:"),
            Prompt::AddAnotherPizza => write!(f, "Add another pizza to the order?"),
            Prompt::ChooseDelivery { fee } => write!(f, "Would you like delivery for {fee}?"),
            Prompt::ChoosePayment { total } => {
                write!(f, "Total {total}. Choose the payment method:")
            }
            Prompt::ConfirmPayment { method } => {
                write!(f, "Did you complete the payment via {method}?")
            }
            Prompt::Done { message } => write!(f, "{message}"),
        }
    }
}
