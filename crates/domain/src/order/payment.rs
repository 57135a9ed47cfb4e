//! Simulated payment methods and the instructions shown for each.

use serde::{Deserialize, Serialize};

use crate::pricing;

use super::Money;

/// PIX key customers transfer to.
pub const PIX_KEY: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Card checkout link.
pub const CARD_CHECKOUT_URL: &str = "https://mercadopago.com.br/checkout/fake123";

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Instant bank transfer; earns the PIX discount.
    Pix,

    /// Credit card through a checkout link.
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Card => "card",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the customer needs to pay, and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstructions {
    pub method: PaymentMethod,

    /// Order total before the payment discount.
    pub total: Money,

    /// Amount the customer actually pays.
    pub amount_due: Money,

    /// PIX key or checkout link.
    pub destination: String,
}

impl PaymentInstructions {
    /// Builds the instructions for paying `total` with `method`.
    pub fn for_total(method: PaymentMethod, total: Money) -> Self {
        match method {
            PaymentMethod::Pix => Self {
                method,
                total,
                amount_due: pricing::pix_total(total),
                destination: PIX_KEY.to_string(),
            },
            PaymentMethod::Card => Self {
                method,
                total,
                amount_due: total,
                destination: CARD_CHECKOUT_URL.to_string(),
            },
        }
    }

    /// Discount granted by the payment method.
    pub fn discount(&self) -> Money {
        self.total - self.amount_due
    }
}

impl std::fmt::Display for PaymentInstructions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.method {
            PaymentMethod::Pix => write!(
                f,
                "PIX key: {}\nAmount with discount: {}",
                self.destination, self.amount_due
            ),
            PaymentMethod::Card => write!(f, "Payment link:\n{}", self.destination),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_instructions_apply_discount() {
        let instructions = PaymentInstructions::for_total(PaymentMethod::Pix, Money::from_reais(100));
        assert_eq!(instructions.amount_due, Money::from_reais(90));
        assert_eq!(instructions.discount(), Money::from_reais(10));
        assert_eq!(instructions.destination, PIX_KEY);
    }

    #[test]
    fn test_card_instructions_charge_full_total() {
        let instructions =
            PaymentInstructions::for_total(PaymentMethod::Card, Money::from_cents(12490));
        assert_eq!(instructions.amount_due, Money::from_cents(12490));
        assert!(instructions.discount().is_zero());
        assert_eq!(instructions.destination, CARD_CHECKOUT_URL);
    }

    #[test]
    fn test_display() {
        let pix = PaymentInstructions::for_total(PaymentMethod::Pix, Money::from_cents(6990));
        assert_eq!(
            pix.to_string(),
            "PIX key: 123e4567-e89b-12d3-a456-426614174000\nAmount with discount: R$62.91"
        );

        let card = PaymentInstructions::for_total(PaymentMethod::Card, Money::from_cents(6990));
        assert_eq!(
            card.to_string(),
            "Payment link:\nhttps://mercadopago.com.br/checkout/fake123"
        );
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Pix).unwrap(), "\"pix\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Card).unwrap(), "\"card\"");
    }
}
