//! Pricing rules for add-ons, delivery, and payment discounts.

use crate::catalog::SizeOption;
use crate::order::Money;

/// Price of one 2L soda added to a pizza.
pub const SODA_PRICE: Money = Money::from_cents(1500);

/// Price of the stuffed crust add-on.
pub const STUFFED_CRUST_PRICE: Money = Money::from_cents(1000);

/// Flat delivery fee charged once per order.
pub const DELIVERY_FEE: Money = Money::from_cents(1000);

/// Discount granted for paying with PIX.
pub const PIX_DISCOUNT_PERCENT: u8 = 10;

/// Most sodas a single pizza may carry.
pub const MAX_SODAS_PER_PIZZA: u8 = 2;

/// Price of a pizza: base price of its size plus its add-ons.
pub fn pizza_price(size: &SizeOption, soda_count: u8, has_stuffed_crust: bool) -> Money {
    let crust = if has_stuffed_crust {
        STUFFED_CRUST_PRICE
    } else {
        Money::zero()
    };
    size.base_price + SODA_PRICE.multiply(u32::from(soda_count)) + crust
}

/// Order total before any payment discount.
pub fn order_total(subtotal: Money, has_delivery: bool) -> Money {
    if has_delivery {
        subtotal + DELIVERY_FEE
    } else {
        subtotal
    }
}

/// Amount due when paying with PIX.
pub fn pix_total(total: Money) -> Money {
    total.less_percent(PIX_DISCOUNT_PERCENT)
}
