use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::PricingError;

/// Number of decimal places used when a breakdown is displayed
pub const DISPLAY_SCALE: u32 = 2;

/// Largest subtotal, fee or shipping rate the pipeline accepts (10^15).
/// Keeps every later addition far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Whether `unit_price x quantity` stays within `MAX_AMOUNT`
pub fn subtotal_within_limit(unit_price: Decimal, quantity: u32) -> bool {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .is_some_and(|subtotal| subtotal <= MAX_AMOUNT)
}

/// A single-line order as collected from the customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderInput {
    unit_price: Decimal,
    quantity: u32,
    /// Collected with the order but not read by any pricing rule yet.
    is_member: bool,
    customer_tier: String,
    shipping_zone: String,
    discount_code: String,
}

impl OrderInput {
    /// Build an order, rejecting a negative unit price or a subtotal above
    /// `MAX_AMOUNT`.
    ///
    /// Tier, zone and code are kept verbatim; unknown values fall back to
    /// the default rule at pricing time rather than failing here.
    pub fn new(
        unit_price: Decimal,
        quantity: u32,
        is_member: bool,
        customer_tier: impl Into<String>,
        shipping_zone: impl Into<String>,
        discount_code: impl Into<String>,
    ) -> Result<Self, PricingError> {
        if unit_price < Decimal::ZERO {
            return Err(PricingError::NegativeUnitPrice(unit_price));
        }
        if !subtotal_within_limit(unit_price, quantity) {
            return Err(PricingError::SubtotalOverflow { unit_price, quantity });
        }

        Ok(Self {
            unit_price,
            quantity,
            is_member,
            customer_tier: customer_tier.into(),
            shipping_zone: shipping_zone.into(),
            discount_code: discount_code.into(),
        })
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_member(&self) -> bool {
        self.is_member
    }

    pub fn customer_tier(&self) -> &str {
        &self.customer_tier
    }

    pub fn shipping_zone(&self) -> &str {
        &self.shipping_zone
    }

    pub fn discount_code(&self) -> &str {
        &self.discount_code
    }
}

/// Running subtotal after every pipeline stage, plus shipping and the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBreakdown {
    pub initial_subtotal: Decimal,
    pub after_tier_discount: Decimal,
    pub after_quantity_discount: Decimal,
    pub after_promo_code: Decimal,
    pub after_surcharge: Decimal,
    /// Set when the post-promo subtotal fell below the surcharge threshold,
    /// even if the configured fee is zero
    pub surcharge_applied: bool,
    pub shipping_cost: Decimal,
    pub final_total: Decimal,
}

impl OrderBreakdown {
    /// Copy with every amount rounded for display (half away from zero)
    pub fn rounded(&self) -> Self {
        let round = |value: Decimal| {
            value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
        };

        Self {
            initial_subtotal: round(self.initial_subtotal),
            after_tier_discount: round(self.after_tier_discount),
            after_quantity_discount: round(self.after_quantity_discount),
            after_promo_code: round(self.after_promo_code),
            after_surcharge: round(self.after_surcharge),
            surcharge_applied: self.surcharge_applied,
            shipping_cost: round(self.shipping_cost),
            final_total: round(self.final_total),
        }
    }
}
