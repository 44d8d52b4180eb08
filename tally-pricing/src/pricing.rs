use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{OrderBreakdown, OrderInput, MAX_AMOUNT};
use crate::rules::{initial_subtotal, shipping_cost, small_order_surcharge_due, Stage};
use crate::{PricingError, PricingResult};

/// Rate table driving every pricing stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Discount rate per customer tier, keyed by lowercase name (e.g. "gold" => 0.15).
    /// Tiers not listed get no discount.
    pub tier_discounts: HashMap<String, Decimal>,

    /// Flat shipping cost per zone, keyed by lowercase name
    pub zone_rates: HashMap<String, Decimal>,

    /// Shipping cost for any zone missing from `zone_rates`
    pub default_zone_rate: Decimal,

    /// Minimum quantity (inclusive) for the bulk discount
    pub bulk_quantity: u32,

    /// Bulk discount rate
    pub bulk_discount: Decimal,

    /// Code unlocking the flat promotional discount (case-sensitive)
    pub promo_code: String,

    /// Subtotal the order must strictly exceed for the promo code to apply
    pub promo_min_subtotal: Decimal,

    /// Flat amount taken off by the promo code
    pub promo_amount: Decimal,

    /// Code that waives shipping (case-sensitive)
    pub free_shipping_code: String,

    /// Subtotals strictly below this pay the small-order surcharge
    pub surcharge_threshold: Decimal,

    pub surcharge_fee: Decimal,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            tier_discounts: {
                let mut m = HashMap::new();
                m.insert("gold".to_string(), Decimal::new(15, 2));
                m.insert("silver".to_string(), Decimal::new(10, 2));
                m
            },
            zone_rates: {
                let mut m = HashMap::new();
                m.insert("zonea".to_string(), Decimal::new(500, 2));
                m.insert("zoneb".to_string(), Decimal::new(1250, 2));
                m.insert("zonec".to_string(), Decimal::new(2000, 2));
                m
            },
            default_zone_rate: Decimal::new(2500, 2),
            bulk_quantity: 5,
            bulk_discount: Decimal::new(5, 2),
            promo_code: "SAVE10".to_string(),
            promo_min_subtotal: Decimal::new(75, 0),
            promo_amount: Decimal::new(1000, 2),
            free_shipping_code: "FREESHIP".to_string(),
            surcharge_threshold: Decimal::new(25, 0),
            surcharge_fee: Decimal::new(300, 2),
        }
    }
}

impl PricingRules {
    /// Discount rate for a tier, matched case-insensitively. Unknown tiers pay full price.
    pub fn tier_discount(&self, customer_tier: &str) -> Decimal {
        self.tier_discounts
            .get(&customer_tier.to_lowercase())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Shipping rate for a zone, matched case-insensitively
    pub fn zone_rate(&self, shipping_zone: &str) -> Decimal {
        self.zone_rates
            .get(&shipping_zone.to_lowercase())
            .copied()
            .unwrap_or(self.default_zone_rate)
    }

    /// Display label for the tier discount actually applied,
    /// e.g. "(Gold - 15%)" or "(Regular)"
    pub fn tier_label(&self, customer_tier: &str) -> String {
        let key = customer_tier.to_lowercase();
        match self.tier_discounts.get(&key) {
            Some(rate) if !rate.is_zero() => {
                let percent = (*rate * Decimal::ONE_HUNDRED).normalize();
                format!("({} - {}%)", capitalize(&key), percent)
            }
            _ => "(Regular)".to_string(),
        }
    }

    /// Lowercase the lookup keys so tables loaded from config match the
    /// case-insensitive dispatch.
    pub fn normalized(self) -> Self {
        let lower = |table: HashMap<String, Decimal>| -> HashMap<String, Decimal> {
            table
                .into_iter()
                .map(|(key, value)| (key.to_lowercase(), value))
                .collect()
        };

        Self {
            tier_discounts: lower(self.tier_discounts),
            zone_rates: lower(self.zone_rates),
            ..self
        }
    }

    /// Reject tables that could push a subtotal below zero or past `MAX_AMOUNT`
    pub fn validate(&self) -> PricingResult<()> {
        let unit_range = Decimal::ZERO..=Decimal::ONE;

        for (tier, rate) in &self.tier_discounts {
            if !unit_range.contains(rate) {
                return Err(PricingError::InvalidRules(format!(
                    "tier discount for '{}' must be between 0 and 1, got {}",
                    tier, rate
                )));
            }
        }
        if !unit_range.contains(&self.bulk_discount) {
            return Err(PricingError::InvalidRules(format!(
                "bulk discount must be between 0 and 1, got {}",
                self.bulk_discount
            )));
        }

        let amounts = self
            .zone_rates
            .iter()
            .map(|(zone, rate)| (format!("shipping rate for '{}'", zone), *rate))
            .chain([
                ("default shipping rate".to_string(), self.default_zone_rate),
                ("promo amount".to_string(), self.promo_amount),
                ("surcharge fee".to_string(), self.surcharge_fee),
            ]);
        for (name, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(PricingError::InvalidRules(format!(
                    "{} cannot be negative, got {}",
                    name, amount
                )));
            }
            if amount > MAX_AMOUNT {
                return Err(PricingError::InvalidRules(format!(
                    "{} cannot exceed {}, got {}",
                    name, MAX_AMOUNT, amount
                )));
            }
        }

        if self.promo_amount > self.promo_min_subtotal {
            return Err(PricingError::InvalidRules(format!(
                "promo amount {} exceeds its minimum subtotal {}",
                self.promo_amount, self.promo_min_subtotal
            )));
        }

        Ok(())
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Runs an order through the ordered pricing stages
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    rules: PricingRules,
}

impl PricingEngine {
    /// Build an engine over a validated copy of `rules`
    pub fn new(rules: PricingRules) -> PricingResult<Self> {
        let rules = rules.normalized();
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Price a single order. Pure; never fails for a constructed `OrderInput`.
    pub fn compute_breakdown(&self, input: &OrderInput) -> OrderBreakdown {
        let initial_subtotal = initial_subtotal(input);

        let mut subtotals = [initial_subtotal; Stage::ORDERED.len()];
        let mut subtotal = initial_subtotal;
        for (slot, stage) in subtotals.iter_mut().zip(Stage::ORDERED) {
            let next = stage.apply(subtotal, input, &self.rules);
            tracing::debug!("{:?}: {} -> {}", stage, subtotal, next);
            *slot = next;
            subtotal = next;
        }
        let [after_tier_discount, after_quantity_discount, after_promo_code, after_surcharge] =
            subtotals;
        let surcharge_applied = small_order_surcharge_due(after_promo_code, &self.rules);

        let shipping_cost = shipping_cost(input, &self.rules);
        let final_total = after_surcharge + shipping_cost;
        tracing::debug!("Shipping {} + subtotal {} = {}", shipping_cost, after_surcharge, final_total);

        OrderBreakdown {
            initial_subtotal,
            after_tier_discount,
            after_quantity_discount,
            after_promo_code,
            after_surcharge,
            surcharge_applied,
            shipping_cost,
            final_total,
        }
    }
}
