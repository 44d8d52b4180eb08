use rust_decimal::Decimal;

use crate::models::OrderInput;
use crate::pricing::PricingRules;

/// Subtotal-to-subtotal pricing stages, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    TierDiscount,
    QuantityDiscount,
    PromoCode,
    SmallOrderSurcharge,
}

impl Stage {
    /// Fixed evaluation order. Each stage sees the previous stage's output.
    pub const ORDERED: [Stage; 4] = [
        Stage::TierDiscount,
        Stage::QuantityDiscount,
        Stage::PromoCode,
        Stage::SmallOrderSurcharge,
    ];

    pub fn apply(self, subtotal: Decimal, input: &OrderInput, rules: &PricingRules) -> Decimal {
        match self {
            Stage::TierDiscount => apply_tier_discount(subtotal, input.customer_tier(), rules),
            Stage::QuantityDiscount => apply_quantity_discount(subtotal, input.quantity(), rules),
            Stage::PromoCode => apply_promo_code(subtotal, input.discount_code(), rules),
            Stage::SmallOrderSurcharge => apply_small_order_surcharge(subtotal, rules),
        }
    }
}

/// Unit price times quantity, unrounded
pub fn initial_subtotal(input: &OrderInput) -> Decimal {
    input.unit_price() * Decimal::from(input.quantity())
}

pub fn apply_tier_discount(subtotal: Decimal, customer_tier: &str, rules: &PricingRules) -> Decimal {
    let rate = rules.tier_discount(customer_tier);
    if rate.is_zero() {
        return subtotal;
    }
    subtotal - subtotal * rate
}

/// Bulk discount once `quantity` reaches the threshold (inclusive)
pub fn apply_quantity_discount(subtotal: Decimal, quantity: u32, rules: &PricingRules) -> Decimal {
    if quantity >= rules.bulk_quantity {
        subtotal - subtotal * rules.bulk_discount
    } else {
        subtotal
    }
}

/// Flat promo discount. The code must match exactly and the subtotal
/// must be strictly above the minimum.
pub fn apply_promo_code(subtotal: Decimal, discount_code: &str, rules: &PricingRules) -> Decimal {
    if discount_code == rules.promo_code && subtotal > rules.promo_min_subtotal {
        subtotal - rules.promo_amount
    } else {
        subtotal
    }
}

/// Strictly below the threshold
pub fn small_order_surcharge_due(subtotal: Decimal, rules: &PricingRules) -> bool {
    subtotal < rules.surcharge_threshold
}

pub fn apply_small_order_surcharge(subtotal: Decimal, rules: &PricingRules) -> Decimal {
    if small_order_surcharge_due(subtotal, rules) {
        subtotal + rules.surcharge_fee
    } else {
        subtotal
    }
}

/// Shipping depends only on the zone, unless the free-shipping code
/// (exact match) waives it.
pub fn shipping_cost(input: &OrderInput, rules: &PricingRules) -> Decimal {
    if input.discount_code() == rules.free_shipping_code {
        return Decimal::ZERO;
    }
    rules.zone_rate(input.shipping_zone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn order(tier: &str, zone: &str, code: &str) -> OrderInput {
        OrderInput::new(dec("10.00"), 1, false, tier, zone, code).unwrap()
    }

    #[rstest]
    #[case("Gold", "85.00")]
    #[case("gold", "85.00")]
    #[case("SILVER", "90.00")]
    #[case("Regular", "100.00")]
    #[case("Bronze", "100.00")]
    #[case("", "100.00")]
    fn test_tier_discount(#[case] tier: &str, #[case] expected: &str) {
        let rules = PricingRules::default();
        assert_eq!(apply_tier_discount(dec("100.00"), tier, &rules), dec(expected));
    }

    #[rstest]
    #[case(0, "80.00")]
    #[case(4, "80.00")]
    #[case(5, "76.00")]
    #[case(50, "76.00")]
    fn test_quantity_discount_threshold_is_inclusive(#[case] quantity: u32, #[case] expected: &str) {
        let rules = PricingRules::default();
        assert_eq!(apply_quantity_discount(dec("80.00"), quantity, &rules), dec(expected));
    }

    #[rstest]
    #[case("SAVE10", "75.00", "75.00")]
    #[case("SAVE10", "75.01", "65.01")]
    #[case("SAVE10", "120", "110")]
    #[case("save10", "120", "120")]
    #[case("FREESHIP", "120", "120")]
    #[case("", "120", "120")]
    fn test_promo_code(#[case] code: &str, #[case] subtotal: &str, #[case] expected: &str) {
        let rules = PricingRules::default();
        assert_eq!(apply_promo_code(dec(subtotal), code, &rules), dec(expected));
    }

    #[rstest]
    #[case("25.00", "25.00")]
    #[case("24.99", "27.99")]
    #[case("0", "3.00")]
    fn test_small_order_surcharge(#[case] subtotal: &str, #[case] expected: &str) {
        let rules = PricingRules::default();
        assert_eq!(apply_small_order_surcharge(dec(subtotal), &rules), dec(expected));
    }

    #[test]
    fn test_surcharge_due_with_zero_fee() {
        let rules = PricingRules {
            surcharge_fee: Decimal::ZERO,
            ..PricingRules::default()
        };
        assert!(small_order_surcharge_due(dec("10"), &rules));
        assert_eq!(apply_small_order_surcharge(dec("10"), &rules), dec("10"));
        assert!(!small_order_surcharge_due(dec("25"), &rules));
    }

    #[rstest]
    #[case("ZoneA", "", "5.00")]
    #[case("zoneb", "", "12.50")]
    #[case("ZONEC", "SAVE10", "20.00")]
    #[case("ZoneC", "FREESHIP", "0")]
    #[case("ZoneC", "freeship", "20.00")]
    #[case("Unknown", "", "25.00")]
    #[case("ZoneX", "", "25.00")]
    fn test_shipping_cost(#[case] zone: &str, #[case] code: &str, #[case] expected: &str) {
        let rules = PricingRules::default();
        assert_eq!(shipping_cost(&order("Regular", zone, code), &rules), dec(expected));
    }

    #[test]
    fn test_stage_apply_dispatches_to_rule() {
        let rules = PricingRules::default();
        let input = order("Gold", "ZoneA", "SAVE10");
        assert_eq!(Stage::TierDiscount.apply(dec("100"), &input, &rules), dec("85"));
        assert_eq!(Stage::QuantityDiscount.apply(dec("100"), &input, &rules), dec("100"));
        assert_eq!(Stage::PromoCode.apply(dec("100"), &input, &rules), dec("90"));
        assert_eq!(Stage::SmallOrderSurcharge.apply(dec("10"), &input, &rules), dec("13"));
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(
            Stage::ORDERED,
            [
                Stage::TierDiscount,
                Stage::QuantityDiscount,
                Stage::PromoCode,
                Stage::SmallOrderSurcharge,
            ]
        );
    }
}
