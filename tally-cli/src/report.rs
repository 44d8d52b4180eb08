use std::io::{self, Write};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tally_pricing::models::DISPLAY_SCALE;
use tally_pricing::{OrderBreakdown, OrderInput, PricingRules};

use crate::error::CliResult;

pub const RULE: &str = "---------------------------------";

/// Currency amount rounded half away from zero to two places, e.g. "$12.50"
pub fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

/// Echo of the order as entered
pub fn write_order_details<W: Write>(w: &mut W, input: &OrderInput) -> io::Result<()> {
    writeln!(w, "\n--- Order Details ---")?;
    writeln!(w, "Unit Price: {}", money(input.unit_price()))?;
    writeln!(w, "Quantity: {}", input.quantity())?;
    writeln!(w, "Is Member: {}", input.is_member())?;
    writeln!(w, "Customer Tier: {}", input.customer_tier())?;
    writeln!(w, "Shipping Zone: {}", input.shipping_zone())?;
    writeln!(w, "Discount Code: {}", input.discount_code())
}

/// Step-by-step breakdown. Stage labels are taken from the rate table so
/// they always describe the rule that actually ran.
pub fn write_breakdown<W: Write>(
    w: &mut W,
    input: &OrderInput,
    breakdown: &OrderBreakdown,
    rules: &PricingRules,
) -> io::Result<()> {
    writeln!(w, "\n--- Calculation Steps ---")?;
    writeln!(w, "Initial Subtotal: {}", money(breakdown.initial_subtotal))?;
    writeln!(
        w,
        "After Tier Discount {}: {}",
        rules.tier_label(input.customer_tier()),
        money(breakdown.after_tier_discount)
    )?;
    writeln!(
        w,
        "After Quantity Discount ({}% for >={} items): {}",
        percent(rules.bulk_discount),
        rules.bulk_quantity,
        money(breakdown.after_quantity_discount)
    )?;
    writeln!(
        w,
        "After Promotional Code ({} for >${}): {}",
        rules.promo_code,
        rules.promo_min_subtotal.normalize(),
        money(breakdown.after_promo_code)
    )?;

    let surcharge = if breakdown.surcharge_applied {
        "Surcharge Applied"
    } else {
        "No Surcharge"
    };
    writeln!(
        w,
        "After Small Order Surcharge (if applicable): {} ({})",
        money(breakdown.after_surcharge),
        surcharge
    )?;

    writeln!(w, "\nShipping Cost: {} ({})", money(breakdown.shipping_cost), input.shipping_zone())?;
    writeln!(w, "\nFinal Order Total: {}", money(breakdown.final_total))?;
    writeln!(w, "{}", RULE)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    order: &'a OrderInput,
    breakdown: OrderBreakdown,
}

/// Machine-readable report with amounts rounded for display
pub fn write_json<W: Write>(w: &mut W, input: &OrderInput, breakdown: &OrderBreakdown) -> CliResult<()> {
    let report = JsonReport {
        order: input,
        breakdown: breakdown.rounded(),
    };
    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tally_pricing::compute_breakdown;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_money_pads_and_rounds() {
        assert_eq!(money(dec("5")), "$5.00");
        assert_eq!(money(dec("12.5")), "$12.50");
        assert_eq!(money(dec("0.125")), "$0.13");
        assert_eq!(money(dec("19.93005")), "$19.93");
    }

    #[test]
    fn test_breakdown_lines() {
        let input = OrderInput::new(dec("20.00"), 5, false, "Gold", "ZoneB", "SAVE10").unwrap();
        let breakdown = compute_breakdown(&input);
        let mut out = Vec::new();
        write_breakdown(&mut out, &input, &breakdown, &PricingRules::default()).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Initial Subtotal: $100.00"));
        assert!(out.contains("After Tier Discount (Gold - 15%): $85.00"));
        assert!(out.contains("After Quantity Discount (5% for >=5 items): $80.75"));
        assert!(out.contains("After Promotional Code (SAVE10 for >$75): $70.75"));
        assert!(out.contains("After Small Order Surcharge (if applicable): $70.75 (No Surcharge)"));
        assert!(out.contains("Shipping Cost: $12.50 (ZoneB)"));
        assert!(out.contains("Final Order Total: $83.25"));
    }

    #[test]
    fn test_json_report() {
        let input = OrderInput::new(dec("10.00"), 1, true, "Regular", "ZoneA", "").unwrap();
        let breakdown = compute_breakdown(&input);
        let mut out = Vec::new();
        write_json(&mut out, &input, &breakdown).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["order"]["is_member"], true);
        assert_eq!(value["order"]["shipping_zone"], "ZoneA");
        assert_eq!(value["breakdown"]["after_surcharge"], "13.00");
        assert_eq!(value["breakdown"]["final_total"], "18.00");
    }
}
