pub mod models;
pub mod pricing;
pub mod rules;

use rust_decimal::Decimal;

pub use models::{OrderBreakdown, OrderInput};
pub use pricing::{PricingEngine, PricingRules};
pub use rules::Stage;

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Unit price cannot be negative: {0}")]
    NegativeUnitPrice(Decimal),
    #[error("Subtotal for {quantity} x {unit_price} exceeds the pricing limit")]
    SubtotalOverflow { unit_price: Decimal, quantity: u32 },
    #[error("Invalid pricing rules: {0}")]
    InvalidRules(String),
}

pub type PricingResult<T> = Result<T, PricingError>;

/// Price an order with the standard rate table
pub fn compute_breakdown(input: &OrderInput) -> OrderBreakdown {
    PricingEngine::default().compute_breakdown(input)
}
