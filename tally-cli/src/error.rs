use tally_pricing::PricingError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Input ended before the order was complete")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Failed to load config: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("Failed to encode breakdown: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
