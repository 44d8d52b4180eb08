use std::io::{BufRead, Write};

use tally_pricing::PricingEngine;

use crate::app_config::{Config, OutputFormat};
use crate::compare::write_comparison;
use crate::error::CliResult;
use crate::prompt::Prompter;
use crate::report::{write_breakdown, write_json, write_order_details, RULE};

/// One interactive session: collect an order, print its breakdown, then
/// optionally run the string comparison demo.
pub fn run<R: BufRead, W: Write>(config: &Config, reader: R, writer: W) -> CliResult<()> {
    let engine = PricingEngine::new(config.pricing.clone())?;
    let mut prompter = Prompter::new(reader, writer);

    let w = prompter.writer();
    writeln!(w, "{}", RULE)?;
    writeln!(w, "Welcome to the Interactive Order Processor!\n")?;
    writeln!(w, "--- Enter Order Details ---")?;

    let input = prompter.collect_order()?;
    tracing::info!(
        "Pricing order: {} x {} (tier {:?}, zone {:?})",
        input.quantity(),
        input.unit_price(),
        input.customer_tier(),
        input.shipping_zone()
    );
    let breakdown = engine.compute_breakdown(&input);
    tracing::info!("Final order total {}", breakdown.final_total);

    let w = prompter.writer();
    match config.output.format {
        OutputFormat::Text => {
            write_order_details(w, &input)?;
            write_breakdown(w, &input, &breakdown, engine.rules())?;
        }
        OutputFormat::Json => write_json(w, &input, &breakdown)?,
    }

    if config.output.compare_strings {
        writeln!(prompter.writer(), "\n--- String Equality Demo ---")?;
        let first = prompter.ask("Enter first string for comparison: ")?;
        let second = prompter.ask("Enter second string for comparison: ")?;
        write_comparison(prompter.writer(), &first, &second)?;
    }

    prompter.writer().flush()?;
    Ok(())
}
