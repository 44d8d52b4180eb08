use std::io::{BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;
use tally_pricing::models::subtotal_within_limit;
use tally_pricing::OrderInput;

use crate::error::{CliError, CliResult};

/// Collects a well-formed order from a line-oriented reader, re-prompting
/// on every invalid entry.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Print `prompt` and read one line without its terminator
    pub fn ask(&mut self, prompt: &str) -> CliResult<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Like `ask`, with surrounding whitespace removed
    pub fn ask_trimmed(&mut self, prompt: &str) -> CliResult<String> {
        Ok(self.ask(prompt)?.trim().to_string())
    }

    pub fn read_unit_price(&mut self) -> CliResult<Decimal> {
        loop {
            let raw = self.ask_trimmed("Enter unit price: $")?;
            match Decimal::from_str(&raw) {
                Ok(price) if price < Decimal::ZERO => {
                    writeln!(self.writer, "Unit price cannot be negative.")?;
                }
                Ok(price) => return Ok(price),
                Err(_) => {
                    tracing::debug!("Rejected unit price {:?}", raw);
                    writeln!(self.writer, "Invalid input. Please enter a valid number for unit price.")?;
                }
            }
        }
    }

    pub fn read_quantity(&mut self) -> CliResult<u32> {
        loop {
            let raw = self.ask_trimmed("Enter quantity: ")?;
            match raw.parse::<i64>().map(u32::try_from) {
                Ok(Ok(quantity)) => return Ok(quantity),
                Ok(Err(_)) if raw.starts_with('-') => {
                    writeln!(self.writer, "Quantity cannot be negative.")?;
                }
                _ => {
                    tracing::debug!("Rejected quantity {:?}", raw);
                    writeln!(self.writer, "Invalid input. Please enter a valid integer for quantity.")?;
                }
            }
        }
    }

    pub fn read_membership(&mut self) -> CliResult<bool> {
        loop {
            let raw = self.ask_trimmed("Is customer a member (true/false)?: ")?;
            match raw.to_lowercase().as_str() {
                "true" => return Ok(true),
                "false" => return Ok(false),
                _ => writeln!(self.writer, "Invalid input. Please enter true or false.")?,
            }
        }
    }

    pub fn read_shipping_zone(&mut self) -> CliResult<String> {
        loop {
            let zone = self.ask_trimmed("Enter shipping zone (ZoneA, ZoneB, ZoneC, Unknown): ")?;
            if !zone.is_empty() {
                return Ok(zone);
            }
            writeln!(self.writer, "Shipping Zone can't be empty. Try again")?;
        }
    }

    /// Run every prompt in order and build the order
    pub fn collect_order(&mut self) -> CliResult<OrderInput> {
        let (unit_price, quantity) = loop {
            let unit_price = self.read_unit_price()?;
            let quantity = self.read_quantity()?;
            if subtotal_within_limit(unit_price, quantity) {
                break (unit_price, quantity);
            }
            writeln!(self.writer, "Order is too large to price. Please enter it again.")?;
        };
        let is_member = self.read_membership()?;
        let customer_tier = self.ask_trimmed("Enter customer tier (Regular, Silver, Gold): ")?;
        let shipping_zone = self.read_shipping_zone()?;
        let discount_code = self.ask_trimmed("Enter discount code (SAVE10, FREESHIP, or \"\" for none): ")?;

        Ok(OrderInput::new(
            unit_price,
            quantity,
            is_member,
            customer_tier,
            shipping_zone,
            discount_code,
        )?)
    }
}
