use clap::Parser;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "lobx-agg")]
#[command(about = "Estimate the cost of a market buy/sell across Coinbase and Gemini depth")]
pub struct Args {
    /// Quantity to fill, a positive number (defaults to the configured default_qty)
    #[arg(long, value_parser = parse_qty, allow_negative_numbers = true)]
    pub qty: Option<f64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum QuantityError {
    #[error("invalid quantity {0:?}: not a number")]
    NotANumber(String),
    #[error("invalid quantity {0}: must be a positive, finite number")]
    OutOfRange(f64),
}

pub fn parse_qty(raw: &str) -> Result<f64, QuantityError> {
    let qty: f64 = raw
        .trim()
        .parse()
        .map_err(|_| QuantityError::NotANumber(raw.to_string()))?;
    if qty.is_finite() && qty > 0.0 {
        Ok(qty)
    } else {
        Err(QuantityError::OutOfRange(qty))
    }
}
