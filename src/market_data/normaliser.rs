// Convert wire price/size encodings into the common `Order` shape.
// Venues send decimals as JSON strings ("50000.01") or, less often, bare numbers.

use serde::Deserialize;
use thiserror::Error;

use crate::engine::types::Order;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Text(String),
    Number(f64),
}

impl WireNumber {
    pub fn to_f64(&self) -> Result<f64, NormaliseError> {
        let value = match self {
            WireNumber::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| NormaliseError::Unparseable(s.clone()))?,
            WireNumber::Number(n) => *n,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(NormaliseError::NonFinite(value))
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum NormaliseError {
    #[error("cannot parse {0:?} as a decimal")]
    Unparseable(String),
    #[error("non-finite value {0}")]
    NonFinite(f64),
    #[error("price must be positive, got {0}")]
    NonPositivePrice(f64),
    #[error("quantity must not be negative, got {0}")]
    NegativeQuantity(f64),
    #[error("level has {0} fields, expected at least price and size")]
    ShortLevel(usize),
}

pub struct Normaliser;

impl Normaliser {
    pub fn price(raw: &WireNumber) -> Result<f64, NormaliseError> {
        let price = raw.to_f64()?;
        if price > 0.0 {
            Ok(price)
        } else {
            Err(NormaliseError::NonPositivePrice(price))
        }
    }

    pub fn size(raw: &WireNumber) -> Result<f64, NormaliseError> {
        let size = raw.to_f64()?;
        if size >= 0.0 {
            Ok(size)
        } else {
            Err(NormaliseError::NegativeQuantity(size))
        }
    }

    /// `None` for an empty level, which carries no liquidity.
    pub fn level(price: &WireNumber, size: &WireNumber) -> Result<Option<Order>, NormaliseError> {
        let price = Self::price(price)?;
        let size = Self::size(size)?;
        Ok((size > 0.0).then(|| Order::new(price, size)))
    }

    // Positional layout: [price, size, ...venue extras]
    pub fn positional(fields: &[WireNumber]) -> Result<Option<Order>, NormaliseError> {
        match fields {
            [price, size, ..] => Self::level(price, size),
            _ => Err(NormaliseError::ShortLevel(fields.len())),
        }
    }

    /// Normalise a whole side; one bad level rejects the side.
    pub fn side<I, F>(levels: I, mut to_order: F) -> Result<Vec<Order>, NormaliseError>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Result<Option<Order>, NormaliseError>,
    {
        let mut out = Vec::new();
        for level in levels {
            if let Some(order) = to_order(level)? {
                out.push(order);
            }
        }
        Ok(out)
    }
}
