// Source: GET https://api.exchange.coinbase.com/products/{product}/book?level=2
use crate::market_data::normaliser::WireNumber;

#[derive(Debug, serde::Deserialize)]
pub struct CoinbaseBook {
    pub bids: Vec<CoinbaseLevel>,
    pub asks: Vec<CoinbaseLevel>,
    #[serde(default)]
    pub sequence: Option<u64>,
    #[serde(default)]
    pub time: Option<String>,
}

// Positional: ["price", "size", num_orders]
pub type CoinbaseLevel = Vec<WireNumber>;
