// Source: GET https://api.gemini.com/v1/book/{symbol}
use crate::market_data::normaliser::WireNumber;

#[derive(Debug, serde::Deserialize)]
pub struct GeminiBook {
    pub bids: Vec<GeminiLevel>,
    pub asks: Vec<GeminiLevel>,
}

#[derive(Debug, serde::Deserialize)]
pub struct GeminiLevel {
    pub price: WireNumber,  // e.g. "3607.85"
    pub amount: WireNumber, // e.g. "6.643373"
    #[serde(default)]
    pub timestamp: Option<WireNumber>, // deprecated upstream, still sent
}
