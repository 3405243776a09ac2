// Gemini adapter: v1 REST book, levels as named objects

use super::gemini_types::{GeminiBook, GeminiLevel};
use super::{gated, get_json, FetchError, QuoteSource};
use crate::engine::types::{Order, OrderBook};
use crate::market_data::normaliser::{NormaliseError, Normaliser};
use crate::market_data::rate_limiter::RateLimiter;
use tracing::instrument;

pub const DEFAULT_URL: &str = "https://api.gemini.com/v1/book/BTCUSD";

pub struct GeminiAdapter {
    pub url: String,
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl GeminiAdapter {
    pub fn new(client: reqwest::Client, url: &str, limiter: RateLimiter) -> Self {
        Self { url: url.to_string(), client, limiter }
    }

    async fn fetch_book(&self) -> Result<OrderBook, FetchError> {
        let wire: GeminiBook = get_json(&self.client, &self.url).await?;
        Ok(Self::book_from_wire(&wire)?)
    }

    pub fn book_from_wire(wire: &GeminiBook) -> Result<OrderBook, NormaliseError> {
        let bids = Normaliser::side(&wire.bids, Self::norm_level)?;
        let asks = Normaliser::side(&wire.asks, Self::norm_level)?;
        Ok(OrderBook::new(bids, asks))
    }

    fn norm_level(level: &GeminiLevel) -> Result<Option<Order>, NormaliseError> {
        Normaliser::level(&level.price, &level.amount)
    }
}

#[async_trait::async_trait]
impl QuoteSource for GeminiAdapter {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self), fields(venue = "gemini"))]
    async fn fetch(&self) -> OrderBook {
        gated(self.name(), &self.limiter, || self.fetch_book()).await
    }
}
