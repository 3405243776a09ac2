// Coinbase Exchange adapter: level-2 REST snapshot, positional levels

use super::coinbase_types::CoinbaseBook;
use super::{gated, get_json, FetchError, QuoteSource};
use crate::engine::types::OrderBook;
use crate::market_data::normaliser::{NormaliseError, Normaliser};
use crate::market_data::rate_limiter::RateLimiter;
use tracing::instrument;

pub const DEFAULT_URL: &str = "https://api.exchange.coinbase.com/products/BTC-USD/book?level=2";

pub struct CoinbaseAdapter {
    pub url: String,
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl CoinbaseAdapter {
    pub fn new(client: reqwest::Client, url: &str, limiter: RateLimiter) -> Self {
        Self { url: url.to_string(), client, limiter }
    }

    async fn fetch_book(&self) -> Result<OrderBook, FetchError> {
        let wire: CoinbaseBook = get_json(&self.client, &self.url).await?;
        Ok(Self::book_from_wire(&wire)?)
    }

    pub fn book_from_wire(wire: &CoinbaseBook) -> Result<OrderBook, NormaliseError> {
        let bids = Normaliser::side(&wire.bids, |l| Normaliser::positional(l))?;
        let asks = Normaliser::side(&wire.asks, |l| Normaliser::positional(l))?;
        Ok(OrderBook::new(bids, asks))
    }
}

#[async_trait::async_trait]
impl QuoteSource for CoinbaseAdapter {
    fn name(&self) -> &'static str {
        "coinbase"
    }

    #[instrument(skip(self), fields(venue = "coinbase"))]
    async fn fetch(&self) -> OrderBook {
        gated(self.name(), &self.limiter, || self.fetch_book()).await
    }
}
