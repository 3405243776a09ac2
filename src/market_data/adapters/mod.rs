// Shared trait + plumbing for venue quote sources

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::types::OrderBook;
use crate::market_data::normaliser::NormaliseError;
use crate::market_data::rate_limiter::RateLimiter;

/// A venue that can hand over a point-in-time book, already normalised.
///
/// `fetch` never fails: a denied rate limit or any transport/parse problem
/// yields an empty book, so one bad venue cannot sink the whole estimate.
#[async_trait::async_trait]
pub trait QuoteSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> OrderBook;
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: reqwest::StatusCode, url: String },
    #[error("malformed body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("bad level: {0}")]
    Normalise(#[from] NormaliseError),
}

pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

// Single unauthenticated GET, JSON body decoded into the venue's wire type
pub(crate) async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T, FetchError> {
    let res = client.get(url).send().await?;
    let status = res.status();
    if !status.is_success() {
        return Err(FetchError::Status { status, url: url.to_string() });
    }
    let body = res.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

// Limiter check first, then the fetch; every failure collapses to an empty book.
pub(crate) async fn gated<F, Fut>(venue: &'static str, limiter: &RateLimiter, fetch: F) -> OrderBook
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<OrderBook, FetchError>>,
{
    if !limiter.allow() {
        warn!(venue, cooldown_ms = limiter.cooldown().as_millis() as u64, "Rate limited, contributing no liquidity");
        metrics::counter!("lobx_fetch_total", "venue" => venue, "outcome" => "rate_limited").increment(1);
        return OrderBook::default();
    }

    match fetch().await {
        Ok(book) => {
            debug!(venue, bids = book.bids.len(), asks = book.asks.len(), "Fetched book");
            metrics::counter!("lobx_fetch_total", "venue" => venue, "outcome" => "ok").increment(1);
            book
        }
        Err(e) => {
            warn!(venue, error = %e, "Fetch failed, contributing no liquidity");
            metrics::counter!("lobx_fetch_total", "venue" => venue, "outcome" => "error").increment(1);
            OrderBook::default()
        }
    }
}

pub mod coinbase;
pub mod coinbase_types;
pub mod gemini;
pub mod gemini_types;
