// Router drives fetch -> aggregate -> match for every configured venue
use std::fmt;

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use crate::config::Settings;
use crate::engine::matcher::{execute_buy, execute_sell};
use crate::engine::types::{Execution, OrderBook};
use crate::market_data::adapters::coinbase::CoinbaseAdapter;
use crate::market_data::adapters::gemini::GeminiAdapter;
use crate::market_data::adapters::{http_client, QuoteSource};
use crate::market_data::aggregator::aggregate;
use crate::market_data::rate_limiter::RateLimiter;

/// Buy and sell sweep results for one requested quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub qty: f64,
    pub base_asset: String,
    pub buy: Execution,
    pub sell: Execution,
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "To buy {} {}: ${:.2}", self.qty, self.base_asset, self.buy.notional)?;
        write!(f, "To sell {} {}: ${:.2}", self.qty, self.base_asset, self.sell.notional)
    }
}

/// One adapter per venue, each with its own limiter and a shared HTTP client.
pub fn default_sources(settings: &Settings) -> reqwest::Result<Vec<Box<dyn QuoteSource>>> {
    let client = http_client(settings.fetch_timeout())?;
    let coinbase = CoinbaseAdapter::new(client.clone(), &settings.coinbase_url, RateLimiter::new(settings.cooldown()));
    let gemini = GeminiAdapter::new(client, &settings.gemini_url, RateLimiter::new(settings.cooldown()));
    Ok(vec![Box::new(coinbase) as Box<dyn QuoteSource>, Box::new(gemini)])
}

/// Fetch every venue concurrently. Output order follows `sources`.
pub async fn fetch_all(sources: &[Box<dyn QuoteSource>]) -> Vec<OrderBook> {
    let books = join_all(sources.iter().map(|s| s.fetch())).await;
    for (source, book) in sources.iter().zip(&books) {
        if book.is_empty() {
            warn!(venue = source.name(), "No liquidity from venue");
        } else {
            info!(venue = source.name(), bids = book.bids.len(), asks = book.asks.len(), "Snapshot received");
        }
    }
    books
}

/// Merge the snapshots and sweep both sides for `qty`.
#[instrument(skip(snapshots), fields(venues = snapshots.len()))]
pub fn estimate(snapshots: &[OrderBook], qty: f64, base_asset: &str) -> Estimate {
    let mut merged = aggregate(snapshots);

    let (top_bids, top_asks) = merged.depth_top_n(5);
    debug!(
        best_bid = ?merged.best_bid(),
        best_ask = ?merged.best_ask(),
        spread = ?merged.spread(),
        ?top_bids,
        ?top_asks,
        "Aggregated book"
    );

    let buy = execute_buy(&mut merged.asks, qty);
    let sell = execute_sell(&mut merged.bids, qty);

    for exec in [&buy, &sell] {
        if exec.is_partial() {
            warn!(
                side = ?exec.side,
                requested = exec.requested,
                filled = exec.filled,
                "Not enough aggregated liquidity; estimate covers the filled amount only"
            );
        }
    }

    Estimate { qty, base_asset: base_asset.to_string(), buy, sell }
}

pub async fn run(sources: &[Box<dyn QuoteSource>], qty: f64, base_asset: &str) -> Estimate {
    let snapshots = fetch_all(sources).await;
    estimate(&snapshots, qty, base_asset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Order;

    struct FixedSource {
        name: &'static str,
        book: OrderBook,
    }

    #[async_trait::async_trait]
    impl QuoteSource for FixedSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self) -> OrderBook {
            self.book.clone()
        }
    }

    fn fixed(name: &'static str, bids: &[(f64, f64)], asks: &[(f64, f64)]) -> Box<dyn QuoteSource> {
        let side = |raw: &[(f64, f64)]| -> Vec<Order> { raw.iter().map(|&(p, q)| Order::new(p, q)).collect() };
        Box::new(FixedSource { name, book: OrderBook::new(side(bids), side(asks)) })
    }

    #[tokio::test]
    async fn test_run_merges_both_venues() {
        let sources = vec![
            fixed("a", &[(100.0, 1.0)], &[(50010.0, 2.0)]),
            fixed("b", &[(90.0, 5.0)], &[(50000.0, 0.5)]),
        ];
        let est = run(&sources, 1.0, "BTC").await;
        assert_eq!(est.buy.notional, 50005.0);
        assert_eq!(est.sell.notional, 100.0);
    }

    #[tokio::test]
    async fn test_all_sources_empty_reports_zero() {
        let sources = vec![fixed("a", &[], &[]), fixed("b", &[], &[])];
        let est = run(&sources, 10.0, "BTC").await;
        assert_eq!(est.buy.notional, 0.0);
        assert_eq!(est.sell.notional, 0.0);
        assert!(est.buy.is_partial());
        assert_eq!(est.to_string(), "To buy 10 BTC: $0.00\nTo sell 10 BTC: $0.00");
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_source_order() {
        let sources = vec![fixed("a", &[(1.0, 1.0)], &[]), fixed("b", &[], &[(2.0, 1.0)])];
        let books = fetch_all(&sources).await;
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].bids, vec![Order::new(1.0, 1.0)]);
        assert_eq!(books[1].asks, vec![Order::new(2.0, 1.0)]);
    }

    #[test]
    fn test_report_format() {
        let snapshots = [OrderBook::new(vec![Order::new(100.0, 1.0)], vec![Order::new(101.0, 2.0)])];
        let est = estimate(&snapshots, 1.5, "BTC");
        assert_eq!(est.to_string(), "To buy 1.5 BTC: $151.50\nTo sell 1.5 BTC: $100.00");
        assert!(est.sell.is_partial());
        assert!(!est.buy.is_partial());
    }

    #[test]
    fn test_default_sources_are_independent() {
        let settings = Settings::defaults().unwrap();
        let sources = default_sources(&settings).unwrap();
        let names: Vec<_> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["coinbase", "gemini"]);
    }
}
