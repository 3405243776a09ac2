use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::engine::types::{Order, OrderBook};

/// Every venue's liquidity in one pool per side.
///
/// Plain concatenation: levels at the same price from different venues stay
/// separate entries. The matcher re-sorts, so concatenation order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedBook {
    pub bids: Vec<Order>,
    pub asks: Vec<Order>,
}

pub fn aggregate(snapshots: &[OrderBook]) -> AggregatedBook {
    let mut merged = AggregatedBook {
        bids: Vec::with_capacity(snapshots.iter().map(|s| s.bids.len()).sum()),
        asks: Vec::with_capacity(snapshots.iter().map(|s| s.asks.len()).sum()),
    };
    for snapshot in snapshots {
        merged.bids.extend_from_slice(&snapshot.bids);
        merged.asks.extend_from_slice(&snapshot.asks);
    }
    merged
}

impl AggregatedBook {
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    // Highest bid across venues
    pub fn best_bid(&self) -> Option<Order> {
        self.bids.iter().copied().max_by(|a, b| a.price.total_cmp(&b.price))
    }

    // Lowest ask across venues
    pub fn best_ask(&self) -> Option<Order> {
        self.asks.iter().copied().min_by(|a, b| a.price.total_cmp(&b.price))
    }

    pub fn spread(&self) -> Option<f64> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }

    pub fn total_bid_quantity(&self) -> f64 {
        self.bids.iter().map(|o| o.quantity).sum()
    }

    pub fn total_ask_quantity(&self) -> f64 {
        self.asks.iter().map(|o| o.quantity).sum()
    }

    /// Depth ladder with sizes summed by price, best `n` levels per side.
    /// A view for reporting only; the matcher works on the raw pools.
    pub fn depth_top_n(&self, n: usize) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
        let bids = ladder(&self.bids);
        let asks = ladder(&self.asks);

        let top_bids = bids.iter().rev().take(n).map(|(p, s)| (p.0, *s)).collect();
        let top_asks = asks.iter().take(n).map(|(p, s)| (p.0, *s)).collect();
        (top_bids, top_asks)
    }
}

fn ladder(side: &[Order]) -> BTreeMap<OrderedFloat<f64>, f64> {
    let mut levels: BTreeMap<OrderedFloat<f64>, f64> = BTreeMap::new();
    for order in side {
        *levels.entry(OrderedFloat(order.price)).or_default() += order.quantity;
    }
    levels
}
