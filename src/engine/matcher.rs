use std::cmp::Ordering;

use crate::engine::types::{Execution, Order, Side};
use tracing::{debug, instrument, trace};

// Cheapest first. Equal prices fall back to quantity so the walk order does not
// depend on which venue's levels were concatenated first.
fn ask_priority(a: &Order, b: &Order) -> Ordering {
    a.price.total_cmp(&b.price).then(a.quantity.total_cmp(&b.quantity))
}

// Highest first
fn bid_priority(a: &Order, b: &Order) -> Ordering {
    b.price.total_cmp(&a.price).then(a.quantity.total_cmp(&b.quantity))
}

/// Cost of lifting `qty` off the aggregated asks.
#[instrument(level = "debug", skip(asks), fields(levels = asks.len()))]
pub fn execute_buy(asks: &mut [Order], qty: f64) -> Execution {
    asks.sort_by(ask_priority);
    sweep(Side::BUY, asks, qty)
}

/// Revenue from hitting the aggregated bids with `qty`.
#[instrument(level = "debug", skip(bids), fields(levels = bids.len()))]
pub fn execute_sell(bids: &mut [Order], qty: f64) -> Execution {
    bids.sort_by(bid_priority);
    sweep(Side::SELL, bids, qty)
}

pub fn execute(side: Side, pool: &mut [Order], qty: f64) -> Execution {
    match side {
        Side::BUY => execute_buy(pool, qty),
        Side::SELL => execute_sell(pool, qty),
    }
}

// Greedy walk over levels that are already in priority order
fn sweep(side: Side, levels: &[Order], qty: f64) -> Execution {
    // also catches NaN
    if !(qty > 0.0) {
        trace!(?side, qty, "Non-positive quantity, nothing to match");
        return Execution::empty(side, qty);
    }

    let mut remaining = qty;
    let mut filled = 0.0;
    let mut notional = 0.0;

    for level in levels {
        let take = remaining.min(level.quantity);
        notional += take * level.price;
        filled += take;
        remaining -= take;
        trace!(?side, price = level.price, take, remaining, "Consumed level");
        if remaining <= 0.0 {
            break;
        }
    }

    let unfilled = remaining.max(0.0);
    if unfilled > 0.0 {
        debug!(?side, requested = qty, filled, unfilled, "Pool exhausted before quantity filled");
    } else {
        debug!(?side, requested = qty, notional, "Quantity fully matched");
    }

    Execution { side, requested: qty, filled, unfilled, notional }
}
