#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    BUY,
    SELL
}

// One price level of resting liquidity, already normalised from the venue wire format
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    pub price: f64,
    pub quantity: f64,
}

impl Order {
    pub fn new(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }
}

// Point-in-time snapshot from a single venue. Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBook {
    pub bids: Vec<Order>,
    pub asks: Vec<Order>,
}

impl OrderBook {
    pub fn new(bids: Vec<Order>, asks: Vec<Order>) -> Self {
        Self { bids, asks }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// Outcome of sweeping one side of the book for a target quantity.
///
/// `notional` is the cost of a buy or the revenue of a sell. When the pool runs
/// dry before the target is reached, `unfilled` holds what is left and
/// `notional` only covers the liquidity that was actually there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Execution {
    pub side: Side,
    pub requested: f64,
    pub filled: f64,
    pub unfilled: f64,
    pub notional: f64,
}

impl Execution {
    pub fn empty(side: Side, requested: f64) -> Self {
        Self { side, requested, filled: 0.0, unfilled: 0.0, notional: 0.0 }
    }

    pub fn is_partial(&self) -> bool {
        self.unfilled > 0.0
    }

    pub fn average_price(&self) -> Option<f64> {
        if self.filled > 0.0 {
            Some(self.notional / self.filled)
        } else {
            None
        }
    }
}
