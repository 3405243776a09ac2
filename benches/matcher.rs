use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use lobx_agg::engine::matcher::{execute_buy, execute_sell};
use lobx_agg::engine::types::{Order, OrderBook};
use lobx_agg::market_data::aggregator::aggregate;

// Two venues of roughly Coinbase level-2 depth, interleaved prices
fn snapshots(levels: usize) -> Vec<OrderBook> {
    (0..2)
        .map(|venue| {
            let offset = venue as f64 * 0.5;
            let bids = (0..levels)
                .map(|i| Order::new(50_000.0 - i as f64 - offset, 0.1 + (i % 7) as f64 * 0.05))
                .collect();
            let asks = (0..levels)
                .map(|i| Order::new(50_001.0 + i as f64 + offset, 0.1 + (i % 5) as f64 * 0.05))
                .collect();
            OrderBook::new(bids, asks)
        })
        .collect()
}

fn bench_matcher(c: &mut Criterion) {
    let books = snapshots(500);

    c.bench_function("aggregate_2x500", |b| b.iter(|| aggregate(black_box(&books))));

    let merged = aggregate(&books);
    c.bench_function("execute_buy_10", |b| {
        b.iter_batched(
            || merged.asks.clone(),
            |mut asks| execute_buy(&mut asks, black_box(10.0)),
            BatchSize::SmallInput,
        )
    });
    c.bench_function("execute_sell_10", |b| {
        b.iter_batched(
            || merged.bids.clone(),
            |mut bids| execute_sell(&mut bids, black_box(10.0)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_matcher);
criterion_main!(benches);
