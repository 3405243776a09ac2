// Market data module entrypoint
pub mod adapters;       // venue-specific fetchers (Coinbase, Gemini)
pub mod aggregator;     // merges venue snapshots into one pool per side
pub mod normaliser;     // converts wire strings/numbers -> Order
pub mod rate_limiter;   // per-venue call gate
pub mod router;         // fetch -> aggregate -> match
