//! CEX adapters.
//!
//! Responsibilities:
//! • Fetch venue symbol metadata once at startup.
//! • Decode the all-market ticker stream into tick batches.
//! • Keep the stream alive with reconnection and backoff.

pub mod binance;
pub mod feed;

pub use binance::{fetch_exchange_info, load_metadata_index, parse_ticker_batch};
pub use feed::{Backoff, FeedState, run_feed};
