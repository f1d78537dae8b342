//! Core library for the triangular arbitrage detector.
//!
//! Venue metadata is indexed once and turned into a fixed set of three-symbol
//! cycles; a live best bid/ask table is then rescanned after every batch of
//! streamed ticks to find and rank cycles that return more than they cost.

pub mod aggregator;
pub mod arbitrage;
pub mod cex;
pub mod config;
pub mod engine;
pub mod errors;
pub mod models;
pub mod utils;

pub use engine::ArbitrageEngine;
pub use errors::{AppError, Result};
