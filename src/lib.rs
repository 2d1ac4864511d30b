//! Trolley
//!
//! Trolley is a persisted shopping-cart state engine: a process-local mapping from
//! product to purchase intent that survives reloads and keeps its aggregates exact.

pub mod cart;
pub mod config;
pub mod fixtures;
pub mod images;
pub mod prelude;
pub mod products;
pub mod storage;
pub mod utils;
