// lib.rs - Library exports for the server binary and integration tests

pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod error;
pub mod math;
pub mod models;
pub mod web;

pub use engine::optimizer::{maximize, Maximizer};
pub use error::SearchError;
pub use math::constant_product::chain_profit;
pub use models::{ChainConfig, LiquidityPool, SearchInterval};
