//! Configuration management
//!
//! This module resolves per-network settings: built-in defaults, the
//! override table for the well-known networks, and the seeded wallet
//! balances.

pub mod settings;

pub use settings::{
    initial_balance_for, NetworkConfig, DEFAULT_COINBASE_NAME, MAX_DIFFICULTY,
};
