//! Shared helpers for unit tests
//!
//! Tests mine with difficulty 1 so proof-of-work completes in a few
//! attempts, and sign transfers with a placeholder signature that passes
//! the sender-matches-key check.

use crate::config::NetworkConfig;
use crate::core::TransactionRequest;

/// A low-difficulty configuration for tests that actually mine
pub fn fast_config() -> NetworkConfig {
    NetworkConfig {
        block_reward: 200.0,
        difficulty: 1,
        coinbase_name: "uemfCoin".to_string(),
        block_interval_ms: 30_000,
    }
}

/// A transfer request from `from` to `to`, signed well enough to pass
/// admission when `from` is the sender's own public key
pub fn transfer(from: &str, to: &str, amount: f64, fee: f64) -> TransactionRequest {
    TransactionRequest {
        from_address: from.to_string(),
        to_address: to.to_string(),
        amount,
        fee,
        signature: "test-signature".to_string(),
        smart_contract_details: None,
    }
}
