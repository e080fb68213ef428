//! Fee estimation boundary
//!
//! The simulator never prices transactions itself. Callers inject a
//! [`FeeAdvisor`] into the registry; the ledger's only contribution is the
//! mempool summary string handed to it. A flat-rate advisor is bundled for
//! demos and tests.

pub mod advisor;
pub mod fixed;

pub use advisor::{FeeAdvisor, FeeEstimate, FeeEstimateInput};
pub use fixed::FixedFeeAdvisor;

use crate::core::Transaction;

/// Summarize a mempool for a fee advisor.
///
/// Empty pools report themselves as such; otherwise the summary counts the
/// pending transactions and averages the positive fees (two decimals, `N/A`
/// when every fee is zero), quoting the network's coin name.
pub fn mempool_summary(mempool: &[Transaction], coinbase_name: &str) -> String {
    let tx_count = mempool.len();
    if tx_count == 0 {
        return "Mempool is currently empty.".to_string();
    }

    let fees: Vec<f64> = mempool
        .iter()
        .map(Transaction::get_fee)
        .filter(|fee| *fee > 0.0)
        .collect();
    let avg_fee = if fees.is_empty() {
        "N/A".to_string()
    } else {
        format!("{:.2}", fees.iter().sum::<f64>() / fees.len() as f64)
    };

    format!("Mempool has {tx_count} transaction(s). Average fee (if any): {avg_fee} {coinbase_name}.")
}
