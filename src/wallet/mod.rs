//! Wallet management
//!
//! This module holds the per-network account records and the
//! insertion-ordered table the ledger keeps them in. Key material is
//! simulated; see `utils::crypto` for how pairs are produced.

#[allow(clippy::module_inception)]
pub mod wallet;
pub mod wallets;

pub use wallet::{Wallet, WalletView, REDACTED_PRIVATE_KEY};
pub(crate) use wallets::WalletTable;
