//! # Simchain - My Multi-Network Ledger Simulator
//!
//! This is my in-process simulator of account-model proof-of-work ledgers.
//! When I come back to this code, here's what I need to remember:
//!
//! ## What I Built
//! - **Per-Network Ledgers**: Any string id names an isolated chain, mempool,
//!   and wallet table, created on first touch
//! - **Account Model**: Balances live on wallets; mining settles whole blocks
//!   against them, no UTXO tracking
//! - **Proof-of-Work**: Leading-zero hex difficulty over a big-integer target,
//!   with the timestamp re-sampled on every nonce attempt
//! - **Scheduled Mining**: A background thread per network mines pending
//!   transactions on the configured interval
//! - **Fee Advice**: A pluggable advisor trait fed with a mempool summary;
//!   a flat-rate implementation is bundled
//!
//! ## What This Deliberately Is Not
//! - **Not real cryptography**: key pairs are derived strings and signature
//!   checks only compare the claimed sender against the stored public key.
//!   Nothing here protects actual value
//! - **Not persistent**: every ledger lives in memory and disappears when the
//!   process exits. There is no database and no file format
//!
//! ## How I Organized My Code
//! - `core/`: blocks, transactions, proof-of-work, the per-network ledger,
//!   and fee advice
//! - `wallet/`: simulated key pairs, balances, and the per-network wallet table
//! - `network/`: the registry of ledgers and the interval mining scheduler
//! - `config/`: per-network settings with overrides for the well-known ids
//! - `utils/`: hashing, timestamps, and JSON serialization helpers
//! - `cli/`: command-line interface for the demo binary
//!
//! ## When I Need to Understand Something
//! 1. Start with `main.rs` to see the CLI commands
//! 2. Look at `core/ledger.rs` for admission, mining, and settlement
//! 3. Check `core/proof_of_work.rs` for how blocks are sealed
//! 4. Review `network/registry.rs` for how networks come into existence

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod network;
pub mod utils;
pub mod wallet;

#[cfg(test)]
pub mod testing;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{NetworkConfig, DEFAULT_COINBASE_NAME, MAX_DIFFICULTY};
pub use core::{
    Block, FeeAdvisor, FeeEstimate, FeeEstimateInput, FixedFeeAdvisor, NetworkLedger, ProofOfWork,
    Transaction, TransactionRequest, COINBASE_SIGNATURE, GENESIS_PREVIOUS_HASH,
};
pub use error::{LedgerError, RejectionReason, Result};
pub use network::{MiningScheduler, NetworkRegistry};
pub use utils::{
    current_timestamp, derive_public_key, generate_key_pair, hash_text, hash_value, sha256_digest,
    synthesized_private_key, to_canonical_json, to_pretty_json, verify_signature, KeyPair,
};
pub use wallet::{Wallet, WalletView, REDACTED_PRIVATE_KEY};
