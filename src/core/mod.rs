//! Core ledger functionality
//!
//! This module contains the fundamental ledger components including
//! blocks, transactions, per-network ledger state, fee advice, and
//! proof-of-work consensus.

pub mod block;
pub mod fees;
pub mod ledger;
pub mod proof_of_work;
pub mod transaction;

pub use block::{Block, GENESIS_PREVIOUS_HASH};
pub use fees::{FeeAdvisor, FeeEstimate, FeeEstimateInput, FixedFeeAdvisor};
pub use ledger::NetworkLedger;
pub use proof_of_work::ProofOfWork;
pub use transaction::{Transaction, TransactionRequest, COINBASE_SIGNATURE};
