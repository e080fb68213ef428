//! Error handling for the ledger simulator
//!
//! Two families live here: `LedgerError` for internal faults that abort an
//! operation, and `RejectionReason` for transaction admission checks that
//! fail. Rejections are ordinary data returned to the caller and never
//! indicate a corrupted ledger.

use std::fmt;

/// Result type alias for simulator operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Operation failures. `Rejected` carries an admission check that failed
/// and is routine; every other variant is an internal fault. None of them
/// leaves partial state behind.
#[derive(Debug, Clone)]
pub enum LedgerError {
    /// A submitted transaction failed an admission check
    Rejected(RejectionReason),
    /// Canonical serialization or digest failure while hashing
    Hashing(String),
    /// System clock unavailable or out of range
    Time(String),
    /// Invalid network configuration
    Config(String),
    /// Mining request errors (e.g. blank miner address)
    Mining(String),
    /// A shared-state lock was poisoned by a panicking writer
    Lock(String),
    /// The fee advisor could not produce an estimate
    Advisor(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::Rejected(reason) => write!(f, "Transaction rejected: {reason}"),
            LedgerError::Hashing(msg) => write!(f, "Hashing error: {msg}"),
            LedgerError::Time(msg) => write!(f, "Clock error: {msg}"),
            LedgerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LedgerError::Mining(msg) => write!(f, "Mining error: {msg}"),
            LedgerError::Lock(msg) => write!(f, "Lock error: {msg}"),
            LedgerError::Advisor(msg) => write!(f, "Fee advisor error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<RejectionReason> for LedgerError {
    fn from(reason: RejectionReason) -> Self {
        LedgerError::Rejected(reason)
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Hashing(err.to_string())
    }
}

impl From<std::time::SystemTimeError> for LedgerError {
    fn from(err: std::time::SystemTimeError) -> Self {
        LedgerError::Time(err.to_string())
    }
}

/// Why a submitted transaction was refused admission to the mempool.
///
/// Each variant names the check that failed. A rejection has no side
/// effects: the mempool and every balance stay exactly as they were.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// A required field is missing or malformed
    MissingFields(String),
    /// The sender address has no wallet on this network
    UnknownSender(String),
    /// The sender cannot cover amount + fee
    InsufficientBalance { required: f64, available: f64 },
    /// The placeholder signature check failed
    InvalidSignature,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::MissingFields(msg) => {
                write!(f, "Invalid transaction request: {msg}")
            }
            RejectionReason::UnknownSender(addr) => {
                write!(f, "Sender wallet not found: {addr}")
            }
            RejectionReason::InsufficientBalance {
                required,
                available,
            } => {
                write!(
                    f,
                    "Insufficient balance: required {required}, available {available}"
                )
            }
            RejectionReason::InvalidSignature => {
                write!(f, "Signature verification failed")
            }
        }
    }
}

impl std::error::Error for RejectionReason {}
