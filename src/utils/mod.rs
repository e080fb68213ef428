//! Utility functions and helpers
//!
//! This module contains the hashing and simulated-key utilities plus the
//! canonical JSON layer used throughout the ledger simulator.

pub mod crypto;
pub mod serialization;

pub use crypto::{
    current_timestamp, derive_public_key, generate_key_pair, hash_text, hash_value,
    sha256_digest, synthesized_private_key, verify_signature, KeyPair,
};

pub use serialization::{to_canonical_json, to_pretty_json};
