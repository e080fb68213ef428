use data_encoding::HEXLOWER;
use rand::distributions::Alphanumeric;
use rand::Rng;
use ring::digest::{Context, SHA256};
use serde::Serialize;

use crate::error::{LedgerError, Result};
use crate::utils::serialization::to_canonical_json;
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of hex characters of the private-key digest used as the address body
const PUBLIC_KEY_DIGEST_CHARS: usize = 20;

pub fn current_timestamp() -> Result<i64> {
    let duration = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();

    // Ensure the timestamp fits in i64
    if duration > i64::MAX as u128 {
        return Err(LedgerError::Time("Timestamp overflow".to_string()));
    }

    Ok(duration as i64)
}

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// Lowercase-hex SHA-256 of a text preimage
pub fn hash_text(data: &str) -> String {
    HEXLOWER.encode(&sha256_digest(data.as_bytes()))
}

/// Hash any serializable value through its canonical JSON form.
///
/// Equal values produce equal digests. A serialization failure aborts the
/// calling operation instead of producing a placeholder digest.
pub fn hash_value<T: Serialize>(value: &T) -> Result<String> {
    let canonical = to_canonical_json(value)?;
    Ok(hash_text(&canonical))
}

/// A simulated key pair. Both halves are plain strings; nothing here is
/// secret in any real sense.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

/// Generate a simulated key pair.
///
/// The private key mixes the current wall-clock time with random
/// alphanumeric characters. The public key is derived from it and can be
/// recomputed at any time with [`derive_public_key`].
pub fn generate_key_pair() -> Result<KeyPair> {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    let private_key = format!(
        "priv_{:x}_{}",
        current_timestamp()?,
        suffix.to_lowercase()
    );
    let public_key = derive_public_key(&private_key);
    Ok(KeyPair {
        public_key,
        private_key,
    })
}

/// Derive the public key for a private key: `pub_` plus the first 20 hex
/// characters of the private key's SHA-256 digest.
pub fn derive_public_key(private_key: &str) -> String {
    let digest = hash_text(private_key);
    format!("pub_{}", &digest[..PUBLIC_KEY_DIGEST_CHARS])
}

/// Stand-in private key recorded when a caller registers an externally
/// generated public key on a network.
pub fn synthesized_private_key(public_key: &str, network_id: &str) -> String {
    format!("simulated_priv_for_{public_key}_{network_id}")
}

/// Placeholder signature verification. Rules, applied in order:
///
/// 1. No declared sender (a coinbase) verifies true regardless of signature.
/// 2. A blank signature verifies false.
/// 3. Otherwise the claimed public key must equal the declared sender
///    address.
///
/// A real scheme would bind the signature to `payload`; here the parameter
/// is accepted but never inspected.
pub fn verify_signature(
    _payload: &str,
    signature: &str,
    claimed_public_key: &str,
    declared_from_address: Option<&str>,
) -> bool {
    let declared = match declared_from_address {
        None => return true,
        Some(addr) => addr,
    };

    if signature.trim().is_empty() {
        return false;
    }

    claimed_public_key == declared
}
