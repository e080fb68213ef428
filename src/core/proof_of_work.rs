use data_encoding::HEXLOWER;
use num_bigint::{BigInt, Sign};
use std::ops::ShlAssign;

use crate::config::MAX_DIFFICULTY;
use crate::core::{Block, Transaction};
use crate::error::{LedgerError, Result};
use crate::utils::{current_timestamp, sha256_digest, to_canonical_json};

/// The search state for mining one block.
///
/// Difficulty counts required leading `'0'` hex characters; a digest meets
/// it exactly when its integer value is below `1 << (256 - 4 * difficulty)`,
/// so the check runs on big integers instead of string prefixes.
pub struct ProofOfWork {
    height: u64,
    transactions_json: String,
    previous_hash: String,
    network_id: String,
    target: BigInt,
    difficulty: u32,
}

const MAX_NONCE: u64 = u64::MAX;

impl ProofOfWork {
    pub fn new_proof_of_work(
        height: u64,
        transactions: &[Transaction],
        previous_hash: &str,
        network_id: &str,
        difficulty: u32,
    ) -> Result<ProofOfWork> {
        if difficulty > MAX_DIFFICULTY {
            return Err(LedgerError::Config(format!(
                "difficulty {difficulty} exceeds the supported maximum of {MAX_DIFFICULTY}"
            )));
        }

        let transactions_json = to_canonical_json(&transactions)?;
        let mut target = BigInt::from(1);
        target.shl_assign((256 - 4 * difficulty) as usize);

        Ok(ProofOfWork {
            height,
            transactions_json,
            previous_hash: previous_hash.to_string(),
            network_id: network_id.to_string(),
            target,
            difficulty,
        })
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Re-check a stored block: its hash must recompute from its own fields
    /// and meet the difficulty target.
    pub fn validate(block: &Block, difficulty: u32, network_id: &str) -> Result<bool> {
        let pow = ProofOfWork::new_proof_of_work(
            block.get_height(),
            block.get_transactions(),
            block.get_previous_hash(),
            network_id,
            difficulty,
        )?;

        let data = pow.prepare_data(block.get_nonce(), block.get_timestamp());
        let hash = sha256_digest(data.as_bytes());
        if HEXLOWER.encode(&hash) != block.get_hash() {
            return Ok(false);
        }

        let hash_int = BigInt::from_bytes_be(Sign::Plus, &hash);
        Ok(hash_int < pow.target)
    }

    // Preimage layout: height, timestamp, transactions JSON, previous hash,
    // nonce, network id, concatenated without separators.
    fn prepare_data(&self, nonce: u64, timestamp: i64) -> String {
        format!(
            "{}{}{}{}{}{}",
            self.height,
            timestamp,
            self.transactions_json,
            self.previous_hash,
            nonce,
            self.network_id
        )
    }

    /// Search for an accepting nonce. The timestamp is re-sampled on every
    /// attempt, so the accepted triple must be recorded together.
    pub fn run(&self) -> Result<(u64, i64, String)> {
        let mut nonce: u64 = 0;
        while nonce < MAX_NONCE {
            let timestamp = current_timestamp()?;
            let data = self.prepare_data(nonce, timestamp);
            let hash = sha256_digest(data.as_bytes());
            let hash_int = BigInt::from_bytes_be(Sign::Plus, &hash);

            if hash_int < self.target {
                return Ok((nonce, timestamp, HEXLOWER.encode(&hash)));
            }
            nonce += 1;
        }

        Err(LedgerError::Mining("nonce space exhausted".to_string()))
    }
}
