use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{ProofOfWork, Transaction};
use crate::error::Result;
use crate::utils::{current_timestamp, hash_text};

/// Previous-hash marker carried by every genesis block
pub const GENESIS_PREVIOUS_HASH: &str = "0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    height: u64,
    timestamp: i64,
    transactions: Vec<Transaction>,
    previous_hash: String,
    hash: String,
    nonce: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    miner: Option<String>,
}

impl Block {
    /// Mine a block over the given candidate transactions. Runs the
    /// proof-of-work search and records the accepting nonce, timestamp, and
    /// hash together.
    pub(crate) fn new_block(
        height: u64,
        transactions: Vec<Transaction>,
        previous_hash: String,
        miner_address: &str,
        network_id: &str,
        difficulty: u32,
    ) -> Result<Block> {
        info!(
            "[{network_id}] Starting proof-of-work for block at height {height} with difficulty {difficulty}"
        );
        let pow = ProofOfWork::new_proof_of_work(
            height,
            &transactions,
            &previous_hash,
            network_id,
            difficulty,
        )?;
        let (nonce, timestamp, hash) = pow.run()?;
        info!("[{network_id}] Proof-of-work completed for block: {hash}");

        Ok(Block {
            height,
            timestamp,
            transactions,
            previous_hash,
            hash,
            nonce,
            miner: Some(miner_address.to_string()),
        })
    }

    /// The first block of a network. Its hash is derived from the network
    /// id, so no two networks share a genesis.
    pub(crate) fn genesis(network_id: &str) -> Result<Block> {
        Ok(Block {
            height: 0,
            timestamp: current_timestamp()?,
            transactions: vec![],
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            hash: Self::expected_genesis_hash(network_id),
            nonce: 0,
            miner: None,
        })
    }

    /// The hash every genesis block of `network_id` must carry
    pub(crate) fn expected_genesis_hash(network_id: &str) -> String {
        hash_text(&format!("GenesisBlock-{network_id}"))
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }

    pub fn get_height(&self) -> u64 {
        self.height
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn get_previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }

    pub fn get_hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn get_nonce(&self) -> u64 {
        self.nonce
    }

    pub fn get_miner(&self) -> Option<&str> {
        self.miner.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hash_text;

    #[test]
    fn test_genesis_shape() {
        let genesis = Block::genesis("dev").unwrap();

        assert_eq!(genesis.get_height(), 0);
        assert_eq!(genesis.get_previous_hash(), "0");
        assert_eq!(genesis.get_nonce(), 0);
        assert!(genesis.get_transactions().is_empty());
        assert_eq!(genesis.get_miner(), None);
        assert_eq!(genesis.get_hash(), hash_text("GenesisBlock-dev"));
        assert!(genesis.is_genesis());
    }

    #[test]
    fn test_genesis_is_network_specific() {
        let dev = Block::genesis("dev").unwrap();
        let test = Block::genesis("test").unwrap();

        assert_ne!(dev.get_hash(), test.get_hash());
    }

    #[test]
    fn test_new_block_records_mining_result() {
        let coinbase = Transaction::new_coinbase("pub_miner", 200.0, "dev").unwrap();
        let previous = Block::genesis("dev").unwrap();

        let block = Block::new_block(
            1,
            vec![coinbase],
            previous.get_hash().to_string(),
            "pub_miner",
            "dev",
            1,
        )
        .unwrap();

        assert_eq!(block.get_height(), 1);
        assert_eq!(block.get_previous_hash(), previous.get_hash());
        assert_eq!(block.get_miner(), Some("pub_miner"));
        assert!(block.get_hash().starts_with('0'));
        assert_eq!(block.get_transactions().len(), 1);
        assert!(!block.is_genesis());
    }
}
