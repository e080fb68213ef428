// One network's entire ledger: chain, mempool, and wallet table behind a
// single lock. Everything that mutates network state funnels through the
// write half, which is what serializes submission, mining, and wallet
// creation against each other.

use log::{debug, info, warn};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::{initial_balance_for, NetworkConfig};
use crate::core::fees::mempool_summary;
use crate::core::{Block, ProofOfWork, Transaction, TransactionRequest};
use crate::error::{LedgerError, RejectionReason, Result};
use crate::utils::{generate_key_pair, synthesized_private_key, verify_signature};
use crate::wallet::{Wallet, WalletTable, WalletView};

struct LedgerState {
    chain: Vec<Block>,
    mempool: Vec<Transaction>,
    wallets: WalletTable,
}

/// An independent proof-of-work ledger identified by its network id.
///
/// Construction seeds the genesis block and two funded wallets; nothing is
/// ever persisted, so dropping the ledger discards the network.
pub struct NetworkLedger {
    network_id: String,
    config: NetworkConfig,
    state: RwLock<LedgerState>,
}

impl NetworkLedger {
    pub fn new(network_id: &str, config: NetworkConfig) -> Result<NetworkLedger> {
        config.validate()?;

        let genesis = Block::genesis(network_id)?;
        let mut wallets = WalletTable::new();
        let initial_balance = initial_balance_for(network_id);
        for i in 0..2 {
            let pair = generate_key_pair()?;
            let balance = if i == 0 {
                initial_balance
            } else {
                initial_balance / 2.0
            };
            wallets.insert(Wallet::new(pair.public_key, pair.private_key, balance));
        }

        info!(
            "[{network_id}] Ledger initialized. Interval: {}ms, Difficulty: {}",
            config.block_interval_ms, config.difficulty
        );

        Ok(NetworkLedger {
            network_id: network_id.to_string(),
            config,
            state: RwLock::new(LedgerState {
                chain: vec![genesis],
                mempool: vec![],
                wallets,
            }),
        })
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn get_config(&self) -> &NetworkConfig {
        &self.config
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, LedgerState>> {
        self.state.read().map_err(|_| {
            LedgerError::Lock(format!("ledger lock poisoned on network {}", self.network_id))
        })
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, LedgerState>> {
        self.state.write().map_err(|_| {
            LedgerError::Lock(format!("ledger lock poisoned on network {}", self.network_id))
        })
    }

    /// Validate a submitted transfer and append it to the mempool.
    ///
    /// Checks run in order: field shape, sender existence, spendable
    /// balance, signature. The balance check charges what the sender has
    /// already committed in the mempool, so settlement can never overdraw.
    /// Failing any check rejects the whole submission with no side effects.
    pub fn submit_transaction(&self, request: TransactionRequest) -> Result<Transaction> {
        let mut state = self.write_state()?;

        Self::check_admission(&state, &request)?;

        let transaction = Transaction::from_request(request, &self.network_id)?;
        state.mempool.push(transaction.clone());
        info!(
            "[{}] Transaction {} added to mempool",
            self.network_id,
            transaction.get_id()
        );
        Ok(transaction)
    }

    fn check_admission(state: &LedgerState, request: &TransactionRequest) -> Result<()> {
        if request.from_address.trim().is_empty()
            || request.to_address.trim().is_empty()
            || !request.amount.is_finite()
            || request.amount <= 0.0
        {
            return Err(RejectionReason::MissingFields(
                "transaction must include from, to, and a positive amount".to_string(),
            )
            .into());
        }
        if !request.fee.is_finite() || request.fee < 0.0 {
            return Err(RejectionReason::MissingFields(
                "fee must be zero or positive".to_string(),
            )
            .into());
        }

        let sender = match state.wallets.get(&request.from_address) {
            Some(wallet) => wallet,
            None => {
                return Err(RejectionReason::UnknownSender(request.from_address.clone()).into())
            }
        };

        let pending_spend: f64 = state
            .mempool
            .iter()
            .filter(|tx| tx.get_from_address() == Some(request.from_address.as_str()))
            .map(|tx| tx.get_amount() + tx.get_fee())
            .sum();
        let available = sender.get_balance() - pending_spend;
        let required = request.amount + request.fee;
        if available < required {
            return Err(RejectionReason::InsufficientBalance {
                required,
                available,
            }
            .into());
        }

        let payload = request.signable_payload()?;
        if !verify_signature(
            &payload,
            &request.signature,
            sender.get_public_key(),
            Some(&request.from_address),
        ) {
            return Err(RejectionReason::InvalidSignature.into());
        }

        Ok(())
    }

    /// Mine a block crediting `miner_address`, which is created on the spot
    /// when unknown. An empty mempool still yields a coinbase-only block.
    pub fn mine(&self, miner_address: &str) -> Result<Block> {
        if miner_address.trim().is_empty() {
            return Err(LedgerError::Mining("miner address is required".to_string()));
        }

        let mut state = self.write_state()?;
        self.mine_locked(&mut state, miner_address)
    }

    /// One scheduler tick: mine only when transactions are pending. The
    /// reward goes to the donation address, or to a synthesized default
    /// when the network has no wallets at all.
    pub fn mine_scheduled(&self) -> Result<Option<Block>> {
        debug!("[{}] Attempting scheduled block mining...", self.network_id);
        let mut state = self.write_state()?;

        if state.mempool.is_empty() {
            debug!("[{}] No pending transactions to mine.", self.network_id);
            return Ok(None);
        }

        let miner = match state.wallets.donation_address() {
            Some(address) => address.to_string(),
            None => format!("default-miner-{}", self.network_id),
        };
        self.mine_locked(&mut state, &miner).map(Some)
    }

    fn mine_locked(&self, state: &mut LedgerState, miner_address: &str) -> Result<Block> {
        if !state.wallets.contains(miner_address) {
            warn!(
                "[{}] Miner address {miner_address} does not exist. Creating it.",
                self.network_id
            );
            let private_key = synthesized_private_key(miner_address, &self.network_id);
            state
                .wallets
                .insert(Wallet::new(miner_address.to_string(), private_key, 0.0));
            info!("[{}] Wallet created: {miner_address}", self.network_id);
        }

        let total_fees: f64 = state.mempool.iter().map(Transaction::get_fee).sum();
        let coinbase = Transaction::new_coinbase(
            miner_address,
            self.config.block_reward + total_fees,
            &self.network_id,
        )?;

        let mut transactions = Vec::with_capacity(state.mempool.len() + 1);
        transactions.push(coinbase);
        transactions.extend(state.mempool.iter().cloned());

        let (height, previous_hash) = match state.chain.last() {
            Some(tip) => (tip.get_height() + 1, tip.get_hash().to_string()),
            None => {
                return Err(LedgerError::Mining(
                    "chain is missing its genesis block".to_string(),
                ))
            }
        };

        let block = Block::new_block(
            height,
            transactions,
            previous_hash,
            miner_address,
            &self.network_id,
            self.config.difficulty,
        )?;

        state.chain.push(block.clone());
        Self::settle(state, &block, &self.network_id);
        state.mempool.clear();

        info!(
            "[{}] Block mined by {miner_address}. Reward: {} {}. Tx: {}",
            self.network_id,
            self.config.block_reward,
            self.config.coinbase_name,
            block.get_transactions().len() - 1
        );
        Ok(block)
    }

    // Settlement applies the block in transaction order. The admission
    // checks make overdrafts impossible; the skip-if-absent guards only
    // cover addresses that never had a wallet.
    fn settle(state: &mut LedgerState, block: &Block, network_id: &str) {
        for tx in block.get_transactions() {
            if let Some(sender) = tx.get_from_address() {
                if let Some(wallet) = state.wallets.get_mut(sender) {
                    wallet.debit(tx.get_amount() + tx.get_fee());
                }
            }
            match state.wallets.get_mut(tx.get_to_address()) {
                Some(wallet) => wallet.credit(tx.get_amount()),
                None => warn!(
                    "[{network_id}] Dropping credit of {} to unknown address {}",
                    tx.get_amount(),
                    tx.get_to_address()
                ),
            }
        }
    }

    /// Create a wallet, or return the existing one unchanged. The returned
    /// view is the only place a private key appears unredacted.
    pub fn create_wallet(&self, public_key: Option<&str>) -> Result<WalletView> {
        let mut state = self.write_state()?;

        let supplied = public_key.filter(|key| !key.trim().is_empty());
        let (public_key, private_key) = match supplied {
            Some(key) => (
                key.to_string(),
                synthesized_private_key(key, &self.network_id),
            ),
            None => {
                let pair = generate_key_pair()?;
                (pair.public_key, pair.private_key)
            }
        };

        if let Some(existing) = state.wallets.get(&public_key) {
            return Ok(existing.reveal());
        }

        let wallet = Wallet::new(public_key.clone(), private_key, 0.0);
        let view = wallet.reveal();
        state.wallets.insert(wallet);
        info!("[{}] Wallet created: {public_key}", self.network_id);
        Ok(view)
    }

    /// Stored balance of an address, `0` when no wallet exists for it
    pub fn balance_of(&self, address: &str) -> Result<f64> {
        let state = self.read_state()?;
        Ok(state
            .wallets
            .get(address)
            .map(Wallet::get_balance)
            .unwrap_or(0.0))
    }

    /// Redacted views of every wallet, in creation order
    pub fn list_wallets(&self) -> Result<Vec<WalletView>> {
        let state = self.read_state()?;
        Ok(state.wallets.list())
    }

    /// Sum of all wallet balances on this network
    pub fn total_balance(&self) -> Result<f64> {
        let state = self.read_state()?;
        Ok(state.wallets.total_balance())
    }

    /// The full chain, genesis first
    pub fn chain(&self) -> Result<Vec<Block>> {
        let state = self.read_state()?;
        Ok(state.chain.clone())
    }

    /// Height of the chain tip
    pub fn height(&self) -> Result<u64> {
        let state = self.read_state()?;
        Ok(state.chain.last().map(Block::get_height).unwrap_or(0))
    }

    /// Pending transactions in submission order
    pub fn mempool(&self) -> Result<Vec<Transaction>> {
        let state = self.read_state()?;
        Ok(state.mempool.clone())
    }

    /// The advisor-facing summary of the current mempool
    pub fn mempool_summary(&self) -> Result<String> {
        let state = self.read_state()?;
        Ok(mempool_summary(&state.mempool, &self.config.coinbase_name))
    }

    /// Walk the chain checking genesis shape, height sequence, hash
    /// linkage, and the proof-of-work of every mined block.
    pub fn is_valid_chain(&self) -> Result<bool> {
        let state = self.read_state()?;

        let mut previous: Option<&Block> = None;
        for block in &state.chain {
            match previous {
                None => {
                    if !block.is_genesis()
                        || block.get_hash() != Block::expected_genesis_hash(&self.network_id)
                    {
                        return Ok(false);
                    }
                }
                Some(prev) => {
                    if block.get_height() != prev.get_height() + 1
                        || block.get_previous_hash() != prev.get_hash()
                        || !ProofOfWork::validate(block, self.config.difficulty, &self.network_id)?
                    {
                        return Ok(false);
                    }
                }
            }
            previous = Some(block);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fast_config, transfer};

    fn test_ledger(network_id: &str) -> NetworkLedger {
        NetworkLedger::new(network_id, fast_config()).unwrap()
    }

    fn seeded_addresses(ledger: &NetworkLedger) -> Vec<String> {
        ledger
            .list_wallets()
            .unwrap()
            .into_iter()
            .map(|view| view.public_key)
            .collect()
    }

    #[test]
    fn test_new_ledger_seeds_genesis_and_wallets() {
        let ledger = test_ledger("dev");

        let chain = ledger.chain().unwrap();
        assert_eq!(chain.len(), 1);
        assert!(chain[0].is_genesis());

        let wallets = ledger.list_wallets().unwrap();
        assert_eq!(wallets.len(), 2);
        assert_eq!(wallets[0].balance, 5000.0);
        assert_eq!(wallets[1].balance, 2500.0);
        assert!(ledger.mempool().unwrap().is_empty());
    }

    #[test]
    fn test_submission_appends_in_fifo_order() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        let first = ledger
            .submit_transaction(transfer(&accounts[0], &accounts[1], 10.0, 1.0))
            .unwrap();
        let second = ledger
            .submit_transaction(transfer(&accounts[0], &accounts[1], 20.0, 1.0))
            .unwrap();

        let mempool = ledger.mempool().unwrap();
        assert_eq!(mempool.len(), 2);
        assert_eq!(mempool[0].get_id(), first.get_id());
        assert_eq!(mempool[1].get_id(), second.get_id());
    }

    #[test]
    fn test_submission_rejects_malformed_requests() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        let blank_sender = ledger.submit_transaction(transfer("  ", &accounts[1], 10.0, 0.0));
        assert!(matches!(
            blank_sender,
            Err(LedgerError::Rejected(RejectionReason::MissingFields(_)))
        ));

        let zero_amount =
            ledger.submit_transaction(transfer(&accounts[0], &accounts[1], 0.0, 0.0));
        assert!(matches!(
            zero_amount,
            Err(LedgerError::Rejected(RejectionReason::MissingFields(_)))
        ));

        let negative_fee =
            ledger.submit_transaction(transfer(&accounts[0], &accounts[1], 10.0, -1.0));
        assert!(matches!(
            negative_fee,
            Err(LedgerError::Rejected(RejectionReason::MissingFields(_)))
        ));

        assert!(ledger.mempool().unwrap().is_empty());
    }

    #[test]
    fn test_submission_rejects_unknown_sender() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        let result = ledger.submit_transaction(transfer("pub_stranger", &accounts[0], 10.0, 0.0));
        assert!(matches!(
            result,
            Err(LedgerError::Rejected(RejectionReason::UnknownSender(addr))) if addr == "pub_stranger"
        ));
    }

    #[test]
    fn test_submission_rejects_insufficient_balance() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        let result =
            ledger.submit_transaction(transfer(&accounts[0], &accounts[1], 6000.0, 1.0));
        assert!(matches!(
            result,
            Err(LedgerError::Rejected(RejectionReason::InsufficientBalance {
                required,
                available,
            })) if required == 6001.0 && available == 5000.0
        ));
    }

    #[test]
    fn test_submission_charges_pending_spend() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        ledger
            .submit_transaction(transfer(&accounts[0], &accounts[1], 3000.0, 0.0))
            .unwrap();

        // 2000 remains spendable; a second 3000 transfer would overdraw at
        // settlement and must be refused up front.
        let result =
            ledger.submit_transaction(transfer(&accounts[0], &accounts[1], 3000.0, 0.0));
        assert!(matches!(
            result,
            Err(LedgerError::Rejected(RejectionReason::InsufficientBalance {
                required,
                available,
            })) if required == 3000.0 && available == 2000.0
        ));
        assert_eq!(ledger.mempool().unwrap().len(), 1);
    }

    #[test]
    fn test_submission_rejects_blank_signature() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        let mut request = transfer(&accounts[0], &accounts[1], 10.0, 0.0);
        request.signature = "   ".to_string();

        let result = ledger.submit_transaction(request);
        assert!(matches!(
            result,
            Err(LedgerError::Rejected(RejectionReason::InvalidSignature))
        ));
        assert!(ledger.mempool().unwrap().is_empty());
    }

    #[test]
    fn test_rejection_leaves_balances_untouched() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);
        let before = ledger.total_balance().unwrap();

        let _ = ledger.submit_transaction(transfer(&accounts[0], &accounts[1], 9999.0, 0.0));

        assert_eq!(ledger.total_balance().unwrap(), before);
        assert_eq!(ledger.balance_of(&accounts[0]).unwrap(), 5000.0);
    }

    #[test]
    fn test_mine_requires_miner_address() {
        let ledger = test_ledger("dev");

        assert!(matches!(ledger.mine(""), Err(LedgerError::Mining(_))));
        assert!(matches!(ledger.mine("   "), Err(LedgerError::Mining(_))));
    }

    #[test]
    fn test_mine_empty_mempool_yields_coinbase_only_block() {
        let ledger = test_ledger("dev");

        let block = ledger.mine("pub_solo_miner").unwrap();

        assert_eq!(block.get_transactions().len(), 1);
        let coinbase = &block.get_transactions()[0];
        assert!(coinbase.is_coinbase());
        assert_eq!(coinbase.get_amount(), 200.0);
        assert_eq!(ledger.balance_of("pub_solo_miner").unwrap(), 200.0);
    }

    #[test]
    fn test_mine_settles_and_clears_mempool() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        ledger
            .submit_transaction(transfer(&accounts[0], &accounts[1], 100.0, 2.5))
            .unwrap();
        let block = ledger.mine("pub_miner").unwrap();

        // Coinbase first, then the pending transfer.
        assert_eq!(block.get_transactions().len(), 2);
        assert!(block.get_transactions()[0].is_coinbase());
        assert_eq!(block.get_transactions()[0].get_amount(), 202.5);

        assert_eq!(ledger.balance_of(&accounts[0]).unwrap(), 4897.5);
        assert_eq!(ledger.balance_of(&accounts[1]).unwrap(), 2600.0);
        assert_eq!(ledger.balance_of("pub_miner").unwrap(), 202.5);
        assert!(ledger.mempool().unwrap().is_empty());
    }

    #[test]
    fn test_mined_block_keeps_submission_order() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        let first = ledger
            .submit_transaction(transfer(&accounts[0], &accounts[1], 10.0, 0.0))
            .unwrap();
        let second = ledger
            .submit_transaction(transfer(&accounts[1], &accounts[0], 5.0, 0.0))
            .unwrap();
        let block = ledger.mine("pub_miner").unwrap();

        let transactions = block.get_transactions();
        assert_eq!(transactions.len(), 3);
        assert!(transactions[0].is_coinbase());
        assert_eq!(transactions[1].get_id(), first.get_id());
        assert_eq!(transactions[2].get_id(), second.get_id());
    }

    #[test]
    fn test_mining_grows_supply_by_exactly_the_block_reward() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);
        let before = ledger.total_balance().unwrap();

        ledger
            .submit_transaction(transfer(&accounts[0], &accounts[1], 40.0, 3.0))
            .unwrap();
        ledger.mine(&accounts[1]).unwrap();

        assert_eq!(ledger.total_balance().unwrap(), before + 200.0);
    }

    #[test]
    fn test_credit_to_unknown_recipient_is_dropped() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        ledger
            .submit_transaction(transfer(&accounts[0], "pub_nobody", 75.0, 0.0))
            .unwrap();
        ledger.mine(&accounts[1]).unwrap();

        assert_eq!(ledger.balance_of(&accounts[0]).unwrap(), 4925.0);
        assert_eq!(ledger.balance_of("pub_nobody").unwrap(), 0.0);
        let listed: Vec<String> = seeded_addresses(&ledger);
        assert!(!listed.contains(&"pub_nobody".to_string()));
    }

    #[test]
    fn test_mined_blocks_link_and_validate() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        ledger
            .submit_transaction(transfer(&accounts[0], &accounts[1], 10.0, 1.0))
            .unwrap();
        ledger.mine(&accounts[1]).unwrap();
        ledger.mine(&accounts[1]).unwrap();

        let chain = ledger.chain().unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[1].get_previous_hash(), chain[0].get_hash());
        assert_eq!(chain[2].get_previous_hash(), chain[1].get_hash());
        assert_eq!(ledger.height().unwrap(), 2);
        assert!(ledger.is_valid_chain().unwrap());
    }

    #[test]
    fn test_scheduled_mining_skips_empty_mempool() {
        let ledger = test_ledger("dev");

        assert!(ledger.mine_scheduled().unwrap().is_none());
        assert_eq!(ledger.height().unwrap(), 0);
    }

    #[test]
    fn test_scheduled_mining_credits_donation_address() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        ledger
            .submit_transaction(transfer(&accounts[0], &accounts[1], 10.0, 1.0))
            .unwrap();
        let block = ledger.mine_scheduled().unwrap().expect("block expected");

        assert_eq!(block.get_miner(), Some(accounts[0].as_str()));
        assert!(ledger.mempool().unwrap().is_empty());
    }

    #[test]
    fn test_create_wallet_generates_rederivable_keys() {
        let ledger = test_ledger("dev");

        let view = ledger.create_wallet(None).unwrap();
        assert_eq!(
            crate::utils::derive_public_key(&view.private_key),
            view.public_key
        );
        assert_eq!(view.balance, 0.0);
    }

    #[test]
    fn test_create_wallet_is_idempotent() {
        let ledger = test_ledger("dev");

        let created = ledger.create_wallet(Some("pub_external")).unwrap();
        assert_eq!(
            created.private_key,
            "simulated_priv_for_pub_external_dev"
        );

        ledger.mine("pub_external").unwrap();
        let again = ledger.create_wallet(Some("pub_external")).unwrap();
        assert_eq!(again.public_key, "pub_external");
        assert_eq!(again.balance, 200.0);
        assert_eq!(ledger.list_wallets().unwrap().len(), 3);
    }

    #[test]
    fn test_balance_of_unknown_address_is_zero() {
        let ledger = test_ledger("dev");
        assert_eq!(ledger.balance_of("pub_missing").unwrap(), 0.0);
    }

    #[test]
    fn test_mempool_summary_tracks_pool() {
        let ledger = test_ledger("dev");
        let accounts = seeded_addresses(&ledger);

        assert_eq!(
            ledger.mempool_summary().unwrap(),
            "Mempool is currently empty."
        );

        ledger
            .submit_transaction(transfer(&accounts[0], &accounts[1], 10.0, 4.0))
            .unwrap();
        assert_eq!(
            ledger.mempool_summary().unwrap(),
            "Mempool has 1 transaction(s). Average fee (if any): 4.00 uemfCoin."
        );
    }
}
