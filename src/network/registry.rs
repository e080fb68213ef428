use log::info;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::NetworkConfig;
use crate::core::{
    Block, FeeAdvisor, FeeEstimate, FeeEstimateInput, FixedFeeAdvisor, NetworkLedger, Transaction,
    TransactionRequest,
};
use crate::error::{LedgerError, Result};
use crate::network::MiningScheduler;
use crate::wallet::WalletView;

struct NetworkHandle {
    ledger: Arc<NetworkLedger>,
    scheduler: MiningScheduler,
}

/// Owns every ledger in the process, keyed by network id.
///
/// Networks come into existence on first touch: any operation naming an
/// unknown id creates the ledger from its resolved configuration and
/// starts its mining scheduler. The registry is also the single place the
/// fee advisor is wired in, so callers estimate fees without knowing which
/// policy backs the advice.
pub struct NetworkRegistry {
    networks: Mutex<HashMap<String, NetworkHandle>>,
    advisor: Arc<dyn FeeAdvisor>,
}

impl NetworkRegistry {
    pub fn new(advisor: Arc<dyn FeeAdvisor>) -> NetworkRegistry {
        NetworkRegistry {
            networks: Mutex::new(HashMap::new()),
            advisor,
        }
    }

    /// The ledger for `network_id`, created and scheduled on first use
    pub fn ledger(&self, network_id: &str) -> Result<Arc<NetworkLedger>> {
        let network_id = network_id.trim();
        if network_id.is_empty() {
            return Err(LedgerError::Config(
                "network id must not be blank".to_string(),
            ));
        }

        let mut networks = self
            .networks
            .lock()
            .map_err(|_| LedgerError::Lock("network registry lock poisoned".to_string()))?;

        if let Some(handle) = networks.get(network_id) {
            return Ok(Arc::clone(&handle.ledger));
        }

        info!("Creating new ledger for network: {network_id}");
        let config = NetworkConfig::for_network(network_id);
        let ledger = Arc::new(NetworkLedger::new(network_id, config)?);
        let scheduler = MiningScheduler::start(Arc::clone(&ledger));
        networks.insert(
            network_id.to_string(),
            NetworkHandle {
                ledger: Arc::clone(&ledger),
                scheduler,
            },
        );
        Ok(ledger)
    }

    pub fn submit_transaction(
        &self,
        network_id: &str,
        request: TransactionRequest,
    ) -> Result<Transaction> {
        self.ledger(network_id)?.submit_transaction(request)
    }

    pub fn mine(&self, network_id: &str, miner_address: &str) -> Result<Block> {
        self.ledger(network_id)?.mine(miner_address)
    }

    pub fn create_wallet(
        &self,
        network_id: &str,
        public_key: Option<&str>,
    ) -> Result<WalletView> {
        self.ledger(network_id)?.create_wallet(public_key)
    }

    pub fn list_wallets(&self, network_id: &str) -> Result<Vec<WalletView>> {
        self.ledger(network_id)?.list_wallets()
    }

    pub fn balance_of(&self, network_id: &str, address: &str) -> Result<f64> {
        self.ledger(network_id)?.balance_of(address)
    }

    pub fn chain(&self, network_id: &str) -> Result<Vec<Block>> {
        self.ledger(network_id)?.chain()
    }

    pub fn mempool(&self, network_id: &str) -> Result<Vec<Transaction>> {
        self.ledger(network_id)?.mempool()
    }

    pub fn config(&self, network_id: &str) -> Result<NetworkConfig> {
        Ok(self.ledger(network_id)?.get_config().clone())
    }

    /// Ask the advisor for a fee, handing it the live mempool summary
    pub fn estimate_fee(
        &self,
        network_id: &str,
        transaction_details: &str,
    ) -> Result<FeeEstimate> {
        let ledger = self.ledger(network_id)?;
        let input = FeeEstimateInput {
            transaction_details: transaction_details.to_string(),
            mempool_data: ledger.mempool_summary()?,
        };
        self.advisor.estimate(&input)
    }

    /// Stop and join every mining scheduler. Ledgers stay readable until
    /// the registry itself is dropped.
    pub fn shutdown(&self) {
        if let Ok(mut networks) = self.networks.lock() {
            for handle in networks.values() {
                handle.scheduler.stop();
            }
            networks.clear();
        }
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::new(Arc::new(FixedFeeAdvisor::default()))
    }
}

impl Drop for NetworkRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}
