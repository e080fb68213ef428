use std::collections::HashMap;

use crate::wallet::{Wallet, WalletView};

/// The wallets of one network, keyed by public key.
///
/// Insertion order is tracked explicitly: listings report wallets in the
/// order they were created, and the first wallet ever added doubles as the
/// network's donation address.
pub(crate) struct WalletTable {
    wallets: HashMap<String, Wallet>,
    order: Vec<String>,
}

impl WalletTable {
    pub(crate) fn new() -> WalletTable {
        WalletTable {
            wallets: HashMap::new(),
            order: vec![],
        }
    }

    /// Add a wallet under its public key. Returns false (and changes
    /// nothing) when the address is already present.
    pub(crate) fn insert(&mut self, wallet: Wallet) -> bool {
        let address = wallet.get_public_key().to_string();
        if self.wallets.contains_key(&address) {
            return false;
        }
        self.order.push(address.clone());
        self.wallets.insert(address, wallet);
        true
    }

    pub(crate) fn get(&self, address: &str) -> Option<&Wallet> {
        self.wallets.get(address)
    }

    pub(crate) fn get_mut(&mut self, address: &str) -> Option<&mut Wallet> {
        self.wallets.get_mut(address)
    }

    pub(crate) fn contains(&self, address: &str) -> bool {
        self.wallets.contains_key(address)
    }

    /// The first wallet ever added; scheduled mining credits this address
    pub(crate) fn donation_address(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    /// Redacted views of every wallet, in creation order
    pub(crate) fn list(&self) -> Vec<WalletView> {
        self.order
            .iter()
            .filter_map(|address| self.wallets.get(address))
            .map(Wallet::redacted)
            .collect()
    }

    /// Sum of all balances, used by conservation checks
    pub(crate) fn total_balance(&self) -> f64 {
        self.wallets.values().map(Wallet::get_balance).sum()
    }
}
