use serde::{Deserialize, Serialize};

/// Listing placeholder shown in place of a private key
pub const REDACTED_PRIVATE_KEY: &str = "***hidden***";

/// One account on a network.
///
/// The private key is held in plaintext. This is a simulator; keys secure
/// nothing and are only reproduced in the view returned on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    public_key: String,
    private_key: String,
    balance: f64,
}

impl Wallet {
    pub(crate) fn new(public_key: String, private_key: String, balance: f64) -> Wallet {
        Wallet {
            public_key,
            private_key,
            balance,
        }
    }

    pub fn get_public_key(&self) -> &str {
        &self.public_key
    }

    pub fn get_balance(&self) -> f64 {
        self.balance
    }

    pub(crate) fn credit(&mut self, amount: f64) {
        self.balance += amount;
    }

    pub(crate) fn debit(&mut self, amount: f64) {
        self.balance -= amount;
    }

    /// Snapshot including the plaintext private key. Only wallet creation
    /// hands this out.
    pub(crate) fn reveal(&self) -> WalletView {
        WalletView {
            public_key: self.public_key.clone(),
            private_key: self.private_key.clone(),
            balance: self.balance,
        }
    }

    /// Snapshot with the private key redacted, as used by listings
    pub(crate) fn redacted(&self) -> WalletView {
        WalletView {
            public_key: self.public_key.clone(),
            private_key: REDACTED_PRIVATE_KEY.to_string(),
            balance: self.balance,
        }
    }
}

/// Caller-facing snapshot of a wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletView {
    pub public_key: String,
    pub private_key: String,
    pub balance: f64,
}
