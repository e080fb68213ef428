// Account-model transactions. A request comes in from a caller, the ledger
// validates it, and only then does it become a Transaction with an id and a
// timestamp. Coinbase transactions are minted by the miner and never pass
// through submission.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::utils::{current_timestamp, hash_value, to_canonical_json};

/// Signature literal carried by coinbase transactions
pub const COINBASE_SIGNATURE: &str = "coinbase";

/// A transfer as submitted by a caller. The ledger assigns id and timestamp
/// on admission; until then the request is inert data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    pub fee: f64,
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_contract_details: Option<String>,
}

impl TransactionRequest {
    /// Canonical form of the fields a signature covers
    pub fn signable_payload(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Signable<'a> {
            from_address: &'a str,
            to_address: &'a str,
            amount: f64,
            fee: f64,
        }

        to_canonical_json(&Signable {
            from_address: &self.from_address,
            to_address: &self.to_address,
            amount: self.amount,
            fee: self.fee,
        })
    }
}

// Preimage for a transaction id. The UUID salt keeps ids distinct even when
// identical requests land within the same millisecond.
#[derive(Serialize)]
struct IdPreimage<'a> {
    from_address: Option<&'a str>,
    to_address: &'a str,
    amount: f64,
    fee: f64,
    signature: &'a str,
    smart_contract_details: Option<&'a str>,
    timestamp: i64,
    network_id: &'a str,
    salt: Uuid,
}

/// A settled or pending transfer on one network.
///
/// `from_address = None` marks a coinbase. The optional contract details are
/// an opaque payload carried verbatim; nothing in the simulator interprets
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    id: String,
    from_address: Option<String>,
    to_address: String,
    amount: f64,
    fee: f64,
    timestamp: i64,
    signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    smart_contract_details: Option<String>,
}

impl Transaction {
    /// Turn an admitted request into a pending transaction: stamp it and
    /// assign the salted id.
    pub(crate) fn from_request(
        request: TransactionRequest,
        network_id: &str,
    ) -> Result<Transaction> {
        let timestamp = current_timestamp()?;
        let id = hash_value(&IdPreimage {
            from_address: Some(&request.from_address),
            to_address: &request.to_address,
            amount: request.amount,
            fee: request.fee,
            signature: &request.signature,
            smart_contract_details: request.smart_contract_details.as_deref(),
            timestamp,
            network_id,
            salt: Uuid::new_v4(),
        })?;

        Ok(Transaction {
            id,
            from_address: Some(request.from_address),
            to_address: request.to_address,
            amount: request.amount,
            fee: request.fee,
            timestamp,
            signature: request.signature,
            smart_contract_details: request.smart_contract_details,
        })
    }

    /// Mint the reward transaction that opens a mined block. `amount` is the
    /// block reward plus the fees of the transactions mined alongside it.
    pub(crate) fn new_coinbase(
        miner_address: &str,
        amount: f64,
        network_id: &str,
    ) -> Result<Transaction> {
        let timestamp = current_timestamp()?;
        let id = hash_value(&IdPreimage {
            from_address: None,
            to_address: miner_address,
            amount,
            fee: 0.0,
            signature: COINBASE_SIGNATURE,
            smart_contract_details: None,
            timestamp,
            network_id,
            salt: Uuid::new_v4(),
        })?;

        Ok(Transaction {
            id,
            from_address: None,
            to_address: miner_address.to_string(),
            amount,
            fee: 0.0,
            timestamp,
            signature: COINBASE_SIGNATURE.to_string(),
            smart_contract_details: None,
        })
    }

    pub fn is_coinbase(&self) -> bool {
        self.from_address.is_none()
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn get_from_address(&self) -> Option<&str> {
        self.from_address.as_deref()
    }

    pub fn get_to_address(&self) -> &str {
        &self.to_address
    }

    pub fn get_amount(&self) -> f64 {
        self.amount
    }

    pub fn get_fee(&self) -> f64 {
        self.fee
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_signature(&self) -> &str {
        &self.signature
    }

    pub fn get_smart_contract_details(&self) -> Option<&str> {
        self.smart_contract_details.as_deref()
    }
}
