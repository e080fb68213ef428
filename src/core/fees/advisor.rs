use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What a caller wants estimated, plus the mempool context the ledger
/// computed for it. The details are free-form prose; the mempool data is
/// the summary string built by [`super::mempool_summary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeEstimateInput {
    pub transaction_details: String,
    pub mempool_data: String,
}

/// An advisor's answer: the suggested fee and the reasoning behind it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeEstimate {
    pub suggested_fee: f64,
    pub reasoning: String,
}

/// An external fee oracle.
///
/// The registry treats implementations as opaque. When one fails, the error
/// is surfaced to the caller unchanged; no fee is ever computed locally in
/// its place.
pub trait FeeAdvisor: Send + Sync {
    fn estimate(&self, input: &FeeEstimateInput) -> Result<FeeEstimate>;
}
