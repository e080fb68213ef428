use log::info;

use crate::core::fees::{FeeAdvisor, FeeEstimate, FeeEstimateInput};
use crate::error::Result;

/// Flat-rate advisor bundled for demos and tests. It suggests the same fee
/// whatever the mempool looks like and says so in its reasoning.
#[derive(Debug, Clone)]
pub struct FixedFeeAdvisor {
    suggested_fee: f64,
}

impl FixedFeeAdvisor {
    pub fn new(suggested_fee: f64) -> Self {
        Self { suggested_fee }
    }

    pub fn get_suggested_fee(&self) -> f64 {
        self.suggested_fee
    }
}

impl Default for FixedFeeAdvisor {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl FeeAdvisor for FixedFeeAdvisor {
    fn estimate(&self, input: &FeeEstimateInput) -> Result<FeeEstimate> {
        info!("Using fixed fee suggestion: {} coins", self.suggested_fee);
        Ok(FeeEstimate {
            suggested_fee: self.suggested_fee,
            reasoning: format!(
                "Flat-rate policy suggests {} regardless of demand. Observed state: {}",
                self.suggested_fee, input.mempool_data
            ),
        })
    }
}
