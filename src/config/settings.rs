use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{LedgerError, Result};

/// Display name of the simulated coin unless a network overrides it
pub const DEFAULT_COINBASE_NAME: &str = "uemfCoin";

/// Largest difficulty a configuration may request. Sixteen leading zero hex
/// characters is already far beyond what a single demo process can mine.
pub const MAX_DIFFICULTY: u32 = 16;

/// Resolved settings for one network.
///
/// `difficulty` counts the leading `'0'` hex characters a block hash must
/// carry; `block_interval_ms` is the period of the network's scheduled
/// mining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub block_reward: f64,
    pub difficulty: u32,
    pub coinbase_name: String,
    pub block_interval_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            block_reward: 50.0,
            difficulty: 2,
            coinbase_name: DEFAULT_COINBASE_NAME.to_string(),
            block_interval_ms: 600_000,
        }
    }
}

/// Partial settings applied on top of the defaults for a known network id
#[derive(Debug, Clone, Default)]
struct NetworkOverrides {
    block_reward: Option<f64>,
    difficulty: Option<u32>,
    block_interval_ms: Option<u64>,
}

static BUILTIN_OVERRIDES: Lazy<HashMap<&'static str, NetworkOverrides>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        "main",
        NetworkOverrides {
            block_reward: Some(50.0),
            difficulty: Some(2),
            ..Default::default()
        },
    );
    map.insert(
        "test",
        NetworkOverrides {
            block_reward: Some(100.0),
            difficulty: Some(1),
            block_interval_ms: Some(60_000),
        },
    );
    map.insert(
        "dev",
        NetworkOverrides {
            block_reward: Some(200.0),
            difficulty: Some(1),
            block_interval_ms: Some(30_000),
        },
    );
    map
});

impl NetworkConfig {
    /// Resolve the configuration for a network id: built-in defaults with
    /// the overrides registered for that id on top. Unknown ids run on
    /// plain defaults.
    pub fn for_network(network_id: &str) -> NetworkConfig {
        let mut config = NetworkConfig::default();
        if let Some(overrides) = BUILTIN_OVERRIDES.get(network_id) {
            if let Some(reward) = overrides.block_reward {
                config.block_reward = reward;
            }
            if let Some(difficulty) = overrides.difficulty {
                config.difficulty = difficulty;
            }
            if let Some(interval) = overrides.block_interval_ms {
                config.block_interval_ms = interval;
            }
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.difficulty > MAX_DIFFICULTY {
            return Err(LedgerError::Config(format!(
                "difficulty {} exceeds the supported maximum of {MAX_DIFFICULTY}",
                self.difficulty
            )));
        }
        if !self.block_reward.is_finite() || self.block_reward < 0.0 {
            return Err(LedgerError::Config(format!(
                "block reward must be a non-negative number, got {}",
                self.block_reward
            )));
        }
        if self.block_interval_ms == 0 {
            return Err(LedgerError::Config(
                "block interval must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }
}

/// Starting balance handed to a network's seeded wallets
pub fn initial_balance_for(network_id: &str) -> f64 {
    match network_id {
        "test" => 2000.0,
        "dev" => 5000.0,
        _ => 1000.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_network_uses_defaults() {
        let config = NetworkConfig::for_network("research-7");
        assert_eq!(config, NetworkConfig::default());
        assert_eq!(config.coinbase_name, DEFAULT_COINBASE_NAME);
    }

    #[test]
    fn test_builtin_networks_overlay_defaults() {
        let main = NetworkConfig::for_network("main");
        assert_eq!(main.block_reward, 50.0);
        assert_eq!(main.difficulty, 2);
        assert_eq!(main.block_interval_ms, 600_000);

        let test = NetworkConfig::for_network("test");
        assert_eq!(test.block_reward, 100.0);
        assert_eq!(test.difficulty, 1);
        assert_eq!(test.block_interval_ms, 60_000);

        let dev = NetworkConfig::for_network("dev");
        assert_eq!(dev.block_reward, 200.0);
        assert_eq!(dev.difficulty, 1);
        assert_eq!(dev.block_interval_ms, 30_000);
    }

    #[test]
    fn test_validate_rejects_pathological_difficulty() {
        let mut config = NetworkConfig::default();
        config.difficulty = MAX_DIFFICULTY + 1;
        assert!(config.validate().is_err());

        config.difficulty = MAX_DIFFICULTY;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_interval_and_negative_reward() {
        let mut config = NetworkConfig::default();
        config.block_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = NetworkConfig::default();
        config.block_reward = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeded_balances_depend_on_network() {
        assert_eq!(initial_balance_for("test"), 2000.0);
        assert_eq!(initial_balance_for("dev"), 5000.0);
        assert_eq!(initial_balance_for("main"), 1000.0);
        assert_eq!(initial_balance_for("anything-else"), 1000.0);
    }
}
