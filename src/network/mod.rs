//! Multi-network management
//!
//! This module keeps the simulated networks apart: a registry that creates
//! and memoizes one ledger per network id, and the per-network scheduler
//! that mines pending transactions on the configured interval.

pub mod registry;
pub mod scheduler;

pub use registry::NetworkRegistry;
pub use scheduler::MiningScheduler;
