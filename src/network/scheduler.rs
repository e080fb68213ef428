use log::{error, info};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::core::NetworkLedger;

/// Background interval mining for one network.
///
/// The worker thread waits on a stop channel with the network's block
/// interval as the timeout, so a tick fires when the interval elapses and
/// `stop` interrupts the wait immediately. Intervals run to minutes, which
/// rules out a plain sleep loop.
pub struct MiningScheduler {
    network_id: String,
    stop_tx: mpsc::Sender<()>,
    thread: Mutex<Option<thread::JoinHandle<()>>>,
}

impl MiningScheduler {
    pub fn start(ledger: Arc<NetworkLedger>) -> MiningScheduler {
        let (stop_tx, stop_rx) = mpsc::channel();
        let network_id = ledger.network_id().to_string();
        let interval = Duration::from_millis(ledger.get_config().block_interval_ms);

        let tick_network_id = network_id.clone();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if let Err(e) = ledger.mine_scheduled() {
                        error!("[{tick_network_id}] Scheduled mining failed: {e}");
                    }
                }
                // Stop signal, or the registry dropped the sender.
                _ => break,
            }
        });

        info!(
            "[{network_id}] Mining scheduler started with {}ms interval",
            interval.as_millis()
        );
        MiningScheduler {
            network_id,
            stop_tx,
            thread: Mutex::new(Some(handle)),
        }
    }

    /// Signal the worker and wait for it to exit. Safe to call twice.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.thread.lock().ok().and_then(|mut guard| guard.take()) {
            let _ = handle.join();
            info!("[{}] Mining scheduler stopped", self.network_id);
        }
    }
}

impl Drop for MiningScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
