//! Runtime bridge - connects the sync TUI thread with the async Tokio runtime
//!
//! The TUI sends [`RuntimeCommand`]s over a std channel; a dedicated worker
//! thread owning a Tokio runtime executes them against the injected
//! [`BlockchainProvider`] and answers with [`RuntimeEvent`]s, which the TUI
//! drains once per loop iteration.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use alloy_primitives::U256;
use anyhow::Context;
use tokio::runtime::Runtime;

use crate::core::RequestId;
use crate::domain::{NftMetadata, TransferRecord, TxRecord};
use crate::infrastructure::alchemy::BlockchainProvider;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCommand {
    /// Explorer mount: latest block number, then that block's transactions
    LoadLatestBlock { id: RequestId },
    /// Explorer search: transactions of a given block
    LoadBlock { id: RequestId, number: u64 },
    /// Latest-block widget: block number only
    LoadBlockNumber { id: RequestId },
    /// Account lookup: balance, then recent incoming transfers
    LoadAccount { id: RequestId, address: String },
    /// NFT lookup
    LoadNft {
        id: RequestId,
        contract: String,
        token_id: String,
    },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI.
///
/// Every event carries the id of the command that produced it so the owning
/// screen can discard stale results.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Explorer: the latest block number resolved (or failed)
    LatestBlockNumber {
        id: RequestId,
        result: Result<u64, String>,
    },
    /// Explorer: transactions of block `number`
    BlockTransactions {
        id: RequestId,
        number: u64,
        result: Result<Vec<TxRecord>, String>,
    },
    /// Latest-block widget
    BlockNumber {
        id: RequestId,
        result: Result<u64, String>,
    },
    Balance {
        id: RequestId,
        address: String,
        result: Result<U256, String>,
    },
    Transfers {
        id: RequestId,
        address: String,
        result: Result<Vec<TransferRecord>, String>,
    },
    NftMetadata {
        id: RequestId,
        result: Result<NftMetadata, String>,
    },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
    worker: Option<JoinHandle<()>>,
}

impl RuntimeBridge {
    /// Start the worker thread around `provider`
    pub fn new(provider: Arc<dyn BlockchainProvider>) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let rt = Runtime::new().context("Failed to create Tokio runtime")?;
        let worker = thread::Builder::new()
            .name("ethscope-worker".into())
            .spawn(move || {
                rt.block_on(run_async_worker(provider, cmd_rx, evt_tx));
            })
            .context("Failed to spawn worker thread")?;

        Ok(Self {
            cmd_tx,
            evt_rx,
            worker: Some(worker),
        })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        self.evt_rx.try_iter().collect()
    }

    /// Block up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<RuntimeEvent> {
        self.evt_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
