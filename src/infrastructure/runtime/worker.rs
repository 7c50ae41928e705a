//! Async worker - runs in the Tokio runtime and executes provider calls

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use crate::core::RequestId;
use crate::domain::TransferQuery;
use crate::infrastructure::alchemy::BlockchainProvider;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

const IDLE_POLL: Duration = Duration::from_millis(10);

/// Run the async worker loop until `Shutdown` or until the bridge goes away.
///
/// Each command runs in its own task so a slow lookup never blocks the
/// others; results may therefore arrive out of order.
pub async fn run_async_worker(
    provider: Arc<dyn BlockchainProvider>,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) {
    tracing::info!(endpoint = %provider.endpoint_name(), "runtime worker started");

    loop {
        match cmd_rx.try_recv() {
            Ok(RuntimeCommand::Shutdown) | Err(TryRecvError::Disconnected) => break,
            Ok(cmd) => {
                let provider = Arc::clone(&provider);
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let mut emit = move |event: RuntimeEvent| {
                        if evt_tx.send(event).is_err() {
                            tracing::debug!("event receiver gone, dropping result");
                        }
                    };
                    run_command(provider.as_ref(), cmd, &mut emit).await;
                });
            }
            Err(TryRecvError::Empty) => tokio::time::sleep(IDLE_POLL).await,
        }
    }

    tracing::info!("runtime worker stopped");
}

/// Run one command to completion and return the events it produced, in order.
pub async fn execute(provider: &dyn BlockchainProvider, cmd: RuntimeCommand) -> Vec<RuntimeEvent> {
    let mut events = Vec::new();
    run_command(provider, cmd, &mut |event: RuntimeEvent| events.push(event)).await;
    events
}

/// Run one command, handing each event to `emit` as soon as it is ready.
///
/// Chained commands (head then block, balance then transfers) emit the first
/// result before the follow-up call starts.
pub async fn run_command(
    provider: &dyn BlockchainProvider,
    cmd: RuntimeCommand,
    emit: &mut (dyn FnMut(RuntimeEvent) + Send),
) {
    match cmd {
        RuntimeCommand::LoadLatestBlock { id } => {
            let head = provider.block_number().await.map_err(|e| e.to_string());
            log_failure("explorer", id, &head);
            let number = head.as_ref().ok().copied();
            emit(RuntimeEvent::LatestBlockNumber { id, result: head });
            if let Some(number) = number {
                emit(load_block(provider, id, number).await);
            }
        }

        RuntimeCommand::LoadBlock { id, number } => emit(load_block(provider, id, number).await),

        RuntimeCommand::LoadBlockNumber { id } => {
            let result = provider.block_number().await.map_err(|e| e.to_string());
            log_failure("latest-block", id, &result);
            emit(RuntimeEvent::BlockNumber { id, result });
        }

        RuntimeCommand::LoadAccount { id, address } => {
            let balance = provider.balance(&address).await.map_err(|e| e.to_string());
            log_failure("account balance", id, &balance);
            let balance_ok = balance.is_ok();
            emit(RuntimeEvent::Balance {
                id,
                address: address.clone(),
                result: balance,
            });

            if balance_ok {
                let query = TransferQuery::recent_incoming(address.as_str());
                let result = provider
                    .asset_transfers(&query)
                    .await
                    .map_err(|e| e.to_string());
                log_failure("account transfers", id, &result);
                emit(RuntimeEvent::Transfers {
                    id,
                    address,
                    result,
                });
            }
        }

        RuntimeCommand::LoadNft {
            id,
            contract,
            token_id,
        } => {
            let result = provider
                .nft_metadata(&contract, &token_id)
                .await
                .map_err(|e| e.to_string());
            log_failure("nft", id, &result);
            emit(RuntimeEvent::NftMetadata { id, result });
        }

        RuntimeCommand::Shutdown => {}
    }
}

async fn load_block(provider: &dyn BlockchainProvider, id: RequestId, number: u64) -> RuntimeEvent {
    let result = provider
        .block_with_transactions(number)
        .await
        .map(Option::unwrap_or_default)
        .map_err(|e| e.to_string());
    log_failure("explorer block", id, &result);
    if let Ok(txs) = &result {
        tracing::debug!(request = %id, block = number, txs = txs.len(), "block loaded");
    }
    RuntimeEvent::BlockTransactions { id, number, result }
}

fn log_failure<T>(screen: &str, id: RequestId, result: &Result<T, String>) {
    if let Err(reason) = result {
        tracing::warn!(screen, request = %id, error = %reason, "provider call failed");
    }
}
