//! Typed remote-call proxy to the deployed mint contract: submission with
//! an awaitable confirmation handle, and a broadcast stream of
//! mint-completion events fed by a log-polling task.

use std::time::Duration;

use alloy_primitives::{hex, Address, B256, TxHash, U256};
use serde::Deserialize;
use serde_json::json;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time,
};
use tracing::{debug, warn};

use shared::domain::TokenId;

use crate::{
    abi::InterfaceDescriptor,
    config::ChainConfig,
    error::GatewayError,
    rpc::{format_quantity, parse_quantity, RpcClient},
};

/// Contract function invoked to mint, and the completion event it emits.
pub const MINT_FUNCTION: &str = "makeAnEpicNFT";
pub const MINT_EVENT: &str = "NewEpicNFTMinted";

const EVENT_CHANNEL_CAPACITY: usize = 1024;
const RECEIPT_STATUS_OK: &str = "0x1";

/// A mint-completion notification: who minted and which token they got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintEvent {
    pub from: Address,
    pub token_id: TokenId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
}

/// Standing subscription task; aborted when dropped so listeners cannot
/// leak across reconnects.
struct MintStreamTask {
    task: JoinHandle<()>,
}

impl Drop for MintStreamTask {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct RpcContractGateway {
    rpc: RpcClient,
    contract: Address,
    mint_selector: [u8; 4],
    mint_topic: B256,
    receipt_poll_interval: Duration,
    log_poll_interval: Duration,
    events: broadcast::Sender<MintEvent>,
    stream: Mutex<Option<MintStreamTask>>,
}

impl RpcContractGateway {
    pub fn new(
        config: &ChainConfig,
        descriptor: &InterfaceDescriptor,
    ) -> Result<Self, GatewayError> {
        let mint_selector = descriptor.function_selector(MINT_FUNCTION)?;
        let mint_topic = descriptor.event_topic(MINT_EVENT)?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            rpc: RpcClient::new(config.rpc_endpoint.clone()),
            contract: config.contract_address,
            mint_selector,
            mint_topic,
            receipt_poll_interval: config.receipt_poll_interval,
            log_poll_interval: config.log_poll_interval,
            events,
            stream: Mutex::new(None),
        })
    }

    pub async fn submit_mint(&self, from: Address) -> Result<PendingMint, GatewayError> {
        let calldata = format!("0x{}", hex::encode(self.mint_selector));
        let params = json!([{
            "from": from,
            "to": self.contract,
            "data": calldata,
        }]);

        let tx_hash: TxHash = self
            .rpc
            .call("eth_sendTransaction", params)
            .await
            .map_err(GatewayError::Submit)?;
        debug!(%tx_hash, "mint transaction submitted");

        Ok(PendingMint {
            tx_hash,
            rpc: self.rpc.clone(),
            poll_interval: self.receipt_poll_interval,
        })
    }

    pub fn subscribe_mints(&self) -> broadcast::Receiver<MintEvent> {
        self.events.subscribe()
    }

    /// Spawns the log-polling task feeding [`Self::subscribe_mints`].
    /// Idempotent: the task is started once per gateway and watches from
    /// the block head at spawn time.
    pub async fn ensure_event_stream(&self) -> Result<(), GatewayError> {
        let mut slot = self.stream.lock().await;
        if slot.is_some() {
            return Ok(());
        }

        let head: String = self
            .rpc
            .call("eth_blockNumber", json!([]))
            .await
            .map_err(GatewayError::Logs)?;
        let from_block = parse_quantity(&head)
            .map_err(|err| GatewayError::Decode(err.to_string()))?
            + 1;

        let task = tokio::spawn(poll_mint_logs(
            self.rpc.clone(),
            self.contract,
            self.mint_topic,
            from_block,
            self.log_poll_interval,
            self.events.clone(),
        ));
        *slot = Some(MintStreamTask { task });
        Ok(())
    }
}

async fn poll_mint_logs(
    rpc: RpcClient,
    contract: Address,
    topic: B256,
    mut from_block: u64,
    interval: Duration,
    events: broadcast::Sender<MintEvent>,
) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let params = json!([{
            "address": contract,
            "topics": [topic],
            "fromBlock": format_quantity(from_block),
            "toBlock": "latest",
        }]);
        let logs: Vec<LogPayload> = match rpc.call("eth_getLogs", params).await {
            Ok(logs) => logs,
            Err(err) => {
                warn!(%err, "mint event query failed");
                continue;
            }
        };

        for log in logs {
            match parse_quantity(&log.block_number) {
                Ok(block) => from_block = from_block.max(block + 1),
                Err(err) => {
                    warn!(%err, "skipping log with a malformed block number");
                    continue;
                }
            }
            match decode_mint_log(&log.data) {
                Ok(event) => {
                    debug!(from = %event.from, token_id = event.token_id.0, "mint completion observed");
                    let _ = events.send(event);
                }
                Err(err) => warn!(%err, "skipping undecodable mint log"),
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogPayload {
    data: String,
    block_number: String,
}

/// The completion event carries two unindexed words: the minting account
/// and the assigned token id.
fn decode_mint_log(data: &str) -> Result<MintEvent, GatewayError> {
    let raw = hex::decode(data)
        .map_err(|err| GatewayError::Decode(format!("log data is not hex: {err}")))?;
    if raw.len() != 64 {
        return Err(GatewayError::Decode(format!(
            "expected two 32-byte event words, got {} bytes",
            raw.len()
        )));
    }

    let from = Address::from_slice(&raw[12..32]);
    let token_word = U256::from_be_slice(&raw[32..64]);
    let token_id = u64::try_from(token_word)
        .map_err(|_| GatewayError::Decode("token id exceeds u64".to_string()))?;

    Ok(MintEvent {
        from,
        token_id: TokenId(token_id),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptPayload {
    block_number: String,
    status: String,
}

/// Transaction handle returned by a mint submission; awaiting it suspends
/// until the chain produces a receipt.
pub struct PendingMint {
    tx_hash: TxHash,
    rpc: RpcClient,
    poll_interval: Duration,
}

impl PendingMint {
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Polls for the receipt. There is no timeout: an unresponsive chain
    /// keeps the caller suspended.
    pub async fn wait(self) -> Result<MintReceipt, GatewayError> {
        loop {
            let receipt: Option<ReceiptPayload> = self
                .rpc
                .call("eth_getTransactionReceipt", json!([self.tx_hash]))
                .await
                .map_err(|source| GatewayError::Confirmation {
                    hash: self.tx_hash,
                    source,
                })?;

            if let Some(receipt) = receipt {
                if receipt.status != RECEIPT_STATUS_OK {
                    return Err(GatewayError::Reverted { hash: self.tx_hash });
                }
                let block_number = parse_quantity(&receipt.block_number)
                    .map_err(|err| GatewayError::Decode(err.to_string()))?;
                return Ok(MintReceipt {
                    tx_hash: self.tx_hash,
                    block_number,
                });
            }

            time::sleep(self.poll_interval).await;
        }
    }
}
