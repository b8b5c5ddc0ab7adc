use alloy_primitives::TxHash;
use thiserror::Error;

use crate::rpc::RpcError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no wallet provider is reachable")]
    ProviderUnavailable,
    #[error("wallet declined account authorization: {0}")]
    AuthorizationDenied(String),
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("mint submission failed: {0}")]
    Submit(#[source] RpcError),
    #[error("confirmation polling for {hash} failed: {source}")]
    Confirmation { hash: TxHash, source: RpcError },
    #[error("transaction {hash} reverted")]
    Reverted { hash: TxHash },
    #[error("event query failed: {0}")]
    Logs(#[source] RpcError),
    #[error("malformed chain payload: {0}")]
    Decode(String),
    #[error(transparent)]
    Abi(#[from] AbiError),
}

#[derive(Debug, Error)]
pub enum AbiError {
    #[error("artifact is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("artifact has no function named '{0}'")]
    MissingFunction(String),
    #[error("artifact has no event named '{0}'")]
    MissingEvent(String),
}
