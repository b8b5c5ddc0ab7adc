use serde::{Deserialize, Serialize};
use thiserror::Error;

/// EIP-1193 error code: the user rejected the authorization request.
pub const USER_REJECTED_REQUEST: i64 = 4001;

/// JSON-RPC 2.0 error object as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorPayload {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, Error)]
#[error("rpc error {code}: {message}")]
pub struct RpcCallError {
    pub code: i64,
    pub message: String,
}

impl From<RpcErrorPayload> for RpcCallError {
    fn from(value: RpcErrorPayload) -> Self {
        Self {
            code: value.code,
            message: value.message,
        }
    }
}
