//! Minimal JSON-RPC 2.0 client used for both the wallet endpoint and the
//! contract node.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use shared::error::{RpcCallError, RpcErrorPayload};

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport failure calling {method}: {source}")]
    Transport {
        method: &'static str,
        source: reqwest::Error,
    },
    #[error("{method} failed: {source}")]
    Call {
        method: &'static str,
        source: RpcCallError,
    },
    #[error("{method} returned a malformed payload: {source}")]
    Payload {
        method: &'static str,
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorPayload>,
}

#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> Result<T, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| RpcError::Transport { method, source })?;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|source| RpcError::Transport { method, source })?;

        if let Some(error) = body.error {
            return Err(RpcError::Call {
                method,
                source: error.into(),
            });
        }

        // A null result is a valid answer (a pending receipt, for one).
        let result = body.result.unwrap_or(Value::Null);
        serde_json::from_value(result).map_err(|source| RpcError::Payload { method, source })
    }
}

/// Chain quantities travel as minimally-encoded hex strings.
pub fn format_quantity(value: u64) -> String {
    format!("0x{value:x}")
}

#[derive(Debug, Error)]
#[error("malformed hex quantity '{text}'")]
pub struct QuantityError {
    text: String,
}

pub fn parse_quantity(text: &str) -> Result<u64, QuantityError> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    u64::from_str_radix(digits, 16).map_err(|_| QuantityError {
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_quantities_without_padding() {
        assert_eq!(format_quantity(0), "0x0");
        assert_eq!(format_quantity(16), "0x10");
        assert_eq!(format_quantity(42), "0x2a");
    }

    #[test]
    fn parses_prefixed_and_bare_quantities() {
        assert_eq!(parse_quantity("0x2a").unwrap(), 42);
        assert_eq!(parse_quantity("10").unwrap(), 16);
        assert!(parse_quantity("0xzz").is_err());
        assert!(parse_quantity("").is_err());
    }
}
