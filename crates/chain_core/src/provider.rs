//! Wallet provider access. Presence of a wallet is a capability established
//! by an explicit probe, so every call site handles the no-wallet branch.

use alloy_primitives::Address;
use serde_json::json;
use tracing::debug;

use shared::error::USER_REJECTED_REQUEST;

use crate::{
    config::ChainConfig,
    error::WalletError,
    rpc::{RpcClient, RpcError},
};

/// Outcome of probing the host environment for a wallet.
#[derive(Debug)]
pub enum WalletCapability {
    Available(RpcWalletProvider),
    Unavailable,
}

impl WalletCapability {
    /// One round-trip probe. Anything short of a well-formed answer counts
    /// as no wallet installed.
    pub async fn detect(config: &ChainConfig) -> Self {
        let Some(endpoint) = &config.wallet_endpoint else {
            debug!("no wallet endpoint configured");
            return Self::Unavailable;
        };

        let rpc = RpcClient::new(endpoint.clone());
        match rpc.call::<String>("web3_clientVersion", json!([])).await {
            Ok(version) => {
                debug!(%version, "wallet provider detected");
                Self::Available(RpcWalletProvider { rpc })
            }
            Err(err) => {
                debug!(%err, "wallet probe failed");
                Self::Unavailable
            }
        }
    }
}

/// Account broker behind a detected wallet endpoint.
#[derive(Debug, Clone)]
pub struct RpcWalletProvider {
    rpc: RpcClient,
}

impl RpcWalletProvider {
    /// Accounts the wallet has already authorized for this origin. An empty
    /// list is a normal answer, not an error.
    pub async fn authorized_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.rpc.call("eth_accounts", json!([])).await?)
    }

    /// Interactive authorization request; the user may decline.
    pub async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        match self.rpc.call("eth_requestAccounts", json!([])).await {
            Ok(accounts) => Ok(accounts),
            Err(RpcError::Call { source, .. }) if source.code == USER_REJECTED_REQUEST => {
                Err(WalletError::AuthorizationDenied(source.message))
            }
            Err(err) => Err(err.into()),
        }
    }
}
