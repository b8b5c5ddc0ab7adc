use std::time::Duration;

use alloy_primitives::{address, Address};

/// Contract the page mints against. Fixed at build time; tests substitute
/// their own through [`ChainConfig`].
pub const DEFAULT_CONTRACT_ADDRESS: Address =
    address!("dD008C6f21088b53Ae5412C9C35492F96fAE301b");

const DEFAULT_NODE_ENDPOINT: &str = "http://127.0.0.1:8545";

/// Where the client talks to the chain and which contract it mints against.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// JSON-RPC endpoint for contract calls, receipts, and log queries.
    pub rpc_endpoint: String,
    /// Account-brokering wallet endpoint. `None` means no wallet is
    /// installed on this machine.
    pub wallet_endpoint: Option<String>,
    pub contract_address: Address,
    pub receipt_poll_interval: Duration,
    pub log_poll_interval: Duration,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_endpoint: DEFAULT_NODE_ENDPOINT.to_string(),
            wallet_endpoint: Some(DEFAULT_NODE_ENDPOINT.to_string()),
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            receipt_poll_interval: Duration::from_millis(500),
            log_poll_interval: Duration::from_secs(2),
        }
    }
}
