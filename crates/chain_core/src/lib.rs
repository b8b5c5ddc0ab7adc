//! Chain client core: JSON-RPC transport, the contract interface
//! descriptor, wallet capability detection, and the mint contract gateway.

pub mod abi;
pub mod config;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod rpc;

pub use abi::InterfaceDescriptor;
pub use config::ChainConfig;
pub use error::{AbiError, GatewayError, WalletError};
pub use gateway::{MintEvent, MintReceipt, PendingMint, RpcContractGateway};
pub use provider::{RpcWalletProvider, WalletCapability};
pub use rpc::{RpcClient, RpcError};

#[cfg(test)]
mod tests;
