use serde::{Deserialize, Serialize};

pub use alloy_primitives::{Address, TxHash};

/// Index assigned to a newly minted asset by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compressed display form used in link labels: first three and last three
/// characters of the checksummed hex string.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..3], &full[full.len() - 3..])
}
