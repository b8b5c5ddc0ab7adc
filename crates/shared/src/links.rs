//! Outbound hyperlink construction for the marketplace and the block
//! explorer. Bases are plain configuration values so tests can substitute
//! fake ones.

use crate::domain::{short_address, Address, TokenId, TxHash};

/// Marketplace the minted assets are browsable on.
#[derive(Debug, Clone)]
pub struct MarketplaceLinks {
    pub base_url: String,
    pub collection_slug: String,
}

impl Default for MarketplaceLinks {
    fn default() -> Self {
        Self {
            base_url: "https://testnets.opensea.io".to_string(),
            collection_slug: "buildspacename-v3".to_string(),
        }
    }
}

impl MarketplaceLinks {
    pub fn asset_url(&self, contract: &Address, token: TokenId) -> String {
        format!(
            "{}/assets/{}/{}",
            self.base_url,
            contract.to_checksum(None),
            token
        )
    }

    /// Same target as [`Self::asset_url`] but with the contract address
    /// compressed, matching how the link is shown to the visitor.
    pub fn asset_label(&self, contract: &Address, token: TokenId) -> String {
        format!(
            "{}/assets/{}/{}",
            self.base_url,
            short_address(contract),
            token
        )
    }

    pub fn collection_url(&self) -> String {
        format!("{}/collection/{}", self.base_url, self.collection_slug)
    }
}

/// Block explorer used for transaction links in the operator log.
#[derive(Debug, Clone)]
pub struct ExplorerLinks {
    pub base_url: String,
}

impl Default for ExplorerLinks {
    fn default() -> Self {
        Self {
            base_url: "https://rinkeby.etherscan.io".to_string(),
        }
    }
}

impl ExplorerLinks {
    pub fn tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{hash}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256};

    use super::*;

    #[test]
    fn builds_asset_links_from_contract_and_token() {
        let links = MarketplaceLinks::default();
        let contract = address!("1111111111111111111111111111111111111111");
        let url = links.asset_url(&contract, TokenId(42));
        assert_eq!(
            url,
            "https://testnets.opensea.io/assets/0x1111111111111111111111111111111111111111/42"
        );
        assert!(url.ends_with("/42"));
    }

    #[test]
    fn asset_labels_compress_the_contract_address() {
        let links = MarketplaceLinks::default();
        let contract = address!("1111111111111111111111111111111111111111");
        assert_eq!(
            links.asset_label(&contract, TokenId(7)),
            "https://testnets.opensea.io/assets/0x1...111/7"
        );
    }

    #[test]
    fn builds_the_collection_link_from_the_slug() {
        assert_eq!(
            MarketplaceLinks::default().collection_url(),
            "https://testnets.opensea.io/collection/buildspacename-v3"
        );
    }

    #[test]
    fn builds_explorer_transaction_links() {
        let hash = b256!("1111111111111111111111111111111111111111111111111111111111111111");
        assert_eq!(
            ExplorerLinks::default().tx_url(&hash),
            "https://rinkeby.etherscan.io/tx/0x1111111111111111111111111111111111111111111111111111111111111111"
        );
    }
}
