//! Reducer for the mint flow: three fields of UI state and the pure
//! affordance decision derived from them.

use shared::domain::{Address, TokenId};

use crate::controller::events::UiEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintFlowState {
    pub connected_account: Option<Address>,
    pub minting: bool,
    pub minted_token: Option<TokenId>,
}

/// The single action the page offers right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintAffordance {
    ConnectWallet,
    MintInProgress,
    MintAnother,
    Mint,
}

impl MintAffordance {
    pub fn label(self) -> &'static str {
        match self {
            Self::ConnectWallet => "Connect Wallet",
            Self::MintInProgress => "Minting...",
            Self::MintAnother => "Mint another NFT",
            Self::Mint => "Mint NFT",
        }
    }

    pub fn enabled(self) -> bool {
        !matches!(self, Self::MintInProgress)
    }
}

impl MintFlowState {
    pub fn affordance(&self) -> MintAffordance {
        if self.connected_account.is_none() {
            MintAffordance::ConnectWallet
        } else if self.minting {
            MintAffordance::MintInProgress
        } else if self.minted_token.is_some() {
            MintAffordance::MintAnother
        } else {
            MintAffordance::Mint
        }
    }

    pub fn can_submit_mint(&self) -> bool {
        self.connected_account.is_some() && !self.minting
    }

    pub fn apply(&mut self, event: &UiEvent) {
        match event {
            UiEvent::Connected(account) => self.connected_account = Some(*account),
            UiEvent::MintStarted => {
                self.minting = true;
                self.minted_token = None;
            }
            UiEvent::MintConfirmed { .. } | UiEvent::MintFailed => self.minting = false,
            UiEvent::MintCompleted { from, token_id } => {
                // The worker already filters by account; a stale listener
                // still must not paint another account's token here.
                if self.connected_account == Some(*from) {
                    self.minted_token = Some(*token_id);
                }
            }
            UiEvent::WalletUnavailable | UiEvent::Info(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256};

    use super::*;

    const ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");
    const OTHER: Address = address!("00000000000000000000000000000000000000bb");

    fn connected_state() -> MintFlowState {
        let mut state = MintFlowState::default();
        state.apply(&UiEvent::Connected(ACCOUNT));
        state
    }

    #[test]
    fn starts_on_the_connect_affordance() {
        let state = MintFlowState::default();
        assert_eq!(state.connected_account, None);
        assert_eq!(state.affordance(), MintAffordance::ConnectWallet);
        assert!(!state.can_submit_mint());
    }

    #[test]
    fn an_unavailable_wallet_changes_nothing() {
        let mut state = MintFlowState::default();
        state.apply(&UiEvent::WalletUnavailable);
        assert_eq!(state, MintFlowState::default());
    }

    #[test]
    fn adopting_an_account_offers_the_mint_affordance() {
        let state = connected_state();
        assert_eq!(state.connected_account, Some(ACCOUNT));
        assert_eq!(state.affordance(), MintAffordance::Mint);
        assert!(state.can_submit_mint());
    }

    #[test]
    fn a_started_mint_disables_the_affordance_and_clears_the_token() {
        let mut state = connected_state();
        state.apply(&UiEvent::MintCompleted {
            from: ACCOUNT,
            token_id: TokenId(7),
        });
        state.apply(&UiEvent::MintStarted);

        assert!(state.minting);
        assert_eq!(state.minted_token, None);
        assert_eq!(state.affordance(), MintAffordance::MintInProgress);
        assert!(!state.affordance().enabled());
        assert!(!state.can_submit_mint());
    }

    #[test]
    fn a_successful_cycle_ends_idle_with_the_event_token() {
        let mut state = connected_state();
        state.apply(&UiEvent::MintStarted);
        state.apply(&UiEvent::MintCompleted {
            from: ACCOUNT,
            token_id: TokenId(42),
        });
        state.apply(&UiEvent::MintConfirmed {
            tx_hash: b256!("1111111111111111111111111111111111111111111111111111111111111111"),
        });

        assert!(!state.minting);
        assert_eq!(state.minted_token, Some(TokenId(42)));
        assert_eq!(state.affordance(), MintAffordance::MintAnother);
    }

    #[test]
    fn a_failed_cycle_ends_idle_with_no_token() {
        let mut state = connected_state();
        state.apply(&UiEvent::MintStarted);
        state.apply(&UiEvent::MintFailed);

        assert!(!state.minting);
        assert_eq!(state.minted_token, None);
        assert_eq!(state.affordance(), MintAffordance::Mint);
    }

    #[test]
    fn a_failed_retry_forgets_the_previous_token() {
        let mut state = connected_state();
        state.apply(&UiEvent::MintStarted);
        state.apply(&UiEvent::MintCompleted {
            from: ACCOUNT,
            token_id: TokenId(7),
        });
        state.apply(&UiEvent::MintConfirmed {
            tx_hash: b256!("1111111111111111111111111111111111111111111111111111111111111111"),
        });

        state.apply(&UiEvent::MintStarted);
        state.apply(&UiEvent::MintFailed);
        assert_eq!(state.minted_token, None);
    }

    #[test]
    fn foreign_completions_never_update_the_token() {
        let mut state = connected_state();
        state.apply(&UiEvent::MintCompleted {
            from: OTHER,
            token_id: TokenId(9),
        });
        assert_eq!(state.minted_token, None);

        let mut disconnected = MintFlowState::default();
        disconnected.apply(&UiEvent::MintCompleted {
            from: ACCOUNT,
            token_id: TokenId(9),
        });
        assert_eq!(disconnected.minted_token, None);
    }
}
