//! UI/backend events and operator-channel failure classification.

use shared::domain::{Address, TokenId, TxHash};

/// Backend-to-UI notifications driving the mint flow state.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// No wallet provider could be detected; connecting is impossible until
    /// one is installed.
    WalletUnavailable,
    Connected(Address),
    MintStarted,
    MintConfirmed { tx_hash: TxHash },
    MintFailed,
    MintCompleted { from: Address, token_id: TokenId },
    Info(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Wallet,
    Transport,
    Contract,
    Unknown,
}

/// Which operation a failure belongs to, for the operator log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpStage {
    Startup,
    Connect,
    Mint,
}

impl OpStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Connect => "connect",
            Self::Mint => "mint",
        }
    }
}

pub fn classify_failure(message: &str) -> FailureCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("wallet")
        || lower.contains("authorization")
        || lower.contains("rejected")
        || lower.contains("denied")
    {
        FailureCategory::Wallet
    } else if lower.contains("transport")
        || lower.contains("connection")
        || lower.contains("network")
        || lower.contains("timed out")
        || lower.contains("unreachable")
    {
        FailureCategory::Transport
    } else if lower.contains("reverted") || lower.contains("rpc error") || lower.contains("artifact")
    {
        FailureCategory::Contract
    } else {
        FailureCategory::Unknown
    }
}

/// Failures are reported here, to the operator log; the visitor only ever
/// sees the affordance reset.
pub fn report_operator_failure(stage: OpStage, err: &dyn std::error::Error) {
    let category = classify_failure(&err.to_string());
    tracing::error!(stage = stage.as_str(), ?category, %err, "backend operation failed");
}
