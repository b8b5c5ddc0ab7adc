//! Command orchestration helpers from UI actions to the backend queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::MintFlowState;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::ConnectWallet => "connect_wallet",
        BackendCommand::SubmitMint { .. } => "submit_mint",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}

/// Mint submissions are refused before an account is connected and while a
/// mint is already in flight. Returns whether a command was queued.
pub fn submit_mint_if_idle(
    state: &MintFlowState,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) -> bool {
    let Some(from) = state.connected_account else {
        return false;
    };
    if state.minting {
        return false;
    }

    dispatch_backend_command(cmd_tx, BackendCommand::SubmitMint { from }, status);
    true
}
