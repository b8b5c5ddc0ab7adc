//! Backend commands queued from UI to the backend worker.

use shared::domain::Address;

pub enum BackendCommand {
    ConnectWallet,
    SubmitMint { from: Address },
}
