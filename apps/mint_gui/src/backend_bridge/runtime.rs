//! Backend worker: owns the tokio runtime, the chain client, and the
//! mint-completion listener, and executes UI commands sequentially.

use std::thread;

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use chain_core::{
    ChainConfig, InterfaceDescriptor, RpcContractGateway, RpcWalletProvider, WalletCapability,
    WalletError,
};
use shared::domain::Address;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{report_operator_failure, OpStage, UiEvent};
use crate::ui::app::AppConfig;

/// Compiled-in interface artifact for the deployed mint contract.
const CONTRACT_ARTIFACT: &str = include_str!("../../assets/nft_abi.json");

pub fn launch(config: AppConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Info(
                    "Backend startup failed; restart the app".to_string(),
                ));
                return;
            }
        };

        runtime.block_on(run_worker(config, cmd_rx, ui_tx));
    });
}

async fn run_worker(config: AppConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let gateway = match build_gateway(&config.chain) {
        Ok(gateway) => gateway,
        Err(err) => {
            error!("backend worker startup failure: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Info(
                "Backend startup failed; restart the app".to_string(),
            ));
            return;
        }
    };

    // An absent wallet is non-fatal at startup; the visitor is only
    // prompted to install one when they actually try to connect.
    let provider = match WalletCapability::detect(&config.chain).await {
        WalletCapability::Available(provider) => Some(provider),
        WalletCapability::Unavailable => {
            report_operator_failure(OpStage::Startup, &WalletError::ProviderUnavailable);
            None
        }
    };

    let mut listener: Option<JoinHandle<()>> = None;
    if let Some(provider) = &provider {
        check_existing_connection(provider, &gateway, &mut listener, &ui_tx).await;
    }

    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::ConnectWallet => {
                info!("backend: connect_wallet");
                let Some(provider) = &provider else {
                    report_operator_failure(OpStage::Connect, &WalletError::ProviderUnavailable);
                    let _ = ui_tx.try_send(UiEvent::WalletUnavailable);
                    continue;
                };
                match provider.request_accounts().await {
                    Ok(accounts) => match accounts.first() {
                        Some(account) => {
                            debug!(account = %account, "wallet connected");
                            adopt_account(*account, &gateway, &mut listener, &ui_tx).await;
                        }
                        None => report_operator_failure(
                            OpStage::Connect,
                            &WalletError::AuthorizationDenied(
                                "provider returned no accounts".to_string(),
                            ),
                        ),
                    },
                    Err(err) => report_operator_failure(OpStage::Connect, &err),
                }
            }
            BackendCommand::SubmitMint { from } => {
                info!(from = %from, "backend: submit_mint");
                let _ = ui_tx.try_send(UiEvent::MintStarted);
                match gateway.submit_mint(from).await {
                    Ok(pending) => {
                        let tx_hash = pending.tx_hash();
                        match pending.wait().await {
                            Ok(receipt) => {
                                info!(
                                    tx = %config.explorer.tx_url(&receipt.tx_hash),
                                    block = receipt.block_number,
                                    "mint confirmed"
                                );
                                let _ = ui_tx.try_send(UiEvent::MintConfirmed { tx_hash });
                            }
                            Err(err) => {
                                report_operator_failure(OpStage::Mint, &err);
                                let _ = ui_tx.try_send(UiEvent::MintFailed);
                            }
                        }
                    }
                    Err(err) => {
                        report_operator_failure(OpStage::Mint, &err);
                        let _ = ui_tx.try_send(UiEvent::MintFailed);
                    }
                }
            }
        }
    }
}

fn build_gateway(chain: &ChainConfig) -> anyhow::Result<RpcContractGateway> {
    let descriptor = InterfaceDescriptor::from_artifact(CONTRACT_ARTIFACT)
        .context("parse bundled contract artifact")?;
    let gateway =
        RpcContractGateway::new(chain, &descriptor).context("construct contract gateway")?;
    Ok(gateway)
}

/// Load-time connection check: adopt the first already-authorized account,
/// if the wallet has one.
async fn check_existing_connection(
    provider: &RpcWalletProvider,
    gateway: &RpcContractGateway,
    listener: &mut Option<JoinHandle<()>>,
    ui_tx: &Sender<UiEvent>,
) {
    match provider.authorized_accounts().await {
        Ok(accounts) => match accounts.first() {
            Some(account) => {
                debug!(account = %account, "found an authorized account");
                adopt_account(*account, gateway, listener, ui_tx).await;
            }
            None => debug!("no authorized account found"),
        },
        Err(err) => report_operator_failure(OpStage::Startup, &err),
    }
}

/// Adopting an account re-registers the completion listener for it. The
/// previous listener, if any, is torn down first so events for a stale
/// account can never reach the UI.
async fn adopt_account(
    account: Address,
    gateway: &RpcContractGateway,
    listener: &mut Option<JoinHandle<()>>,
    ui_tx: &Sender<UiEvent>,
) {
    if let Err(err) = gateway.ensure_event_stream().await {
        report_operator_failure(OpStage::Startup, &err);
    }

    if let Some(task) = listener.take() {
        task.abort();
    }

    let mut events = gateway.subscribe_mints();
    let completion_tx = ui_tx.clone();
    *listener = Some(tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if event.from != account {
                continue;
            }
            let _ = completion_tx.try_send(UiEvent::MintCompleted {
                from: event.from,
                token_id: event.token_id,
            });
        }
    }));

    let _ = ui_tx.try_send(UiEvent::Connected(account));
}
