use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use chain_core::ChainConfig;
use shared::domain::TxHash;
use shared::links::{ExplorerLinks, MarketplaceLinks};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{dispatch_backend_command, submit_mint_if_idle};
use crate::controller::reducer::{MintAffordance, MintFlowState};

/// Everything the app needs at construction. Defaults point at the
/// deployed contract and the public marketplace; tests substitute fakes.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub chain: ChainConfig,
    pub marketplace: MarketplaceLinks,
    pub explorer: ExplorerLinks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

pub struct MintDeskApp {
    config: AppConfig,
    state: MintFlowState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: String,
    banner: Option<StatusBanner>,
    last_confirmed_tx: Option<TxHash>,
}

impl MintDeskApp {
    pub fn new(
        config: AppConfig,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        Self {
            config,
            state: MintFlowState::default(),
            cmd_tx,
            ui_rx,
            status: String::new(),
            banner: None,
            last_confirmed_tx: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match &event {
                UiEvent::WalletUnavailable => {
                    self.banner = Some(StatusBanner {
                        severity: StatusBannerSeverity::Error,
                        message: "No wallet found. Install one and restart the app to mint."
                            .to_string(),
                    });
                }
                UiEvent::Connected(account) => {
                    self.banner = None;
                    self.status = format!(
                        "Connected as {} at {}",
                        shared::domain::short_address(account),
                        Local::now().format("%H:%M:%S")
                    );
                }
                UiEvent::MintStarted => {
                    self.status = "Mint submitted; waiting for confirmation...".to_string();
                }
                UiEvent::MintConfirmed { tx_hash } => {
                    self.last_confirmed_tx = Some(*tx_hash);
                    self.status =
                        format!("Mint confirmed at {}", Local::now().format("%H:%M:%S"));
                }
                UiEvent::MintFailed => {
                    self.status = "The mint did not go through; try again.".to_string();
                }
                UiEvent::MintCompleted { .. } => {}
                UiEvent::Info(message) => self.status = message.clone(),
            }
            self.state.apply(&event);
        }
    }

    fn show_banner(&self, ui: &mut egui::Ui) {
        let Some(banner) = &self.banner else { return };
        let color = match banner.severity {
            StatusBannerSeverity::Error => ui.visuals().error_fg_color,
        };
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.0, color))
            .show(ui, |ui| {
                ui.colored_label(color, &banner.message);
            });
        ui.add_space(8.0);
    }

    fn show_minted_asset(&self, ui: &mut egui::Ui) {
        let (Some(_), Some(token)) = (self.state.connected_account, self.state.minted_token)
        else {
            return;
        };

        let contract = &self.config.chain.contract_address;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(
                "We've minted your NFT and sent it to your wallet. It can take up to \
                 10 minutes to show up on the marketplace. Here's the link:",
            );
            ui.hyperlink_to(
                self.config.marketplace.asset_label(contract, token),
                self.config.marketplace.asset_url(contract, token),
            );
        });
        ui.add_space(8.0);
    }

    fn show_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.state.affordance() {
                MintAffordance::ConnectWallet => {
                    if ui.button(MintAffordance::ConnectWallet.label()).clicked() {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::ConnectWallet,
                            &mut self.status,
                        );
                    }
                }
                affordance => {
                    let button = egui::Button::new(affordance.label());
                    if ui.add_enabled(affordance.enabled(), button).clicked()
                        && submit_mint_if_idle(&self.state, &self.cmd_tx, &mut self.status)
                    {
                        // A second click must already see the flag raised;
                        // the worker's own MintStarted echo arrives later.
                        self.state.apply(&UiEvent::MintStarted);
                    }
                }
            }

            ui.hyperlink_to("View Collection", self.config.marketplace.collection_url());
        });

        if let Some(tx_hash) = &self.last_confirmed_tx {
            ui.add_space(4.0);
            ui.hyperlink_to(
                "View last transaction",
                self.config.explorer.tx_url(tx_hash),
            );
        }
    }
}

impl eframe::App for MintDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.heading("Epic NFT Mint Desk");
                ui.label("Each unique. Each beautiful. Mint yours today.");
                ui.add_space(16.0);

                self.show_banner(ui);
                self.show_minted_asset(ui);
                self.show_actions(ui);

                ui.add_space(16.0);
                ui.label(egui::RichText::new(&self.status).weak());
            });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
