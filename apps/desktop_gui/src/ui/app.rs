//! The BLX desktop app: navbar, balance card, transfer form, and the
//! transaction list, all driven by the event stream from the wallet worker.

use alloy::primitives::{Address, U256};
use arboard::Clipboard;
use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use shared::{
    chain::explorer_tx_url,
    domain::{format_eth, shorten_address, TransferRecord},
};
use wallet_core::transfer::TransferForm;

use crate::backend_bridge::commands::WalletCommand;
use crate::controller::events::{classify_connect_failure, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_wallet_command;
use crate::controller::reducer::{
    NoticeSeverity, TransferEvent, TransferLifecycle, TransferPhase,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppSection {
    Home,
    Transactions,
    About,
}

/// UI-side mirror of the wallet session, fed only by worker events.
#[derive(Debug, Default)]
struct SessionView {
    connected: bool,
    address: Option<Address>,
    chain_id: Option<u64>,
}

pub struct WalletApp {
    cmd_tx: Sender<WalletCommand>,
    ui_rx: Receiver<UiEvent>,

    session: SessionView,
    balance: Option<U256>,
    form: TransferForm,
    lifecycle: TransferLifecycle,

    transactions: Vec<TransferRecord>,
    transactions_loaded: bool,
    transactions_updated_at: Option<DateTime<Local>>,

    section: AppSection,
    status: String,
}

/// Empty-list copy depends on connection state; "nothing here" means
/// something different before a wallet is attached.
fn transactions_empty_copy(connected: bool) -> &'static str {
    if connected {
        "No transactions yet"
    } else {
        "Connect your wallet to view transactions"
    }
}

fn copy_to_clipboard(text: &str, status: &mut String, what: &str) {
    match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
        Ok(()) => *status = format!("{what} copied to clipboard"),
        Err(err) => *status = format!("Clipboard unavailable: {err}"),
    }
}

impl WalletApp {
    pub fn new(cmd_tx: Sender<WalletCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            session: SessionView::default(),
            balance: None,
            form: TransferForm::default(),
            lifecycle: TransferLifecycle::default(),
            transactions: Vec::new(),
            transactions_loaded: false,
            transactions_updated_at: None,
            section: AppSection::Home,
            status: "Not connected".to_string(),
        }
    }

    fn process_ui_events(&mut self, now: std::time::Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Connected { address, chain_id } => {
                    self.session.connected = true;
                    self.session.address = Some(address);
                    self.session.chain_id = Some(chain_id);
                    self.status = format!("Connected as {}", shorten_address(&address));
                    dispatch_wallet_command(
                        &self.cmd_tx,
                        WalletCommand::RefreshBalance,
                        &mut self.status,
                    );
                    dispatch_wallet_command(
                        &self.cmd_tx,
                        WalletCommand::RefreshTransactions,
                        &mut self.status,
                    );
                }
                UiEvent::Disconnected => {
                    self.reset_connection_state();
                    self.status = "Not connected".to_string();
                }
                UiEvent::BalanceUpdated(balance) => {
                    self.balance = Some(balance);
                }
                UiEvent::TransactionsLoaded(records) => {
                    self.transactions = records;
                    self.transactions_loaded = true;
                    self.transactions_updated_at = Some(Local::now());
                }
                UiEvent::TransferConfirmed { tx_hash } => {
                    self.apply_lifecycle_event(TransferEvent::Confirmed { tx_hash }, now);
                }
                UiEvent::TransferRejected { reason } => {
                    self.apply_lifecycle_event(TransferEvent::Rejected { reason }, now);
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    if err.is_session_loss() {
                        self.reset_connection_state();
                    }
                    self.status = if err.context() == UiErrorContext::Connect {
                        classify_connect_failure(err.message())
                    } else {
                        format!("Error: {}", err.message())
                    };
                }
            }
        }
    }

    /// Everything derived from the session goes at once; a stale balance or
    /// transaction list must not outlive the connection that produced it.
    fn reset_connection_state(&mut self) {
        self.session = SessionView::default();
        self.balance = None;
        self.transactions.clear();
        self.transactions_loaded = false;
        self.transactions_updated_at = None;
    }

    fn apply_lifecycle_event(&mut self, event: TransferEvent, now: std::time::Instant) {
        use crate::controller::reducer::LifecycleEffect;

        for effect in self.lifecycle.apply(event, now) {
            match effect {
                LifecycleEffect::ClearForm => self.form.clear(),
                // Refresh effects are pointless without a session (they would
                // only come back as NotConnected errors); the next connect
                // re-fetches everything anyway.
                LifecycleEffect::RefreshTransactions if self.session.connected => {
                    dispatch_wallet_command(
                        &self.cmd_tx,
                        WalletCommand::RefreshTransactions,
                        &mut self.status,
                    );
                }
                LifecycleEffect::RefreshBalance if self.session.connected => {
                    dispatch_wallet_command(
                        &self.cmd_tx,
                        WalletCommand::RefreshBalance,
                        &mut self.status,
                    );
                }
                LifecycleEffect::RefreshTransactions | LifecycleEffect::RefreshBalance => {}
            }
        }
    }

    /// Validates the form and either queues the transfer or flashes the
    /// validation error. Nothing reaches the worker on a validation failure.
    fn handle_submit(&mut self, now: std::time::Instant) {
        if self.lifecycle.is_pending() {
            return;
        }
        match self.form.validate() {
            Ok(intent) => {
                dispatch_wallet_command(
                    &self.cmd_tx,
                    WalletCommand::SubmitTransfer {
                        receiver: intent.receiver,
                        amount_wei: intent.amount_wei,
                    },
                    &mut self.status,
                );
                self.apply_lifecycle_event(TransferEvent::Submitted, now);
            }
            Err(err) => {
                self.lifecycle.flash_error(err.to_string(), now);
            }
        }
    }

    fn expire_notice_if_due(&mut self, now: std::time::Instant) {
        if self.lifecycle.notice_expired(now) {
            self.apply_lifecycle_event(TransferEvent::NoticeExpired, now);
        }
    }

    fn show_navbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("BLX").strong().size(20.0));
                ui.separator();
                ui.selectable_value(&mut self.section, AppSection::Home, "Home");
                ui.selectable_value(&mut self.section, AppSection::Transactions, "Transactions");
                ui.selectable_value(&mut self.section, AppSection::About, "About");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match self.session.address {
                        Some(address) => {
                            if ui.button("Disconnect").clicked() {
                                dispatch_wallet_command(
                                    &self.cmd_tx,
                                    WalletCommand::Disconnect,
                                    &mut self.status,
                                );
                            }
                            if ui
                                .button(shorten_address(&address))
                                .on_hover_text("Copy address")
                                .clicked()
                            {
                                copy_to_clipboard(
                                    &address.to_string(),
                                    &mut self.status,
                                    "Address",
                                );
                            }
                        }
                        None => {
                            if ui.button("Connect Wallet").clicked() {
                                self.status = "Connecting...".to_string();
                                dispatch_wallet_command(
                                    &self.cmd_tx,
                                    WalletCommand::Connect,
                                    &mut self.status,
                                );
                            }
                        }
                    }
                });
            });
        });
    }

    fn show_notice_banner(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.lifecycle.notice().cloned() else {
            return;
        };
        let (fill, stroke) = match notice.severity {
            NoticeSeverity::Info => (
                egui::Color32::from_rgb(47, 66, 94),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(92, 128, 175)),
            ),
            NoticeSeverity::Success => (
                egui::Color32::from_rgb(46, 89, 56),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(96, 160, 110)),
            ),
            NoticeSeverity::Error => (
                egui::Color32::from_rgb(111, 53, 53),
                egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
            ),
        };

        egui::Frame::NONE
            .fill(fill)
            .stroke(stroke)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    if notice.severity == NoticeSeverity::Info {
                        ui.spinner();
                    }
                    ui.label(egui::RichText::new(&notice.text).color(egui::Color32::WHITE));
                });
            });
        ui.add_space(6.0);
    }

    fn show_home(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Balance").strong());
                match (self.session.connected, self.balance) {
                    (true, Some(balance)) => {
                        ui.label(
                            egui::RichText::new(format!("{} ETH", format_eth(balance))).size(26.0),
                        );
                    }
                    (true, None) => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Fetching balance...");
                        });
                    }
                    (false, _) => {
                        ui.label("Connect your wallet to see your balance");
                    }
                }
            });

        ui.add_space(12.0);
        ui.label(egui::RichText::new("Send ETH").strong().size(16.0));
        ui.add_space(4.0);

        ui.label("Receiver Address");
        ui.add(
            egui::TextEdit::singleline(&mut self.form.receiver)
                .hint_text("0x...")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);
        ui.label("Amount (ETH)");
        ui.add(
            egui::TextEdit::singleline(&mut self.form.amount)
                .hint_text("0.05")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(8.0);

        let can_send = self.session.connected && self.lifecycle.phase() == TransferPhase::Idle;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_send, egui::Button::new("Send"))
                .clicked()
            {
                self.handle_submit(std::time::Instant::now());
            }
            if self.lifecycle.is_pending() {
                ui.spinner();
            }
        });

        if !self.session.connected {
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new("Connect your wallet to send ETH")
                    .color(ui.visuals().weak_text_color()),
            );
        }
    }

    fn show_transactions(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Transactions").strong().size(16.0));
            if self.session.connected && ui.button("Refresh").clicked() {
                dispatch_wallet_command(
                    &self.cmd_tx,
                    WalletCommand::RefreshTransactions,
                    &mut self.status,
                );
            }
            if let Some(updated_at) = self.transactions_updated_at {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "Updated {}",
                            updated_at.format("%H:%M:%S")
                        ))
                        .color(ui.visuals().weak_text_color()),
                    );
                });
            }
        });
        ui.add_space(6.0);

        if self.transactions.is_empty() {
            if self.session.connected && !self.transactions_loaded {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading transactions...");
                });
            } else {
                ui.label(transactions_empty_copy(self.session.connected));
            }
            return;
        }

        let records = self.transactions.clone();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for record in &records {
                egui::Frame::group(ui.style())
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(format!(
                                "{} -> {}",
                                shorten_address(&record.sender),
                                shorten_address(&record.receiver)
                            ));
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{} ETH",
                                            format_eth(record.amount)
                                        ))
                                        .strong(),
                                    );
                                },
                            );
                        });
                        ui.horizontal(|ui| {
                            ui.hyperlink_to(
                                "View on Etherscan",
                                explorer_tx_url(&record.tx_hash),
                            );
                            if ui.button("Copy hash").clicked() {
                                copy_to_clipboard(
                                    &record.tx_hash,
                                    &mut self.status,
                                    "Transaction hash",
                                );
                            }
                        });
                    });
                ui.add_space(4.0);
            }
        });
    }

    fn show_about(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.label(egui::RichText::new("About BLX").strong().size(16.0));
        ui.add_space(4.0);
        ui.label(
            "BLX is a small Sepolia testnet client: connect a wallet, send ETH \
             through the MoneyTransfer contract, and browse the transfers it \
             has recorded.",
        );
        ui.add_space(6.0);
        ui.hyperlink_to("Source on GitHub", "https://github.com/blx-labs/blx-desktop");
    }
}

impl eframe::App for WalletApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = std::time::Instant::now();
        self.process_ui_events(now);
        self.expire_notice_if_due(now);

        self.show_navbar(ctx);

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_notice_banner(ui);
            match self.section {
                AppSection::Home => self.show_home(ui),
                AppSection::Transactions => self.show_transactions(ui),
                AppSection::About => self.show_about(ui),
            }
        });

        // A pending transfer or a counting-down notice needs timely frames;
        // otherwise the event drain can idle along slowly.
        let counting_down = self
            .lifecycle
            .notice()
            .is_some_and(|notice| notice.expires_at.is_some());
        if self.lifecycle.is_pending() || counting_down {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }
    }
}
