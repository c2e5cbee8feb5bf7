use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::WalletCommand;
use backend_bridge::worker::spawn_backend_thread;
use controller::events::UiEvent;
use ui::app::WalletApp;
use wallet_core::config::load_settings;

/// BLX desktop: a Sepolia value-transfer client.
#[derive(Debug, Parser)]
#[command(name = "blx-desktop")]
struct Args {
    /// Path to the TOML settings file.
    #[arg(long, default_value = "blx.toml")]
    config: String,

    /// RPC endpoint override, applied after file and environment settings.
    #[arg(long)]
    rpc_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = load_settings(&args.config);
    if let Some(rpc_url) = args.rpc_url {
        settings.rpc_url = rpc_url;
    }
    tracing::info!(?settings, "starting blx desktop");

    let (cmd_tx, cmd_rx) = bounded::<WalletCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    spawn_backend_thread(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("BLX Desktop")
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "BLX Desktop",
        options,
        Box::new(|_cc| Ok(Box::new(WalletApp::new(cmd_tx, ui_rx)))),
    )
}
