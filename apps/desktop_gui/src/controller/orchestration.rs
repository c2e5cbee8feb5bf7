//! Command orchestration helpers from UI actions to the wallet command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::WalletCommand;

pub fn dispatch_wallet_command(
    cmd_tx: &Sender<WalletCommand>,
    cmd: WalletCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        WalletCommand::Connect => "connect",
        WalletCommand::Disconnect => "disconnect",
        WalletCommand::SubmitTransfer { .. } => "submit_transfer",
        WalletCommand::RefreshBalance => "refresh_balance",
        WalletCommand::RefreshTransactions => "refresh_transactions",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->wallet command"),
        Err(TrySendError::Full(_)) => {
            *status = "Wallet command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Wallet worker disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}
