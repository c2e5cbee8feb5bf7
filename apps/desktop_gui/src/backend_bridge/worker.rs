//! Backend worker: an OS thread that owns the tokio runtime and the wallet
//! client, services queued commands serially, and forwards session events to
//! the UI channel.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use wallet_core::{
    config::Settings, gateway::LocalKeyConnector, transfer::TransferIntent, SessionEvent,
    WalletClient,
};

use crate::backend_bridge::commands::WalletCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn spawn_backend_thread(
    settings: Settings,
    cmd_rx: Receiver<WalletCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("wallet worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = WalletClient::new(Arc::new(LocalKeyConnector::new(settings)));

            let mut session_events = client.subscribe_events();
            let ui_tx_events = ui_tx.clone();
            let forward_task = tokio::spawn(async move {
                while let Ok(event) = session_events.recv().await {
                    let evt = match event {
                        SessionEvent::Connected { address, chain_id } => {
                            UiEvent::Connected { address, chain_id }
                        }
                        SessionEvent::Disconnected => UiEvent::Disconnected,
                        SessionEvent::TransferConfirmed { tx_hash } => {
                            UiEvent::TransferConfirmed { tx_hash }
                        }
                        SessionEvent::TransferRejected { reason } => {
                            UiEvent::TransferRejected { reason }
                        }
                    };
                    let _ = ui_tx_events.try_send(evt);
                }
            });

            let _ = ui_tx.try_send(UiEvent::Info("Wallet worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    WalletCommand::Connect => {
                        // Success is reported through the session event stream.
                        if let Err(err) = client.connect().await {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::Connect,
                                err.to_string(),
                            )));
                        }
                    }
                    WalletCommand::Disconnect => {
                        client.disconnect().await;
                    }
                    WalletCommand::SubmitTransfer {
                        receiver,
                        amount_wei,
                    } => {
                        let intent = TransferIntent {
                            receiver,
                            amount_wei,
                        };
                        if let Err(err) = client.submit_transfer(intent).await {
                            let _ = ui_tx.try_send(UiEvent::TransferRejected {
                                reason: err.to_string(),
                            });
                        }
                    }
                    WalletCommand::RefreshBalance => match client.balance().await {
                        Ok(balance) => {
                            let _ = ui_tx.try_send(UiEvent::BalanceUpdated(balance));
                        }
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::Refresh,
                                err.to_string(),
                            )));
                        }
                    },
                    WalletCommand::RefreshTransactions => match client.transactions().await {
                        Ok(records) => {
                            let _ = ui_tx.try_send(UiEvent::TransactionsLoaded(records));
                        }
                        Err(err) => {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::Refresh,
                                err.to_string(),
                            )));
                        }
                    },
                }
            }

            forward_task.abort();
        });
    });
}
