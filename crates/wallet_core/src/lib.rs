//! Wallet session core: collaborator traits, the session client, and the
//! alloy-backed production implementations.
//!
//! The UI never touches the chain directly. It talks to [`WalletClient`],
//! which owns the current [`WalletSession`] and broadcasts [`SessionEvent`]s
//! as connection state and transfer outcomes change.

use std::sync::Arc;

use alloy::primitives::{Address, B256, U256};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use shared::domain::TransferRecord;

pub mod config;
pub mod error;
pub mod gateway;
pub mod transfer;

use error::{ConnectError, GatewayError, SubmitError};
use transfer::TransferIntent;

/// Establishes a wallet session against the configured network.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    async fn connect(&self) -> Result<WalletSession, ConnectError>;
}

/// Account identity and balance reads for an established session.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    fn address(&self) -> Address;
    async fn balance(&self) -> Result<U256, GatewayError>;
}

/// Read/write access to the value-transfer contract.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Submits a transfer carrying `amount_wei` to `receiver` and waits for
    /// the receipt. Returns the transaction hash; a reverted receipt is an
    /// error, not a success with a flag.
    async fn send_transfer(
        &self,
        receiver: Address,
        amount_wei: U256,
    ) -> Result<B256, GatewayError>;

    /// All transfers recorded by the contract, in the order it returns them.
    async fn transactions(&self) -> Result<Vec<TransferRecord>, GatewayError>;
}

/// A live connection: the account identity plus handles for reads and writes.
#[derive(Clone)]
pub struct WalletSession {
    pub address: Address,
    pub chain_id: u64,
    pub account: Arc<dyn AccountProvider>,
    pub gateway: Arc<dyn ContractGateway>,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Connected { address: Address, chain_id: u64 },
    Disconnected,
    TransferConfirmed { tx_hash: String },
    TransferRejected { reason: String },
}

/// Owns the optional session and turns connector/gateway outcomes into
/// broadcast events. Transfer submission is fire-and-observe: the call
/// returns once the confirmation task is spawned, and the outcome arrives
/// later as a `TransferConfirmed` or `TransferRejected` event.
pub struct WalletClient {
    connector: Arc<dyn WalletConnector>,
    session: Mutex<Option<WalletSession>>,
    events: broadcast::Sender<SessionEvent>,
}

impl WalletClient {
    pub fn new(connector: Arc<dyn WalletConnector>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            connector,
            session: Mutex::new(None),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn connect(&self) -> Result<(), ConnectError> {
        let session = self.connector.connect().await?;
        let (address, chain_id) = (session.address, session.chain_id);
        {
            let mut guard = self.session.lock().await;
            *guard = Some(session);
        }
        info!(%address, chain_id, "wallet connected");
        let _ = self
            .events
            .send(SessionEvent::Connected { address, chain_id });
        Ok(())
    }

    /// Drops the session. An in-flight transfer is not cancelled: its task
    /// holds its own gateway handle and still reports an outcome.
    pub async fn disconnect(&self) {
        let had_session = self.session.lock().await.take().is_some();
        if had_session {
            info!("wallet disconnected");
        }
        let _ = self.events.send(SessionEvent::Disconnected);
    }

    pub async fn submit_transfer(self: &Arc<Self>, intent: TransferIntent) -> Result<(), SubmitError> {
        let gateway = {
            let guard = self.session.lock().await;
            match guard.as_ref() {
                Some(session) => Arc::clone(&session.gateway),
                None => return Err(SubmitError::NotConnected),
            }
        };

        let client = Arc::clone(self);
        tokio::spawn(async move {
            match gateway
                .send_transfer(intent.receiver, intent.amount_wei)
                .await
            {
                Ok(tx_hash) => {
                    let _ = client.events.send(SessionEvent::TransferConfirmed {
                        tx_hash: tx_hash.to_string(),
                    });
                }
                Err(err) => {
                    warn!("transfer failed: {err}");
                    let _ = client.events.send(SessionEvent::TransferRejected {
                        reason: err.to_string(),
                    });
                }
            }
        });

        Ok(())
    }

    pub async fn balance(&self) -> Result<U256> {
        let account = self.account().await?;
        Ok(account.balance().await?)
    }

    pub async fn transactions(&self) -> Result<Vec<TransferRecord>> {
        let gateway = self.gateway().await?;
        Ok(gateway.transactions().await?)
    }

    async fn account(&self) -> Result<Arc<dyn AccountProvider>> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|session| Arc::clone(&session.account))
            .ok_or_else(|| anyhow!("no wallet session"))
    }

    async fn gateway(&self) -> Result<Arc<dyn ContractGateway>> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|session| Arc::clone(&session.gateway))
            .ok_or_else(|| anyhow!("no wallet session"))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
