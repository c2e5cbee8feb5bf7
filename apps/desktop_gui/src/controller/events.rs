//! Events flowing from the wallet worker to the UI, and error modeling for
//! anything the worker reports as failed.

use alloy::primitives::{Address, U256};
use shared::domain::TransferRecord;

#[derive(Debug)]
pub enum UiEvent {
    Connected { address: Address, chain_id: u64 },
    Disconnected,
    BalanceUpdated(U256),
    TransactionsLoaded(Vec<TransferRecord>),
    TransferConfirmed { tx_hash: String },
    TransferRejected { reason: String },
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Config,
    Chain,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Connect,
    Refresh,
}

/// Turns a raw connect failure into actionable copy for the status line.
pub fn classify_connect_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("private key") {
        "No usable signing key; set BLX_PRIVATE_KEY or private_key in blx.toml and reconnect."
            .to_string()
    } else if lower.contains("invalid rpc url") {
        "Invalid RPC URL; fix rpc_url in blx.toml or BLX_RPC_URL and reconnect.".to_string()
    } else if lower.contains("expected chain") {
        "RPC endpoint serves the wrong network; point it at a Sepolia endpoint.".to_string()
    } else if lower.contains("failed to connect")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "RPC endpoint unreachable; check the URL/network and reconnect.".to_string()
    } else {
        format!("Connect error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("private key")
            || message_lower.contains("blx.toml")
            || message_lower.contains("config")
        {
            UiErrorCategory::Config
        } else if message_lower.contains("expected chain") || message_lower.contains("wrong chain")
        {
            UiErrorCategory::Chain
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("failed to connect")
            || message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unreachable")
            || message_lower.contains("rpc endpoint")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// True when the failure means the session itself is gone and the UI
    /// should fall back to the disconnected state.
    pub fn is_session_loss(&self) -> bool {
        self.message.to_ascii_lowercase().contains("no wallet session")
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
