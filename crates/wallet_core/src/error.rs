use thiserror::Error;

/// Failures while establishing a wallet session.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("no private key configured; set BLX_PRIVATE_KEY or private_key in blx.toml")]
    MissingKey,
    #[error("invalid private key: {0}")]
    InvalidKey(String),
    #[error("invalid rpc url '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },
    #[error("failed to connect to rpc endpoint {url}: {reason}")]
    Endpoint { url: String, reason: String },
    #[error("rpc endpoint serves chain {actual}, expected chain {expected}")]
    WrongChain { expected: u64, actual: u64 },
}

/// Failures from chain reads and writes once a session exists.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to query balance: {0}")]
    Balance(String),
    #[error("failed to fetch transactions: {0}")]
    Transactions(String),
    #[error("failed to submit transfer: {0}")]
    Submission(String),
    #[error("transfer {tx_hash} reverted on chain")]
    Reverted { tx_hash: String },
}

/// Failures surfaced before a transfer reaches the gateway.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no wallet session; connect before submitting")]
    NotConnected,
}
