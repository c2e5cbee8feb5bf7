//! Wallet commands queued from UI to the backend worker.

use alloy::primitives::{Address, U256};

#[derive(Debug)]
pub enum WalletCommand {
    Connect,
    Disconnect,
    SubmitTransfer { receiver: Address, amount_wei: U256 },
    RefreshBalance,
    RefreshTransactions,
}
