//! Transfer form state and submission validation.
//!
//! The form stores raw user text; nothing is checked until [`TransferForm::validate`]
//! runs at submission time. Validation failures never reach the contract gateway.

use alloy::primitives::{Address, U256};
use shared::domain::parse_eth;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferValidationError {
    #[error("receiver address is required")]
    MissingReceiver,
    #[error("amount is required")]
    MissingAmount,
    #[error("receiver must be a 0x-prefixed address of 40 hex digits")]
    InvalidReceiver,
    #[error("amount must be a positive ETH value")]
    InvalidAmount,
}

/// A validated submission: typed receiver plus the amount in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferIntent {
    pub receiver: Address,
    pub amount_wei: U256,
}

/// Transient form state. Fields hold whatever the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    pub receiver: String,
    pub amount: String,
}

impl TransferForm {
    pub fn clear(&mut self) {
        self.receiver.clear();
        self.amount.clear();
    }

    /// Checks both fields and converts the amount to wei. Empty fields are
    /// reported before shape errors, matching the order a user fills the form.
    pub fn validate(&self) -> Result<TransferIntent, TransferValidationError> {
        let receiver = self.receiver.trim();
        let amount = self.amount.trim();

        if receiver.is_empty() {
            return Err(TransferValidationError::MissingReceiver);
        }
        if amount.is_empty() {
            return Err(TransferValidationError::MissingAmount);
        }
        if !is_hex_address(receiver) {
            return Err(TransferValidationError::InvalidReceiver);
        }

        let receiver: Address = receiver
            .parse()
            .map_err(|_| TransferValidationError::InvalidReceiver)?;
        let amount_wei = parse_eth(amount).ok_or(TransferValidationError::InvalidAmount)?;
        if amount_wei.is_zero() {
            return Err(TransferValidationError::InvalidAmount);
        }

        Ok(TransferIntent {
            receiver,
            amount_wei,
        })
    }
}

/// `0x` followed by exactly 40 hex digits, any case. Checksum casing is not
/// enforced; the chain address type accepts either.
fn is_hex_address(text: &str) -> bool {
    match text.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
