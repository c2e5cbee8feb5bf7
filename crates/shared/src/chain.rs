//! Chain constants for the Sepolia deployment.

use alloy::primitives::{address, Address};

/// Sepolia testnet chain id.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Deployed MoneyTransfer contract.
pub const MONEY_TRANSFER_ADDRESS: Address = address!("0x350ddFb12A1560ceA27E39aA7dc153138197bA18");

/// Public Sepolia RPC endpoint used when no override is configured.
pub const DEFAULT_RPC_URL: &str = "https://ethereum-sepolia-rpc.publicnode.com";

/// Block explorer page for a transaction hash in `0x...` form.
pub fn explorer_tx_url(tx_hash: &str) -> String {
    format!("https://sepolia.etherscan.io/tx/{tx_hash}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_explorer_link_from_hash() {
        assert_eq!(
            explorer_tx_url("0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b"),
            "https://sepolia.etherscan.io/tx/0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b"
        );
    }
}
