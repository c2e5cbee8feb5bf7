use alloy::primitives::{
    utils::{format_ether, parse_ether},
    Address, U256,
};
use serde::{Deserialize, Serialize};

/// One transfer recorded by the MoneyTransfer contract.
///
/// Records are kept in the order the contract returned them (insertion
/// order); nothing downstream re-sorts them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub sender: Address,
    pub receiver: Address,
    /// Transferred value in wei.
    pub amount: U256,
    pub tx_hash: String,
}

/// Abbreviates an address for display: first four hex digits, ellipsis,
/// last four (`0x1234...7890`).
pub fn shorten_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Renders a wei amount as a decimal ETH string without trailing zeros,
/// so balances read "1.5" rather than "1.500000000000000000".
pub fn format_eth(amount: U256) -> String {
    let text = format_ether(amount);
    match text.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                whole.to_string()
            } else {
                format!("{whole}.{frac}")
            }
        }
        None => text,
    }
}

/// Parses a decimal ETH string into wei.
pub fn parse_eth(text: &str) -> Option<U256> {
    parse_ether(text.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_address_to_head_and_tail() {
        let address: Address = "0x1234567890123456789012345678901234567890"
            .parse()
            .expect("address");
        assert_eq!(shorten_address(&address), "0x1234...7890");
    }

    #[test]
    fn formats_whole_and_fractional_eth_without_trailing_zeros() {
        assert_eq!(format_eth(U256::ZERO), "0");
        assert_eq!(format_eth(U256::from(2_000_000_000_000_000_000u64)), "2");
        assert_eq!(format_eth(U256::from(1_500_000_000_000_000_000u64)), "1.5");
        assert_eq!(format_eth(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn parses_decimal_eth_into_wei() {
        assert_eq!(
            parse_eth("1.5"),
            Some(U256::from(1_500_000_000_000_000_000u64))
        );
        assert_eq!(
            parse_eth(" 2 "),
            Some(U256::from(2_000_000_000_000_000_000u64))
        );
        assert_eq!(parse_eth("not a number"), None);
    }
}
