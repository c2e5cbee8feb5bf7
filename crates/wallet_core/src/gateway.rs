//! Alloy-backed implementations of the wallet seams: a connector that turns a
//! configured private key into a live session, balance reads over the
//! provider, and the MoneyTransfer contract bindings.

use std::sync::Arc;

use alloy::{
    primitives::{Address, B256, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    sol,
};
use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use shared::domain::TransferRecord;

use crate::{
    config::Settings,
    error::{ConnectError, GatewayError},
    AccountProvider, ContractGateway, WalletConnector, WalletSession,
};

sol! {
    #[sol(rpc)]
    contract MoneyTransfer {
        struct Transaction {
            address sender;
            address receiver;
            uint256 amount;
            string txHash;
        }

        function transfer(address receiver) external payable;
        function getTransactions() external view returns (Transaction[] memory);
    }
}

/// Builds a session from the configured signing key and RPC endpoint,
/// refusing endpoints that serve a different chain than configured.
pub struct LocalKeyConnector {
    settings: Settings,
}

impl LocalKeyConnector {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl WalletConnector for LocalKeyConnector {
    async fn connect(&self) -> Result<WalletSession, ConnectError> {
        let raw_key = self
            .settings
            .private_key
            .as_deref()
            .ok_or(ConnectError::MissingKey)?;
        let signer = raw_key
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|err| ConnectError::InvalidKey(err.to_string()))?;
        let address = signer.address();

        let rpc_url = parse_rpc_url(&self.settings.rpc_url)?;
        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect(rpc_url.as_str())
            .await
            .map_err(|err| ConnectError::Endpoint {
                url: self.settings.rpc_url.clone(),
                reason: err.to_string(),
            })?
            .erased();

        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|err| ConnectError::Endpoint {
                url: self.settings.rpc_url.clone(),
                reason: err.to_string(),
            })?;
        if chain_id != self.settings.chain_id {
            return Err(ConnectError::WrongChain {
                expected: self.settings.chain_id,
                actual: chain_id,
            });
        }

        info!(%address, chain_id, "wallet session established");

        let account = Arc::new(ProviderAccount {
            provider: provider.clone(),
            address,
        });
        let gateway = Arc::new(MoneyTransferGateway {
            provider,
            contract_address: self.settings.contract_address,
        });

        Ok(WalletSession {
            address,
            chain_id,
            account,
            gateway,
        })
    }
}

fn parse_rpc_url(raw: &str) -> Result<Url, ConnectError> {
    let parsed = Url::parse(raw).map_err(|err| ConnectError::InvalidRpcUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" | "ws" | "wss" => Ok(parsed),
        other => Err(ConnectError::InvalidRpcUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Balance reads for the connected account.
pub struct ProviderAccount {
    provider: DynProvider,
    address: Address,
}

#[async_trait]
impl AccountProvider for ProviderAccount {
    fn address(&self) -> Address {
        self.address
    }

    async fn balance(&self) -> Result<U256, GatewayError> {
        self.provider
            .get_balance(self.address)
            .await
            .map_err(|err| GatewayError::Balance(err.to_string()))
    }
}

/// Read/write access to the deployed MoneyTransfer contract.
pub struct MoneyTransferGateway {
    provider: DynProvider,
    contract_address: Address,
}

#[async_trait]
impl ContractGateway for MoneyTransferGateway {
    async fn send_transfer(
        &self,
        receiver: Address,
        amount_wei: U256,
    ) -> Result<B256, GatewayError> {
        let contract = MoneyTransfer::new(self.contract_address, self.provider.clone());
        let receipt = contract
            .transfer(receiver)
            .value(amount_wei)
            .send()
            .await
            .map_err(|err| GatewayError::Submission(err.to_string()))?
            .get_receipt()
            .await
            .map_err(|err| GatewayError::Submission(err.to_string()))?;

        let tx_hash = receipt.transaction_hash;
        if !receipt.status() {
            warn!(%tx_hash, "transfer reverted");
            return Err(GatewayError::Reverted {
                tx_hash: tx_hash.to_string(),
            });
        }

        info!(%tx_hash, %receiver, "transfer confirmed");
        Ok(tx_hash)
    }

    async fn transactions(&self) -> Result<Vec<TransferRecord>, GatewayError> {
        let contract = MoneyTransfer::new(self.contract_address, self.provider.clone());
        let records = contract
            .getTransactions()
            .call()
            .await
            .map_err(|err| GatewayError::Transactions(err.to_string()))?;
        Ok(records.into_iter().map(into_transfer_record).collect())
    }
}

fn into_transfer_record(raw: MoneyTransfer::Transaction) -> TransferRecord {
    TransferRecord {
        sender: raw.sender,
        receiver: raw.receiver,
        amount: raw.amount,
        tx_hash: raw.txHash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_websocket_rpc_urls() {
        for raw in [
            "https://ethereum-sepolia-rpc.publicnode.com",
            "http://127.0.0.1:8545",
            "wss://sepolia.example/ws",
        ] {
            assert!(parse_rpc_url(raw).is_ok(), "url {raw:?} should parse");
        }
    }

    #[test]
    fn rejects_non_rpc_url_schemes() {
        let err = parse_rpc_url("file:///tmp/rpc").expect_err("must reject");
        assert!(matches!(err, ConnectError::InvalidRpcUrl { .. }));

        let err = parse_rpc_url("not a url").expect_err("must reject");
        assert!(matches!(err, ConnectError::InvalidRpcUrl { .. }));
    }

    #[test]
    fn maps_contract_rows_into_domain_records_in_order() {
        let sender: Address = "0x1111111111111111111111111111111111111111"
            .parse()
            .expect("sender");
        let receiver: Address = "0x2222222222222222222222222222222222222222"
            .parse()
            .expect("receiver");

        let rows = vec![
            MoneyTransfer::Transaction {
                sender,
                receiver,
                amount: U256::from(1u64),
                txHash: "0xaaa".to_string(),
            },
            MoneyTransfer::Transaction {
                sender: receiver,
                receiver: sender,
                amount: U256::from(2u64),
                txHash: "0xbbb".to_string(),
            },
        ];

        let records: Vec<TransferRecord> = rows.into_iter().map(into_transfer_record).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sender, sender);
        assert_eq!(records[0].amount, U256::from(1u64));
        assert_eq!(records[0].tx_hash, "0xaaa");
        assert_eq!(records[1].receiver, sender);
        assert_eq!(records[1].tx_hash, "0xbbb");
    }
}
