use std::time::Duration;

use tokio::time::timeout;

use super::*;
use transfer::TransferForm;

struct StaticConnector {
    session: WalletSession,
}

#[async_trait]
impl WalletConnector for StaticConnector {
    async fn connect(&self) -> Result<WalletSession, ConnectError> {
        Ok(self.session.clone())
    }
}

struct FailingConnector;

#[async_trait]
impl WalletConnector for FailingConnector {
    async fn connect(&self) -> Result<WalletSession, ConnectError> {
        Err(ConnectError::WrongChain {
            expected: 11_155_111,
            actual: 1,
        })
    }
}

struct TestAccount {
    address: Address,
    balance: U256,
}

#[async_trait]
impl AccountProvider for TestAccount {
    fn address(&self) -> Address {
        self.address
    }

    async fn balance(&self) -> Result<U256, GatewayError> {
        Ok(self.balance)
    }
}

struct TestGateway {
    tx_hash: B256,
    records: Vec<TransferRecord>,
    fail_with: Option<String>,
    settle_delay: Duration,
    sent: Arc<Mutex<Vec<(Address, U256)>>>,
}

impl TestGateway {
    fn confirming(tx_hash: B256) -> Self {
        Self {
            tx_hash,
            records: Vec::new(),
            fail_with: None,
            settle_delay: Duration::ZERO,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing(reason: impl Into<String>) -> Self {
        let mut gateway = Self::confirming(B256::ZERO);
        gateway.fail_with = Some(reason.into());
        gateway
    }

    fn with_records(records: Vec<TransferRecord>) -> Self {
        let mut gateway = Self::confirming(B256::ZERO);
        gateway.records = records;
        gateway
    }

    fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

#[async_trait]
impl ContractGateway for TestGateway {
    async fn send_transfer(
        &self,
        receiver: Address,
        amount_wei: U256,
    ) -> Result<B256, GatewayError> {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
        self.sent.lock().await.push((receiver, amount_wei));
        if let Some(reason) = &self.fail_with {
            return Err(GatewayError::Submission(reason.clone()));
        }
        Ok(self.tx_hash)
    }

    async fn transactions(&self) -> Result<Vec<TransferRecord>, GatewayError> {
        Ok(self.records.clone())
    }
}

fn account_address() -> Address {
    "0x1234567890123456789012345678901234567890"
        .parse()
        .expect("address")
}

fn receiver_address() -> Address {
    "0xAbC1230000000000000000000000000000000001"
        .parse()
        .expect("address")
}

fn session_with(gateway: Arc<TestGateway>) -> WalletSession {
    let address = account_address();
    WalletSession {
        address,
        chain_id: 11_155_111,
        account: Arc::new(TestAccount {
            address,
            balance: U256::from(5u64),
        }),
        gateway,
    }
}

async fn connected_client(gateway: Arc<TestGateway>) -> Arc<WalletClient> {
    let client = WalletClient::new(Arc::new(StaticConnector {
        session: session_with(gateway),
    }));
    client.connect().await.expect("connect");
    client
}

#[tokio::test]
async fn connect_stores_session_and_emits_identity() {
    let gateway = Arc::new(TestGateway::confirming(B256::ZERO));
    let client = WalletClient::new(Arc::new(StaticConnector {
        session: session_with(gateway),
    }));
    let mut rx = client.subscribe_events();

    client.connect().await.expect("connect");

    match rx.recv().await.expect("event") {
        SessionEvent::Connected { address, chain_id } => {
            assert_eq!(address, account_address());
            assert_eq!(chain_id, 11_155_111);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(client.balance().await.expect("balance"), U256::from(5u64));
}

#[tokio::test]
async fn connect_failure_emits_nothing() {
    let client = WalletClient::new(Arc::new(FailingConnector));
    let mut rx = client.subscribe_events();

    let err = client.connect().await.expect_err("must fail");
    assert!(matches!(err, ConnectError::WrongChain { .. }));
    assert!(rx.try_recv().is_err());
    assert!(client.balance().await.is_err());
}

#[tokio::test]
async fn submit_without_session_is_rejected_before_the_gateway() {
    let client = WalletClient::new(Arc::new(FailingConnector));
    let intent = TransferIntent {
        receiver: receiver_address(),
        amount_wei: U256::from(1u64),
    };

    let err = client.submit_transfer(intent).await.expect_err("must fail");
    assert_eq!(err, SubmitError::NotConnected);
}

#[tokio::test]
async fn validated_form_reaches_the_gateway_with_exact_wei() {
    let gateway = Arc::new(TestGateway::confirming(
        "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b"
            .parse()
            .expect("hash"),
    ));
    let sent = Arc::clone(&gateway.sent);
    let client = connected_client(gateway).await;
    let mut rx = client.subscribe_events();

    let form = TransferForm {
        receiver: "0xAbC1230000000000000000000000000000000001".to_string(),
        amount: "1.5".to_string(),
    };
    let intent = form.validate().expect("valid form");
    client.submit_transfer(intent).await.expect("submit");

    let tx_hash = timeout(Duration::from_secs(1), async {
        loop {
            if let SessionEvent::TransferConfirmed { tx_hash } = rx.recv().await.expect("event") {
                break tx_hash;
            }
        }
    })
    .await
    .expect("confirmation timeout");

    assert_eq!(
        tx_hash,
        "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b"
    );
    let sent = sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, receiver_address());
    assert_eq!(sent[0].1, U256::from(1_500_000_000_000_000_000u64));
}

#[tokio::test]
async fn gateway_failure_is_reported_as_rejection() {
    let gateway = Arc::new(TestGateway::failing("insufficient funds"));
    let client = connected_client(gateway).await;
    let mut rx = client.subscribe_events();

    let intent = TransferIntent {
        receiver: receiver_address(),
        amount_wei: U256::from(1u64),
    };
    client.submit_transfer(intent).await.expect("submit");

    let reason = timeout(Duration::from_secs(1), async {
        loop {
            if let SessionEvent::TransferRejected { reason } = rx.recv().await.expect("event") {
                break reason;
            }
        }
    })
    .await
    .expect("rejection timeout");

    assert!(reason.contains("insufficient funds"));
}

#[tokio::test]
async fn disconnect_does_not_cancel_an_inflight_transfer() {
    let gateway = Arc::new(
        TestGateway::confirming(B256::repeat_byte(7)).with_settle_delay(Duration::from_millis(50)),
    );
    let client = connected_client(gateway).await;
    let mut rx = client.subscribe_events();

    let intent = TransferIntent {
        receiver: receiver_address(),
        amount_wei: U256::from(1u64),
    };
    client.submit_transfer(intent).await.expect("submit");
    client.disconnect().await;

    let mut saw_disconnect = false;
    let tx_hash = timeout(Duration::from_secs(1), async {
        loop {
            match rx.recv().await.expect("event") {
                SessionEvent::Disconnected => saw_disconnect = true,
                SessionEvent::TransferConfirmed { tx_hash } => break tx_hash,
                _ => {}
            }
        }
    })
    .await
    .expect("confirmation timeout");

    assert!(saw_disconnect);
    assert_eq!(tx_hash, B256::repeat_byte(7).to_string());
}

#[tokio::test]
async fn disconnect_clears_the_session() {
    let gateway = Arc::new(TestGateway::confirming(B256::ZERO));
    let client = connected_client(gateway).await;

    client.disconnect().await;

    let err = client.balance().await.expect_err("no session");
    assert!(err.to_string().contains("no wallet session"));
    let err = client.transactions().await.expect_err("no session");
    assert!(err.to_string().contains("no wallet session"));
}

#[tokio::test]
async fn transactions_keep_gateway_order() {
    let a = account_address();
    let b = receiver_address();
    let records = vec![
        TransferRecord {
            sender: a,
            receiver: b,
            amount: U256::from(2u64),
            tx_hash: "0xaaa".to_string(),
        },
        TransferRecord {
            sender: b,
            receiver: a,
            amount: U256::from(1u64),
            tx_hash: "0xbbb".to_string(),
        },
    ];
    let gateway = Arc::new(TestGateway::with_records(records.clone()));
    let client = connected_client(gateway).await;

    assert_eq!(client.transactions().await.expect("records"), records);
}
