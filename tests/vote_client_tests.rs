//! VoteClient Tests: wallet double + mock node, end to end
//!
//! 1. Account discovery (present, absent, refused, listing failure)
//! 2. Writes: what the wallet is asked to sign and what reaches the node
//! 3. Rejection and bad input stop before anything is sent
//! 4. Election reads through the client

use algovote::core::{base64_to_msgpack, bytes_to_base64, encode_address, msgpack_to_base64};
use algovote::wallet::MISSING_WALLET_NOTICE;
use algovote::{
    ClientConfig, Error, Result, SignedBlob, UserStatus, VoteClient, WalletAccount, WalletProvider, WalletTransaction,
};
use async_trait::async_trait;
use rmpv::Value;
use serde_json::json;
use std::sync::Mutex;
use wiremock::matchers::{body_bytes, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SIGNED_PREFIX: &[u8] = b"SIGNED:";

/// Wallet double: records requests, "signs" by prefixing the unsigned bytes
#[derive(Default)]
struct FakeWallet {
    missing: bool,
    refuse_connect: bool,
    fail_listing: bool,
    reject_signing: bool,
    addresses: Vec<String>,
    requests: Mutex<Vec<WalletTransaction>>,
    notices: Mutex<Vec<String>>,
}

impl FakeWallet {
    fn with_accounts(addresses: &[&str]) -> Self {
        Self { addresses: addresses.iter().map(|a| a.to_string()).collect(), ..Default::default() }
    }

    fn requests(&self) -> Vec<WalletTransaction> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    fn is_available(&self) -> bool {
        !self.missing
    }

    async fn connect(&self) -> Result<()> {
        if self.refuse_connect {
            return Err(Error::Wallet("user declined connection".into()));
        }
        Ok(())
    }

    async fn accounts(&self, ledger: &str) -> Result<Vec<WalletAccount>> {
        assert_eq!(ledger, "TestNet");
        if self.fail_listing {
            return Err(Error::Wallet("account listing unavailable".into()));
        }
        Ok(self.addresses.iter().map(|a| WalletAccount { address: a.clone() }).collect())
    }

    async fn sign_txn(&self, txns: &[WalletTransaction]) -> Result<Vec<SignedBlob>> {
        self.requests.lock().unwrap().extend_from_slice(txns);
        if self.reject_signing {
            return Err(Error::SigningRejected("user rejected the request".into()));
        }
        txns.iter()
            .map(|t| -> Result<SignedBlob> {
                let mut blob = SIGNED_PREFIX.to_vec();
                blob.extend(base64_to_msgpack(&t.txn)?);
                Ok(SignedBlob { tx_id: "WALLETTXID".into(), blob: msgpack_to_base64(&blob) })
            })
            .collect()
    }

    fn notice(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

fn addr(byte: u8) -> String {
    encode_address(&[byte; 32])
}

fn client(server: &MockServer, wallet: FakeWallet) -> VoteClient<FakeWallet> {
    VoteClient::new(ClientConfig::new(server.uri(), server.uri()), wallet).expect("client")
}

async fn mount_params(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/transactions/params"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fee": 0,
            "min-fee": 1000,
            "genesis-id": "testnet-v1.0",
            "genesis-hash": bytes_to_base64(&[7u8; 32]),
            "last-round": 5000,
            "consensus-version": "future"
        })))
        .mount(server)
        .await;
}

/// Field of the unsigned transaction the wallet was asked to sign
fn field(request: &WalletTransaction, key: &str) -> Option<Value> {
    let bytes = base64_to_msgpack(&request.txn).unwrap();
    let value = rmpv::decode::read_value(&mut &bytes[..]).unwrap();
    value
        .as_map()
        .unwrap()
        .iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v.clone())
}

fn arg_list(request: &WalletTransaction) -> Vec<Vec<u8>> {
    field(request, "apaa")
        .map(|v| v.as_array().unwrap().iter().map(|a| a.as_slice().unwrap().to_vec()).collect())
        .unwrap_or_default()
}

// ============================================================================
// 1. ACCOUNT DISCOVERY
// ============================================================================

#[tokio::test]
async fn accounts_come_from_wallet() {
    let server = MockServer::start().await;
    let vc = client(&server, FakeWallet::with_accounts(&["A1", "A2"]));

    assert_eq!(vc.accounts().await, vec!["A1", "A2"]);
}

#[tokio::test]
async fn missing_wallet_yields_no_accounts_and_a_notice() {
    let server = MockServer::start().await;
    let vc = client(&server, FakeWallet { missing: true, ..FakeWallet::with_accounts(&["A1"]) });
    let notices = || vc.wallet().provider().notices.lock().unwrap().clone();
    assert!(notices().is_empty());

    assert!(vc.accounts().await.is_empty());
    assert!(vc.accounts().await.is_empty());
    assert_eq!(notices(), vec![MISSING_WALLET_NOTICE.to_string()]);
}

#[tokio::test]
async fn refused_connection_yields_no_accounts() {
    let server = MockServer::start().await;
    let vc = client(&server, FakeWallet { refuse_connect: true, ..FakeWallet::with_accounts(&["A1"]) });

    assert!(vc.accounts().await.is_empty());
}

#[tokio::test]
async fn failed_listing_yields_no_accounts() {
    let server = MockServer::start().await;
    let vc = client(&server, FakeWallet { fail_listing: true, ..FakeWallet::with_accounts(&["A1"]) });

    assert!(vc.accounts().await.is_empty());
    assert!(vc.wallet().provider().notices.lock().unwrap().is_empty());
}

// ============================================================================
// 2. WRITES
// ============================================================================

#[tokio::test]
async fn vote_signs_and_posts_the_signed_blob() {
    let server = MockServer::start().await;
    mount_params(&server).await;
    let voter = addr(1);

    let vc = client(&server, FakeWallet::with_accounts(&[&voter]));
    let expected_unsigned = vc.builder().await.unwrap().vote(&voter, 2, 42).to_msgpack().unwrap();
    let mut expected_blob = SIGNED_PREFIX.to_vec();
    expected_blob.extend(&expected_unsigned);

    Mock::given(method("POST"))
        .and(path("/v2/transactions"))
        .and(body_bytes(expected_blob))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"txId": "NODETXID"})))
        .expect(1)
        .mount(&server)
        .await;

    let sent = vc.vote(&voter, 2, 42).await.unwrap();
    assert_eq!(sent.txid, "NODETXID");

    let requests = vc.wallet().provider().requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(arg_list(request), vec![b"vote".to_vec(), 2u64.to_be_bytes().to_vec()]);
    assert_eq!(field(request, "apid").and_then(|v| v.as_u64()), Some(42));
    assert_eq!(field(request, "apan"), None);
    assert_eq!(field(request, "fv").and_then(|v| v.as_u64()), Some(5000));
    assert_eq!(field(request, "lv").and_then(|v| v.as_u64()), Some(6000));
    assert_eq!(field(request, "fee").and_then(|v| v.as_u64()), Some(1000));
    assert_eq!(field(request, "snd").unwrap().as_slice(), Some(&[1u8; 32][..]));
    assert_eq!(field(request, "gen").unwrap().as_str(), Some("testnet-v1.0"));
}

#[tokio::test]
async fn update_user_status_carries_user_key_and_both_accounts() {
    let server = MockServer::start().await;
    mount_params(&server).await;
    Mock::given(method("POST"))
        .and(path("/v2/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"txId": "T"})))
        .mount(&server)
        .await;
    let (creator, user) = (addr(9), addr(3));

    let vc = client(&server, FakeWallet::with_accounts(&[&creator]));
    vc.update_user_status(&creator, &user, UserStatus::Yes, 42).await.unwrap();

    let requests = vc.wallet().provider().requests();
    let request = &requests[0];
    assert_eq!(
        arg_list(request),
        vec![b"update_user_status".to_vec(), vec![3u8; 32], b"yes".to_vec()]
    );
    let accounts: Vec<Vec<u8>> = field(request, "apat")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a.as_slice().unwrap().to_vec())
        .collect();
    assert_eq!(accounts, vec![vec![9u8; 32], vec![3u8; 32]]);
    assert_eq!(field(request, "snd").unwrap().as_slice(), Some(&[9u8; 32][..]));
}

#[tokio::test]
async fn lifecycle_calls_use_their_on_complete_codes() {
    let server = MockServer::start().await;
    mount_params(&server).await;
    Mock::given(method("POST"))
        .and(path("/v2/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"txId": "T"})))
        .expect(3)
        .mount(&server)
        .await;
    let voter = addr(4);

    let vc = client(&server, FakeWallet::with_accounts(&[&voter]));
    vc.opt_in_account(&voter, 42).await.unwrap();
    vc.close_out(&voter, 42).await.unwrap();
    vc.clear_state(&voter, 42).await.unwrap();

    let requests = vc.wallet().provider().requests();
    let codes: Vec<Option<u64>> = requests.iter().map(|r| field(r, "apan").and_then(|v| v.as_u64())).collect();
    assert_eq!(codes, vec![Some(1), Some(2), Some(3)]);
    let methods: Vec<Vec<u8>> = requests.iter().map(|r| arg_list(r)[0].clone()).collect();
    assert_eq!(methods, vec![b"opt_in".to_vec(), b"close_out".to_vec(), b"clear_state".to_vec()]);
}

#[tokio::test]
async fn flat_fee_overrides_suggested_fee() {
    let server = MockServer::start().await;
    mount_params(&server).await;
    Mock::given(method("POST"))
        .and(path("/v2/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"txId": "T"})))
        .mount(&server)
        .await;
    let voter = addr(5);

    let config = ClientConfig::new(server.uri(), server.uri()).with_flat_fee(2500).with_validity_window(10);
    let vc = VoteClient::new(config, FakeWallet::with_accounts(&[&voter])).unwrap();
    vc.vote(&voter, 0, 42).await.unwrap();

    let requests = vc.wallet().provider().requests();
    let request = &requests[0];
    assert_eq!(field(request, "fee").and_then(|v| v.as_u64()), Some(2500));
    assert_eq!(field(request, "lv").and_then(|v| v.as_u64()), Some(5010));
}

// ============================================================================
// 3. NOTHING SENT ON FAILURE
// ============================================================================

#[tokio::test]
async fn signing_rejection_sends_nothing() {
    let server = MockServer::start().await;
    mount_params(&server).await;
    Mock::given(method("POST"))
        .and(path("/v2/transactions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let voter = addr(6);

    let vc = client(&server, FakeWallet { reject_signing: true, ..FakeWallet::with_accounts(&[&voter]) });
    let err = vc.vote(&voter, 1, 42).await.unwrap_err();
    assert!(matches!(err, Error::SigningRejected(_)));
    assert_eq!(vc.wallet().provider().requests().len(), 1);
}

#[tokio::test]
async fn invalid_user_address_fails_before_signing() {
    let server = MockServer::start().await;
    mount_params(&server).await;

    let vc = client(&server, FakeWallet::with_accounts(&[]));
    let err = vc.update_user_status(&addr(9), "NOT-AN-ADDRESS", UserStatus::No, 42).await.unwrap_err();
    assert!(matches!(err, Error::InvalidAddress { .. }));
    assert!(vc.wallet().provider().requests().is_empty());
}

#[tokio::test]
async fn invalid_sender_fails_before_signing() {
    let server = MockServer::start().await;
    mount_params(&server).await;

    let vc = client(&server, FakeWallet::with_accounts(&[]));
    let err = vc.vote("ADDR1", 2, 42).await.unwrap_err();
    assert!(matches!(err, Error::InvalidAddress { .. }));
    assert!(vc.wallet().provider().requests().is_empty());
}

#[tokio::test]
async fn malformed_genesis_hash_stops_before_signing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/transactions/params"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fee": 0,
            "min-fee": 1000,
            "genesis-id": "testnet-v1.0",
            "genesis-hash": "%%%not-base64",
            "last-round": 5000
        })))
        .mount(&server)
        .await;

    let vc = client(&server, FakeWallet::with_accounts(&[]));
    let err = vc.vote(&addr(1), 0, 42).await.unwrap_err();
    assert!(matches!(err, Error::Base64(_)));
    assert!(vc.wallet().provider().requests().is_empty());
}

#[tokio::test]
async fn params_failure_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/transactions/params"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let vc = client(&server, FakeWallet::with_accounts(&[]));
    let err = vc.opt_in_account(&addr(1), 42).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 503, .. }));
    assert!(vc.wallet().provider().requests().is_empty());
}

// ============================================================================
// 4. ELECTION READS
// ============================================================================

#[tokio::test]
async fn election_summary_and_voters() {
    let server = MockServer::start().await;
    let b64 = |s: &str| bytes_to_base64(s.as_bytes());
    Mock::given(method("GET"))
        .and(path("/v2/applications/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "params": {"creator": "CREATOR", "global-state": [
                {"key": b64("VoteOptions"), "value": {"type": 1, "bytes": b64("red,green")}},
                {"key": b64("NumVoteOptions"), "value": {"type": 2, "uint": 2}},
                {"key": b64("ElectionEnd"), "value": {"type": 2, "uint": 200}},
                {"key": b64("VotesFor0"), "value": {"type": 2, "uint": 1}},
                {"key": b64("VotesFor1"), "value": {"type": 2, "uint": 3}}
            ]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accounts": [
            {"address": "V1", "apps-local-state": [{"id": 42, "key-value": [
                {"key": b64("can_vote"), "value": {"type": 1, "bytes": b64("yes")}}
            ]}]}
        ]})))
        .mount(&server)
        .await;

    let vc = client(&server, FakeWallet::default());
    let election = vc.election(42).await.unwrap();
    assert_eq!(election.creator, "CREATOR");
    assert_eq!(election.options, vec!["red", "green"]);
    assert_eq!(election.total_votes(), 4);
    assert_eq!(election.leader(), Some(1));
    assert!(election.is_open(200));
    assert!(!election.is_open(201));

    let voters = vc.voters(42).await.unwrap();
    assert_eq!(voters.len(), 1);
    assert!(voters[0].may_vote());
}
