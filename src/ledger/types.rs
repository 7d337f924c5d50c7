//! Wire types for the algod and indexer v2 JSON APIs
//!
//! Only the fields this crate reads are modelled; everything else the
//! network returns is ignored by serde.

use serde::{Deserialize, Serialize};

/// `GET /v2/status`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeStatus {
    pub last_round: u64,
    #[serde(default)]
    pub time_since_last_round: u64,
    #[serde(default)]
    pub catchup_time: u64,
}

/// TEAL value. `type` is 1 for bytes, 2 for uint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TealValue {
    #[serde(rename = "type")]
    pub type_: u8,
    #[serde(default)]
    pub bytes: String,
    #[serde(default)]
    pub uint: u64,
}

impl TealValue {
    pub const BYTES: u8 = 1;
    pub const UINT: u8 = 2;
}

/// One base64-keyed entry of global or local state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TealKeyValue {
    pub key: String,
    pub value: TealValue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationParams {
    pub creator: String,
    #[serde(default)]
    pub global_state: Vec<TealKeyValue>,
}

/// `GET /v2/applications/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct Application {
    pub id: u64,
    pub params: ApplicationParams,
}

/// Per-app local state attached to an indexer account
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationLocalState {
    pub id: u64,
    #[serde(default)]
    pub key_value: Vec<TealKeyValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexerAccount {
    pub address: String,
    #[serde(default)]
    pub apps_local_state: Vec<ApplicationLocalState>,
}

/// `GET /v2/accounts?application-id={id}` (indexer)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<IndexerAccount>,
    #[serde(default)]
    pub current_round: u64,
    pub next_token: Option<String>,
}

/// `GET /v2/transactions/params`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SuggestedParams {
    /// Fee per byte in microalgos
    pub fee: u64,
    pub min_fee: u64,
    pub genesis_id: String,
    /// Base64 genesis hash
    pub genesis_hash: String,
    pub last_round: u64,
    #[serde(default)]
    pub consensus_version: String,
}

/// `POST /v2/transactions`
#[derive(Debug, Clone, Deserialize)]
pub struct PostTransactionResponse {
    #[serde(rename = "txId")]
    pub tx_id: String,
}

/// `GET /v2/transactions/pending/{txid}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PendingTransactionInfo {
    pub confirmed_round: Option<u64>,
    #[serde(default)]
    pub pool_error: String,
    pub application_index: Option<u64>,
}

/// Where a submitted transaction stands.
///
/// Serializes as `"pending"`, `{"confirmed": round}` or `{"rejected": reason}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Pending,
    Confirmed(u64),
    Rejected(String),
}

impl From<&PendingTransactionInfo> for TxStatus {
    fn from(info: &PendingTransactionInfo) -> Self {
        match info.confirmed_round {
            Some(round) if round > 0 => TxStatus::Confirmed(round),
            _ if !info.pool_error.is_empty() => TxStatus::Rejected(info.pool_error.clone()),
            _ => TxStatus::Pending,
        }
    }
}

/// algod error body: `{"message": "..."}`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn application_without_global_state() {
        let app: Application = serde_json::from_value(json!({
            "id": 42,
            "params": {"creator": "ADDR1", "approval-program": "", "clear-state-program": ""}
        }))
        .unwrap();
        assert_eq!(app.id, 42);
        assert!(app.params.global_state.is_empty());
    }

    #[test]
    fn pending_info_maps_to_status() {
        let confirmed: PendingTransactionInfo =
            serde_json::from_value(json!({"confirmed-round": 120, "pool-error": ""})).unwrap();
        assert_eq!(TxStatus::from(&confirmed), TxStatus::Confirmed(120));

        let rejected: PendingTransactionInfo =
            serde_json::from_value(json!({"confirmed-round": 0, "pool-error": "logic eval error"})).unwrap();
        assert_eq!(TxStatus::from(&rejected), TxStatus::Rejected("logic eval error".into()));

        let waiting: PendingTransactionInfo = serde_json::from_value(json!({"pool-error": ""})).unwrap();
        assert_eq!(TxStatus::from(&waiting), TxStatus::Pending);
    }

    #[test]
    fn status_serializes_as_structured_json() {
        assert_eq!(serde_json::to_value(TxStatus::Pending).unwrap(), json!("pending"));
        assert_eq!(serde_json::to_value(TxStatus::Confirmed(123)).unwrap(), json!({"confirmed": 123}));
        assert_eq!(
            serde_json::to_value(TxStatus::Rejected("overspend".into())).unwrap(),
            json!({"rejected": "overspend"})
        );
    }
}
