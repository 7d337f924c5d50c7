//! LedgerClient - algod + indexer over HTTP
//!
//! Read-only queries plus raw transaction broadcast. Errors from the network
//! propagate unchanged; there is no retry.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::state::{decode_global_state, decode_local_state, AppState, LocalStates};
use super::types::*;
use crate::client::ClientConfig;
use crate::core::paths::{algod, indexer};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct LedgerClient {
    http: Client,
    algod_url: String,
    indexer_url: String,
}

impl LedgerClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let name = HeaderName::from_bytes(token.header.as_bytes())
                .map_err(|e| Error::Config(format!("token header {:?}: {}", token.header, e)))?;
            let value = HeaderValue::from_str(&token.value)
                .map_err(|e| Error::Config(format!("token value: {}", e)))?;
            headers.insert(name, value);
        }
        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            algod_url: config.algod_url.trim_end_matches('/').to_string(),
            indexer_url: config.indexer_url.trim_end_matches('/').to_string(),
        })
    }

    fn algod(&self, path: &str) -> String {
        format!("{}{}", self.algod_url, path)
    }

    fn indexer(&self, path: &str) -> String {
        format!("{}{}", self.indexer_url, path)
    }

    /// Map non-2xx responses to `Error::Api`, preferring algod's `message` field
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);
        Err(Error::Api { status: status.as_u16(), message })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {}", url);
        let response = self.http.get(url).query(query).send().await?;
        Ok(Self::check(response).await?.json::<T>().await?)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn status(&self) -> Result<NodeStatus> {
        self.get_json(&self.algod(algod::STATUS), &[]).await
    }

    /// Most recent confirmed round
    pub async fn latest_round(&self) -> Result<u64> {
        let status = self.status().await?;
        debug!(last_round = status.last_round, "algod status");
        Ok(status.last_round)
    }

    pub async fn application(&self, app_id: u64) -> Result<Application> {
        let url = self.algod(&format!("{}/{}", algod::APPLICATIONS, app_id));
        self.get_json(&url, &[]).await
    }

    /// Global state of `app_id` plus its creator under `Creator`
    pub async fn application_state(&self, app_id: u64) -> Result<AppState> {
        let app = self.application(app_id).await?;
        decode_global_state(&app.params.global_state, &app.params.creator)
    }

    /// Local state of every account opted into `app_id`.
    ///
    /// Follows the indexer's `next-token` until the listing is exhausted.
    pub async fn local_states(&self, app_id: u64) -> Result<LocalStates> {
        let url = self.indexer(indexer::ACCOUNTS);
        let mut states = LocalStates::new();
        let mut next: Option<String> = None;

        loop {
            let mut query = vec![(indexer::APPLICATION_ID_PARAM, app_id.to_string())];
            if let Some(token) = next.take() {
                query.push((indexer::NEXT_PARAM, token));
            }
            let page: AccountsResponse = self.get_json(&url, &query).await?;
            let page_len = page.accounts.len();

            for account in page.accounts {
                for app in account.apps_local_state.iter().filter(|a| a.id == app_id) {
                    states.insert(account.address.clone(), decode_local_state(&app.key_value)?);
                }
            }

            match page.next_token {
                Some(token) if page_len > 0 && !token.is_empty() => next = Some(token),
                _ => break,
            }
        }

        debug!(app_id, accounts = states.len(), "local states");
        Ok(states)
    }

    pub async fn suggested_params(&self) -> Result<SuggestedParams> {
        self.get_json(&self.algod(algod::TRANSACTION_PARAMS), &[]).await
    }

    // =========================================================================
    // Broadcast and confirmation
    // =========================================================================

    /// Broadcast a signed transaction. Returns once the node accepts it into
    /// its pool, not once it is confirmed.
    pub async fn send_raw_transaction(&self, signed: &[u8]) -> Result<String> {
        let url = self.algod(algod::TRANSACTIONS);
        debug!("POST {} ({} bytes)", url, signed.len());
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, algod::RAW_CONTENT_TYPE)
            .body(signed.to_vec())
            .send()
            .await?;
        let posted: PostTransactionResponse = Self::check(response).await?.json().await?;
        info!(txid = %posted.tx_id, "transaction accepted");
        Ok(posted.tx_id)
    }

    pub async fn pending_transaction(&self, txid: &str) -> Result<PendingTransactionInfo> {
        let url = self.algod(&format!("{}/{}", algod::PENDING, txid));
        self.get_json(&url, &[]).await
    }

    pub async fn transaction_status(&self, txid: &str) -> Result<TxStatus> {
        Ok(TxStatus::from(&self.pending_transaction(txid).await?))
    }

    /// Block until the node has seen a round after `round`
    pub async fn wait_for_block_after(&self, round: u64) -> Result<NodeStatus> {
        let url = self.algod(&format!("{}/{}", algod::WAIT_FOR_BLOCK, round));
        self.get_json(&url, &[]).await
    }

    /// Poll until `txid` is confirmed, rejected, or `max_rounds` have passed.
    /// Returns the confirmed round.
    pub async fn wait_for_confirmation(&self, txid: &str, max_rounds: u64) -> Result<u64> {
        let start = self.latest_round().await?;
        let mut round = start;

        loop {
            match self.transaction_status(txid).await? {
                TxStatus::Confirmed(confirmed) => {
                    info!(txid, round = confirmed, "transaction confirmed");
                    return Ok(confirmed);
                }
                TxStatus::Rejected(reason) => {
                    return Err(Error::Rejected { txid: txid.to_string(), reason });
                }
                TxStatus::Pending => {}
            }
            if round - start >= max_rounds {
                return Err(Error::NotConfirmed { txid: txid.to_string(), rounds: max_rounds });
            }
            self.wait_for_block_after(round).await?;
            round += 1;
        }
    }
}
