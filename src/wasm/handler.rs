//! VoteHandler: the election client exposed to JavaScript
//!
//! Method names follow the front-end's camelCase conventions. Numbers come
//! in as JS numbers (`f64`) and are checked before use as ids.

use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use super::algosigner::AlgoSignerWallet;
use super::log;
use crate::client::{ClientConfig, VoteClient};
use crate::error::Error;
use crate::txn::UserStatus;

fn js_error(err: impl ToString) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(js_error)
}

/// JS numbers -> u64, rejecting fractions, negatives and NaN
fn whole_number(value: f64, what: &str) -> Result<u64, JsValue> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= 9_007_199_254_740_991.0 {
        Ok(value as u64)
    } else {
        Err(js_error(format!("{} must be a non-negative integer, got {}", what, value)))
    }
}

#[wasm_bindgen]
pub struct VoteHandler {
    client: Rc<VoteClient<AlgoSignerWallet>>,
}

#[wasm_bindgen]
impl VoteHandler {
    /// All arguments optional; omitted ones fall back to public TestNet
    #[wasm_bindgen(constructor)]
    pub fn new(
        algod_url: Option<String>,
        indexer_url: Option<String>,
        token_header: Option<String>,
        token: Option<String>,
    ) -> Result<VoteHandler, JsValue> {
        let mut config = ClientConfig::default();
        if let Some(url) = algod_url {
            config = config.with_algod(url);
        }
        if let Some(url) = indexer_url {
            config = config.with_indexer(url);
        }
        if let Some(token) = token {
            let header = token_header.unwrap_or_else(|| crate::core::paths::defaults::TOKEN_HEADER.into());
            config = config.with_api_token(header, token);
        }
        log!("[VoteHandler] algod={} indexer={}", config.algod_url, config.indexer_url);

        let client = VoteClient::new(config, AlgoSignerWallet::new()).map_err(js_error)?;
        Ok(Self { client: Rc::new(client) })
    }

    /// Wallet addresses; `[]` when AlgoSigner is missing or declines
    #[wasm_bindgen(js_name = "getAccounts")]
    pub async fn get_accounts(&self) -> Result<JsValue, JsValue> {
        to_js(&self.client.accounts().await)
    }

    #[wasm_bindgen(js_name = "getLatestRound")]
    pub async fn get_latest_round(&self) -> Result<f64, JsValue> {
        let round = self.client.latest_round().await.map_err(js_error)?;
        Ok(round as f64)
    }

    /// `{Creator, VoteOptions, VotesFor0, ...}`
    #[wasm_bindgen(js_name = "getElectionState")]
    pub async fn get_election_state(&self, app_id: f64) -> Result<JsValue, JsValue> {
        let app_id = whole_number(app_id, "appID")?;
        to_js(&self.client.election_state(app_id).await.map_err(js_error)?)
    }

    /// `{address: {can_vote, voted}, ...}`
    #[wasm_bindgen(js_name = "getAllLocalStates")]
    pub async fn get_all_local_states(&self, app_id: f64) -> Result<JsValue, JsValue> {
        let app_id = whole_number(app_id, "appID")?;
        to_js(&self.client.all_local_states(app_id).await.map_err(js_error)?)
    }

    #[wasm_bindgen(js_name = "optInAccount")]
    pub async fn opt_in_account(&self, address: String, app_id: f64) -> Result<String, JsValue> {
        let app_id = whole_number(app_id, "appID")?;
        let sent = self.client.opt_in_account(&address, app_id).await.map_err(js_error)?;
        Ok(sent.txid)
    }

    /// `yes_or_no` is `"yes"` or `"no"`
    #[wasm_bindgen(js_name = "updateUserStatus")]
    pub async fn update_user_status(
        &self,
        creator_address: String,
        user_address: String,
        yes_or_no: String,
        app_id: f64,
    ) -> Result<String, JsValue> {
        let app_id = whole_number(app_id, "appID")?;
        let status: UserStatus = yes_or_no.parse().map_err(|e: Error| js_error(e))?;
        let sent = self
            .client
            .update_user_status(&creator_address, &user_address, status, app_id)
            .await
            .map_err(js_error)?;
        Ok(sent.txid)
    }

    pub async fn vote(&self, address: String, option_index: f64, app_id: f64) -> Result<String, JsValue> {
        let option = whole_number(option_index, "optionIndex")?;
        let app_id = whole_number(app_id, "appID")?;
        let sent = self.client.vote(&address, option, app_id).await.map_err(js_error)?;
        Ok(sent.txid)
    }

    #[wasm_bindgen(js_name = "closeOut")]
    pub async fn close_out(&self, address: String, app_id: f64) -> Result<String, JsValue> {
        let app_id = whole_number(app_id, "appID")?;
        let sent = self.client.close_out(&address, app_id).await.map_err(js_error)?;
        Ok(sent.txid)
    }

    #[wasm_bindgen(js_name = "clearState")]
    pub async fn clear_state(&self, address: String, app_id: f64) -> Result<String, JsValue> {
        let app_id = whole_number(app_id, "appID")?;
        let sent = self.client.clear_state(&address, app_id).await.map_err(js_error)?;
        Ok(sent.txid)
    }

    /// Resolves with the confirmed round
    #[wasm_bindgen(js_name = "waitForConfirmation")]
    pub async fn wait_for_confirmation(&self, txid: String, max_rounds: f64) -> Result<f64, JsValue> {
        let max_rounds = whole_number(max_rounds, "maxRounds")?;
        let round = self.client.wait_for_confirmation(&txid, max_rounds).await.map_err(js_error)?;
        Ok(round as f64)
    }
}
