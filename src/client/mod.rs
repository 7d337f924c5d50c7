//! VoteClient - the session object for one election front-end
//!
//! Constructed once at startup and passed by reference. Owns the ledger
//! client and the wallet session; neither is mutated after construction.
//!
//! Every write action fetches fresh suggested params, builds the call, and
//! submits it. Concurrent actions from the same client are not ordered
//! against each other.

mod config;

pub use config::{ApiToken, ClientConfig};

use crate::election::{voters, ElectionState, VoterRecord};
use crate::error::Result;
use crate::ledger::{AppState, LedgerClient, LocalStates, TxStatus};
use crate::txn::{submit, PendingTransaction, SubmittedTransaction, TxnBuilder, UserStatus};
use crate::wallet::{WalletProvider, WalletSession};

pub struct VoteClient<W> {
    config: ClientConfig,
    ledger: LedgerClient,
    wallet: WalletSession<W>,
}

impl<W: WalletProvider> VoteClient<W> {
    pub fn new(config: ClientConfig, provider: W) -> Result<Self> {
        let ledger = LedgerClient::new(&config)?;
        let wallet = WalletSession::new(provider, config.ledger.clone());
        Ok(Self { config, ledger, wallet })
    }

    pub fn config(&self) -> &ClientConfig { &self.config }
    pub fn ledger(&self) -> &LedgerClient { &self.ledger }
    pub fn wallet(&self) -> &WalletSession<W> { &self.wallet }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Wallet addresses, empty when the wallet is absent or declines
    pub async fn accounts(&self) -> Vec<String> {
        self.wallet.discover_accounts().await
    }

    pub async fn latest_round(&self) -> Result<u64> {
        self.ledger.latest_round().await
    }

    /// Raw global state, `Creator` included
    pub async fn election_state(&self, app_id: u64) -> Result<AppState> {
        self.ledger.application_state(app_id).await
    }

    pub async fn election(&self, app_id: u64) -> Result<ElectionState> {
        ElectionState::from_app_state(&self.election_state(app_id).await?)
    }

    pub async fn all_local_states(&self, app_id: u64) -> Result<LocalStates> {
        self.ledger.local_states(app_id).await
    }

    pub async fn voters(&self, app_id: u64) -> Result<Vec<VoterRecord>> {
        Ok(voters(&self.all_local_states(app_id).await?))
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Builder over the node's current suggested params and this client's
    /// validity window and fee settings
    pub async fn builder(&self) -> Result<TxnBuilder> {
        let params = self.ledger.suggested_params().await?;
        let mut builder = TxnBuilder::new(params)?.with_validity_window(self.config.validity_window);
        if let Some(fee) = self.config.flat_fee {
            builder = builder.with_flat_fee(fee);
        }
        Ok(builder)
    }

    pub async fn submit(&self, pending: &PendingTransaction) -> Result<SubmittedTransaction> {
        submit(&self.wallet, &self.ledger, pending).await
    }

    pub async fn opt_in_account(&self, address: &str, app_id: u64) -> Result<SubmittedTransaction> {
        let txn = self.builder().await?.opt_in(address, app_id);
        self.submit(&txn).await
    }

    pub async fn update_user_status(
        &self,
        creator: &str,
        user: &str,
        status: UserStatus,
        app_id: u64,
    ) -> Result<SubmittedTransaction> {
        let txn = self.builder().await?.update_user_status(creator, user, status, app_id)?;
        self.submit(&txn).await
    }

    pub async fn vote(&self, address: &str, option: u64, app_id: u64) -> Result<SubmittedTransaction> {
        let txn = self.builder().await?.vote(address, option, app_id);
        self.submit(&txn).await
    }

    pub async fn close_out(&self, address: &str, app_id: u64) -> Result<SubmittedTransaction> {
        let txn = self.builder().await?.close_out(address, app_id);
        self.submit(&txn).await
    }

    pub async fn clear_state(&self, address: &str, app_id: u64) -> Result<SubmittedTransaction> {
        let txn = self.builder().await?.clear_state(address, app_id);
        self.submit(&txn).await
    }

    // =========================================================================
    // Confirmation (never implied by submit)
    // =========================================================================

    pub async fn transaction_status(&self, txid: &str) -> Result<TxStatus> {
        self.ledger.transaction_status(txid).await
    }

    pub async fn wait_for_confirmation(&self, txid: &str, max_rounds: u64) -> Result<u64> {
        self.ledger.wait_for_confirmation(txid, max_rounds).await
    }
}
