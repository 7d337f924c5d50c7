//! WalletSession - recoverable discovery, strict signing

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use super::{WalletProvider, WalletTransaction};
use crate::core::codec::{base64_to_msgpack, msgpack_to_base64};
use crate::error::{Error, Result};
use crate::txn::{transaction_id, PendingTransaction, SignedTransaction};

pub const MISSING_WALLET_NOTICE: &str = "Please install the AlgoSigner extension";

pub struct WalletSession<W> {
    provider: W,
    ledger: String,
    /// Set after the missing-wallet notice has been shown
    notified: AtomicBool,
}

impl<W: WalletProvider> WalletSession<W> {
    /// Wrap `provider`. Presence is not checked until discovery, since a
    /// browser extension may inject itself after construction.
    pub fn new(provider: W, ledger: impl Into<String>) -> Self {
        Self { provider, ledger: ledger.into(), notified: AtomicBool::new(false) }
    }

    pub fn provider(&self) -> &W { &self.provider }
    pub fn ledger(&self) -> &str { &self.ledger }

    /// Addresses the wallet exposes for the configured ledger.
    ///
    /// Absent wallet, refused connection, or a failed listing all yield an
    /// empty list: the caller simply has no accounts to offer. An absent
    /// wallet is reported to the user the first time only.
    pub async fn discover_accounts(&self) -> Vec<String> {
        if !self.provider.is_available() {
            warn!("wallet unavailable, no accounts");
            if !self.notified.swap(true, Ordering::Relaxed) {
                self.provider.notice(MISSING_WALLET_NOTICE);
            }
            return Vec::new();
        }
        if let Err(e) = self.provider.connect().await {
            warn!(error = %e, "wallet connection refused");
            return Vec::new();
        }
        match self.provider.accounts(&self.ledger).await {
            Ok(accounts) => {
                debug!(count = accounts.len(), ledger = %self.ledger, "wallet accounts");
                accounts.into_iter().map(|a| a.address).collect()
            }
            Err(e) => {
                warn!(error = %e, "wallet account listing failed");
                Vec::new()
            }
        }
    }

    /// Have the wallet sign `pending`. Fails, and nothing should be
    /// submitted, if the user rejects the prompt.
    pub async fn sign(&self, pending: &PendingTransaction) -> Result<SignedTransaction> {
        let unsigned = pending.to_msgpack()?;
        let request = [WalletTransaction { txn: msgpack_to_base64(&unsigned) }];

        let mut signed = self.provider.sign_txn(&request).await?;
        if signed.is_empty() {
            return Err(Error::Wallet("wallet returned no signed transactions".into()));
        }
        let first = signed.swap_remove(0);
        let blob = base64_to_msgpack(&first.blob)?;
        let txid = if first.tx_id.is_empty() { transaction_id(&unsigned) } else { first.tx_id };

        debug!(txid = %txid, bytes = blob.len(), "signed");
        Ok(SignedTransaction { txid, blob })
    }
}
