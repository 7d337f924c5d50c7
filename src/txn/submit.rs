//! Submit: sign through the wallet, broadcast through the ledger
//!
//! One network write per call. There is no idempotency key, so a caller
//! that resubmits after a failure may send the same transaction twice.

use tracing::{info, warn};

use super::{PendingTransaction, SubmittedTransaction};
use crate::error::Result;
use crate::ledger::LedgerClient;
use crate::wallet::{WalletProvider, WalletSession};

/// encode -> sign -> decode blob -> broadcast.
///
/// Returns when the node accepts the raw transaction. A wallet rejection
/// returns before anything is sent.
pub async fn submit<W: WalletProvider>(
    wallet: &WalletSession<W>,
    ledger: &LedgerClient,
    pending: &PendingTransaction,
) -> Result<SubmittedTransaction> {
    let signed = wallet.sign(pending).await?;
    let txid = ledger.send_raw_transaction(&signed.blob).await?;
    if txid != signed.txid {
        warn!(wallet_txid = %signed.txid, node_txid = %txid, "wallet and node disagree on txid");
    }
    info!(txid = %txid, sender = pending.sender(), app_id = pending.app_id(), method = ?pending.method(), "submitted");
    Ok(SubmittedTransaction { txid })
}
