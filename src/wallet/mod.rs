//! Wallet - account discovery and signing through an external signer
//!
//! The crate never holds key material. A `WalletProvider` is the injected
//! capability (the AlgoSigner browser extension in the `wasm` build, a test
//! double in tests); `WalletSession` layers the recoverable-failure rules on
//! top of it.
//!
//! # Architecture
//!
//! ```text
//! WalletSession
//!     │
//!     ├── discover_accounts() → connect + accounts(ledger), [] on any failure
//!     │
//!     └── sign(pending)       → to_msgpack → base64 → sign_txn → decode blob
//!                                                        │
//!                                                        ▼
//!                                                 WalletProvider
//! ```

mod session;

pub use session::{WalletSession, MISSING_WALLET_NOTICE};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Account entry as wallets report it: `{address: "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub address: String,
}

/// Transaction handed to the wallet: `{txn: "<base64 msgpack>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub txn: String,
}

/// Wallet signing result: `{txID, blob: "<base64 signed msgpack>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlob {
    #[serde(rename = "txID", default)]
    pub tx_id: String,
    pub blob: String,
}

/// External signer capability.
///
/// Implementations return `Error::SigningRejected` when the user declines a
/// signing prompt.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait WalletProvider {
    /// Whether the host exposes the wallet at all
    fn is_available(&self) -> bool;

    async fn connect(&self) -> Result<()>;

    async fn accounts(&self, ledger: &str) -> Result<Vec<WalletAccount>>;

    async fn sign_txn(&self, txns: &[WalletTransaction]) -> Result<Vec<SignedBlob>>;

    /// Surface a message to the user (missing extension and the like)
    fn notice(&self, _message: &str) {}
}
