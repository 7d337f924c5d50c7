//! Algovote: election client for Algorand applications.
//!
//! Formats and submits application calls (opt-in, voter approval, vote,
//! close-out, clear-state) and reads back election state. Signing is
//! delegated to an external wallet; ledger state and consensus live on the
//! network.
//!
//! # Architecture
//!
//! ```text
//! VoteClient (session object, built once)
//!   │
//!   ├── LedgerClient (algod + indexer over HTTP)
//!   │     ├── latest_round / application_state / local_states
//!   │     └── suggested_params / send_raw_transaction
//!   │
//!   ├── WalletSession<W: WalletProvider>
//!   │     ├── discover_accounts  ([] when the wallet is absent or declines)
//!   │     └── sign               (wallet holds every key)
//!   │
//!   └── TxnBuilder → PendingTransaction → submit
//! ```
//!
//! # Features
//!
//! - `native` - CLI, tokio, rustls, log subscriber (default)
//! - `wasm` - browser build with the AlgoSigner extension as wallet
//!
//! # Usage
//!
//! ```ignore
//! use algovote::{ClientConfig, VoteClient};
//!
//! let client = VoteClient::new(ClientConfig::from_env(), my_wallet)?;
//! let accounts = client.accounts().await;
//! let state = client.election_state(42).await?;
//! let sent = client.vote(&accounts[0], 2, 42).await?;
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod client;
pub mod core;
pub mod election;
pub mod error;
pub mod ledger;
pub mod txn;
pub mod wallet;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

// =============================================================================
// Re-exports
// =============================================================================
pub use client::{ClientConfig, VoteClient};
pub use election::{ElectionState, VoterRecord, VoterStatus};
pub use error::{Error, Result};
pub use ledger::{AppState, LedgerClient, LocalStates, StateValue, SuggestedParams, TxStatus};
pub use txn::{OnComplete, PendingTransaction, SignedTransaction, SubmittedTransaction, TxnBuilder, UserStatus};
pub use wallet::{SignedBlob, WalletAccount, WalletProvider, WalletSession, WalletTransaction};

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use wasm::{AlgoSignerWallet, VoteHandler};
