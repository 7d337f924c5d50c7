//! Ledger - read-only network state and transaction broadcast
//!
//! # Architecture
//!
//! ```text
//! LedgerClient
//!     │
//!     ├── algod:   /v2/status, /v2/applications/{id}, /v2/transactions/params,
//!     │            /v2/transactions, /v2/transactions/pending/{txid}
//!     │
//!     └── indexer: /v2/accounts?application-id={id}
//!                         │
//!                         ▼
//!                  state::decode_* → AppState / LocalStates
//! ```

mod client;
pub mod state;
pub mod types;

pub use client::LedgerClient;
pub use state::{AppState, LocalStates, StateValue, BYTES_OVERRIDE_KEY};
pub use types::{SuggestedParams, TealKeyValue, TealValue, TxStatus};
