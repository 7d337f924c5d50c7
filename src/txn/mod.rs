//! Transactions - application calls from construction to broadcast
//!
//! # Lifecycle
//!
//! ```text
//! TxnBuilder ──build──▶ PendingTransaction   (unsigned, immutable)
//!                               │
//!                   WalletSession::sign
//!                               ▼
//!                       SignedTransaction
//!                               │
//!                 LedgerClient::send_raw_transaction
//!                               ▼
//!                     SubmittedTransaction ──(optional)──▶ TxStatus::{Confirmed, Rejected}
//! ```
//!
//! | Action | OnComplete | First arg |
//! |--------|------------|-----------|
//! | opt-in | OptIn | `opt_in` |
//! | update user status | NoOp | `update_user_status` |
//! | vote | NoOp | `vote` |
//! | close-out | CloseOut | `close_out` |
//! | clear-state | ClearState | `clear_state` |

mod builder;
mod encode;
mod submit;

pub use builder::{FeePolicy, TxnBuilder};
pub use encode::{transaction_id, MIN_TXN_FEE, SIGNATURE_OVERHEAD};
pub use submit::submit;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::codec::bytes_to_base64;
use crate::error::{Error, Result};

/// Application call on-completion action (`apan`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnComplete {
    NoOp = 0,
    OptIn = 1,
    CloseOut = 2,
    ClearState = 3,
}

impl OnComplete {
    pub fn code(self) -> u64 {
        self as u64
    }
}

/// The creator's decision on a registered voter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Yes,
    No,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Yes => "yes",
            UserStatus::No => "no",
        }
    }
}

impl From<bool> for UserStatus {
    fn from(approved: bool) -> Self {
        if approved { UserStatus::Yes } else { UserStatus::No }
    }
}

impl FromStr for UserStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" | "approve" | "true" => Ok(UserStatus::Yes),
            "no" | "reject" | "false" => Ok(UserStatus::No),
            other => Err(Error::Config(format!("user status must be yes or no, got {:?}", other))),
        }
    }
}

/// Unsigned application call. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    pub(crate) sender: String,
    pub(crate) app_id: u64,
    pub(crate) on_complete: OnComplete,
    pub(crate) args: Vec<Vec<u8>>,
    pub(crate) accounts: Vec<String>,
    pub(crate) note: Option<Vec<u8>>,
    pub(crate) fee: FeePolicy,
    pub(crate) first_valid: u64,
    pub(crate) last_valid: u64,
    pub(crate) genesis_id: String,
    pub(crate) genesis_hash: Vec<u8>,
}

impl PendingTransaction {
    pub fn sender(&self) -> &str { &self.sender }
    pub fn app_id(&self) -> u64 { self.app_id }
    pub fn on_complete(&self) -> OnComplete { self.on_complete }
    /// Application arguments, method identifier first
    pub fn args(&self) -> &[Vec<u8>] { &self.args }
    /// Foreign accounts (`apat`)
    pub fn accounts(&self) -> &[String] { &self.accounts }
    pub fn note(&self) -> Option<&[u8]> { self.note.as_deref() }
    pub fn fee_policy(&self) -> FeePolicy { self.fee }
    pub fn first_valid(&self) -> u64 { self.first_valid }
    pub fn last_valid(&self) -> u64 { self.last_valid }
    pub fn genesis_id(&self) -> &str { &self.genesis_id }

    /// Method identifier, when the first argument is valid UTF-8
    pub fn method(&self) -> Option<&str> {
        self.args.first().and_then(|a| std::str::from_utf8(a).ok())
    }

    /// Base64 msgpack, the form wallets sign
    pub fn to_base64(&self) -> Result<String> {
        Ok(bytes_to_base64(&self.to_msgpack()?))
    }
}

/// Transaction signed by the wallet, ready for broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub txid: String,
    pub blob: Vec<u8>,
}

/// Transaction accepted into the node's pool. Not necessarily confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedTransaction {
    pub txid: String,
}
