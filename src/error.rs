//! Error types shared across the crate

use thiserror::Error;

/// Result type for algovote operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Msgpack encoding failed: {0}")]
    Encode(String),

    /// Ledger reported a TEAL value with a type tag other than 1 (bytes) or 2 (uint)
    #[error("Unknown state value type {tag} for key {key:?}")]
    UnknownValueType { key: String, tag: u8 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ledger API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Signing rejected: {0}")]
    SigningRejected(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Transaction {txid} rejected: {reason}")]
    Rejected { txid: String, reason: String },

    #[error("Transaction {txid} not confirmed after {rounds} rounds")]
    NotConfirmed { txid: String, rounds: u64 },
}

impl Error {
    pub fn invalid_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAddress { address: address.into(), reason: reason.into() }
    }

    /// True for a 404 from algod or the indexer
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }
}
