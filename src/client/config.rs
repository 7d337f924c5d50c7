//! Client configuration - passed from higher layers

use crate::core::paths::defaults;

/// API token and the header it travels in.
///
/// Hosted providers differ: algod itself wants `X-Algo-API-Token`, some
/// gateways want `X-API-Key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiToken {
    pub header: String,
    pub value: String,
}

/// Network endpoints and transaction defaults. Higher layers construct this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub algod_url: String,
    pub indexer_url: String,
    pub token: Option<ApiToken>,
    /// Ledger name handed to the wallet when listing accounts
    pub ledger: String,
    /// Rounds a transaction stays valid after `last-round`
    pub validity_window: u64,
    /// Use this fee verbatim instead of the per-byte estimate
    pub flat_fee: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            algod_url: defaults::ALGOD_URL.into(),
            indexer_url: defaults::INDEXER_URL.into(),
            token: None,
            ledger: defaults::LEDGER.into(),
            validity_window: defaults::VALIDITY_WINDOW,
            flat_fee: None,
        }
    }
}

impl ClientConfig {
    pub fn new(algod_url: impl Into<String>, indexer_url: impl Into<String>) -> Self {
        Self { algod_url: algod_url.into(), indexer_url: indexer_url.into(), ..Default::default() }
    }

    pub fn testnet() -> Self { Self::default() }

    pub fn with_algod(mut self, url: impl Into<String>) -> Self { self.algod_url = url.into(); self }
    pub fn with_indexer(mut self, url: impl Into<String>) -> Self { self.indexer_url = url.into(); self }
    pub fn with_api_token(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.token = Some(ApiToken { header: header.into(), value: value.into() });
        self
    }
    pub fn with_ledger(mut self, ledger: impl Into<String>) -> Self { self.ledger = ledger.into(); self }
    pub fn with_validity_window(mut self, rounds: u64) -> Self { self.validity_window = rounds; self }
    pub fn with_flat_fee(mut self, fee: u64) -> Self { self.flat_fee = Some(fee); self }

    /// Build from `ALGOD_SERVER`, `INDEXER_SERVER`, `ALGOD_TOKEN`,
    /// `ALGOD_TOKEN_HEADER` and `ALGOVOTE_LEDGER`, falling back to TestNet
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(url) = var("ALGOD_SERVER") {
            config.algod_url = url;
        }
        if let Some(url) = var("INDEXER_SERVER") {
            config.indexer_url = url;
        }
        if let Some(ledger) = var("ALGOVOTE_LEDGER") {
            config.ledger = ledger;
        }
        if let Some(token) = var("ALGOD_TOKEN") {
            let header = var("ALGOD_TOKEN_HEADER").unwrap_or_else(|| defaults::TOKEN_HEADER.into());
            config.token = Some(ApiToken { header, value: token });
        }
        config
    }
}
