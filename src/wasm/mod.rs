//! WASM module: the election client in the browser
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         VoteHandler (JS API)            │
//! │  getAccounts, getElectionState, vote... │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │               VoteClient                │
//! │   LedgerClient (fetch) + WalletSession  │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │      AlgoSignerWallet (window global)   │
//! │  connect, accounts, signTxn             │
//! └─────────────────────────────────────────┘
//! ```

mod algosigner;
mod handler;

pub use algosigner::AlgoSignerWallet;
pub use handler::VoteHandler;

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

pub fn console_warn(s: &str) {
    web_sys::console::warn_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;
