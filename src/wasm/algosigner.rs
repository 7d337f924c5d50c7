//! AlgoSigner browser extension as a `WalletProvider`
//!
//! The extension injects `window.AlgoSigner`; every method returns a
//! Promise. Presence is looked up per call so a late-loading extension is
//! still picked up.

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::error::{Error, Result};
use crate::wallet::{SignedBlob, WalletAccount, WalletProvider, WalletTransaction};

const GLOBAL: &str = "AlgoSigner";
/// AlgoSigner's `RequestError.UserRejected` code
const USER_REJECTED: f64 = 4001.0;

#[derive(Serialize)]
struct AccountsRequest<'a> {
    ledger: &'a str,
}

fn algosigner() -> Option<JsValue> {
    let window: JsValue = web_sys::window()?.into();
    let signer = Reflect::get(&window, &JsValue::from_str(GLOBAL)).ok()?;
    if signer.is_undefined() || signer.is_null() { None } else { Some(signer) }
}

fn message_of(err: &JsValue) -> String {
    Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

fn wallet_error(err: JsValue) -> Error {
    let code = Reflect::get(&err, &JsValue::from_str("code")).ok().and_then(|c| c.as_f64());
    if code == Some(USER_REJECTED) {
        Error::SigningRejected(message_of(&err))
    } else {
        Error::Wallet(message_of(&err))
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| Error::Wallet(e.to_string()))
}

fn from_js<T: for<'de> serde::Deserialize<'de>>(value: JsValue) -> Result<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| Error::Wallet(e.to_string()))
}

/// `await AlgoSigner[method](...args)`
async fn call(method: &str, args: &[JsValue]) -> Result<JsValue> {
    let signer = algosigner().ok_or_else(|| Error::Wallet(format!("{} not found", GLOBAL)))?;
    let func: Function = Reflect::get(&signer, &JsValue::from_str(method))
        .map_err(wallet_error)?
        .dyn_into()
        .map_err(|_| Error::Wallet(format!("{}.{} is not a function", GLOBAL, method)))?;
    let args: Array = args.iter().collect();
    let returned = func.apply(&signer, &args).map_err(wallet_error)?;
    JsFuture::from(Promise::resolve(&returned)).await.map_err(wallet_error)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlgoSignerWallet;

impl AlgoSignerWallet {
    pub fn new() -> Self { Self }
}

#[async_trait(?Send)]
impl WalletProvider for AlgoSignerWallet {
    fn is_available(&self) -> bool {
        algosigner().is_some()
    }

    async fn connect(&self) -> Result<()> {
        call("connect", &[]).await.map(|_| ())
    }

    async fn accounts(&self, ledger: &str) -> Result<Vec<WalletAccount>> {
        let request = to_js(&AccountsRequest { ledger })?;
        from_js(call("accounts", &[request]).await?)
    }

    async fn sign_txn(&self, txns: &[WalletTransaction]) -> Result<Vec<SignedBlob>> {
        let request = to_js(txns)?;
        from_js(call("signTxn", &[request]).await?)
    }

    fn notice(&self, message: &str) {
        super::console_warn(message);
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}
