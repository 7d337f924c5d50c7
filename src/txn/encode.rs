//! Canonical msgpack encoding of application calls
//!
//! Keys are written in sorted order and zero/empty fields are omitted, so
//! the same transaction always encodes to the same bytes. The transaction
//! id is base32(SHA-512/256("TX" || bytes)).

use data_encoding::BASE32_NOPAD;
use rmpv::Value;
use sha2::{Digest, Sha512_256};

use super::{FeePolicy, OnComplete, PendingTransaction};
use crate::core::address::decode_address;
use crate::error::{Error, Result};

/// Bytes a signature adds to the encoded transaction
pub const SIGNATURE_OVERHEAD: u64 = 75;
pub const MIN_TXN_FEE: u64 = 1000;

const TXN_PREFIX: &[u8] = b"TX";
const APPL: &str = "appl";

impl PendingTransaction {
    fn fields(&self, fee: u64) -> Result<Vec<(Value, Value)>> {
        let mut fields: Vec<(Value, Value)> = Vec::with_capacity(12);
        let mut put = |key: &str, value: Value| fields.push((Value::from(key), value));

        if !self.args.is_empty() {
            put("apaa", Value::Array(self.args.iter().cloned().map(Value::Binary).collect()));
        }
        if self.on_complete != OnComplete::NoOp {
            put("apan", Value::from(self.on_complete.code()));
        }
        if !self.accounts.is_empty() {
            let keys = self
                .accounts
                .iter()
                .map(|a| decode_address(a).map(|addr| Value::Binary(addr.public_key().to_vec())))
                .collect::<Result<Vec<_>>>()?;
            put("apat", Value::Array(keys));
        }
        if self.app_id != 0 {
            put("apid", Value::from(self.app_id));
        }
        if fee != 0 {
            put("fee", Value::from(fee));
        }
        if self.first_valid != 0 {
            put("fv", Value::from(self.first_valid));
        }
        if !self.genesis_id.is_empty() {
            put("gen", Value::from(self.genesis_id.as_str()));
        }
        if !self.genesis_hash.is_empty() {
            put("gh", Value::Binary(self.genesis_hash.clone()));
        }
        if self.last_valid != 0 {
            put("lv", Value::from(self.last_valid));
        }
        if let Some(note) = self.note.as_ref().filter(|n| !n.is_empty()) {
            put("note", Value::Binary(note.clone()));
        }
        put("snd", Value::Binary(decode_address(&self.sender)?.public_key().to_vec()));
        put("type", Value::from(APPL));

        Ok(fields)
    }

    fn encode_with_fee(&self, fee: u64) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        rmpv::encode::write_value(&mut buf, &Value::Map(self.fields(fee)?))
            .map_err(|e| Error::Encode(e.to_string()))?;
        Ok(buf)
    }

    /// Final fee in microalgos
    pub fn fee(&self) -> Result<u64> {
        match self.fee {
            FeePolicy::Flat(fee) => Ok(fee),
            FeePolicy::PerByte { per_byte, min_fee } => {
                let size = self.encode_with_fee(per_byte)?.len() as u64 + SIGNATURE_OVERHEAD;
                Ok(per_byte.saturating_mul(size).max(min_fee).max(MIN_TXN_FEE))
            }
        }
    }

    /// Canonical msgpack bytes (the unsigned transaction)
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        self.encode_with_fee(self.fee()?)
    }

    /// Transaction id as the network will report it
    pub fn id(&self) -> Result<String> {
        Ok(transaction_id(&self.to_msgpack()?))
    }
}

/// base32(SHA-512/256("TX" || encoded))
pub fn transaction_id(encoded: &[u8]) -> String {
    let mut hasher = Sha512_256::new();
    hasher.update(TXN_PREFIX);
    hasher.update(encoded);
    BASE32_NOPAD.encode(&hasher.finalize())
}
