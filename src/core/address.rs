//! Account addresses
//!
//! An address is the base32 (RFC 4648, no padding) encoding of a 32-byte
//! ed25519 public key followed by a 4-byte checksum: the last 4 bytes of
//! SHA-512/256 over the public key.

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512_256};
use std::fmt;

use crate::error::{Error, Result};

pub const PUBLIC_KEY_LEN: usize = 32;
const CHECKSUM_LEN: usize = 4;
const ADDRESS_LEN: usize = 58;

/// Decoded account address (public key only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; PUBLIC_KEY_LEN]);

impl Address {
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl std::str::FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode_address(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_address(&self.0))
    }
}

fn checksum(public_key: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha512_256::digest(public_key);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    out
}

/// Parse and verify a 58-character address
pub fn decode_address(address: &str) -> Result<Address> {
    if address.len() != ADDRESS_LEN {
        return Err(Error::invalid_address(
            address,
            format!("expected {} chars, got {}", ADDRESS_LEN, address.len()),
        ));
    }
    let raw = BASE32_NOPAD
        .decode(address.as_bytes())
        .map_err(|e| Error::invalid_address(address, e.to_string()))?;
    if raw.len() != PUBLIC_KEY_LEN + CHECKSUM_LEN {
        return Err(Error::invalid_address(address, format!("decoded to {} bytes", raw.len())));
    }

    let (pk, sum) = raw.split_at(PUBLIC_KEY_LEN);
    if checksum(pk) != sum {
        return Err(Error::invalid_address(address, "checksum mismatch"));
    }

    let mut key = [0u8; PUBLIC_KEY_LEN];
    key.copy_from_slice(pk);
    Ok(Address(key))
}

pub fn encode_address(public_key: &[u8; PUBLIC_KEY_LEN]) -> String {
    let mut raw = Vec::with_capacity(PUBLIC_KEY_LEN + CHECKSUM_LEN);
    raw.extend_from_slice(public_key);
    raw.extend_from_slice(&checksum(public_key));
    BASE32_NOPAD.encode(&raw)
}
