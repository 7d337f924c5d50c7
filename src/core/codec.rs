//! Codec - base64 and byte helpers for on-chain key/value pairs
//!
//! algod and the indexer report state keys and byte values as standard
//! base64. Wallet extensions exchange transactions as base64 msgpack.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::Result;

/// Decode a base64 string into raw bytes
pub fn base64_to_bytes(encoded: &str) -> Result<Vec<u8>> {
    Ok(BASE64.decode(encoded)?)
}

/// Decode a base64 string into text.
///
/// Invalid UTF-8 sequences are replaced rather than rejected: state values
/// are free-form bytes and callers only need something printable.
pub fn base64_to_string(encoded: &str) -> Result<String> {
    let bytes = base64_to_bytes(encoded)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn bytes_to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// 8-byte big-endian encoding, the form `Btoi` expects on-chain
pub fn encode_uint64(n: u64) -> [u8; 8] {
    n.to_be_bytes()
}

/// Encoded transaction bytes -> the base64 form a wallet accepts
pub fn msgpack_to_base64(msgpack: &[u8]) -> String {
    bytes_to_base64(msgpack)
}

/// Signed blob from a wallet -> raw bytes for broadcast
pub fn base64_to_msgpack(encoded: &str) -> Result<Vec<u8>> {
    base64_to_bytes(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn decodes_state_keys() {
        assert_eq!(base64_to_string("Q3JlYXRvcg==").unwrap(), "Creator");
        assert_eq!(base64_to_string("Y2FuX3ZvdGU=").unwrap(), "can_vote");
        assert_eq!(base64_to_string("").unwrap(), "");
    }

    #[test]
    fn malformed_base64_is_an_error() {
        let err = base64_to_string("not base64!").unwrap_err();
        assert!(matches!(err, Error::Base64(_)));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let encoded = bytes_to_base64(&[0x66, 0xff, 0x6f]);
        assert_eq!(base64_to_string(&encoded).unwrap(), "f\u{fffd}o");
    }

    #[test]
    fn uint64_is_big_endian() {
        assert_eq!(encode_uint64(2), [0, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(encode_uint64(0x0102_0304_0506_0708), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn wallet_helpers_are_inverse() {
        let raw = vec![0x82, 0xa3, 0x73, 0x69, 0x67];
        let b64 = msgpack_to_base64(&raw);
        assert_eq!(base64_to_msgpack(&b64).unwrap(), raw);
    }
}
