//! Core: encoding helpers and constants shared by every layer.
//!
//! Nothing in here performs I/O, so the whole module builds for wasm32 as-is.

pub mod address;
pub mod codec;
pub mod paths;

pub use address::{decode_address, encode_address, Address, PUBLIC_KEY_LEN};
pub use codec::{base64_to_bytes, base64_to_msgpack, base64_to_string, bytes_to_base64, encode_uint64, msgpack_to_base64};
