//! Application state reconstruction
//!
//! Turns the ledger's base64-keyed, type-tagged TEAL values into plain
//! name -> value maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{TealKeyValue, TealValue};
use crate::core::codec::base64_to_string;
use crate::core::paths::{global, local};
use crate::error::{Error, Result};

/// Local-state key that is always read as bytes, whatever its type tag says.
///
/// The voting contract only ever stores text ("yes", "no", "maybe") under
/// this key. Do not widen this into a general rule.
pub const BYTES_OVERRIDE_KEY: &str = local::CAN_VOTE;

/// Decoded state value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Uint(u64),
    Bytes(String),
}

impl StateValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StateValue::Bytes(s) => Some(s),
            StateValue::Uint(_) => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            StateValue::Uint(n) => Some(*n),
            StateValue::Bytes(_) => None,
        }
    }
}

impl std::fmt::Display for StateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateValue::Uint(n) => write!(f, "{}", n),
            StateValue::Bytes(s) => f.write_str(s),
        }
    }
}

/// Variable name -> value for one application (global) or one account (local)
pub type AppState = BTreeMap<String, StateValue>;

/// Account address -> that account's local state for one application
pub type LocalStates = BTreeMap<String, AppState>;

fn bytes_value(value: &TealValue) -> Result<StateValue> {
    Ok(StateValue::Bytes(base64_to_string(&value.bytes)?))
}

fn tagged_value(key: &str, value: &TealValue) -> Result<StateValue> {
    match value.type_ {
        TealValue::BYTES => bytes_value(value),
        TealValue::UINT => Ok(StateValue::Uint(value.uint)),
        tag => Err(Error::UnknownValueType { key: key.to_string(), tag }),
    }
}

/// Global state: decode by type tag, then add `Creator`.
///
/// `Creator` is written last so the reported creator address always wins
/// over a stored global key of the same name.
pub fn decode_global_state(entries: &[TealKeyValue], creator: &str) -> Result<AppState> {
    let mut state = AppState::new();
    for kv in entries {
        let key = base64_to_string(&kv.key)?;
        let value = tagged_value(&key, &kv.value)?;
        state.insert(key, value);
    }
    state.insert(global::CREATOR.to_string(), StateValue::Bytes(creator.to_string()));
    Ok(state)
}

/// Local state for one account: decode by type tag except for
/// [`BYTES_OVERRIDE_KEY`].
pub fn decode_local_state(entries: &[TealKeyValue]) -> Result<AppState> {
    let mut state = AppState::new();
    for kv in entries {
        let key = base64_to_string(&kv.key)?;
        let value = if key == BYTES_OVERRIDE_KEY {
            bytes_value(&kv.value)?
        } else {
            tagged_value(&key, &kv.value)?
        };
        state.insert(key, value);
    }
    Ok(state)
}
