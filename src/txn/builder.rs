//! TxnBuilder - one constructor per election action
//!
//! Pure: suggested params come in, a `PendingTransaction` comes out. No
//! network access, so builders are cheap to test.

use super::{OnComplete, PendingTransaction, UserStatus};
use crate::core::address::decode_address;
use crate::core::codec::{base64_to_bytes, encode_uint64};
use crate::core::paths::{defaults, method};
use crate::error::Result;
use crate::ledger::SuggestedParams;

/// How the fee is chosen at encode time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeePolicy {
    /// `max(per_byte * estimated_size, min_fee)`
    PerByte { per_byte: u64, min_fee: u64 },
    Flat(u64),
}

#[derive(Debug, Clone)]
pub struct TxnBuilder {
    params: SuggestedParams,
    genesis_hash: Vec<u8>,
    validity_window: u64,
    flat_fee: Option<u64>,
    note: Option<Vec<u8>>,
}

impl TxnBuilder {
    /// Fails if the node's genesis hash is not valid base64
    pub fn new(params: SuggestedParams) -> Result<Self> {
        let genesis_hash = base64_to_bytes(&params.genesis_hash)?;
        Ok(Self { params, genesis_hash, validity_window: defaults::VALIDITY_WINDOW, flat_fee: None, note: None })
    }

    pub fn with_validity_window(mut self, rounds: u64) -> Self { self.validity_window = rounds; self }
    pub fn with_flat_fee(mut self, fee: u64) -> Self { self.flat_fee = Some(fee); self }
    pub fn with_note(mut self, note: impl Into<Vec<u8>>) -> Self { self.note = Some(note.into()); self }

    pub fn params(&self) -> &SuggestedParams { &self.params }

    fn app_call(
        &self,
        sender: &str,
        app_id: u64,
        on_complete: OnComplete,
        args: Vec<Vec<u8>>,
        accounts: Vec<String>,
    ) -> PendingTransaction {
        let fee = match self.flat_fee {
            Some(fee) => FeePolicy::Flat(fee),
            None => FeePolicy::PerByte { per_byte: self.params.fee, min_fee: self.params.min_fee },
        };
        let first_valid = self.params.last_round;
        PendingTransaction {
            sender: sender.to_string(),
            app_id,
            on_complete,
            args,
            accounts,
            note: self.note.clone(),
            fee,
            first_valid,
            last_valid: first_valid.saturating_add(self.validity_window),
            genesis_id: self.params.genesis_id.clone(),
            genesis_hash: self.genesis_hash.clone(),
        }
    }

    /// Register `sender` with the election
    pub fn opt_in(&self, sender: &str, app_id: u64) -> PendingTransaction {
        self.app_call(sender, app_id, OnComplete::OptIn, vec![method::OPT_IN.into()], Vec::new())
    }

    /// Creator approves or rejects `user`. The user's public key travels as an
    /// argument; both addresses go in the foreign-account list.
    pub fn update_user_status(
        &self,
        creator: &str,
        user: &str,
        status: UserStatus,
        app_id: u64,
    ) -> Result<PendingTransaction> {
        let user_key = decode_address(user)?;
        let args = vec![
            method::UPDATE_USER_STATUS.into(),
            user_key.public_key().to_vec(),
            status.as_str().into(),
        ];
        let accounts = vec![creator.to_string(), user.to_string()];
        Ok(self.app_call(creator, app_id, OnComplete::NoOp, args, accounts))
    }

    /// Cast a vote for `option` (index into the comma-separated option list)
    pub fn vote(&self, sender: &str, option: u64, app_id: u64) -> PendingTransaction {
        let args = vec![method::VOTE.into(), encode_uint64(option).to_vec()];
        self.app_call(sender, app_id, OnComplete::NoOp, args, Vec::new())
    }

    pub fn close_out(&self, sender: &str, app_id: u64) -> PendingTransaction {
        self.app_call(sender, app_id, OnComplete::CloseOut, vec![method::CLOSE_OUT.into()], Vec::new())
    }

    pub fn clear_state(&self, sender: &str, app_id: u64) -> PendingTransaction {
        self.app_call(sender, app_id, OnComplete::ClearState, vec![method::CLEAR_STATE.into()], Vec::new())
    }
}
