//! Election view over raw application state
//!
//! The voting contract keeps its configuration and tallies in global state
//! and each voter's registration in local state:
//!
//! | Scope | Key | Type | Meaning |
//! |-------|-----|------|---------|
//! | global | `ElectionEnd` | uint | last round accepting registrations and votes |
//! | global | `NumVoteOptions` | uint | option count |
//! | global | `VoteOptions` | bytes | comma-separated labels, e.g. `A,B,C` |
//! | global | `VotesFor{i}` | uint | tally for option `i` |
//! | local | `can_vote` | bytes | `maybe` until the creator answers `yes`/`no` |
//! | local | `voted` | uint | option index, once voted |

use serde::Serialize;

use crate::core::paths::{global, local};
use crate::error::{Error, Result};
use crate::ledger::{AppState, LocalStates};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectionState {
    pub creator: String,
    pub election_end: u64,
    pub options: Vec<String>,
    /// One entry per option index, `0` where no tally is stored yet
    pub tallies: Vec<u64>,
}

fn required_uint(state: &AppState, key: &str) -> Result<u64> {
    state
        .get(key)
        .and_then(|v| v.as_uint())
        .ok_or_else(|| Error::MissingField(key.to_string()))
}

impl ElectionState {
    pub fn from_app_state(state: &AppState) -> Result<Self> {
        let creator = state
            .get(global::CREATOR)
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::MissingField(global::CREATOR.into()))?
            .to_string();
        let election_end = required_uint(state, global::ELECTION_END)?;
        let num_options = required_uint(state, global::NUM_VOTE_OPTIONS)?;

        let options: Vec<String> = state
            .get(global::VOTE_OPTIONS)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_default();

        // Tallies are sized from the labels, never from the stored count alone
        if num_options > options.len() as u64 {
            return Err(Error::Config(format!(
                "{} is {} but {} lists {} options",
                global::NUM_VOTE_OPTIONS,
                num_options,
                global::VOTE_OPTIONS,
                options.len()
            )));
        }

        let tallies = (0..num_options)
            .map(|i| {
                state
                    .get(&format!("{}{}", global::VOTES_FOR_PREFIX, i))
                    .and_then(|v| v.as_uint())
                    .unwrap_or(0)
            })
            .collect();

        Ok(Self { creator, election_end, options, tallies })
    }

    /// Registration and voting are accepted through `ElectionEnd` inclusive
    pub fn is_open(&self, round: u64) -> bool {
        round <= self.election_end
    }

    pub fn tally(&self, option: usize) -> Option<u64> {
        self.tallies.get(option).copied()
    }

    pub fn option_label(&self, option: usize) -> Option<&str> {
        self.options.get(option).map(String::as_str)
    }

    pub fn total_votes(&self) -> u64 {
        self.tallies.iter().sum()
    }

    /// Option with the most votes; ties go to the lower index
    pub fn leader(&self) -> Option<usize> {
        self.tallies
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, u64)>, (i, &n)| match best {
                Some((_, top)) if top >= n => best,
                _ => Some((i, n)),
            })
            .map(|(i, _)| i)
    }
}

/// Registration decision stored under `can_vote`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoterStatus {
    Yes,
    No,
    Maybe,
    Other(String),
}

impl From<&str> for VoterStatus {
    fn from(value: &str) -> Self {
        match value {
            "yes" => VoterStatus::Yes,
            "no" => VoterStatus::No,
            "maybe" => VoterStatus::Maybe,
            other => VoterStatus::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoterRecord {
    pub address: String,
    pub can_vote: Option<VoterStatus>,
    pub voted: Option<u64>,
}

impl VoterRecord {
    pub fn from_local_state(address: &str, state: &AppState) -> Self {
        Self {
            address: address.to_string(),
            can_vote: state.get(local::CAN_VOTE).and_then(|v| v.as_str()).map(VoterStatus::from),
            voted: state.get(local::VOTED).and_then(|v| v.as_uint()),
        }
    }

    /// Approved and not yet voted
    pub fn may_vote(&self) -> bool {
        self.can_vote == Some(VoterStatus::Yes) && self.voted.is_none()
    }

    /// Registered, waiting on the creator
    pub fn awaiting_approval(&self) -> bool {
        self.can_vote == Some(VoterStatus::Maybe)
    }
}

/// One record per opted-in account, ordered by address
pub fn voters(states: &LocalStates) -> Vec<VoterRecord> {
    states.iter().map(|(addr, state)| VoterRecord::from_local_state(addr, state)).collect()
}
