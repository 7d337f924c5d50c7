//! Endpoint and key constants
//!
//! Centralized registry for ledger API paths and the election contract's
//! state keys and method identifiers.

/// algod v2 REST paths
pub mod algod {
    pub const STATUS: &str = "/v2/status";
    pub const APPLICATIONS: &str = "/v2/applications";
    pub const TRANSACTION_PARAMS: &str = "/v2/transactions/params";
    pub const TRANSACTIONS: &str = "/v2/transactions";
    pub const PENDING: &str = "/v2/transactions/pending";
    pub const WAIT_FOR_BLOCK: &str = "/v2/status/wait-for-block-after";

    pub const RAW_CONTENT_TYPE: &str = "application/x-binary";
}

/// Indexer v2 REST paths
pub mod indexer {
    pub const ACCOUNTS: &str = "/v2/accounts";
    pub const APPLICATION_ID_PARAM: &str = "application-id";
    pub const NEXT_PARAM: &str = "next";
}

/// Global state keys written by the election contract
pub mod global {
    pub const CREATOR: &str = "Creator";
    pub const ELECTION_END: &str = "ElectionEnd";
    pub const NUM_VOTE_OPTIONS: &str = "NumVoteOptions";
    pub const VOTE_OPTIONS: &str = "VoteOptions";
    pub const VOTES_FOR_PREFIX: &str = "VotesFor";
}

/// Local state keys written by the election contract
pub mod local {
    pub const CAN_VOTE: &str = "can_vote";
    pub const VOTED: &str = "voted";
}

/// First application argument of each call
pub mod method {
    pub const OPT_IN: &str = "opt_in";
    pub const UPDATE_USER_STATUS: &str = "update_user_status";
    pub const VOTE: &str = "vote";
    pub const CLOSE_OUT: &str = "close_out";
    pub const CLEAR_STATE: &str = "clear_state";
}

/// Default public TestNet endpoints
pub mod defaults {
    pub const ALGOD_URL: &str = "https://testnet-api.algonode.cloud";
    pub const INDEXER_URL: &str = "https://testnet-idx.algonode.cloud";
    pub const TOKEN_HEADER: &str = "X-Algo-API-Token";
    pub const LEDGER: &str = "TestNet";
    pub const VALIDITY_WINDOW: u64 = 1000;
}
