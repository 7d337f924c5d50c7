//! Algovote CLI - election queries and offline-signing flow
//!
//! Reads:
//!   algovote round                     → {"round": 12345}
//!   algovote state <app>               → {"Creator": "...", "VotesFor0": 3, ...}
//!   algovote locals <app>              → {"ADDR": {"can_vote": "yes", "voted": 1}}
//!   algovote election <app>            → options, tallies, voters, open/closed
//!
//! Writes never touch a key. `build` prints the unsigned transaction as
//! base64 msgpack for an external signer; `send` broadcasts the signed blob:
//!   algovote build vote --from <addr> --app <id> --option 2
//!   algovote send <signed-base64> [--wait 10]
//!
//! Configuration comes from the environment (or `.env`): ALGOD_SERVER,
//! INDEXER_SERVER, ALGOD_TOKEN, ALGOD_TOKEN_HEADER.

use algovote::election::voters;
use algovote::logging::{init_logging, LogFormat};
use algovote::{ClientConfig, ElectionState, LedgerClient, PendingTransaction, TxnBuilder, UserStatus};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::io::IsTerminal;
use tracing::debug;

#[derive(Parser)]
#[command(name = "algovote", version, about = "Election client for Algorand apps")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// algod URL (overrides ALGOD_SERVER)
    #[arg(long, global = true)]
    algod: Option<String>,

    /// Indexer URL (overrides INDEXER_SERVER)
    #[arg(long, global = true)]
    indexer: Option<String>,

    /// Pretty-print JSON (default when stdout is a terminal)
    #[arg(long, global = true)]
    pretty: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Command {
    /// Latest confirmed round
    Round,
    /// Global state of an application, creator included
    State { app: u64 },
    /// Local state of every opted-in account
    Locals { app: u64 },
    /// Election summary: options, tallies, voters
    Election { app: u64 },
    /// Build an unsigned application call
    Build {
        #[command(subcommand)]
        action: BuildAction,
    },
    /// Broadcast a signed transaction (base64)
    Send {
        blob: String,
        /// Wait up to N rounds for confirmation
        #[arg(long)]
        wait: Option<u64>,
    },
    /// Pool status of a transaction
    Status {
        txid: String,
        /// Wait up to N rounds for confirmation
        #[arg(long)]
        wait: Option<u64>,
    },
}

#[derive(Args)]
struct CallArgs {
    /// Sender address
    #[arg(long)]
    from: String,
    /// Application id
    #[arg(long)]
    app: u64,
    /// Optional note
    #[arg(long)]
    note: Option<String>,
    /// Flat fee in microalgos instead of the suggested per-byte fee
    #[arg(long)]
    fee: Option<u64>,
}

#[derive(Subcommand)]
enum BuildAction {
    OptIn(CallArgs),
    /// Creator approves (yes) or rejects (no) a registered user
    UpdateStatus {
        #[command(flatten)]
        call: CallArgs,
        #[arg(long)]
        user: String,
        #[arg(long)]
        status: UserStatus,
    },
    Vote {
        #[command(flatten)]
        call: CallArgs,
        /// Option index, starting at 0
        #[arg(long)]
        option: u64,
    },
    CloseOut(CallArgs),
    ClearState(CallArgs),
}

impl BuildAction {
    fn call(&self) -> &CallArgs {
        match self {
            BuildAction::OptIn(c) | BuildAction::CloseOut(c) | BuildAction::ClearState(c) => c,
            BuildAction::UpdateStatus { call, .. } | BuildAction::Vote { call, .. } => call,
        }
    }

    fn build(&self, builder: &TxnBuilder) -> algovote::Result<PendingTransaction> {
        Ok(match self {
            BuildAction::OptIn(c) => builder.opt_in(&c.from, c.app),
            BuildAction::UpdateStatus { call, user, status } => {
                builder.update_user_status(&call.from, user, *status, call.app)?
            }
            BuildAction::Vote { call, option } => builder.vote(&call.from, *option, call.app),
            BuildAction::CloseOut(c) => builder.close_out(&c.from, c.app),
            BuildAction::ClearState(c) => builder.clear_state(&c.from, c.app),
        })
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(&cli.log_level, LogFormat::from_env());

    let pretty = cli.pretty || std::io::stdout().is_terminal();
    match run(cli).await {
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": format!("{:#}", e)}), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    rendered.unwrap_or_else(|_| value.to_string())
}

fn config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.algod {
        config = config.with_algod(url.clone());
    }
    if let Some(url) = &cli.indexer {
        config = config.with_indexer(url.clone());
    }
    config
}

async fn run(cli: Cli) -> anyhow::Result<Value> {
    let config = config(&cli);
    debug!(algod = %config.algod_url, indexer = %config.indexer_url, "config");
    let ledger = LedgerClient::new(&config)?;

    match cli.command {
        Command::Round => Ok(json!({"round": ledger.latest_round().await?})),
        Command::State { app } => Ok(serde_json::to_value(ledger.application_state(app).await?)?),
        Command::Locals { app } => Ok(serde_json::to_value(ledger.local_states(app).await?)?),
        Command::Election { app } => {
            let round = ledger.latest_round().await?;
            let election = ElectionState::from_app_state(&ledger.application_state(app).await?)
                .with_context(|| format!("app {} does not look like an election", app))?;
            let locals = ledger.local_states(app).await?;
            Ok(json!({
                "round": round,
                "open": election.is_open(round),
                "leader": election.leader().and_then(|i| election.option_label(i)),
                "election": election,
                "voters": voters(&locals),
            }))
        }
        Command::Build { action } => {
            let call = action.call();
            let mut builder = TxnBuilder::new(ledger.suggested_params().await?)?
                .with_validity_window(config.validity_window);
            if let Some(fee) = call.fee.or(config.flat_fee) {
                builder = builder.with_flat_fee(fee);
            }
            if let Some(note) = &call.note {
                builder = builder.with_note(note.as_bytes());
            }
            let pending = action.build(&builder)?;
            Ok(json!({
                "txid": pending.id()?,
                "fee": pending.fee()?,
                "first_valid": pending.first_valid(),
                "last_valid": pending.last_valid(),
                "method": pending.method(),
                "unsigned": pending.to_base64()?,
            }))
        }
        Command::Send { blob, wait } => {
            let signed = algovote::core::base64_to_msgpack(blob.trim()).context("signed blob is not base64")?;
            let txid = ledger.send_raw_transaction(&signed).await?;
            match wait {
                Some(rounds) => {
                    let round = ledger.wait_for_confirmation(&txid, rounds).await?;
                    Ok(json!({"txid": txid, "confirmed_round": round}))
                }
                None => Ok(json!({"txid": txid})),
            }
        }
        Command::Status { txid, wait } => match wait {
            Some(rounds) => Ok(json!({"txid": txid, "confirmed_round": ledger.wait_for_confirmation(&txid, rounds).await?})),
            None => Ok(json!({"txid": txid, "status": ledger.transaction_status(&txid).await?})),
        },
    }
}
