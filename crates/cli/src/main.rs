// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rlog - key-value store persisted through a replay log

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod kv;
mod output;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, delete, dump, get, set};
use replaylog::SyncPolicy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::store::{KvStore, StoreConfig};

#[derive(Parser)]
#[command(
    name = "rlog",
    version,
    about = "Key-value store rebuilt from an append-only operation log"
)]
struct Cli {
    /// Path to the log file
    #[arg(long, global = true, env = "RLOG_FILE", default_value = "rlog.jsonl")]
    file: PathBuf,

    /// Skip the per-write sync; sync once before exit instead
    #[arg(long, global = true)]
    no_sync: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign a value to a key
    Set(set::SetArgs),
    /// Remove a key
    Delete(delete::DeleteArgs),
    /// Print the value of a key
    Get(get::GetArgs),
    /// Print every key and value
    Dump(dump::DumpArgs),
    /// Replay the whole log and report whether it is intact
    Check(check::CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = StoreConfig::new(cli.file);
    if cli.no_sync {
        config.sync = SyncPolicy::Manual;
    }
    tracing::debug!(path = %config.path.display(), sync = ?config.sync, "opening store");

    let mut store = KvStore::open(config)?;

    let result = match cli.command {
        Commands::Set(args) => set::run(args, &mut store),
        Commands::Delete(args) => delete::run(args, &mut store),
        Commands::Get(args) => get::run(args, &store),
        Commands::Dump(args) => dump::run(args, &store),
        Commands::Check(args) => check::run(args, &store),
    };

    // Close even on failure so deferred syncs still happen
    let closed = store.close();
    result?;
    closed
}

/// Log to stderr so stdout stays parseable
fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
