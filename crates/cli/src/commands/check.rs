// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rlog check` - Verify the log replays cleanly

use crate::output::{print, OutputFormat};
use crate::store::KvStore;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct CheckArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Summary of a clean replay
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub records: u64,
    pub keys: usize,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ok: {} records, {} keys", self.records, self.keys)
    }
}

/// Opening the store already replayed the whole log; reaching here means
/// every record decoded and applied.
pub fn run(args: CheckArgs, store: &KvStore) -> Result<()> {
    let report = CheckReport {
        records: store.records(),
        keys: store.state().len(),
    };
    print(&report, args.format)
}
