// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rlog get <key>` - Print a value

use crate::store::KvStore;
use anyhow::{anyhow, Result};
use clap::Args;

#[derive(Args)]
pub struct GetArgs {
    /// Key to look up
    pub key: String,
}

pub fn run(args: GetArgs, store: &KvStore) -> Result<()> {
    let value = store
        .get(&args.key)
        .ok_or_else(|| anyhow!("key not found: {}", args.key))?;
    println!("{}", value);
    Ok(())
}
