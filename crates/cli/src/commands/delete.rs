// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rlog delete <key>` - Remove a key

use crate::store::KvStore;
use anyhow::{bail, Result};
use clap::Args;

#[derive(Args)]
pub struct DeleteArgs {
    /// Key to remove
    pub key: String,

    /// Fail if the key does not exist
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: DeleteArgs, store: &mut KvStore) -> Result<()> {
    if args.strict && store.get(&args.key).is_none() {
        bail!("key not found: {}", args.key);
    }
    store.delete(&args.key)
}
