// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rlog set <key> <value>` - Assign a value

use crate::store::KvStore;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct SetArgs {
    /// Key to assign
    pub key: String,
    /// Value to store
    pub value: String,
}

pub fn run(args: SetArgs, store: &mut KvStore) -> Result<()> {
    store.set(&args.key, &args.value)
}
