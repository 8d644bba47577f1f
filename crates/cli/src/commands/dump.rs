// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rlog dump` - Print the whole reconstructed state

use crate::output::{print_pairs, OutputFormat};
use crate::store::KvStore;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct DumpArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(args: DumpArgs, store: &KvStore) -> Result<()> {
    print_pairs(store.state(), args.format)
}
