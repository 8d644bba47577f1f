// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + Display>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Print key/value pairs, one `key=value` per line in text mode
pub fn print_pairs<'a, I>(pairs: I, format: OutputFormat) -> anyhow::Result<()>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let pairs: Vec<_> = pairs.into_iter().collect();
    match format {
        OutputFormat::Text => {
            for (key, value) in pairs {
                println!("{}={}", key, value);
            }
        }
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = pairs
                .into_iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
    }
    Ok(())
}
