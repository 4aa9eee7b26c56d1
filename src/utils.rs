// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};

const UA: &str = concat!(
    "payout-report/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/payout-report)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Midnight UTC at the start of `s`.
pub fn parse_since(s: &str) -> Result<DateTime<Utc>> {
    let d = parse_date(s)?;
    Ok(d.and_time(chrono::NaiveTime::MIN).and_utc())
}

pub fn fmt_money(amount: &str, ccy: &str) -> String {
    format!("{} {}", amount, ccy.to_uppercase())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// How a listing is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Table,
    Json,
    JsonLines,
}

impl Output {
    /// `--json` wins over `--jsonl`.
    pub fn from_flags(json: bool, jsonl: bool) -> Self {
        match (json, jsonl) {
            (true, _) => Output::Json,
            (false, true) => Output::JsonLines,
            _ => Output::Table,
        }
    }

    /// Print `rows` as JSON; `false` leaves table output to the caller.
    pub fn print_json<T: serde::Serialize>(self, rows: &[T]) -> Result<bool> {
        match self {
            Output::Table => return Ok(false),
            Output::Json => println!("{}", serde_json::to_string_pretty(rows)?),
            Output::JsonLines => {
                for row in rows {
                    println!("{}", serde_json::to_string(row)?);
                }
            }
        }
        Ok(true)
    }
}
