// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::ledger::{LedgerClient, PayoutQuery};
use crate::logging::ExportLog;
use crate::models::Payout;
use crate::paginate::{Fetched, fetch_all};
use crate::report::{minor_to_decimal, ymd};
use crate::utils::{Output, parse_since, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub fn handle(config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied();
    let since = sub
        .get_one::<String>("since")
        .map(|s| parse_since(s))
        .transpose()?;
    let output = Output::from_flags(sub.get_flag("json"), sub.get_flag("jsonl"));

    let ledger = super::connect(config)?;
    let log = ExportLog::console();
    let fetched = list_payouts(&ledger, limit, since, &log);
    let failed = fetched.error.is_some();
    let payouts = fetched.lenient(&log, "payouts");
    if payouts.is_empty() {
        if let Some(line) = heading(0, failed) {
            println!("{}", line);
        }
        return Ok(());
    }

    let data = payout_rows(&payouts);
    if !output.print_json(&data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.amount.clone(),
                    r.currency.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        if let Some(line) = heading(data.len(), failed) {
            println!("{}", line);
        }
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Amount", "Currency", "Status"], rows)
        );
    }
    Ok(())
}

/// Line printed above the listing. An empty result caused by a fetch error
/// gets none; the error has been logged already.
pub fn heading(count: usize, failed: bool) -> Option<String> {
    match (count, failed) {
        (0, true) => None,
        (0, false) => Some("No payouts found.".to_string()),
        (n, _) => Some(format!("Found {} payouts:", n)),
    }
}

/// Newest first, as the ledger returns them. The caller decides whether a
/// fetch error is fatal.
pub fn list_payouts(
    ledger: &dyn LedgerClient,
    limit: Option<usize>,
    since: Option<DateTime<Utc>>,
    log: &ExportLog,
) -> Fetched<Payout> {
    log.debug(format!(
        "Listing payouts (limit {:?}, since {:?})",
        limit, since
    ));
    fetch_all(
        |req| {
            ledger.list_payouts(&PayoutQuery {
                limit: req.limit,
                starting_after: req.starting_after.map(String::from),
                created_since: since,
            })
        },
        limit,
        log,
    )
}

#[derive(Debug, Serialize)]
pub struct PayoutRow {
    pub id: String,
    pub date: String,
    pub amount: String,
    pub currency: String,
    pub status: String,
}

pub fn payout_rows(payouts: &[Payout]) -> Vec<PayoutRow> {
    payouts
        .iter()
        .map(|p| PayoutRow {
            id: p.id.clone(),
            date: ymd(&p.created_at),
            amount: minor_to_decimal(p.amount_minor),
            currency: p.currency.to_uppercase(),
            status: p.status.to_string(),
        })
        .collect()
}
