// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::error::ExportError;
use crate::ledger::LedgerClient;
use crate::logging::ExportLog;
use crate::models::{Payout, Transaction};
use crate::report::{describe, minor_to_decimal, ymd};
use crate::utils::{fmt_money, pretty_table};
use anyhow::{Context, Result};

pub fn handle(config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub
        .get_one::<String>("id")
        .ok_or(ExportError::MissingArgument(
            "Payout ID is required for \"view\" command.",
        ))?;
    let ledger = super::connect(config)?;
    let log = ExportLog::console();

    log.debug(format!("Fetching payout {}", id));
    let payout = ledger
        .retrieve_payout(id)
        .with_context(|| format!("Error fetching payout {}", id))?;
    log.debug(format!("Fetching transactions for payout {}", id));
    let transactions = super::export::payout_transactions(&ledger, id, &log)
        .into_result()
        .with_context(|| format!("Error fetching transactions for payout {}", id))?;

    println!("Payout Details:");
    println!("{}", payout_table(&payout));
    if transactions.is_empty() {
        println!("\nNo related transactions found.");
    } else {
        println!("\nRelated Transactions ({}):", transactions.len());
        println!("{}", transaction_table(&transactions));
    }
    Ok(())
}

pub fn payout_table(p: &Payout) -> comfy_table::Table {
    pretty_table(
        &["Field", "Value"],
        vec![
            vec!["ID".into(), p.id.clone()],
            vec!["Date".into(), ymd(&p.created_at)],
            vec![
                "Amount".into(),
                fmt_money(&minor_to_decimal(p.amount_minor), &p.currency),
            ],
            vec!["Status".into(), p.status.to_string()],
        ],
    )
}

pub fn transaction_table(txns: &[Transaction]) -> comfy_table::Table {
    let rows = txns
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                fmt_money(&minor_to_decimal(t.amount_minor), &t.currency),
                fmt_money(&minor_to_decimal(t.fee_minor), &t.currency),
                fmt_money(&minor_to_decimal(t.net_minor), &t.currency),
                ymd(&t.created_at),
                describe(t.description.as_deref(), t.statement_descriptor.as_deref()),
            ]
        })
        .collect();
    pretty_table(&["ID", "Amount", "Fees", "Net", "Date", "Description"], rows)
}
