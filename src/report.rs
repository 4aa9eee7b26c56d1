// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Logo, Payout, PayoutSummary, Report, Transaction, TransactionView};
use crate::render::Format;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Everything a report needs besides ledger data.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub format: Format,
    pub logo: Option<Logo>,
    /// Local asset embedded in PDF output.
    pub pdf_logo_path: PathBuf,
    pub generated_on: NaiveDate,
}

/// Minor units to a two-decimal string; always /100, whatever the currency.
pub fn minor_to_decimal(minor: i64) -> String {
    Decimal::new(minor, 2).to_string()
}

pub fn ymd(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d").to_string()
}

pub fn describe(description: Option<&str>, descriptor: Option<&str>) -> String {
    let description = description.filter(|s| !s.is_empty());
    let descriptor = descriptor.filter(|s| !s.is_empty());
    match (description, descriptor) {
        (Some(d), Some(inv)) => format!("{} (Invoice: {})", d, inv),
        (Some(d), None) => d.to_string(),
        (None, Some(inv)) => inv.to_string(),
        (None, None) => "N/A".to_string(),
    }
}

pub fn transaction_view(t: &Transaction) -> TransactionView {
    TransactionView {
        transaction_id: t.id.clone(),
        amount: minor_to_decimal(t.amount_minor),
        fees: minor_to_decimal(t.fee_minor),
        net: minor_to_decimal(t.net_minor),
        currency: t.currency.to_uppercase(),
        created: ymd(&t.created_at),
        description: describe(t.description.as_deref(), t.statement_descriptor.as_deref()),
    }
}

/// Sum of fee strings in f64, re-formatted to 2dp.
pub fn total_fees(views: &[TransactionView]) -> String {
    let sum: f64 = views
        .iter()
        .map(|v| v.fees.parse::<f64>().unwrap_or(0.0))
        .sum();
    format!("{:.2}", sum)
}

pub fn build_report(payout: &Payout, transactions: &[Transaction], ctx: &ReportContext) -> Report {
    let views: Vec<TransactionView> = transactions.iter().map(transaction_view).collect();
    let invoices = transactions
        .iter()
        .filter(|t| t.statement_descriptor.as_deref().is_some_and(|s| !s.is_empty()))
        .count();

    let logo = match ctx.format {
        Format::Pdf => {
            let configured = ctx.logo.clone().unwrap_or_default();
            Some(Logo {
                url: ctx.pdf_logo_path.to_string_lossy().to_string(),
                width: configured.width,
                height: configured.height,
            })
        }
        Format::Html | Format::Json => ctx.logo.clone(),
    };

    Report {
        logo,
        payout: PayoutSummary {
            id: payout.id.clone(),
            amount: minor_to_decimal(payout.amount_minor),
            currency: payout.currency.to_uppercase(),
            date: ymd(&payout.created_at),
            status: payout.status,
            total_fees: total_fees(&views),
            number_of_invoices: invoices,
        },
        transactions: views,
        generated_date: ctx.generated_on.format("%Y-%m-%d").to_string(),
    }
}
