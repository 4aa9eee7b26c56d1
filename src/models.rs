// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    InTransit,
    Paid,
    Failed,
    Canceled,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::InTransit => "in_transit",
            PayoutStatus::Paid => "paid",
            PayoutStatus::Failed => "failed",
            PayoutStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payout {
    pub id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub status: PayoutStatus,
}

/// A balance transaction settled by a payout.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub amount_minor: i64,
    pub fee_minor: i64,
    pub net_minor: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub description: Option<String>,
    pub statement_descriptor: Option<String>,
}

/// Anything addressable by the ledger's `starting_after` cursor.
pub trait Cursored {
    fn cursor_id(&self) -> &str;
}

impl Cursored for Payout {
    fn cursor_id(&self) -> &str {
        &self.id
    }
}

impl Cursored for Transaction {
    fn cursor_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutSummary {
    pub id: String,
    pub amount: String,
    pub currency: String,
    pub date: String, // YYYY-MM-DD
    pub status: PayoutStatus,
    pub total_fees: String,
    pub number_of_invoices: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub transaction_id: String,
    pub amount: String,
    pub fees: String,
    pub net: String,
    pub currency: String,
    pub created: String, // YYYY-MM-DD
    pub description: String,
}

/// One payout, normalized for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub logo: Option<Logo>,
    pub payout: PayoutSummary,
    pub transactions: Vec<TransactionView>,
    pub generated_date: String,
}
