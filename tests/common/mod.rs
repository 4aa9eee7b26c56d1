// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use payout_report::error::LedgerError;
use payout_report::ledger::{LedgerClient, Page, PayoutQuery, TransactionQuery};
use payout_report::models::{Payout, PayoutStatus, Transaction};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

pub fn payout(id: &str, amount_minor: i64, created: i64) -> Payout {
    Payout {
        id: id.to_string(),
        amount_minor,
        currency: "usd".to_string(),
        created_at: at(created),
        status: PayoutStatus::Paid,
    }
}

pub fn txn(id: &str, fee_minor: i64, description: Option<&str>, descriptor: Option<&str>) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount_minor: 10_000,
        fee_minor,
        net_minor: 10_000 - fee_minor,
        currency: "usd".to_string(),
        created_at: at(1_735_689_600),
        description: description.map(String::from),
        statement_descriptor: descriptor.map(String::from),
    }
}

pub fn many_txns(n: usize) -> Vec<Transaction> {
    (0..n)
        .map(|i| txn(&format!("txn_{:04}", i), 30 + i as i64, Some("Charge"), None))
        .collect()
}

/// Ledger held in memory. Payouts are kept newest first, like the API.
#[derive(Default)]
pub struct FakeLedger {
    pub payouts: Vec<Payout>,
    pub transactions: HashMap<String, Vec<Transaction>>,
    /// Payout IDs whose transaction listing fails.
    pub broken: HashSet<String>,
    /// Fail every payout listing.
    pub payouts_down: bool,
    pub payout_queries: RefCell<Vec<PayoutQuery>>,
}

impl FakeLedger {
    pub fn with_payouts(payouts: Vec<Payout>) -> Self {
        FakeLedger {
            payouts,
            ..Default::default()
        }
    }

    pub fn add_transactions(&mut self, payout_id: &str, txns: Vec<Transaction>) {
        self.transactions.insert(payout_id.to_string(), txns);
    }
}

fn page_of<T: Clone>(items: &[T], id_of: impl Fn(&T) -> &str, after: Option<&str>, limit: usize) -> Result<Page<T>, LedgerError> {
    let start = match after {
        Some(a) => match items.iter().position(|t| id_of(t) == a) {
            Some(i) => i + 1,
            None => {
                return Err(LedgerError::Api {
                    status: 400,
                    message: format!("No such object: {}", a),
                });
            }
        },
        None => 0,
    };
    let end = (start + limit).min(items.len());
    Ok(Page {
        data: items[start..end].to_vec(),
        has_more: end < items.len(),
    })
}

impl LedgerClient for FakeLedger {
    fn list_payouts(&self, query: &PayoutQuery) -> Result<Page<Payout>, LedgerError> {
        self.payout_queries.borrow_mut().push(query.clone());
        if self.payouts_down {
            return Err(LedgerError::Api {
                status: 503,
                message: "unavailable".into(),
            });
        }
        let filtered: Vec<Payout> = self
            .payouts
            .iter()
            .filter(|p| query.created_since.is_none_or(|t| p.created_at >= t))
            .cloned()
            .collect();
        page_of(&filtered, |p| p.id.as_str(), query.starting_after.as_deref(), query.limit)
    }

    fn retrieve_payout(&self, id: &str) -> Result<Payout, LedgerError> {
        self.payouts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    fn list_transactions(&self, query: &TransactionQuery) -> Result<Page<Transaction>, LedgerError> {
        if self.broken.contains(&query.payout_id) {
            return Err(LedgerError::Api {
                status: 500,
                message: "internal error".into(),
            });
        }
        let txns = self
            .transactions
            .get(&query.payout_id)
            .cloned()
            .unwrap_or_default();
        page_of(&txns, |t| t.id.as_str(), query.starting_after.as_deref(), query.limit)
    }
}
