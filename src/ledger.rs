// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Remote ledger access. [`LedgerClient`] is the seam the export pipeline
//! talks to; [`StripeClient`] is the HTTP implementation.

use crate::error::LedgerError;
use crate::models::{Payout, PayoutStatus, Transaction};
use crate::utils::http_client;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// One page of a remote collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PayoutQuery {
    pub limit: usize,
    pub starting_after: Option<String>,
    /// Inclusive lower bound on `created` (`created[gte]`).
    pub created_since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct TransactionQuery {
    pub payout_id: String,
    pub limit: usize,
    pub starting_after: Option<String>,
}

pub trait LedgerClient {
    fn list_payouts(&self, query: &PayoutQuery) -> Result<Page<Payout>, LedgerError>;
    fn retrieve_payout(&self, id: &str) -> Result<Payout, LedgerError>;
    /// Balance transactions of one payout, with their sources expanded.
    fn list_transactions(&self, query: &TransactionQuery) -> Result<Page<Transaction>, LedgerError>;
}

pub struct StripeClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl StripeClient {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        Ok(StripeClient {
            http: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, LedgerError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .query(query)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<wire::ErrorEnvelope>()
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(LedgerError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json()?)
    }
}

impl LedgerClient for StripeClient {
    fn list_payouts(&self, query: &PayoutQuery) -> Result<Page<Payout>, LedgerError> {
        let mut params = vec![("limit", query.limit.to_string())];
        if let Some(after) = &query.starting_after {
            params.push(("starting_after", after.clone()));
        }
        if let Some(t) = query.created_since {
            params.push(("created[gte]", t.timestamp().to_string()));
        }
        let list: wire::List<wire::Payout> = self.get("/v1/payouts", &params)?;
        Ok(Page {
            data: list.data.into_iter().map(Payout::from).collect(),
            has_more: list.has_more,
        })
    }

    fn retrieve_payout(&self, id: &str) -> Result<Payout, LedgerError> {
        match self.get::<wire::Payout>(&format!("/v1/payouts/{}", id), &[]) {
            Ok(p) => Ok(p.into()),
            Err(LedgerError::Api { status: 404, .. }) => Err(LedgerError::NotFound(id.to_string())),
            Err(e) => Err(e),
        }
    }

    fn list_transactions(&self, query: &TransactionQuery) -> Result<Page<Transaction>, LedgerError> {
        let mut params = vec![
            ("payout", query.payout_id.clone()),
            ("limit", query.limit.to_string()),
            ("expand[]", "data.source".to_string()),
        ];
        if let Some(after) = &query.starting_after {
            params.push(("starting_after", after.clone()));
        }
        let list: wire::List<wire::BalanceTransaction> = self.get("/v1/balance_transactions", &params)?;
        Ok(Page {
            data: list.data.into_iter().map(Transaction::from).collect(),
            has_more: list.has_more,
        })
    }
}

/// Stripe response payloads.
mod wire {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct List<T> {
        pub data: Vec<T>,
        #[serde(default)]
        pub has_more: bool,
    }

    #[derive(Debug, Deserialize)]
    pub struct ErrorEnvelope {
        pub error: ApiError,
    }

    #[derive(Debug, Deserialize)]
    pub struct ApiError {
        pub message: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Payout {
        pub id: String,
        pub amount: i64,
        pub currency: String,
        #[serde(with = "chrono::serde::ts_seconds")]
        pub created: DateTime<Utc>,
        pub status: PayoutStatus,
    }

    #[derive(Debug, Deserialize)]
    pub struct BalanceTransaction {
        pub id: String,
        pub amount: i64,
        pub fee: i64,
        pub net: i64,
        pub currency: String,
        #[serde(with = "chrono::serde::ts_seconds")]
        pub created: DateTime<Utc>,
        pub description: Option<String>,
        pub source: Option<Source>,
    }

    /// `source` is an ID unless expanded.
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum Source {
        Expanded(SourceObject),
        Id(String),
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct SourceObject {
        pub statement_descriptor: Option<String>,
        pub statement_descriptor_suffix: Option<String>,
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

impl From<wire::Payout> for Payout {
    fn from(p: wire::Payout) -> Self {
        Payout {
            id: p.id,
            amount_minor: p.amount,
            currency: p.currency,
            created_at: p.created,
            status: p.status,
        }
    }
}

impl From<wire::BalanceTransaction> for Transaction {
    fn from(t: wire::BalanceTransaction) -> Self {
        let statement_descriptor = match t.source {
            Some(wire::Source::Expanded(src)) => non_empty(src.statement_descriptor)
                .or_else(|| non_empty(src.statement_descriptor_suffix)),
            _ => None,
        };
        Transaction {
            id: t.id,
            amount_minor: t.amount,
            fee_minor: t.fee,
            net_minor: t.net,
            currency: t.currency,
            created_at: t.created,
            description: non_empty(t.description),
            statement_descriptor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_transaction_takes_descriptor_from_expanded_source() {
        let raw = r#"{
            "id": "txn_1", "amount": 1000, "fee": 59, "net": 941, "currency": "eur",
            "created": 1735689600, "description": "Monthly",
            "source": { "id": "ch_1", "statement_descriptor": "", "statement_descriptor_suffix": "INV-1" }
        }"#;
        let t: Transaction = serde_json::from_str::<wire::BalanceTransaction>(raw).unwrap().into();
        assert_eq!(t.statement_descriptor.as_deref(), Some("INV-1"));
        assert_eq!(t.description.as_deref(), Some("Monthly"));
        assert_eq!(t.created_at.format("%Y-%m-%d").to_string(), "2025-01-01");
    }

    #[test]
    fn unexpanded_source_has_no_descriptor() {
        let raw = r#"{
            "id": "txn_2", "amount": 500, "fee": 0, "net": 500, "currency": "usd",
            "created": 1735689600, "description": null, "source": "ch_2"
        }"#;
        let t: Transaction = serde_json::from_str::<wire::BalanceTransaction>(raw).unwrap().into();
        assert!(t.statement_descriptor.is_none());
        assert!(t.description.is_none());
    }

    #[test]
    fn payout_status_decodes_snake_case() {
        let raw = r#"{ "id": "po_1", "amount": 12345, "currency": "usd", "created": 0, "status": "in_transit" }"#;
        let p: Payout = serde_json::from_str::<wire::Payout>(raw).unwrap().into();
        assert_eq!(p.status, PayoutStatus::InTransit);
        assert_eq!(p.amount_minor, 12345);
    }
}
