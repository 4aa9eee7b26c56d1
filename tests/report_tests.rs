// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::NaiveDate;
use common::{payout, txn};
use payout_report::models::{Logo, PayoutStatus};
use payout_report::render::Format;
use payout_report::report::{ReportContext, build_report, describe};
use std::path::PathBuf;

fn ctx(format: Format, logo: Option<Logo>) -> ReportContext {
    ReportContext {
        format,
        logo,
        pdf_logo_path: PathBuf::from("/opt/payout-report/assets/logo.png"),
        generated_on: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
    }
}

#[test]
fn total_fees_is_rounded_sum_of_fee_strings() {
    let p = payout("po_1", 50_000, 1_735_689_600);
    let txns = vec![
        txn("txn_a", 123, None, None),
        txn("txn_b", 456, None, None),
        txn("txn_c", 1, None, None),
    ];
    let report = build_report(&p, &txns, &ctx(Format::Json, None));
    let fees: Vec<&str> = report.transactions.iter().map(|t| t.fees.as_str()).collect();
    assert_eq!(fees, vec!["1.23", "4.56", "0.01"]);
    assert_eq!(report.payout.total_fees, "5.80");
}

#[test]
fn invoices_count_only_non_empty_descriptors() {
    let p = payout("po_1", 50_000, 1_735_689_600);
    let txns = vec![
        txn("txn_a", 10, Some("Monthly"), Some("INV-1")),
        txn("txn_b", 10, None, Some("INV-2")),
        txn("txn_c", 10, Some("Top-up"), None),
    ];
    let report = build_report(&p, &txns, &ctx(Format::Html, None));
    assert_eq!(report.payout.number_of_invoices, 2);

    let with_blank = vec![txn("txn_d", 10, None, Some(""))];
    let report = build_report(&p, &with_blank, &ctx(Format::Html, None));
    assert_eq!(report.payout.number_of_invoices, 0);
}

#[test]
fn description_resolution() {
    assert_eq!(describe(Some("Monthly"), Some("INV-1")), "Monthly (Invoice: INV-1)");
    assert_eq!(describe(None, Some("INV-2")), "INV-2");
    assert_eq!(describe(None, None), "N/A");
    assert_eq!(describe(Some(""), None), "N/A");

    let p = payout("po_1", 100, 0);
    let txns = vec![
        txn("txn_a", 0, Some("Monthly"), Some("INV-1")),
        txn("txn_b", 0, None, None),
    ];
    let report = build_report(&p, &txns, &ctx(Format::Json, None));
    assert_eq!(report.transactions[0].description, "Monthly (Invoice: INV-1)");
    assert_eq!(report.transactions[1].description, "N/A");
}

#[test]
fn payout_summary_fields() {
    let mut p = payout("po_9", 123_456, 1_735_776_000); // 2025-01-02
    p.status = PayoutStatus::InTransit;
    let report = build_report(&p, &[], &ctx(Format::Json, None));
    assert_eq!(report.payout.id, "po_9");
    assert_eq!(report.payout.amount, "1234.56");
    assert_eq!(report.payout.currency, "USD");
    assert_eq!(report.payout.date, "2025-01-02");
    assert_eq!(report.payout.status, PayoutStatus::InTransit);
    assert_eq!(report.payout.total_fees, "0.00");
    assert_eq!(report.payout.number_of_invoices, 0);
    assert!(report.transactions.is_empty());
    assert_eq!(report.generated_date, "2025-02-01");
}

#[test]
fn transaction_view_formats_amounts_and_dates() {
    let p = payout("po_1", 100, 0);
    let report = build_report(&p, &[txn("txn_a", 59, None, None)], &ctx(Format::Json, None));
    let t = &report.transactions[0];
    assert_eq!(t.transaction_id, "txn_a");
    assert_eq!(t.amount, "100.00");
    assert_eq!(t.fees, "0.59");
    assert_eq!(t.net, "99.41");
    assert_eq!(t.currency, "USD");
    assert_eq!(t.created, "2025-01-01");
}

#[test]
fn pdf_reports_embed_the_local_logo_asset() {
    let configured = Logo {
        url: "https://cdn.example.com/logo.png".into(),
        width: Some(200),
        height: Some(50),
    };
    let p = payout("po_1", 100, 0);
    let report = build_report(&p, &[], &ctx(Format::Pdf, Some(configured)));
    let logo = report.logo.unwrap();
    assert_eq!(logo.url, "/opt/payout-report/assets/logo.png");
    assert_eq!(logo.width, Some(200));
    assert_eq!(logo.height, Some(50));
}

#[test]
fn other_formats_pass_the_logo_through() {
    let empty = Logo {
        url: String::new(),
        width: None,
        height: None,
    };
    let p = payout("po_1", 100, 0);
    let report = build_report(&p, &[], &ctx(Format::Html, Some(empty.clone())));
    assert_eq!(report.logo, Some(empty));

    let report = build_report(&p, &[], &ctx(Format::Json, None));
    assert!(report.logo.is_none());
}
