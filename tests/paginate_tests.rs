// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::many_txns;
use payout_report::error::LedgerError;
use payout_report::ledger::Page;
use payout_report::logging::ExportLog;
use payout_report::models::Transaction;
use payout_report::paginate::{MAX_PAGES, PageRequest, StopReason, fetch_all, fetch_all_with_ceiling};
use std::collections::HashSet;

/// Serves `items` the way the ledger does: `limit` items after the cursor.
fn serve(items: &[Transaction], req: PageRequest<'_>) -> Result<Page<Transaction>, LedgerError> {
    let start = match req.starting_after {
        Some(id) => items.iter().position(|t| t.id == id).unwrap() + 1,
        None => 0,
    };
    let end = (start + req.limit).min(items.len());
    Ok(Page {
        data: items[start..end].to_vec(),
        has_more: end < items.len(),
    })
}

#[test]
fn returns_min_of_limit_and_available_in_remote_order() {
    let log = ExportLog::console();
    for total in [0usize, 1, 99, 100, 101, 250] {
        let items = many_txns(total);
        for limit in [None, Some(1), Some(100), Some(150)] {
            let fetched = fetch_all(|req| serve(&items, req), limit, &log);
            assert!(fetched.error.is_none());
            let got = fetched.items;
            let expected = limit.map_or(total, |l| l.min(total));
            assert_eq!(got.len(), expected, "total {} limit {:?}", total, limit);

            let ids: Vec<&str> = got.iter().map(|t| t.id.as_str()).collect();
            let want: Vec<&str> = items[..expected].iter().map(|t| t.id.as_str()).collect();
            assert_eq!(ids, want);
            let unique: HashSet<&str> = ids.iter().copied().collect();
            assert_eq!(unique.len(), ids.len());
        }
    }
}

#[test]
fn requests_shrink_to_the_remaining_limit_and_carry_the_cursor() {
    let log = ExportLog::console();
    let items = many_txns(300);
    let mut seen: Vec<(usize, Option<String>)> = Vec::new();
    let fetched = fetch_all(
        |req| {
            seen.push((req.limit, req.starting_after.map(String::from)));
            serve(&items, req)
        },
        Some(150),
        &log,
    );
    assert_eq!(fetched.items.len(), 150);
    assert_eq!(fetched.stop, StopReason::LimitReached);
    assert_eq!(
        seen,
        vec![(100, None), (50, Some("txn_0099".to_string()))]
    );
}

#[test]
fn empty_page_before_has_more_false_terminates_cleanly() {
    let log = ExportLog::console();
    let items = many_txns(3);
    let mut calls = 0;
    let fetched = fetch_all(
        |req| {
            calls += 1;
            if req.starting_after.is_none() {
                Ok(Page {
                    data: items.clone(),
                    has_more: true,
                })
            } else {
                Ok(Page {
                    data: Vec::new(),
                    has_more: true,
                })
            }
        },
        None,
        &log,
    );
    assert_eq!(calls, 2);
    assert_eq!(fetched.stop, StopReason::EmptyPage);
    assert_eq!(fetched.into_result().unwrap().len(), 3);
}

#[test]
fn empty_collection_is_not_an_error() {
    let log = ExportLog::console();
    let fetched = fetch_all(|req| serve(&[], req), None, &log);
    assert_eq!(fetched.stop, StopReason::EmptyPage);
    assert!(fetched.into_result().unwrap().is_empty());
}

#[test]
fn page_ceiling_stops_without_failing() {
    let log = ExportLog::console();
    let items = many_txns(50);
    let fetched = fetch_all_with_ceiling(
        |req| {
            serve(
                &items,
                PageRequest {
                    limit: 1,
                    starting_after: req.starting_after,
                },
            )
        },
        None,
        5,
        &log,
    );
    assert_eq!(fetched.stop, StopReason::PageCeiling);
    assert_eq!(fetched.pages, 5);
    assert_eq!(fetched.into_result().unwrap().len(), 5);
}

#[test]
fn default_ceiling_is_one_hundred_pages() {
    let log = ExportLog::console();
    let mut n = 0;
    let fetched = fetch_all(
        |_req| {
            n += 1;
            Ok(Page {
                data: vec![common::txn(&format!("txn_{}", n), 0, None, None)],
                has_more: true,
            })
        },
        None,
        &log,
    );
    assert_eq!(fetched.pages, MAX_PAGES);
    assert_eq!(fetched.items.len(), 100);
    assert_eq!(fetched.stop, StopReason::PageCeiling);
}

#[test]
fn remote_error_keeps_partial_items_on_a_separate_channel() {
    let log = ExportLog::console();
    let items = many_txns(250);
    let fetched = fetch_all(
        |req| {
            if req.starting_after == Some("txn_0199") {
                Err(LedgerError::Api {
                    status: 500,
                    message: "boom".into(),
                })
            } else {
                serve(&items, req)
            }
        },
        None,
        &log,
    );
    assert_eq!(fetched.stop, StopReason::Failed);
    assert_eq!(fetched.items.len(), 200);
    assert!(matches!(fetched.error, Some(LedgerError::Api { status: 500, .. })));

    let partial = fetch_all(
        |req| {
            if req.starting_after.is_some() {
                Err(LedgerError::NotFound("x".into()))
            } else {
                serve(&items, req)
            }
        },
        None,
        &log,
    )
    .lenient(&log, "transactions");
    assert_eq!(partial.len(), 100);
}

#[test]
fn strict_mode_propagates_remote_errors() {
    let log = ExportLog::console();
    let res = fetch_all::<Transaction, _>(
        |_req| {
            Err(LedgerError::Api {
                status: 401,
                message: "bad key".into(),
            })
        },
        None,
        &log,
    )
    .into_result();
    assert!(matches!(res, Err(LedgerError::Api { status: 401, .. })));
}
