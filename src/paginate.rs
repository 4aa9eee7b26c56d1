// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cursor-based "fetch every page" loop shared by payouts and transactions.

use crate::error::LedgerError;
use crate::ledger::Page;
use crate::logging::ExportLog;
use crate::models::Cursored;

pub const PAGE_SIZE: usize = 100;
pub const MAX_PAGES: usize = 100;

/// What the paginator asks the remote for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub limit: usize,
    pub starting_after: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Exhausted,
    LimitReached,
    PageCeiling,
    EmptyPage,
    Failed,
}

/// Items collected so far plus, separately, the error that stopped the loop.
#[derive(Debug)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub pages: usize,
    pub stop: StopReason,
    pub error: Option<LedgerError>,
}

impl<T> Fetched<T> {
    /// Any remote failure wins over partial results.
    pub fn into_result(self) -> Result<Vec<T>, LedgerError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.items),
        }
    }

    /// Log a remote failure and keep whatever was fetched before it.
    pub fn lenient(self, log: &ExportLog, what: &str) -> Vec<T> {
        if let Some(e) = &self.error {
            log.error(format!("Error fetching {}: {}", what, e));
        }
        self.items
    }
}

pub fn fetch_all<T, F>(fetch_page: F, limit: Option<usize>, log: &ExportLog) -> Fetched<T>
where
    T: Cursored,
    F: FnMut(PageRequest<'_>) -> Result<Page<T>, LedgerError>,
{
    fetch_all_with_ceiling(fetch_page, limit, MAX_PAGES, log)
}

pub fn fetch_all_with_ceiling<T, F>(
    mut fetch_page: F,
    limit: Option<usize>,
    max_pages: usize,
    log: &ExportLog,
) -> Fetched<T>
where
    T: Cursored,
    F: FnMut(PageRequest<'_>) -> Result<Page<T>, LedgerError>,
{
    let total = limit.unwrap_or(usize::MAX);
    let mut items: Vec<T> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;

    let stop = loop {
        if items.len() >= total {
            break StopReason::LimitReached;
        }
        if pages >= max_pages {
            log.warn(format!(
                "Reached max pages ({}). More data may be available.",
                max_pages
            ));
            break StopReason::PageCeiling;
        }

        let req = PageRequest {
            limit: PAGE_SIZE.min(total - items.len()),
            starting_after: cursor.as_deref(),
        };
        log.debug(format!(
            "Fetching page {} (limit {}, starting_after {})",
            pages + 1,
            req.limit,
            req.starting_after.unwrap_or("-")
        ));
        let page = match fetch_page(req) {
            Ok(p) => p,
            Err(e) => {
                return Fetched {
                    items,
                    pages,
                    stop: StopReason::Failed,
                    error: Some(e),
                };
            }
        };
        pages += 1;
        log.debug(format!(
            "Received {} items, has_more: {}",
            page.data.len(),
            page.has_more
        ));

        if page.data.is_empty() {
            log.debug("No more data received, stopping.");
            break StopReason::EmptyPage;
        }
        let room = total - items.len();
        let has_more = page.has_more;
        items.extend(page.data.into_iter().take(room));
        cursor = items.last().map(|t| t.cursor_id().to_string());

        if !has_more {
            break StopReason::Exhausted;
        }
    };

    log.debug(format!("Total items fetched: {}", items.len()));
    Fetched {
        items,
        pages,
        stop,
        error: None,
    }
}
