// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::error::ExportError;
use crate::ledger::{LedgerClient, PayoutQuery, TransactionQuery};
use crate::logging::{ExportLog, default_log_path};
use crate::models::{Logo, Transaction};
use crate::paginate::{Fetched, fetch_all};
use crate::render::html::HtmlRenderer;
use crate::render::json::JsonRenderer;
use crate::render::pdf::PdfRenderer;
use crate::render::{Format, Renderer};
use crate::report::{ReportContext, build_report};
use crate::state::{CursorStore, FileCursorStore};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};

/// Which payouts to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Explicit(Vec<String>),
    /// Everything created after this payout; `None` reads the cursor store.
    After(Option<String>),
}

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub selection: Selection,
    pub out_dir: PathBuf,
    pub logo: Option<Logo>,
    pub pdf_logo_path: PathBuf,
    pub generated_on: NaiveDate,
}

/// Collaborators of one export run.
pub struct Pipeline<'a> {
    pub ledger: &'a dyn LedgerClient,
    pub store: &'a dyn CursorStore,
    pub renderer: &'a dyn Renderer,
    pub log: &'a ExportLog,
}

#[derive(Debug, Default)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    /// (payout ID, error message)
    pub failed: Vec<(String, String)>,
    /// Cursor recorded at the end of a continuation export.
    pub cursor: Option<String>,
}

pub fn handle(config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let format: Format = sub
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or(config.default_format())
        .parse()?;
    let ids: Vec<String> = sub
        .get_many::<String>("ids")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let selection = match sub.get_one::<String>("lastid") {
        _ if !ids.is_empty() => Selection::Explicit(ids),
        Some(last) if last.trim().is_empty() => Selection::After(None),
        Some(last) => Selection::After(Some(last.trim().to_string())),
        None => {
            return Err(ExportError::MissingArgument(
                "Payout ID or --lastid is required for \"export\" command.",
            )
            .into());
        }
    };

    let log_path = sub
        .get_one::<PathBuf>("log")
        .cloned()
        .unwrap_or_else(|| default_log_path(&config.log_dir()));
    let log = ExportLog::with_file(&log_path)?;
    let out_dir = sub
        .get_one::<PathBuf>("outdir")
        .cloned()
        .unwrap_or_else(|| config.output_dir());
    log.debug(format!(
        "Export: outdir {}, selection {:?}, format {}, log {}",
        out_dir.display(),
        selection,
        format,
        log_path.display()
    ));

    let ledger = super::connect(config)?;
    let store = FileCursorStore::new(crate::paths::cursor_path()?);
    let renderer = renderer_for(format, config, &log)?;
    let request = ExportRequest {
        selection,
        out_dir,
        logo: config.logo()?,
        pdf_logo_path: config.pdf_logo_path(),
        generated_on: Utc::now().date_naive(),
    };
    let pipeline = Pipeline {
        ledger: &ledger,
        store: &store,
        renderer: renderer.as_ref(),
        log: &log,
    };
    let summary = run_export(&pipeline, &request)?;
    if !summary.failed.is_empty() {
        eprintln!(
            "{} of {} report(s) failed; see {}",
            summary.failed.len(),
            summary.failed.len() + summary.written.len(),
            log_path.display()
        );
    }
    Ok(())
}

pub fn renderer_for<'a>(format: Format, config: &Config, log: &'a ExportLog) -> Result<Box<dyn Renderer + 'a>, ExportError> {
    Ok(match format {
        Format::Html => match config.html_template_path() {
            Some(path) => {
                log.debug(format!("Using HTML template {}", path.display()));
                Box::new(HtmlRenderer::from_file(&path)?)
            }
            None => Box::new(HtmlRenderer::new()?),
        },
        Format::Pdf => Box::new(PdfRenderer::new(log)),
        Format::Json => Box::new(JsonRenderer),
    })
}

/// All balance transactions of one payout, page by page.
pub fn payout_transactions(ledger: &dyn LedgerClient, payout_id: &str, log: &ExportLog) -> Fetched<Transaction> {
    fetch_all(
        |req| {
            ledger.list_transactions(&TransactionQuery {
                payout_id: payout_id.to_string(),
                limit: req.limit,
                starting_after: req.starting_after.map(String::from),
            })
        },
        None,
        log,
    )
}

/// IDs of payouts created at or after `cursor_id`'s creation second, except
/// the cursor itself, oldest first.
pub fn payouts_after(ledger: &dyn LedgerClient, cursor_id: &str, log: &ExportLog) -> Result<Vec<String>, ExportError> {
    let anchor = ledger.retrieve_payout(cursor_id)?;
    let payouts = fetch_all(
        |req| {
            ledger.list_payouts(&PayoutQuery {
                limit: req.limit,
                starting_after: req.starting_after.map(String::from),
                created_since: Some(anchor.created_at),
            })
        },
        None,
        log,
    )
    .into_result()?;

    let mut ids: Vec<String> = payouts
        .into_iter()
        .map(|p| p.id)
        .filter(|id| id != cursor_id)
        .collect();
    ids.reverse();
    log.debug(format!(
        "Payouts to export after {}: {}",
        cursor_id,
        ids.join(", ")
    ));
    Ok(ids)
}

pub fn run_export(p: &Pipeline<'_>, req: &ExportRequest) -> Result<ExportSummary, ExportError> {
    std::fs::create_dir_all(&req.out_dir)?;

    let work = match &req.selection {
        Selection::Explicit(ids) => ids.clone(),
        Selection::After(given) => {
            let cursor = match given {
                Some(id) => id.clone(),
                None => {
                    let id = p
                        .store
                        .read_cursor()?
                        .ok_or_else(|| ExportError::NoCursor(p.store.location()))?;
                    p.log.debug(format!("Read lastid from file: {}", id));
                    id
                }
            };
            payouts_after(p.ledger, &cursor, p.log)?
        }
    };

    let ctx = ReportContext {
        format: p.renderer.format(),
        logo: req.logo.clone(),
        pdf_logo_path: req.pdf_logo_path.clone(),
        generated_on: req.generated_on,
    };
    let label = ctx.format.extension().to_uppercase();

    let mut summary = ExportSummary::default();
    for id in &work {
        match export_one(p, &ctx, &req.out_dir, id) {
            Ok(path) => {
                let msg = format!(
                    "Generated {} report for payout {} at {}",
                    label,
                    id,
                    path.display()
                );
                println!("{}", msg);
                p.log.info(msg);
                summary.written.push(path);
            }
            Err(e) => {
                let msg = format!("Error generating report for payout {}: {}", id, e);
                eprintln!("{}", msg);
                p.log.error(&msg);
                summary.failed.push((id.clone(), e.to_string()));
            }
        }
    }

    if matches!(req.selection, Selection::After(_)) {
        if let Some(last) = work.last() {
            p.store.write_cursor(last)?;
            p.log.info(format!("Updated lastid file with {}", last));
            summary.cursor = Some(last.clone());
        }
    }
    Ok(summary)
}

fn export_one(p: &Pipeline<'_>, ctx: &ReportContext, out_dir: &Path, id: &str) -> Result<PathBuf, ExportError> {
    p.log.debug(format!("Fetching payout {}", id));
    let payout = p.ledger.retrieve_payout(id)?;
    p.log.debug(format!("Fetching transactions for payout {}", id));
    let transactions = payout_transactions(p.ledger, id, p.log).into_result()?;
    p.log.debug(format!("Received {} transactions", transactions.len()));

    let report = build_report(&payout, &transactions, ctx);
    let path = ctx.format.output_path(out_dir, &payout.id);
    p.renderer.render(&report, &path)?;
    Ok(path)
}
