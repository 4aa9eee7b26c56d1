// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types shared by the export pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the remote ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Transport failure, timeout or undecodable body
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("ledger returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A payout that was asked for by ID does not exist
    #[error("payout '{0}' not found")]
    NotFound(String),
}

/// Errors raised while resolving, building and rendering reports.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("remote fetch failed: {0}")]
    RemoteFetch(#[from] LedgerError),

    #[error("unsupported format '{0}': --format must be html, pdf, or json")]
    UnsupportedFormat(String),

    #[error("{0}")]
    MissingArgument(&'static str),

    #[error("--lastid specified but no lastid file exists at {}", .0.display())]
    NoCursor(PathBuf),

    #[error("failed to render {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },

    #[error("could not load asset {}: {reason}", path.display())]
    AssetLoad { path: PathBuf, reason: String },

    #[error("template error: {0}")]
    Template(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    pub fn render(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ExportError::Render {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn asset(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ExportError::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Problems reading `config.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid logo dimension '{0}', expected a number such as 150 or \"150px\"")]
    Dimension(String),

    #[error("no Stripe API key configured (set stripe.apiKey in config.json or STRIPE_API_KEY)")]
    MissingApiKey,
}
