// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Console diagnostics go through `log`/`env_logger`. An [`ExportLog`] handle
//! is passed explicitly to the components that report progress, and mirrors
//! every message into a persistent log file when one is open.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use log::Level;
use std::cell::RefCell;
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Install the console logger. `RUST_LOG` takes precedence over `--verbose`.
pub fn init_console(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_target(false)
        .try_init();
}

/// `<log_dir>/export-YYYY-MM-DD.log`
pub fn default_log_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("export-{}.log", Utc::now().format("%Y-%m-%d")))
}

pub struct ExportLog {
    file: RefCell<Option<BufWriter<File>>>,
}

impl ExportLog {
    /// Console only.
    pub fn console() -> Self {
        ExportLog {
            file: RefCell::new(None),
        }
    }

    /// Console plus an append-mode log file; parent directories are created.
    pub fn with_file(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Create log dir {}", parent.display()))?;
        }
        let f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Open log file {}", path.display()))?;
        Ok(ExportLog {
            file: RefCell::new(Some(BufWriter::new(f))),
        })
    }

    /// Verbose progress; shown on the console only with `--verbose`.
    pub fn debug(&self, msg: impl Display) {
        log::debug!("{}", msg);
        self.append(Level::Debug, &msg);
    }

    pub fn info(&self, msg: impl Display) {
        log::info!("{}", msg);
        self.append(Level::Info, &msg);
    }

    pub fn warn(&self, msg: impl Display) {
        log::warn!("{}", msg);
        self.append(Level::Warn, &msg);
    }

    pub fn error(&self, msg: impl Display) {
        log::error!("{}", msg);
        self.append(Level::Error, &msg);
    }

    fn append(&self, level: Level, msg: &dyn Display) {
        let mut guard = self.file.borrow_mut();
        if let Some(w) = guard.as_mut() {
            let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
            // log file failures are never fatal
            if writeln!(w, "{} [{}]: {}", ts, level, msg).is_err() {
                log::warn!("could not write to log file");
            }
        }
    }
}

impl Drop for ExportLog {
    fn drop(&mut self) {
        if let Some(w) = self.file.get_mut().as_mut() {
            let _ = w.flush();
        }
    }
}
