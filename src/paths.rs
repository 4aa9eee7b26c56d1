// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "PayoutReport", "payout-report"));

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

/// Per-user config file; may not exist.
pub fn user_config_path() -> Option<PathBuf> {
    project_dirs()
        .ok()
        .map(|p| p.config_dir().join("config.json"))
}

/// File holding the continuation cursor history.
pub fn cursor_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("lastid"))
}

pub fn default_assets_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("assets"))
}
