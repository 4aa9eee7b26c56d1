// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Continuation cursor: the last exported payout ID, newest first.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait CursorStore {
    /// Newest recorded payout ID, if any.
    fn read_cursor(&self) -> std::io::Result<Option<String>>;
    /// Prepend `id` to the history.
    fn write_cursor(&self, id: &str) -> std::io::Result<()>;
    /// Where the history lives, for messages.
    fn location(&self) -> PathBuf;
}

/// One ID per line in a plain text file.
pub struct FileCursorStore {
    path: PathBuf,
}

impl FileCursorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCursorStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> std::io::Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e),
        }
    }
}

impl CursorStore for FileCursorStore {
    fn read_cursor(&self) -> std::io::Result<Option<String>> {
        let content = self.read_all()?;
        Ok(content
            .lines()
            .next()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()))
    }

    fn write_cursor(&self, id: &str) -> std::io::Result<()> {
        let existing = self.read_all()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = format!("{}\n{}", id, existing);
        fs::write(&self.path, content.trim())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
