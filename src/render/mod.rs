// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod html;
pub mod json;
pub mod pdf;

use crate::error::ExportError;
use crate::models::Report;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Pdf,
    Json,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Pdf => "pdf",
            Format::Json => "json",
        }
    }

    /// `<dir>/payout_<id>.<ext>`
    pub fn output_path(&self, dir: &Path, payout_id: &str) -> PathBuf {
        dir.join(format!("payout_{}.{}", payout_id, self.extension()))
    }
}

impl FromStr for Format {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(Format::Html),
            "pdf" => Ok(Format::Pdf),
            "json" => Ok(Format::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A backend that turns one report into one file.
pub trait Renderer {
    fn format(&self) -> Format;
    fn render(&self, report: &Report, out: &Path) -> Result<(), ExportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing_is_case_insensitive() {
        assert_eq!("PDF".parse::<Format>().unwrap(), Format::Pdf);
        assert_eq!(" json ".parse::<Format>().unwrap(), Format::Json);
        assert!(matches!(
            "xml".parse::<Format>(),
            Err(ExportError::UnsupportedFormat(f)) if f == "xml"
        ));
    }

    #[test]
    fn output_file_names() {
        let p = Format::Html.output_path(Path::new("out"), "po_123");
        assert_eq!(p, Path::new("out").join("payout_po_123.html"));
    }
}
