// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Format, Renderer};
use crate::error::ExportError;
use crate::models::Report;
use std::path::Path;

/// Writes the report verbatim as pretty-printed JSON.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn format(&self) -> Format {
        Format::Json
    }

    fn render(&self, report: &Report, out: &Path) -> Result<(), ExportError> {
        let body = serde_json::to_string_pretty(report)?;
        std::fs::write(out, body).map_err(|e| ExportError::render(out, e))
    }
}
