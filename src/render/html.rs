// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Format, Renderer};
use crate::error::ExportError;
use crate::models::Report;
use handlebars::Handlebars;
use std::path::Path;

const TEMPLATE_NAME: &str = "payout";
const BUILTIN_TEMPLATE: &str = include_str!("../../templates/layout-html.hbs");

pub struct HtmlRenderer {
    registry: Handlebars<'static>,
}

impl HtmlRenderer {
    /// Built-in layout.
    pub fn new() -> Result<Self, ExportError> {
        Self::from_source(BUILTIN_TEMPLATE)
    }

    /// Use a template file on disk in place of the built-in layout.
    pub fn from_file(path: &Path) -> Result<Self, ExportError> {
        let src = std::fs::read_to_string(path).map_err(|e| ExportError::asset(path, e))?;
        Self::from_source(&src)
    }

    pub fn from_source(src: &str) -> Result<Self, ExportError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry
            .register_template_string(TEMPLATE_NAME, src)
            .map_err(|e| ExportError::Template(e.to_string()))?;
        Ok(HtmlRenderer { registry })
    }

    pub fn render_string(&self, report: &Report) -> Result<String, ExportError> {
        self.registry
            .render(TEMPLATE_NAME, report)
            .map_err(|e| ExportError::Template(e.to_string()))
    }
}

impl Renderer for HtmlRenderer {
    fn format(&self) -> Format {
        Format::Html
    }

    fn render(&self, report: &Report, out: &Path) -> Result<(), ExportError> {
        let html = self.render_string(report)?;
        std::fs::write(out, html).map_err(|e| ExportError::render(out, e))
    }
}
