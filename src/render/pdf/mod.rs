// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod layout;
pub mod metrics;

use self::layout::{Canvas, PageGeometry, Rgb, TextStyle};
use self::metrics::Font;
use super::{Format, Renderer};
use crate::error::ExportError;
use crate::logging::ExportLog;
use crate::models::Report;
use printpdf::image_crate::GenericImageView;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Pt,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const LAYER: &str = "Layer 1";
/// Helvetica ascender, as a fraction of the font size.
const ASCENT: f32 = 0.718;

pub struct PdfRenderer<'a> {
    geometry: PageGeometry,
    log: &'a ExportLog,
}

impl<'a> PdfRenderer<'a> {
    pub fn new(log: &'a ExportLog) -> Self {
        Self::with_geometry(PageGeometry::a4_landscape(), log)
    }

    pub fn with_geometry(geometry: PageGeometry, log: &'a ExportLog) -> Self {
        PdfRenderer { geometry, log }
    }
}

impl Renderer for PdfRenderer<'_> {
    fn format(&self) -> Format {
        Format::Pdf
    }

    fn render(&self, report: &Report, out: &Path) -> Result<(), ExportError> {
        let title = format!("{} {}", layout::TITLE, report.payout.id);
        let mut canvas =
            PdfCanvas::new(&title, self.geometry).map_err(|e| ExportError::render(out, format!("{:?}", e)))?;
        let end = layout::layout_report(&mut canvas, report, &self.geometry, self.log);
        self.log.debug(format!(
            "Laid out {} page(s) for payout {}",
            end.page + 1,
            report.payout.id
        ));
        canvas.finish(out)
    }
}

/// [`Canvas`] backed by a printpdf document using the built-in Helvetica faces.
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    geometry: PageGeometry,
}

fn pt(v: f32) -> Mm {
    Mm::from(Pt(v))
}

fn color((r, g, b): Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

impl PdfCanvas {
    pub fn new(title: &str, geometry: PageGeometry) -> Result<Self, printpdf::Error> {
        let (doc, page, layer) = PdfDocument::new(title, pt(geometry.width), pt(geometry.height), LAYER);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(PdfCanvas {
            doc,
            layer,
            regular,
            bold,
            geometry,
        })
    }

    /// Top-down y to PDF's bottom-up y.
    fn flip(&self, y: f32) -> Mm {
        pt(self.geometry.height - y)
    }

    pub fn finish(self, out: &Path) -> Result<(), ExportError> {
        let doc = self.doc;
        write_output(out, |w| doc.save(w).map_err(|e| format!("{:?}", e)))
    }
}

/// Stream into `out`; a failed write or flush removes the partial file.
pub fn write_output<F>(out: &Path, write: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), String>,
{
    let file = File::create(out).map_err(|e| ExportError::render(out, e))?;
    let mut w = BufWriter::new(file);
    let written = write(&mut w).and_then(|()| w.flush().map_err(|e| e.to_string()));
    if let Err(reason) = written {
        drop(w);
        if let Err(e) = std::fs::remove_file(out) {
            log::warn!("could not remove partial {}: {}", out.display(), e);
        }
        return Err(ExportError::render(out, reason));
    }
    Ok(())
}

impl Canvas for PdfCanvas {
    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let font = match style.font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
        };
        self.layer.set_fill_color(color(style.color));
        self.layer
            .use_text(text, style.size, pt(x), self.flip(y + style.size * ASCENT), font);
    }

    fn rule(&mut self, x1: f32, x2: f32, y: f32) {
        self.layer.set_outline_color(color(layout::BLACK));
        self.layer.set_outline_thickness(1.0);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(pt(x1), self.flip(y)), false),
                (Point::new(pt(x2), self.flip(y)), false),
            ],
            is_closed: false,
        });
    }

    fn image(&mut self, path: &Path, x: f32, y: f32, width: f32, height: Option<f32>) -> Result<(), ExportError> {
        if !path.is_file() {
            return Err(ExportError::asset(path, "file not found"));
        }
        let img = printpdf::image_crate::open(path).map_err(|e| ExportError::asset(path, e))?;
        let (pw, ph) = img.dimensions();
        if pw == 0 || ph == 0 {
            return Err(ExportError::asset(path, "image has no pixels"));
        }
        let (pw, ph) = (pw as f32, ph as f32);
        let height = height.unwrap_or(width * ph / pw);
        // at 72 dpi one pixel is one point
        Image::from_dynamic_image(&img).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(pt(x)),
                translate_y: Some(self.flip(y + height)),
                scale_x: Some(width / pw),
                scale_y: Some(height / ph),
                dpi: Some(72.0),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(pt(self.geometry.width), pt(self.geometry.height), LAYER);
        self.layer = self.doc.get_page(page).get_layer(layer);
    }
}
