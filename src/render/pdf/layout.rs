// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Coordinate-based layout of a payout report.
//!
//! Positions are in points measured from the top-left corner of the page.
//! The vertical position is carried in a [`PageCursor`] that every step
//! takes by value and hands back advanced, so page breaks are explicit.
//! Drawing goes through [`Canvas`]; the layout never touches a PDF object.

use super::metrics::{self, Font};
use crate::error::ExportError;
use crate::logging::ExportLog;
use crate::models::{Report, TransactionView};
use std::path::Path;

pub const TITLE: &str = "Payment Report";
pub const LOGO_PLACEHOLDER: &str = "Logo unavailable";
pub const NO_TRANSACTIONS: &str = "No related transactions found.";
pub const TABLE_HEADER: [&str; 5] = ["Date", "Description", "ID", "Included Fees", "Net Amount"];

const TITLE_GAP: f32 = 60.0;
const LOGO_MAX_WIDTH: f32 = 150.0;
const LOGO_DEFAULT_WIDTH: f32 = 100.0;
const VALUE_OFFSET: f32 = 100.0;
const VALUE_PADDING: f32 = 10.0;

pub type Rgb = (u8, u8, u8);

pub const BLACK: Rgb = (0, 0, 0);
pub const BRAND: Rgb = (0x63, 0x5B, 0xFF);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(font: Font, size: f32) -> Self {
        TextStyle {
            font,
            size,
            color: BLACK,
        }
    }
}

const TITLE_STYLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 24.0,
    color: BRAND,
};
const LABEL_STYLE: TextStyle = TextStyle::new(Font::Bold, 12.0);
const VALUE_STYLE: TextStyle = TextStyle::new(Font::Regular, 12.0);
const HEADER_STYLE: TextStyle = TextStyle::new(Font::Bold, 12.0);
const ROW_STYLE: TextStyle = TextStyle::new(Font::Regular, 11.0);

/// Drawing surface. Coordinates are top-down points.
pub trait Canvas {
    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
    /// Horizontal rule at `y` from `x1` to `x2`.
    fn rule(&mut self, x1: f32, x2: f32, y: f32);
    /// Place an image with its top-left corner at (`x`, `y`). A missing
    /// `height` keeps the aspect ratio.
    fn image(&mut self, path: &Path, x: f32, y: f32, width: f32, height: Option<f32>) -> Result<(), ExportError>;
    fn new_page(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Distance from the bottom edge that rows must not cross.
    pub bottom_gap: f32,
    pub line_height: f32,
}

impl PageGeometry {
    pub fn a4_landscape() -> Self {
        PageGeometry {
            width: 841.89,
            height: 595.28,
            margin: 30.0,
            bottom_gap: 40.0,
            line_height: 20.0,
        }
    }

    pub fn with_height(self, height: f32) -> Self {
        PageGeometry { height, ..self }
    }

    pub fn bottom(&self) -> f32 {
        self.height - self.bottom_gap
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Rows that fit under a repeated table header on a continuation page.
    pub fn rows_per_page(&self) -> usize {
        let first_row = self.margin + self.line_height;
        let room = self.bottom() - first_row - self.line_height;
        if room < 0.0 {
            return 0;
        }
        (room / self.line_height).floor() as usize + 1
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4_landscape()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    pub y: f32,
    /// Zero-based.
    pub page: usize,
}

impl PageCursor {
    pub fn top(geo: &PageGeometry) -> Self {
        PageCursor {
            y: geo.margin,
            page: 0,
        }
    }

    pub fn advance(self, dy: f32) -> Self {
        PageCursor {
            y: self.y + dy,
            ..self
        }
    }

    pub fn next_page(self, geo: &PageGeometry) -> Self {
        PageCursor {
            y: geo.margin,
            page: self.page + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub title: &'static str,
    pub width: f32,
    pub align: Align,
}

/// Date, Description, ID, Included Fees, Net Amount. Description takes
/// whatever the fixed columns leave.
pub fn table_columns(geo: &PageGeometry) -> [Column; 5] {
    let description = (geo.content_width() - 560.0).max(0.0);
    let widths = [100.0, description, 200.0, 120.0, 130.0];
    let aligns = [Align::Left, Align::Left, Align::Left, Align::Right, Align::Right];
    std::array::from_fn(|i| Column {
        title: TABLE_HEADER[i],
        width: widths[i],
        align: aligns[i],
    })
}

pub fn layout_report<C: Canvas>(canvas: &mut C, report: &Report, geo: &PageGeometry, log: &ExportLog) -> PageCursor {
    let cursor = PageCursor::top(geo);
    let cursor = layout_header(canvas, cursor, report, geo, log);
    let cursor = layout_details(canvas, cursor, report, geo);
    if report.transactions.is_empty() {
        canvas.text(NO_TRANSACTIONS, geo.margin, cursor.y, ROW_STYLE);
        cursor.advance(geo.line_height)
    } else {
        layout_table(canvas, cursor, &report.transactions, geo)
    }
}

/// Title on the left, logo (or its placeholder) on the right.
pub fn layout_header<C: Canvas>(
    canvas: &mut C,
    cursor: PageCursor,
    report: &Report,
    geo: &PageGeometry,
    log: &ExportLog,
) -> PageCursor {
    canvas.text(TITLE, geo.margin, geo.margin, TITLE_STYLE);

    if let Some(logo) = report.logo.as_ref().filter(|l| !l.url.is_empty()) {
        let width = logo
            .width
            .map(|w| (w as f32).min(LOGO_MAX_WIDTH))
            .unwrap_or(LOGO_DEFAULT_WIDTH);
        let x = geo.width - geo.margin - width;
        let height = logo.height.map(|h| h as f32);
        if let Err(e) = canvas.image(Path::new(&logo.url), x, geo.margin, width, height) {
            log.warn(format!("Error loading logo: {}", e));
            canvas.text(
                LOGO_PLACEHOLDER,
                geo.width - geo.margin - LOGO_DEFAULT_WIDTH,
                geo.margin,
                VALUE_STYLE,
            );
        }
    }

    cursor.advance(TITLE_GAP)
}

fn detail_fields(report: &Report) -> [(&'static str, String); 6] {
    let p = &report.payout;
    [
        ("Payout ID", p.id.clone()),
        ("Amount", format!("{} {}", p.amount, p.currency)),
        ("Date", p.date.clone()),
        ("Status", p.status.to_string()),
        ("Total Fees", format!("{} {}", p.total_fees, p.currency)),
        ("# Invoices", p.number_of_invoices.to_string()),
    ]
}

/// Six label/value pairs, two per row.
pub fn layout_details<C: Canvas>(canvas: &mut C, cursor: PageCursor, report: &Report, geo: &PageGeometry) -> PageCursor {
    let fields = detail_fields(report);
    let column = geo.content_width() / 2.0;
    let value_width = column - VALUE_OFFSET - VALUE_PADDING;

    let mut rows = 0;
    for (row, pair) in fields.chunks(2).enumerate() {
        let y = cursor.y + row as f32 * geo.line_height;
        for (i, (label, value)) in pair.iter().enumerate() {
            let x = geo.margin + i as f32 * column;
            canvas.text(&format!("{}:", label), x, y, LABEL_STYLE);
            let value = metrics::fit(value, VALUE_STYLE.font, VALUE_STYLE.size, value_width);
            canvas.text(&value, x + VALUE_OFFSET, y, VALUE_STYLE);
        }
        rows += 1;
    }

    cursor.advance(rows as f32 * geo.line_height + geo.line_height)
}

/// Transaction rows with a header on every page they occupy.
///
/// A page break happens before a row that would cross the bottom limit,
/// unless it is the last row: that one is drawn where it is rather than
/// opening a page of its own.
pub fn layout_table<C: Canvas>(
    canvas: &mut C,
    cursor: PageCursor,
    rows: &[TransactionView],
    geo: &PageGeometry,
) -> PageCursor {
    let columns = table_columns(geo);
    let mut cursor = table_header(canvas, cursor, &columns, geo);

    for (i, txn) in rows.iter().enumerate() {
        let last = i + 1 == rows.len();
        if cursor.y + geo.line_height > geo.bottom() && !last {
            canvas.new_page();
            cursor = table_header(canvas, cursor.next_page(geo), &columns, geo);
        }
        cursor = cursor.advance(geo.line_height);
        let cells = [
            txn.created.clone(),
            txn.description.clone(),
            txn.transaction_id.clone(),
            format!("{} {}", txn.fees, txn.currency),
            format!("{} {}", txn.net, txn.currency),
        ];
        draw_cells(canvas, cursor.y, &cells, &columns, geo, ROW_STYLE);
    }
    cursor
}

fn table_header<C: Canvas>(canvas: &mut C, cursor: PageCursor, columns: &[Column; 5], geo: &PageGeometry) -> PageCursor {
    let titles = TABLE_HEADER.map(String::from);
    draw_cells(canvas, cursor.y, &titles, columns, geo, HEADER_STYLE);
    let cursor = cursor.advance(geo.line_height);
    let table_width: f32 = columns.iter().map(|c| c.width).sum();
    canvas.rule(geo.margin, geo.margin + table_width, cursor.y);
    cursor
}

/// One line of cells, clipped to their columns.
fn draw_cells<C: Canvas>(canvas: &mut C, y: f32, cells: &[String; 5], columns: &[Column; 5], geo: &PageGeometry, style: TextStyle) {
    let mut x = geo.margin;
    for (cell, col) in cells.iter().zip(columns) {
        let text = metrics::fit(cell, style.font, style.size, col.width);
        let cx = match col.align {
            Align::Left => x,
            Align::Right => x + col.width - metrics::text_width(&text, style.font, style.size),
        };
        if !text.is_empty() {
            canvas.text(&text, cx, y, style);
        }
        x += col.width;
    }
}
