//! PDF report renderer using lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use tracing::debug;

use super::{tables, title, Result, ReportRenderer, Table, GRAND_TOTAL_LABEL};
use crate::receipt::rules::format_price;
use crate::summary::Report;

// A4 in points.
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;

const COLUMN_WIDTHS: [f32; 3] = [250.0, 100.0, 100.0];
const ROW_HEIGHT: f32 = 14.0;
const CELL_PADDING: f32 = 4.0;
const FONT_SIZE: f32 = 9.0;
const TITLE_SIZE: f32 = 16.0;
const TITLE_SPACING: f32 = 12.0;

const HEADER_GREY: f32 = 0.83;
const GRID_GREY: f32 = 0.5;
const GRID_LINE_WIDTH: f32 = 0.5;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Renders the report as an A4 PDF with Helvetica text.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    currency_suffix: String,
}

impl PdfRenderer {
    pub fn new(currency_suffix: &str) -> Self {
        Self {
            currency_suffix: currency_suffix.to_string(),
        }
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new("€")
    }
}

fn num(value: f32) -> Object {
    value.into()
}

/// Encode text for the WinAnsi font encoding. Unmappable characters become '?'.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

/// Rough Helvetica text width; glyphs average about half the font size.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.52
}

fn table_left() -> f32 {
    (PAGE_WIDTH - COLUMN_WIDTHS.iter().sum::<f32>()) / 2.0
}

fn column_left(column: usize) -> f32 {
    table_left() + COLUMN_WIDTHS[..column].iter().sum::<f32>()
}

/// Accumulates drawing operations, starting a new page when one fills up.
struct PageWriter {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn fits(&self, height: f32) -> bool {
        self.y - height >= MARGIN
    }

    fn new_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(ops);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn text(&mut self, font: &str, size: f32, x: f32, baseline: f32, text: &str) {
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), num(size)]),
            Operation::new("Td", vec![num(x), num(baseline)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, grey: f32) {
        self.ops.extend([
            Operation::new("q", vec![]),
            Operation::new("g", vec![num(grey)]),
            Operation::new("re", vec![num(x), num(y), num(width), num(height)]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.extend([
            Operation::new("q", vec![]),
            Operation::new("G", vec![num(GRID_GREY)]),
            Operation::new("w", vec![num(GRID_LINE_WIDTH)]),
            Operation::new("re", vec![num(x), num(y), num(width), num(height)]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn title(&mut self, text: &str) {
        let x = ((PAGE_WIDTH - text_width(text, TITLE_SIZE)) / 2.0).max(MARGIN);
        self.y -= TITLE_SIZE;
        self.text(BOLD_FONT, TITLE_SIZE, x, self.y, text);
        self.y -= TITLE_SPACING;
    }

    /// One grid row. The name column is left-aligned, the others centered.
    fn row(&mut self, cells: &[String; 3], header: bool) {
        let bottom = self.y - ROW_HEIGHT;
        let baseline = bottom + (ROW_HEIGHT - FONT_SIZE) / 2.0 + 1.5;
        let font = if header { BOLD_FONT } else { REGULAR_FONT };

        if header {
            let width = COLUMN_WIDTHS.iter().sum::<f32>();
            self.fill_rect(table_left(), bottom, width, ROW_HEIGHT, HEADER_GREY);
        }

        for (column, cell) in cells.iter().enumerate() {
            let left = column_left(column);
            let width = COLUMN_WIDTHS[column];
            self.stroke_rect(left, bottom, width, ROW_HEIGHT);

            let x = if column == 0 {
                left + CELL_PADDING
            } else {
                left + ((width - text_width(cell, FONT_SIZE)) / 2.0).max(CELL_PADDING)
            };
            self.text(font, FONT_SIZE, x, baseline, cell);
        }

        self.y = bottom;
    }

    /// Bold label with the amount under the price column.
    fn total_line(&mut self, label: &str, amount: &str) {
        let bottom = self.y - ROW_HEIGHT;
        let baseline = bottom + (ROW_HEIGHT - FONT_SIZE) / 2.0 + 1.5;
        let price_left = column_left(2);
        let amount_x = price_left
            + ((COLUMN_WIDTHS[2] - text_width(amount, FONT_SIZE)) / 2.0).max(CELL_PADDING);

        self.text(BOLD_FONT, FONT_SIZE, table_left() + CELL_PADDING, baseline, label);
        self.text(BOLD_FONT, FONT_SIZE, amount_x, baseline, amount);
        self.y = bottom;
    }

    /// Table with its header repeated on every page it spans, then its subtotal.
    fn table(&mut self, table: &Table) {
        if !self.fits(2.0 * ROW_HEIGHT) {
            self.new_page();
        }
        self.row(&table.header, true);

        for cells in &table.rows {
            if !self.fits(ROW_HEIGHT) {
                self.new_page();
                self.row(&table.header, true);
            }
            self.row(cells, false);
        }

        if !self.fits(ROW_HEIGHT) {
            self.new_page();
        }
        self.total_line(&table.subtotal.0, &table.subtotal.1);
        self.y -= ROW_HEIGHT;
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.pages.push(self.ops);
        self.pages
    }
}

impl PdfRenderer {
    fn layout(&self, report: &Report) -> Vec<Vec<Operation>> {
        let mut writer = PageWriter::new();
        writer.title(&title(report.date));

        for table in tables(report, &self.currency_suffix) {
            writer.table(&table);
        }

        if !writer.fits(ROW_HEIGHT) {
            writer.new_page();
        }
        let grand_total = format_price(report.grand_total, &self.currency_suffix);
        writer.total_line(GRAND_TOTAL_LABEL, &grand_total);

        writer.finish()
    }
}

impl ReportRenderer for PdfRenderer {
    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let pages = self.layout(report);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT => regular_id,
                BOLD_FONT => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for operations in pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let media_box: Vec<Object> = vec![
            Object::Integer(0),
            Object::Integer(0),
            num(PAGE_WIDTH),
            num(PAGE_HEIGHT),
        ];
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => media_box,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;

        debug!("Rendered {} PDF pages ({} bytes)", page_count, bytes.len());
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}
