//! Plain-text report renderer.

use super::{tables, title, Result, ReportRenderer, Table, GRAND_TOTAL_LABEL};
use crate::receipt::rules::format_price;
use crate::summary::Report;

/// Gap between columns.
const GAP: usize = 3;

/// Renders the report as a fixed-width text document.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    currency_suffix: String,
}

impl TextRenderer {
    pub fn new(currency_suffix: &str) -> Self {
        Self {
            currency_suffix: currency_suffix.to_string(),
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new("€")
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

/// Column widths shared by every table so the totals line up.
fn column_widths(tables: &[Table], grand_total: &str) -> [usize; 3] {
    let mut widths = [0usize; 3];

    for table in tables {
        for row in std::iter::once(&table.header).chain(table.rows.iter()) {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(width(cell));
            }
        }
        widths[2] = widths[2].max(width(&table.subtotal.1));
    }
    widths[2] = widths[2].max(width(grand_total));

    widths
}

fn push_row(out: &mut String, cells: [&str; 3], widths: [usize; 3]) {
    let line = format!(
        "{:<w0$}{gap}{:<w1$}{gap}{:>w2$}",
        cells[0],
        cells[1],
        cells[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        gap = " ".repeat(GAP),
    );
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Label left, amount right-aligned under the price column.
fn push_total(out: &mut String, label: &str, amount: &str, widths: [usize; 3]) {
    let line_width = widths[0] + widths[1] + widths[2] + 2 * GAP;
    let pad = line_width.saturating_sub(width(label) + width(amount)).max(1);
    out.push_str(label);
    out.push_str(&" ".repeat(pad));
    out.push_str(amount);
    out.push('\n');
}

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let tables = tables(report, &self.currency_suffix);
        let grand_total = format_price(report.grand_total, &self.currency_suffix);
        let widths = column_widths(&tables, &grand_total);
        let rule = "-".repeat(widths[0] + widths[1] + widths[2] + 2 * GAP);

        let mut out = String::new();
        out.push_str(&title(report.date));
        out.push_str("\n\n");

        for table in &tables {
            let [a, b, c] = &table.header;
            push_row(&mut out, [a, b, c], widths);
            out.push_str(&rule);
            out.push('\n');

            for [name, quantity, price] in &table.rows {
                push_row(&mut out, [name, quantity, price], widths);
            }

            out.push_str(&rule);
            out.push('\n');
            push_total(&mut out, &table.subtotal.0, &table.subtotal.1, widths);
            out.push('\n');
        }

        push_total(&mut out, GRAND_TOTAL_LABEL, &grand_total, widths);

        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}
