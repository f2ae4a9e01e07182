//! # Record Table
//!
//! Renders stored records as a bordered grid:
//!
//! ```text
//! ┌────────────┬─────┬──────────────────┐
//! │ Name       │ Age │ Email            │
//! ├────────────┼─────┼──────────────────┤
//! │ John Smith │ 30  │ john@example.com │
//! └────────────┴─────┴──────────────────┘
//! ```
//!
//! Glyphs come from [`TableBorders`], so a caller can swap in ASCII or
//! double-line borders. Column widths are measured in terminal cells.

use unicode_width::UnicodeWidthStr;

use crate::core::record::Record;

const HEADERS: [&str; 3] = ["Name", "Age", "Email"];

/// The glyphs used to draw a table. Defaults to light box-drawing lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBorders {
    pub top_left_corner: String,
    pub bottom_left_corner: String,
    pub top_right_corner: String,
    pub bottom_right_corner: String,
    pub cross: String,
    pub left_t_cross: String,
    pub right_t_cross: String,
    pub top_t_cross: String,
    pub bottom_t_cross: String,
    pub vertical: String,
    pub horizontal: String,
}

impl Default for TableBorders {
    fn default() -> Self {
        Self {
            top_left_corner: "┌".to_string(),
            bottom_left_corner: "└".to_string(),
            top_right_corner: "┐".to_string(),
            bottom_right_corner: "┘".to_string(),
            cross: "┼".to_string(),
            left_t_cross: "├".to_string(),
            right_t_cross: "┤".to_string(),
            top_t_cross: "┬".to_string(),
            bottom_t_cross: "┴".to_string(),
            vertical: "│".to_string(),
            horizontal: "─".to_string(),
        }
    }
}

impl TableBorders {
    /// Plain `+`, `|` and `-` borders for terminals without box drawing.
    pub fn ascii() -> Self {
        Self {
            top_left_corner: "+".to_string(),
            bottom_left_corner: "+".to_string(),
            top_right_corner: "+".to_string(),
            bottom_right_corner: "+".to_string(),
            cross: "+".to_string(),
            left_t_cross: "+".to_string(),
            right_t_cross: "+".to_string(),
            top_t_cross: "+".to_string(),
            bottom_t_cross: "+".to_string(),
            vertical: "|".to_string(),
            horizontal: "-".to_string(),
        }
    }

    /// A horizontal rule: `left`, then one run of `horizontal` per column
    /// joined by `join`, then `right`.
    fn rule(&self, widths: &[usize], left: &str, join: &str, right: &str) -> String {
        let runs: Vec<String> = widths
            .iter()
            .map(|w| self.horizontal.repeat(w + 2))
            .collect();
        format!("{left}{}{right}", runs.join(join))
    }

    fn row(&self, cells: &[&str], widths: &[usize]) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!(" {}{} ", cell, " ".repeat(w - cell.width())))
            .collect();
        format!(
            "{v}{}{v}",
            padded.join(self.vertical.as_str()),
            v = self.vertical
        )
    }
}

/// Lay out `records` as table lines, header first.
pub fn render_records(records: &[Record], borders: &TableBorders) -> Vec<String> {
    let rows: Vec<[String; 3]> = records
        .iter()
        .map(|r| [r.name.clone(), r.age.to_string(), r.email.clone()])
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let b = borders;
    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(b.rule(&widths, &b.top_left_corner, &b.top_t_cross, &b.top_right_corner));
    lines.push(b.row(&HEADERS, &widths));
    if !rows.is_empty() {
        lines.push(b.rule(&widths, &b.left_t_cross, &b.cross, &b.right_t_cross));
    }
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(b.row(&cells, &widths));
    }
    lines.push(b.rule(
        &widths,
        &b.bottom_left_corner,
        &b.bottom_t_cross,
        &b.bottom_right_corner,
    ));
    lines
}
