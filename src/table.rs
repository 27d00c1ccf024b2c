//! Fixed-width text tables.
//!
//! ```text
//!
//! Commands:
//!
//!     Command    Description
//!     -------    -----------
//!     help       Show available commands.
//!
//! ```
//!
//! Column widths are measured on visible characters, so colored cells line
//! up with plain ones.

use crate::error::TableError;
use crate::markup::visible_width;

/// Spaces added after the widest cell of each column.
pub const COLUMN_FILL: usize = 4;

/// Indentation of every header and row line.
pub const INDENT: &str = "    ";

/// Render a titled table as text, one line per `\n`.
///
/// Rows with fewer cells than `headers` are padded with empty cells.
pub fn render_table<S: AsRef<str>>(
    name: &str,
    headers: &[&str],
    rows: &[Vec<S>],
) -> Result<String, TableError> {
    if headers.is_empty() {
        return Err(TableError::NoColumns);
    }
    if let Some((row, cells)) = rows
        .iter()
        .enumerate()
        .find(|(_, cells)| cells.len() > headers.len())
    {
        return Err(TableError::RowTooLong {
            row,
            cells: cells.len(),
            columns: headers.len(),
        });
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .filter_map(|cells| cells.get(column))
                .map(|cell| visible_width(cell.as_ref()))
                .chain(std::iter::once(visible_width(header)))
                .max()
                .unwrap_or(0)
                + COLUMN_FILL
        })
        .collect();

    let separators: Vec<String> = headers
        .iter()
        .map(|header| "-".repeat(visible_width(header)))
        .collect();

    let mut lines = vec![String::new(), format!("{}:", name), String::new()];
    lines.push(render_line(headers.iter().copied(), &widths));
    lines.push(render_line(separators.iter().map(String::as_str), &widths));
    for cells in rows {
        lines.push(render_line(cells.iter().map(AsRef::as_ref), &widths));
    }
    lines.push(String::new());

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::from(INDENT);
    for (cell, width) in cells.zip(widths) {
        line.push_str(cell);
        let pad = width.saturating_sub(visible_width(cell));
        line.extend(std::iter::repeat(' ').take(pad));
    }
    line.truncate(line.trim_end().len());
    line
}
