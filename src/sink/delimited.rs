use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::aggregate::ReportTable;
use crate::error::Result;

/// Appends the report to `path` as UTF-8 comma-separated text, header first.
/// The file is never truncated or deduplicated: re-running accumulates rows.
/// This is the historical contract of the delimited report and intentionally
/// differs from the workbook sink's overwrite semantics.
pub fn append_report(path: &Path, table: &ReportTable) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut out = BufWriter::new(file);

    write_record(&mut out, table.columns.iter().map(String::as_str))?;
    for row in &table.rows {
        write_record(&mut out, row.cells.iter().map(String::as_str))?;
    }
    out.flush()?;

    info!(rows = table.rows.len(), path = %path.display(), "delimited report appended");
    Ok(())
}

fn write_record<'a, W: Write>(
    out: &mut W,
    cells: impl Iterator<Item = &'a str>,
) -> std::io::Result<()> {
    let encoded: Vec<String> = cells.map(escape_cell).collect();
    writeln!(out, "{}", encoded.join(","))
}

fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
