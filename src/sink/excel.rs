use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use tracing::info;

use crate::aggregate::{RACK_COLUMNS, RackGroup, ReportTable};
use crate::error::Result;

/// Writes the single-sheet device workbook. Any existing file at `path` is
/// replaced, so workbook output is stable across repeated runs.
pub fn write_device_workbook(path: &Path, table: &ReportTable) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let data_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();

    for (col, header) in table.columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }
    for (row, line) in table.rows.iter().enumerate() {
        for (col, cell) in line.cells.iter().enumerate() {
            worksheet.write_string_with_format((row + 1) as u32, col as u16, cell, &data_format)?;
        }
    }

    autofit_columns(
        worksheet,
        &table.columns,
        table.rows.iter().map(|row| row.cells.as_slice()),
    )?;

    workbook.save(path)?;
    info!(rows = table.rows.len(), path = %path.display(), "device workbook written");
    Ok(())
}

/// Writes the rack workbook: one sheet per rack, named after the rack, with
/// the fixed five-column summary header. Only rack sheets end up in the file.
/// Any existing workbook at `path` is replaced.
pub fn write_rack_workbook(path: &Path, groups: &[RackGroup]) -> Result<()> {
    let mut workbook = Workbook::new();
    let mut sheet_names = SheetNameRegistry::default();

    for group in groups {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_names.assign(&group.rack))?;

        for (col, header) in RACK_COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }
        for (row, device) in group.devices.iter().enumerate() {
            for (col, cell) in device.cells().iter().enumerate() {
                worksheet.write_string((row + 1) as u32, col as u16, *cell)?;
            }
        }
    }

    workbook.save(path)?;
    info!(sheets = groups.len(), path = %path.display(), "rack workbook written");
    Ok(())
}

/// Sizes every column to its longest stringified cell plus two characters of
/// padding. The header row participates in the measurement.
fn autofit_columns<'a>(
    worksheet: &mut Worksheet,
    columns: &[String],
    rows: impl Iterator<Item = &'a [String]>,
) -> Result<()> {
    let mut widths: Vec<usize> = columns.iter().map(|column| column.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx < widths.len() {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }
    }
    for (idx, width) in widths.iter().enumerate() {
        worksheet.set_column_width(idx as u16, (*width + 2) as f64)?;
    }
    Ok(())
}

/// Allocates unique, Excel-legal sheet names. Rack names may repeat or carry
/// characters the format forbids, so collisions get a numeric suffix.
#[derive(Debug, Default)]
struct SheetNameRegistry {
    used: HashSet<String>,
}

impl SheetNameRegistry {
    fn assign(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        if self.used.insert(base.clone()) {
            return base;
        }

        let mut counter = 1;
        loop {
            let suffix = format!("_{counter}");
            let max_len = 31 - suffix.len();
            let prefix: String = base.chars().take(max_len).collect();
            let candidate = format!("{prefix}{suffix}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']', '\'', '"'];
    let mut sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    sanitized = sanitized.trim().to_string();
    if sanitized.is_empty() {
        sanitized = "Rack".to_string();
    }
    // The 31-character limit counts characters, not bytes.
    if sanitized.chars().count() > 31 {
        sanitized = sanitized.chars().take(31).collect();
    }

    sanitized
}
