//! Reads the first sheet of the source workbook into [`RawRow`]s.
//!
//! The first row of the sheet's used range is the header. Blank header
//! cells become `__EMPTY`, and repeated labels get `_1`, `_2`, ... suffixes
//! so that labels are unique within a row. Rows whose every cell is blank
//! are dropped.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::IngestError;
use crate::row::{CellValue, RawRow};

const EMPTY_HEADER_LABEL: &str = "__EMPTY";

/// The rows of the first sheet, with the sheet's name for reporting.
#[derive(Debug, Clone)]
pub struct SourceSheet {
    pub sheet_name: String,
    pub rows: Vec<RawRow>,
}

/// Opens the workbook at `path` and reads its first sheet.
///
/// Supports every format `calamine` auto-detects (xlsx, xlsm, xlsb, xls, ods).
///
/// # Errors
///
/// - [`IngestError::SourceUnavailable`] if the file is missing, is not a
///   regular file, or cannot be opened as a workbook.
/// - [`IngestError::EmptyWorkbook`] if the workbook has no sheets.
/// - [`IngestError::Sheet`] if the first sheet cannot be decoded.
pub fn read_source(path: &Path) -> Result<SourceSheet, IngestError> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::SourceUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !metadata.is_file() {
        return Err(IngestError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: "not a regular file".to_string(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::SourceUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Sheet {
            path: path.to_path_buf(),
            sheet: sheet_name.clone(),
            reason: e.to_string(),
        })?;

    // Spreadsheet row numbers are 1-based; the used range may not start at A1.
    let first_row_number = range.start().map_or(1, |(row, _)| row as usize + 1);

    let mut grid = range.rows();
    let Some(header) = grid.next() else {
        tracing::info!(sheet = %sheet_name, "source sheet is empty");
        return Ok(SourceSheet {
            sheet_name,
            rows: Vec::new(),
        });
    };

    let labels = header_labels(header.iter().map(cell_value));
    let rows = grid
        .enumerate()
        .map(|(idx, cells)| {
            build_row(
                first_row_number + idx + 1,
                &labels,
                cells.iter().map(cell_value),
            )
        })
        .filter(|row| !row.is_blank())
        .collect::<Vec<_>>();

    tracing::info!(
        sheet = %sheet_name,
        columns = labels.len(),
        rows = rows.len(),
        "read source sheet"
    );

    Ok(SourceSheet { sheet_name, rows })
}

/// Builds unique column labels from the header cells.
pub(crate) fn header_labels<I>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = CellValue>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();

    cells
        .into_iter()
        .map(|cell| {
            let base = cell
                .as_text()
                .unwrap_or_else(|| EMPTY_HEADER_LABEL.to_string());
            let count = seen.entry(base.clone()).or_insert(0);
            let label = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            label
        })
        .collect()
}

pub(crate) fn build_row<I>(row_number: usize, labels: &[String], cells: I) -> RawRow
where
    I: IntoIterator<Item = CellValue>,
{
    RawRow::new(
        row_number,
        labels.iter().cloned().zip(cells).collect::<Vec<_>>(),
    )
}

/// Converts a calamine cell into a [`CellValue`].
///
/// Booleans become `TRUE`/`FALSE`, dates their serial number, and error
/// cells are treated as empty.
#[allow(clippy::cast_precision_loss)]
fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
    }
}
