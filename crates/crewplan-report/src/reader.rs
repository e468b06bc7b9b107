//! Workbook reading: the input-side counterpart of the XLSX writer.
//!
//! Structured project inputs often arrive as spreadsheets already (a data
//! sheet plus a definitions sheet, headers in the first row). The reader
//! turns every sheet into the same row-object shape the generator emits,
//! so [`crate::workbook::validate_tables`] covers read input and generated
//! output alike.

use crate::error::{ReportError, Result};
use crate::generate::SheetTables;
use calamine::Reader;
use std::path::Path;

/// Source of sheet tables read back from a workbook file.
pub trait WorkbookReader {
    /// Read every sheet of the workbook at `path` as header-keyed rows.
    fn read(&self, path: &Path) -> Result<SheetTables>;
}

/// Reads `.xlsx` (and `.xls`/`.ods`) workbooks.
#[derive(Debug, Clone, Default)]
pub struct XlsxReader;

impl WorkbookReader for XlsxReader {
    fn read(&self, path: &Path) -> Result<SheetTables> {
        let mut workbook = calamine::open_workbook_auto(path)
            .map_err(|e| ReportError::Extraction(format!("failed to open workbook: {e}")))?;

        let sheet_names: Vec<String> = workbook
            .sheet_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut tables = SheetTables::new();
        for sheet_name in &sheet_names {
            let range = workbook.worksheet_range(sheet_name).map_err(|e| {
                ReportError::Extraction(format!("unreadable sheet '{sheet_name}': {e}"))
            })?;

            let mut rows_iter = range.rows();
            let Some(header_row) = rows_iter.next() else {
                tables.insert(sheet_name.clone(), Vec::new());
                continue;
            };
            let headers = parse_headers(sheet_name, header_row)?;

            let mut rows = Vec::new();
            for row in rows_iter {
                let mut object = serde_json::Map::new();
                for (col, header) in &headers {
                    if let Some(value) = row.get(*col).and_then(cell_value) {
                        object.insert(header.clone(), value);
                    }
                }
                // Fully blank rows carry no data, skip them.
                if !object.is_empty() {
                    rows.push(object);
                }
            }
            tables.insert(sheet_name.clone(), rows);
        }

        tracing::debug!(sheets = tables.len(), path = %path.display(), "workbook read");
        Ok(tables)
    }
}

/// First-row headers as (column, name) pairs. Columns with a blank header
/// are ignored; duplicate headers would silently drop cells, so they are
/// rejected.
fn parse_headers(sheet: &str, header_row: &[calamine::Data]) -> Result<Vec<(usize, String)>> {
    let mut headers: Vec<(usize, String)> = Vec::new();
    for (col, cell) in header_row.iter().enumerate() {
        let name = cell.to_string().trim().to_string();
        if name.is_empty() {
            continue;
        }
        if headers.iter().any(|(_, existing)| existing == &name) {
            return Err(ReportError::UnexpectedShape {
                sheet: sheet.to_string(),
                detail: format!("duplicate header '{name}'"),
            });
        }
        headers.push((col, name));
    }
    Ok(headers)
}

/// Cell -> JSON value; empty cells read as absent fields.
fn cell_value(cell: &calamine::Data) -> Option<serde_json::Value> {
    match cell {
        calamine::Data::Empty => None,
        calamine::Data::String(s) if s.is_empty() => None,
        calamine::Data::String(s) => Some(serde_json::Value::String(s.clone())),
        calamine::Data::Int(i) => Some(serde_json::Value::from(*i)),
        calamine::Data::Float(f) => Some(
            serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
        ),
        calamine::Data::Bool(b) => Some(serde_json::Value::Bool(*b)),
        // Dates, durations, and cell errors keep their display form.
        other => Some(serde_json::Value::String(other.to_string())),
    }
}
