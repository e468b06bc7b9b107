//! Sheet schema validation and XLSX writing.
//!
//! The service's JSON is validated against the declared sheet specs before
//! anything touches disk: unknown sheets, unknown columns, and non-scalar
//! cells are typed errors, never silently coerced.

use crate::error::{ReportError, Result};
use crate::generate::SheetTables;
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declared shape of one output sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSpec {
    /// Worksheet name
    pub name: String,
    /// Column headers, in write order
    pub columns: Vec<String>,
}

impl SheetSpec {
    /// Create a spec with the given name and columns.
    pub fn new(name: impl Into<String>, columns: Vec<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// A sheet ready to write: header plus stringified rows in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSheet {
    /// Worksheet name
    pub name: String,
    /// Column headers
    pub columns: Vec<String>,
    /// Cell values, one inner vec per row, aligned with `columns`
    pub rows: Vec<Vec<String>>,
}

/// Validate generated tables against the declared specs and render them.
///
/// Sheets come out in spec order. A declared sheet the service omitted
/// renders header-only; a sheet the service invented, a column outside the
/// spec, or a non-scalar cell is a [`ReportError::UnexpectedShape`].
/// Missing fields render as empty strings.
pub fn validate_tables(tables: &SheetTables, specs: &[SheetSpec]) -> Result<Vec<RenderedSheet>> {
    if let Some(unknown) = tables.keys().find(|name| !specs.iter().any(|s| &s.name == *name)) {
        return Err(ReportError::UnexpectedShape {
            sheet: unknown.clone(),
            detail: "sheet was not declared".to_string(),
        });
    }

    let mut rendered = Vec::with_capacity(specs.len());
    for spec in specs {
        let rows = tables.get(&spec.name).map(Vec::as_slice).unwrap_or(&[]);

        let mut out_rows = Vec::with_capacity(rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            if let Some(key) = row.keys().find(|k| !spec.columns.contains(k)) {
                return Err(ReportError::UnexpectedShape {
                    sheet: spec.name.clone(),
                    detail: format!("row {row_idx} has undeclared column '{key}'"),
                });
            }

            let mut cells = Vec::with_capacity(spec.columns.len());
            for column in &spec.columns {
                let value = row.get(column).unwrap_or(&serde_json::Value::Null);
                cells.push(render_cell(value).ok_or_else(|| ReportError::UnexpectedShape {
                    sheet: spec.name.clone(),
                    detail: format!("row {row_idx}, column '{column}' is not a scalar"),
                })?);
            }
            out_rows.push(cells);
        }

        rendered.push(RenderedSheet {
            name: spec.name.clone(),
            columns: spec.columns.clone(),
            rows: out_rows,
        });
    }

    Ok(rendered)
}

/// Scalar JSON -> cell text; arrays and objects are rejected upstream.
fn render_cell(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => Some(String::new()),
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
    }
}

/// Sink for rendered sheets.
pub trait WorkbookWriter {
    /// Write `sheets` as a workbook at `out`.
    fn write(&self, sheets: &[RenderedSheet], out: &Path) -> Result<()>;
}

/// Writes a binary `.xlsx` workbook.
#[derive(Debug, Clone, Default)]
pub struct XlsxWriter;

impl WorkbookWriter for XlsxWriter {
    fn write(&self, sheets: &[RenderedSheet], out: &Path) -> Result<()> {
        let mut workbook = Workbook::new();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .map_err(|e| ReportError::Write(e.to_string()))?;

            for (col, header) in sheet.columns.iter().enumerate() {
                worksheet
                    .write_string(0, col as u16, header)
                    .map_err(|e| ReportError::Write(e.to_string()))?;
            }
            for (row_idx, row) in sheet.rows.iter().enumerate() {
                for (col, cell) in row.iter().enumerate() {
                    worksheet
                        .write_string(row_idx as u32 + 1, col as u16, cell)
                        .map_err(|e| ReportError::Write(e.to_string()))?;
                }
            }
        }

        workbook
            .save(out)
            .map_err(|e| ReportError::Write(e.to_string()))?;

        tracing::debug!(sheets = sheets.len(), path = %out.display(), "workbook written");
        Ok(())
    }
}
