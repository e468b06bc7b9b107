//! Crewplan Report - Brief-to-workbook pipeline
//!
//! Converts a project brief document into a multi-sheet XLSX report via a
//! text-generation service. A strictly sequential pipeline over three
//! collaborators, each behind a trait:
//!
//! 1. **Document extractor** (`extract`): document path -> ordered
//!    paragraph strings. DOCX and plain-text implementations included.
//! 2. **Table generator** (`generate`): system instruction + prompt +
//!    paragraphs -> JSON object keyed by sheet name. An OpenAI-compatible
//!    client with a strict-JSON response mode is included.
//! 3. **Workbook writer** (`workbook`): rendered sheets -> binary workbook.
//!
//! Structured inputs that are already spreadsheets come in through the
//! **workbook reader** (`reader`), which yields the same header-keyed row
//! shape the generator emits, so one validation path serves both.
//!
//! Generated JSON is validated against the declared [`SheetSpec`]s before
//! any write, so a wrong-shaped service response is a typed error instead
//! of a silently coerced spreadsheet.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod error;
pub mod extract;
pub mod generate;
pub mod pipeline;
pub mod reader;
pub mod workbook;

pub use error::{ReportError, Result};
pub use extract::{DocumentExtractor, DocxExtractor, PlainTextExtractor};
pub use generate::{OpenAiCompatibleClient, SheetTables, TableGenerator};
pub use pipeline::{ReportPipeline, ReportSummary};
pub use reader::{WorkbookReader, XlsxReader};
pub use workbook::{RenderedSheet, SheetSpec, WorkbookWriter, XlsxWriter};
