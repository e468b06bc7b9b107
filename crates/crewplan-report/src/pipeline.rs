//! The report pipeline: extract, generate, validate, write.
//!
//! A thin sequential wrapper over the three collaborators. Prompt content
//! and sheet layout are configuration; the pipeline's own job is ordering
//! the stages and keeping their failures distinct.

use crate::error::{ReportError, Result};
use crate::extract::DocumentExtractor;
use crate::generate::TableGenerator;
use crate::workbook::{validate_tables, SheetSpec, WorkbookWriter};
use std::path::Path;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Paragraphs extracted from the source document
    pub paragraphs: usize,
    /// Sheets written (always the declared count)
    pub sheets: usize,
    /// Data rows written across all sheets
    pub rows: usize,
}

/// Converts a brief document into a multi-sheet workbook.
pub struct ReportPipeline<E, G, W> {
    extractor: E,
    generator: G,
    writer: W,
    sheets: Vec<SheetSpec>,
    system: String,
    prompt: String,
}

impl<E, G, W> ReportPipeline<E, G, W>
where
    E: DocumentExtractor,
    G: TableGenerator,
    W: WorkbookWriter,
{
    /// Assemble a pipeline from its three collaborators.
    pub fn new(extractor: E, generator: G, writer: W) -> Self {
        Self {
            extractor,
            generator,
            writer,
            sheets: Vec::new(),
            system: "You are a project operations analyst. Respond with a single JSON \
                     object keyed by sheet name; each value is an array of row objects. \
                     No prose, no markdown."
                .to_string(),
            prompt: "Extract the report tables from the following brief.".to_string(),
        }
    }

    /// Declare an output sheet. Sheets are written in declaration order.
    pub fn with_sheet(mut self, spec: SheetSpec) -> Self {
        self.sheets.push(spec);
        self
    }

    /// Replace the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = system.into();
        self
    }

    /// Replace the prompt template.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Run the pipeline: `doc` in, workbook at `out`.
    pub async fn run(&self, doc: &Path, out: &Path) -> Result<ReportSummary> {
        if self.sheets.is_empty() {
            return Err(ReportError::Write("no sheets declared".to_string()));
        }

        tracing::info!(doc = %doc.display(), "report run started");
        let paragraphs = self.extractor.extract(doc)?;

        let prompt = self.render_prompt();
        let tables = self
            .generator
            .generate(&self.system, &prompt, &paragraphs)
            .await?;

        let rendered = validate_tables(&tables, &self.sheets)?;
        self.writer.write(&rendered, out)?;

        let summary = ReportSummary {
            paragraphs: paragraphs.len(),
            sheets: rendered.len(),
            rows: rendered.iter().map(|s| s.rows.len()).sum(),
        };
        tracing::info!(?summary, out = %out.display(), "report run finished");
        Ok(summary)
    }

    /// Fold the declared sheet shapes into the prompt so the service knows
    /// exactly which keys to emit.
    fn render_prompt(&self) -> String {
        let shapes: Vec<String> = self
            .sheets
            .iter()
            .map(|s| format!("\"{}\": columns [{}]", s.name, s.columns.join(", ")))
            .collect();
        format!("{}\nExpected sheets: {}", self.prompt, shapes.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::SheetTables;
    use crate::workbook::RenderedSheet;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct FixedExtractor(Vec<String>);

    impl DocumentExtractor for FixedExtractor {
        fn extract(&self, _path: &Path) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FixedGenerator(&'static str);

    #[async_trait::async_trait]
    impl TableGenerator for FixedGenerator {
        async fn generate(
            &self,
            _system: &str,
            _prompt: &str,
            _paragraphs: &[String],
        ) -> Result<SheetTables> {
            Ok(serde_json::from_str(self.0).unwrap())
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        written: Mutex<Vec<(Vec<RenderedSheet>, PathBuf)>>,
    }

    impl WorkbookWriter for &RecordingWriter {
        fn write(&self, sheets: &[RenderedSheet], out: &Path) -> Result<()> {
            self.written
                .lock()
                .unwrap()
                .push((sheets.to_vec(), out.to_path_buf()));
            Ok(())
        }
    }

    fn costs_spec() -> SheetSpec {
        SheetSpec::new("Costs", vec!["Item", "Total"])
    }

    #[tokio::test]
    async fn test_run_sequences_all_stages() {
        let writer = RecordingWriter::default();
        let pipeline = ReportPipeline::new(
            FixedExtractor(vec!["Brief body".to_string()]),
            FixedGenerator(r#"{"Costs":[{"Item":"Recruiting","Total":900}]}"#),
            &writer,
        )
        .with_sheet(costs_spec());

        let summary = pipeline
            .run(Path::new("brief.docx"), Path::new("report.xlsx"))
            .await
            .unwrap();

        assert_eq!(
            summary,
            ReportSummary {
                paragraphs: 1,
                sheets: 1,
                rows: 1,
            }
        );
        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0[0].rows, [["Recruiting", "900"]]);
    }

    #[tokio::test]
    async fn test_bad_shape_never_reaches_the_writer() {
        let writer = RecordingWriter::default();
        let pipeline = ReportPipeline::new(
            FixedExtractor(vec!["Brief body".to_string()]),
            FixedGenerator(r#"{"Costs":[{"Margin":0.4}]}"#),
            &writer,
        )
        .with_sheet(costs_spec());

        let err = pipeline
            .run(Path::new("brief.docx"), Path::new("report.xlsx"))
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::UnexpectedShape { .. }));
        assert!(writer.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_declared_sheets_is_an_error() {
        let writer = RecordingWriter::default();
        let pipeline = ReportPipeline::new(
            FixedExtractor(vec!["Brief body".to_string()]),
            FixedGenerator("{}"),
            &writer,
        );

        assert!(pipeline
            .run(Path::new("brief.docx"), Path::new("report.xlsx"))
            .await
            .is_err());
    }

    #[test]
    fn test_prompt_includes_declared_shapes() {
        let pipeline = ReportPipeline::new(
            FixedExtractor(vec![]),
            FixedGenerator("{}"),
            crate::workbook::XlsxWriter,
        )
        .with_sheet(costs_spec());

        let prompt = pipeline.render_prompt();
        assert!(prompt.contains("\"Costs\": columns [Item, Total]"));
    }
}
