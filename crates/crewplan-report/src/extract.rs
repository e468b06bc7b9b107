//! Document text extraction.
//!
//! The pipeline only needs ordered paragraph strings; where they come from
//! is behind [`DocumentExtractor`]. The DOCX implementation walks the
//! `word/document.xml` entry of the ZIP container and collects `<w:t>` runs
//! per `<w:p>` paragraph.

use crate::error::{ReportError, Result};
use std::io::Read;
use std::path::Path;

/// Source of paragraph text for the pipeline.
pub trait DocumentExtractor {
    /// Extract the document's paragraphs, in document order.
    fn extract(&self, path: &Path) -> Result<Vec<String>>;
}

/// Extracts paragraphs from a `.docx` file.
#[derive(Debug, Clone, Default)]
pub struct DocxExtractor;

impl DocumentExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<String>> {
        let file = std::fs::File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| ReportError::Extraction(format!("not a DOCX container: {e}")))?;

        let mut doc_xml = String::new();
        {
            let mut entry = archive.by_name("word/document.xml").map_err(|_| {
                ReportError::Extraction("invalid DOCX: missing word/document.xml".to_string())
            })?;
            entry.read_to_string(&mut doc_xml)?;
        }

        let paragraphs = paragraphs_from_xml(&doc_xml)?;
        if paragraphs.is_empty() {
            return Err(ReportError::Extraction(format!(
                "document contains no text: {}",
                path.display()
            )));
        }

        tracing::debug!(count = paragraphs.len(), "paragraphs extracted");
        Ok(paragraphs)
    }
}

/// Extracts paragraphs from a plain UTF-8 text file, split on blank lines.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl DocumentExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(path)?;
        let paragraphs: Vec<String> = content
            .split("\n\n")
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect();

        if paragraphs.is_empty() {
            return Err(ReportError::Extraction(format!(
                "document contains no text: {}",
                path.display()
            )));
        }
        Ok(paragraphs)
    }
}

/// Pull paragraph text out of WordprocessingML: one output string per
/// non-empty `<w:p>`, concatenating its `<w:t>` runs.
fn paragraphs_from_xml(doc_xml: &str) -> Result<Vec<String>> {
    let mut reader = quick_xml::Reader::from_str(doc_xml);
    let mut paragraphs = Vec::new();
    let mut paragraph_text = String::new();
    let mut in_text_element = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(ref e))
            | Ok(quick_xml::events::Event::Empty(ref e)) => {
                let local_name = e.local_name();
                let name = std::str::from_utf8(local_name.as_ref()).unwrap_or("");
                if name == "p" {
                    paragraph_text.clear();
                } else if name == "t" {
                    in_text_element = true;
                }
            }
            Ok(quick_xml::events::Event::End(ref e)) => {
                let local_name = e.local_name();
                let name = std::str::from_utf8(local_name.as_ref()).unwrap_or("");
                if name == "p" {
                    if !paragraph_text.is_empty() {
                        paragraphs.push(std::mem::take(&mut paragraph_text));
                    }
                } else if name == "t" {
                    in_text_element = false;
                }
            }
            Ok(quick_xml::events::Event::Text(ref e)) => {
                if in_text_element {
                    if let Ok(text) = e.unescape() {
                        paragraph_text.push_str(&text);
                    }
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => {
                return Err(ReportError::Extraction(format!("XML parse error: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
