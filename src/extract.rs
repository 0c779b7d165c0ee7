//! Source text extraction.
//!
//! Extraction is a collaborator at the pipeline boundary: given a file it
//! returns raw text, and every failure mode (unreadable file, unsupported
//! format, nothing extractable) surfaces as empty text. Downstream
//! normalization treats empty input the same as any other unusable source,
//! so the pipeline halts before ever prompting the generator.

use std::fs;
use std::path::Path;

use tracing::warn;

/// Kind of uploaded source, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    SlideDeck,
    Document,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<SourceKind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pptx" | "ppt" | "odp" => Some(SourceKind::SlideDeck),
            "pdf" | "txt" | "md" | "markdown" => Some(SourceKind::Document),
            _ => None,
        }
    }
}

/// Extraction collaborator interface.
pub trait TextExtractor: Send + Sync {
    /// Pull raw text out of a source file. Infallible by contract: failures
    /// come back as empty text, never as an error.
    fn extract(&self, path: &Path) -> String;
}

/// Extractor for plain-text documents (txt, markdown).
///
/// Binary formats yield empty text; a dedicated pdf/pptx extractor can slot
/// in behind [`TextExtractor`] without touching the pipeline.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> String {
        if SourceKind::from_path(path).is_none() {
            warn!(path = %path.display(), "unsupported source kind");
            return String::new();
        }
        match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read source file");
                String::new()
            }
        }
    }
}
