use serde::Serialize;
use thiserror::Error;

/// Document formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Pdf,
    Docx,
}

impl SourceFormat {
    /// Parses a declared format such as `"pdf"` or `"DOCX"`.
    pub fn from_declared(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pdf" => Some(SourceFormat::Pdf),
            "docx" => Some(SourceFormat::Docx),
            _ => None,
        }
    }

    /// Resolves the format from an uploaded file name's extension.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.trim().to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Some(SourceFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Some(SourceFormat::Docx)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Docx => "docx",
        }
    }
}

/// An uploaded resume, consumed once by the extractor.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub format: SourceFormat,
    pub bytes: bytes::Bytes,
}

/// Plain text pulled out of a source document.
///
/// An empty value is the extraction-failed state: it is not an error, but the
/// caller must check [`ExtractedText::is_empty`] before assembling a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    raw: String,
}

impl ExtractedText {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Non-blank lines in original order, each trimmed.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw.lines().map(str::trim).filter(|line| !line.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// Request-scoped inputs of a single conversion.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub document: SourceDocument,
    pub candidate_name: String,
    pub age: u32,
}

/// A finished conversion: DOCX bytes plus the suggested download name.
#[derive(Debug, Clone)]
pub struct ConvertedCv {
    pub file_name: String,
    pub label: String,
    pub docx: Vec<u8>,
}

/// What the form shows before the user commits to a conversion.
#[derive(Debug, Clone, Serialize)]
pub struct CvPreview {
    pub label: String,
    pub format: SourceFormat,
    pub line_count: usize,
    pub preview: String,
    pub truncated: bool,
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("No text could be extracted from the uploaded document")]
    NoExtractableText,

    #[error("Logo image could not be read: {0}")]
    InvalidLogo(String),

    #[error("Failed to assemble output document: {0}")]
    Assembly(String),
}
