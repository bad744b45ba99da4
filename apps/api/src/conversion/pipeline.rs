//! Conversion pipeline.
//!
//! Flow: extract_text → (abort if empty) → abbreviate → assemble → file name.
//! Each call is an independent transform over its inputs; nothing is shared
//! between requests except the read-only logo and page config.

use tracing::info;

use crate::conversion::assemble::{assemble, PageConfig};
use crate::conversion::extract::extract_text;
use crate::conversion::label::{abbreviate, output_file_name};
use crate::conversion::logo::LogoImage;
use crate::conversion::models::{ConversionError, ConvertRequest, ConvertedCv, CvPreview};

/// Characters of extracted text shown in a preview.
pub const PREVIEW_CHARS: usize = 2000;

pub fn convert(
    request: &ConvertRequest,
    logo: &LogoImage,
    page: &PageConfig,
) -> Result<ConvertedCv, ConversionError> {
    let document = &request.document;
    let text = extract_text(&document.bytes, document.format);
    if text.is_empty() {
        return Err(ConversionError::NoExtractableText);
    }

    let label = abbreviate(&request.candidate_name, request.age);
    let docx = assemble(&text, &label, logo, page)?;
    let file_name = output_file_name(&request.candidate_name);

    info!(
        format = document.format.as_str(),
        input_bytes = document.bytes.len(),
        output_bytes = docx.len(),
        lines = text.lines().count(),
        "Converted CV to {file_name}"
    );

    Ok(ConvertedCv {
        file_name,
        label,
        docx,
    })
}

/// Extracts and labels without assembling, for the form's preview pane.
pub fn preview(request: &ConvertRequest) -> Result<CvPreview, ConversionError> {
    let document = &request.document;
    let text = extract_text(&document.bytes, document.format);
    if text.is_empty() {
        return Err(ConversionError::NoExtractableText);
    }

    let (preview, truncated) = truncate_chars(text.raw(), PREVIEW_CHARS);

    Ok(CvPreview {
        label: abbreviate(&request.candidate_name, request.age),
        format: document.format,
        line_count: text.lines().count(),
        preview,
        truncated,
    })
}

fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => (format!("{}...", &text[..cut]), true),
        None => (text.to_string(), false),
    }
}
