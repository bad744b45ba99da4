use axum::extract::Multipart;
use bytes::Bytes;

use crate::conversion::models::{ConvertRequest, SourceDocument, SourceFormat};
use crate::errors::AppError;

/// Raw form fields of a conversion upload, before validation.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file_name: Option<String>,
    pub file: Option<Bytes>,
    pub declared_format: Option<String>,
    pub candidate_name: Option<String>,
    pub age: Option<String>,
}

/// Reads every multipart field. Unknown fields are drained and ignored.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                form.file_name = field.file_name().map(String::from);
                form.file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?,
                );
            }
            "format" | "candidate_name" | "age" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
                match name.as_str() {
                    "format" => form.declared_format = Some(value),
                    "candidate_name" => form.candidate_name = Some(value),
                    _ => form.age = Some(value),
                }
            }
            _ => {
                // Unknown fields are drained so the stream can advance.
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
            }
        }
    }

    Ok(form)
}

impl UploadForm {
    /// Validates the form into a conversion request. `age_range` is inclusive.
    pub fn into_request(self, age_range: (u32, u32)) -> Result<ConvertRequest, AppError> {
        let mut missing = Vec::new();
        if self.file.as_ref().map_or(true, |f| f.is_empty()) {
            missing.push("file");
        }
        if self
            .candidate_name
            .as_deref()
            .map_or(true, |n| n.trim().is_empty())
        {
            missing.push("candidate_name");
        }
        if self.age.as_deref().map_or(true, |a| a.trim().is_empty()) {
            missing.push("age");
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let format = resolve_format(self.declared_format.as_deref(), self.file_name.as_deref())?;
        let age = parse_age(self.age.as_deref().unwrap_or_default(), age_range)?;

        Ok(ConvertRequest {
            document: SourceDocument {
                format,
                bytes: self.file.unwrap_or_default(),
            },
            candidate_name: self.candidate_name.unwrap_or_default(),
            age,
        })
    }
}

/// An explicit `format` field wins over the file extension.
fn resolve_format(declared: Option<&str>, file_name: Option<&str>) -> Result<SourceFormat, AppError> {
    match declared.filter(|d| !d.trim().is_empty()) {
        Some(d) => SourceFormat::from_declared(d).ok_or_else(|| {
            AppError::Validation(format!(
                "Unsupported format '{d}'. Please upload a PDF or DOCX file."
            ))
        }),
        None => file_name
            .and_then(SourceFormat::from_file_name)
            .ok_or_else(|| {
                AppError::Validation(
                    "Unsupported file type. Please upload a PDF or DOCX file.".to_string(),
                )
            }),
    }
}

fn parse_age(raw: &str, (min, max): (u32, u32)) -> Result<u32, AppError> {
    let age = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| AppError::Validation(format!("age must be a whole number, got '{raw}'")))?;
    if !(min..=max).contains(&age) {
        return Err(AppError::Validation(format!(
            "age must be between {min} and {max}"
        )));
    }
    Ok(age)
}
