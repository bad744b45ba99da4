//! Axum route handlers for the CV conversion API.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::conversion::models::{ConvertRequest, CvPreview};
use crate::conversion::pipeline;
use crate::conversion::upload::parse_multipart;
use crate::errors::AppError;
use crate::state::AppState;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// POST /api/v1/cv/convert
///
/// Multipart fields: `file`, optional `format`, `candidate_name`, `age`.
/// Returns the generated DOCX as an attachment.
pub async fn handle_convert(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let request = read_request(&state, multipart).await?;
    let conversion_id = Uuid::new_v4();
    let span = tracing::info_span!("convert", %conversion_id, format = request.document.format.as_str());

    let logo = state.logo.clone();
    let page_config = state.page_config.clone();
    let converted = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        pipeline::convert(&request, &logo, &page_config)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    info!(%conversion_id, label = %converted.label, "Conversion finished");

    let disposition = attachment_disposition(&converted.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        converted.docx,
    )
        .into_response())
}

/// POST /api/v1/cv/preview
///
/// Same fields as convert. Returns the label and a text preview so the user
/// can check extraction before downloading.
pub async fn handle_preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CvPreview>, AppError> {
    let request = read_request(&state, multipart).await?;

    let preview = tokio::task::spawn_blocking(move || pipeline::preview(&request))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(preview))
}

/// `Content-Disposition` for a download. Header values must be ASCII, so the
/// plain `filename` gets `_` for anything outside it and the exact name goes
/// in the RFC 6266 `filename*` parameter.
fn attachment_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}

async fn read_request(state: &AppState, multipart: Multipart) -> Result<ConvertRequest, AppError> {
    let form = parse_multipart(multipart).await?;
    form.into_request((state.config.min_age, state.config.max_age))
}
