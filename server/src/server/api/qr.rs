//! QR code API for label downloads.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::Response;
use label_qr::{QrArtifactRequest, QrError, QrFormat, suggested_file_name};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use super::{ApiError, ApiResult, err_json, ok_json};
use crate::app::SharedState;
use crate::config::validation::validate_label_id;

/// `attr-char` of RFC 5987, left unescaped in `filename*`.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

#[derive(Debug, Deserialize)]
pub struct QrBody {
    /// Label display name, only used for the file name.
    #[serde(default)]
    pub name: String,
    /// Parsed in the handler so unknown formats get the JSON error envelope.
    #[serde(default)]
    pub format: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub name: Option<String>,
}

fn qr_error(e: QrError) -> ApiError {
    match &e {
        QrError::Encoding(_) => {
            tracing::warn!("QR encoding failed: {e}");
            err_json(422, "could not generate code")
        }
        QrError::UnsupportedFormat(_) => err_json(400, &e.to_string()),
        QrError::Raster(_) | QrError::Document(_) => {
            tracing::error!("QR rendering failed: {e}");
            err_json(500, &e.to_string())
        }
    }
}

fn check_label_id(id: &str) -> Result<(), ApiError> {
    validate_label_id(id).map_err(|e| err_json(400, &e))
}

/// `Content-Disposition` value for a download.
///
/// `filename` carries an ASCII-only fallback; `filename*` carries the full
/// UTF-8 name (RFC 6266).
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        utf8_percent_encode(filename, ATTR_CHAR)
    )
}

/// POST /api/labels/{id}/qr – Generate a QR artifact as a data URI
pub async fn create_qr(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<QrBody>,
) -> ApiResult {
    check_label_id(&id)?;
    let format: QrFormat = body.format.parse().map_err(qr_error)?;

    let request = QrArtifactRequest::new(id, body.name, format);
    let artifact = state.qr().generate(&request).map_err(qr_error)?;
    tracing::info!(
        label_id = %request.label_id,
        format = %request.format,
        file = %artifact.suggested_file_name,
        "Generated QR artifact"
    );

    let data = serde_json::to_value(&artifact).map_err(|e| err_json(500, &e.to_string()))?;
    Ok(ok_json(data))
}

/// GET /api/labels/{id}/qr/{format} – Download the raw QR document
pub async fn download_qr(
    State(state): State<SharedState>,
    Path((id, format)): Path<(String, String)>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    check_label_id(&id)?;
    let format: QrFormat = format.parse().map_err(qr_error)?;

    let bytes = state.qr().render(&id, format).map_err(qr_error)?;
    let filename = suggested_file_name(query.name.as_deref().unwrap_or(&id), format);

    Response::builder()
        .header(header::CONTENT_TYPE, format.mime_type())
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(bytes))
        .map_err(|e| err_json(500, &e.to_string()))
}
