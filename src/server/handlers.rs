//! HTTP request handlers.

use crate::config::BookFormat;
use crate::error::{AppError, Result};
use crate::library::LibraryEntry;
use crate::server::AppState;
use crate::upload;
use axum::{
    Json,
    body::Bytes,
    extract::{
        Multipart, Query, Request, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceExt;
use tower_http::services::ServeDir;

// ============================================================================
// LIBRARY
// ============================================================================

/// Library listing response.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Every file with its progress.
    pub files: Vec<LibraryEntry>,
}

/// List every library file with its reading progress.
pub async fn list(State(state): State<AppState>) -> Json<ListResponse> {
    Json(ListResponse {
        files: state.list_entries(),
    })
}

// ============================================================================
// PROGRESS API
// ============================================================================

/// Progress lookup query.
#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    file: Option<String>,
}

/// Get stored progress for one file (`null` when none).
pub async fn get_progress(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<Option<Value>>> {
    let file = query
        .file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'file' query param".to_string()))?;

    Ok(Json(state.progress.get(&file)))
}

/// Progress save request.
#[derive(Debug, Deserialize)]
pub struct SaveProgressRequest {
    file: String,
    progress: Value,
}

/// Progress save response.
#[derive(Debug, Serialize)]
pub struct SaveProgressResponse {
    status: &'static str,
}

/// Save progress for one file.
///
/// The body is parsed as JSON whatever content type the client declares. Any
/// failure, including a failed write of the store, is a 400.
pub async fn save_progress(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SaveProgressResponse>> {
    let req: SaveProgressRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON or missing fields: {}", e)))?;

    state
        .progress
        .set(&req.file, req.progress)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON or missing fields: {}", e)))?;
    tracing::info!(file = %req.file, "Saved progress");

    Ok(Json(SaveProgressResponse { status: "saved" }))
}

// ============================================================================
// UPLOAD
// ============================================================================

/// Store the first file part of a multipart upload in the library root.
///
/// Parts without a filename are skipped; later file parts are ignored.
pub async fn upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, &'static str)> {
    let mut multipart = multipart
        .map_err(|_| AppError::BadRequest("Expected multipart/form-data".to_string()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let name = upload::stored_name(&filename)?;
        let data = field.bytes().await.map_err(multipart_error)?;
        let path = state.library.store(&name, &data).await?;

        tracing::info!(
            filename = %filename,
            path = %path.display(),
            size = data.len(),
            "Stored upload"
        );

        return Ok((StatusCode::OK, "Upload successful"));
    }

    Err(AppError::BadRequest("No file found in upload".to_string()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

// ============================================================================
// STATIC FILES
// ============================================================================

/// Anything that is not an API route.
///
/// GET and HEAD serve files from the library root, labelling book formats with
/// their own MIME type. POST is an unknown endpoint, every other method is
/// refused.
pub async fn fallback(State(state): State<AppState>, req: Request) -> Result<Response> {
    let method = req.method().clone();
    match method {
        Method::GET | Method::HEAD => {
            let path = req.uri().path().to_string();
            let response = match ServeDir::new(state.library.root()).oneshot(req).await {
                Ok(response) => response,
                Err(never) => match never {},
            };

            if response.status() == StatusCode::NOT_FOUND {
                return Err(AppError::NotFound(path));
            }

            let mut response = response.into_response();
            if let Some(format) = std::path::Path::new(&path)
                .extension()
                .and_then(|e| e.to_str())
                .and_then(BookFormat::from_extension)
            {
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(format.mime_type()),
                );
            }

            Ok(response)
        }
        Method::POST => Err(AppError::UnknownEndpoint(req.uri().path().to_string())),
        _ => Err(AppError::MethodNotAllowed),
    }
}
