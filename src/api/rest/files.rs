//! Document and image upload / download endpoints

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Path};
use crate::domain::FileStore;

const FILE_FIELD: &str = "file";
const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";

pub const USE_IMAGE_ENDPOINT: &str = "Use endpoint /image to upload image";
pub const NOT_AN_IMAGE: &str = "Not an image (jpg / png / gif / ...)";

/// The `file` part of a multipart upload
#[derive(Debug)]
struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    content: Bytes,
}

impl Upload {
    /// Declared content type first, then the file name extension
    fn is_image(&self) -> bool {
        match self.content_type.as_deref() {
            Some(content_type) if content_type != GENERIC_CONTENT_TYPE => {
                content_type.to_ascii_lowercase().starts_with("image/")
            }
            _ => self
                .file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first())
                .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE),
        }
    }
}

/// GET /api/docs
pub async fn list_docs(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    info!("Calling docs");
    Ok(Json(state.doc_store.list().await?))
}

/// GET /api/images
pub async fn list_images(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    info!("Calling images");
    Ok(Json(state.image_store.list().await?))
}

/// POST /api/doc
pub async fn upload_doc(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    info!("Calling doc");
    let upload = read_upload(multipart).await?;

    if upload.is_image() {
        return Ok((StatusCode::BAD_REQUEST, USE_IMAGE_ENDPOINT).into_response());
    }

    save(&state.doc_store, upload).await
}

/// POST /api/image
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    info!("Calling image");
    let upload = read_upload(multipart).await?;

    if !upload.is_image() {
        return Ok((StatusCode::BAD_REQUEST, NOT_AN_IMAGE).into_response());
    }

    save(&state.image_store, upload).await
}

/// GET /api/doc/{doc-id}
pub async fn get_doc(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Response, ApiError> {
    info!(doc_id = %doc_id, "Calling get doc");
    download(&state.doc_store, &doc_id, "Document").await
}

/// GET /api/image/{image-id}
pub async fn get_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Response, ApiError> {
    info!(image_id = %image_id, "Calling get image");
    download(&state.image_store, &image_id, "Image").await
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?;

        debug!(file_name = ?file_name, content_type = ?content_type, size = content.len(), "Received upload");

        return Ok(Upload {
            file_name,
            content_type,
            content,
        });
    }

    Err(ApiError::bad_request(format!(
        "Required part '{}' is not present",
        FILE_FIELD
    )))
}

async fn save(store: &Arc<dyn FileStore>, upload: Upload) -> Result<Response, ApiError> {
    let name = store.save(upload.file_name, upload.content).await?;

    Ok((StatusCode::CREATED, format!("Saved : {}", name)).into_response())
}

async fn download(
    store: &Arc<dyn FileStore>,
    name: &str,
    kind: &str,
) -> Result<Response, ApiError> {
    let file = store
        .load(name)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} {} not found", kind, name)))?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.name),
            ),
        ],
        file.content,
    )
        .into_response())
}
