use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};

use crate::{
    errors::{AppError, Result},
    models::archive::Archive,
    services::archive_service::archive_not_found,
    state::AppState,
};

// POST /archive
pub async fn create_archive(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Archive>, JsonRejection>,
) -> Result<Json<Archive>> {
    let Json(archive) = payload.map_err(rejected)?;
    tracing::info!("📥 Saving archive: {:?}", archive.archive_name);

    let saved = state
        .archive_service
        .save_archive(archive)
        .await
        .map_err(rejected)?;

    tracing::info!("✅ Saved archive {}", saved.archive_id);
    Ok(Json(saved))
}

// GET /archive
pub async fn get_archives(State(state): State<AppState>) -> Result<Json<Vec<Archive>>> {
    let archives = state.archive_service.find_all_archives().await?;

    tracing::info!("✅ Found {} archives", archives.len());
    Ok(Json(archives))
}

// GET /archive/:id
pub async fn get_archive(
    State(state): State<AppState>,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Archive>> {
    let Path(archive_id) = id.map_err(rejected)?;
    tracing::info!("📁 Getting archive: {}", archive_id);

    let archive = match state.archive_service.find_archive(archive_id).await {
        Ok(Some(archive)) => archive,
        Ok(None) => return Err(rejected(archive_not_found(archive_id))),
        Err(e) => return Err(rejected(e)),
    };

    Ok(Json(archive))
}

// PUT /archive/:id
pub async fn update_archive(
    State(state): State<AppState>,
    id: std::result::Result<Path<i32>, PathRejection>,
    payload: std::result::Result<Json<Archive>, JsonRejection>,
) -> Result<Json<Archive>> {
    let Path(archive_id) = id.map_err(rejected)?;
    let Json(mut archive) = payload.map_err(rejected)?;
    tracing::info!("✏️ Updating archive: {}", archive_id);

    // A body without an id takes the one from the path.
    if archive.archive_id == 0 {
        archive.archive_id = archive_id;
    } else if archive.archive_id != archive_id {
        return Err(rejected(AppError::invalid_argument(format!(
            "Body archive id {} does not match path id {}",
            archive.archive_id, archive_id
        ))));
    }

    let updated = state
        .archive_service
        .update_archive(archive)
        .await
        .map_err(rejected)?;

    tracing::info!("✅ Updated archive {}", archive_id);
    Ok(Json(updated))
}

// DELETE /archive/:id
pub async fn delete_archive(
    State(state): State<AppState>,
    id: std::result::Result<Path<i32>, PathRejection>,
) -> Result<StatusCode> {
    let Path(archive_id) = id.map_err(rejected)?;
    tracing::info!("🗑️ Deleting archive: {}", archive_id);

    state
        .archive_service
        .delete_archive(archive_id)
        .await
        .map_err(rejected)?;

    tracing::info!("✅ Deleted archive: {}", archive_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Logs client-side failures before they become a response.
fn rejected(err: impl Into<AppError>) -> AppError {
    let err = err.into();
    match &err {
        AppError::InvalidArgument(_) | AppError::NotFound(_) => {
            tracing::warn!("❌ {}", err);
        }
        AppError::MongoDB(_) | AppError::Io(_) | AppError::ConfigurationError(_) => {}
    }
    err
}
