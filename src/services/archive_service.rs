use async_trait::async_trait;

use crate::errors::{AppError, Result};
use crate::models::archive::Archive;

/// Persistence and validation behind the `/archive` routes.
///
/// Implementations report bad input or an unusable id as
/// [`AppError::InvalidArgument`] and a missing target as
/// [`AppError::NotFound`]; the handlers only translate those kinds into
/// status codes.
#[async_trait]
pub trait ArchiveService: Send + Sync {
    /// Stores a new archive. Id 0 asks the service to assign one.
    async fn save_archive(&self, archive: Archive) -> Result<Archive>;

    /// Every archive, in storage order.
    async fn find_all_archives(&self) -> Result<Vec<Archive>>;

    async fn find_archive(&self, archive_id: i32) -> Result<Option<Archive>>;

    /// Replaces the archive carrying `archive.archive_id`.
    async fn update_archive(&self, archive: Archive) -> Result<Archive>;

    async fn delete_archive(&self, archive_id: i32) -> Result<()>;

    /// Round-trip to the backing store, used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}

pub(crate) fn ensure_valid_id(archive_id: i32) -> Result<()> {
    if archive_id <= 0 {
        return Err(AppError::invalid_argument(format!(
            "Invalid archive id: {}",
            archive_id
        )));
    }
    Ok(())
}

pub(crate) fn id_space_exhausted() -> AppError {
    AppError::invalid_argument("Archive id space is exhausted")
}

pub(crate) fn archive_not_found(archive_id: i32) -> AppError {
    AppError::not_found(format!("Archive {} does not exist", archive_id))
}
