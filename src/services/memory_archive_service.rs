use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::{AppError, Result};
use crate::models::archive::Archive;
use crate::services::archive_service::{
    archive_not_found, ensure_valid_id, id_space_exhausted, ArchiveService,
};

/// Process-local store for `ARCHIVE_STORE=memory`.
#[derive(Default)]
pub struct InMemoryArchiveService {
    inner: RwLock<Store>,
}

#[derive(Default)]
struct Store {
    archives: Vec<Archive>,
    last_id: i32,
}

impl Store {
    fn position(&self, archive_id: i32) -> Option<usize> {
        self.archives.iter().position(|a| a.archive_id == archive_id)
    }
}

impl InMemoryArchiveService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArchiveService for InMemoryArchiveService {
    async fn save_archive(&self, archive: Archive) -> Result<Archive> {
        archive.check()?;

        let mut store = self.inner.write().await;

        let archive_id = if archive.archive_id == 0 {
            // Skip over ids that clients picked themselves.
            let mut next = store.last_id.checked_add(1).ok_or_else(id_space_exhausted)?;
            while store.position(next).is_some() {
                next = next.checked_add(1).ok_or_else(id_space_exhausted)?;
            }
            next
        } else {
            if store.position(archive.archive_id).is_some() {
                return Err(AppError::invalid_argument(format!(
                    "Archive {} already exists",
                    archive.archive_id
                )));
            }
            archive.archive_id
        };

        store.last_id = store.last_id.max(archive_id);
        let saved = archive.with_id(archive_id);
        store.archives.push(saved.clone());

        tracing::debug!("Stored archive {} in memory", archive_id);
        Ok(saved)
    }

    async fn find_all_archives(&self) -> Result<Vec<Archive>> {
        Ok(self.inner.read().await.archives.clone())
    }

    async fn find_archive(&self, archive_id: i32) -> Result<Option<Archive>> {
        ensure_valid_id(archive_id)?;

        let store = self.inner.read().await;
        Ok(store
            .archives
            .iter()
            .find(|a| a.archive_id == archive_id)
            .cloned())
    }

    async fn update_archive(&self, archive: Archive) -> Result<Archive> {
        ensure_valid_id(archive.archive_id)?;
        archive.check()?;

        let mut store = self.inner.write().await;
        let index = store
            .position(archive.archive_id)
            .ok_or_else(|| archive_not_found(archive.archive_id))?;

        let archive_id = archive.archive_id;
        let updated = archive.with_id(archive_id);
        store.archives[index] = updated.clone();

        Ok(updated)
    }

    async fn delete_archive(&self, archive_id: i32) -> Result<()> {
        ensure_valid_id(archive_id)?;

        let mut store = self.inner.write().await;
        let index = store
            .position(archive_id)
            .ok_or_else(|| archive_not_found(archive_id))?;
        store.archives.remove(index);

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
