use std::sync::Arc;

use crate::services::ArchiveService;

#[derive(Clone)]
pub struct AppState {
    pub archive_service: Arc<dyn ArchiveService>,
}

impl AppState {
    pub fn new(archive_service: Arc<dyn ArchiveService>) -> Self {
        AppState { archive_service }
    }
}
