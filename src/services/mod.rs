pub mod archive_service;
pub mod memory_archive_service;
pub mod mongo_archive_service;

pub use archive_service::ArchiveService;
pub use memory_archive_service::InMemoryArchiveService;
pub use mongo_archive_service::MongoArchiveService;
