use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, DateTime as BsonDateTime, Document},
    error::{ErrorKind, WriteFailure},
    options::ReturnDocument,
    Collection, Database,
};

use crate::errors::{AppError, Result};
use crate::models::archive::{Archive, ArchiveDocument};
use crate::services::archive_service::{
    archive_not_found, ensure_valid_id, id_space_exhausted, ArchiveService,
};

const ARCHIVES: &str = "archives";
const COUNTERS: &str = "counters";
const ARCHIVE_SEQUENCE: &str = "archive_id";
const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoArchiveService {
    db: Database,
}

impl MongoArchiveService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn archives(&self) -> Collection<ArchiveDocument> {
        self.db.collection(ARCHIVES)
    }

    async fn next_archive_id(&self) -> Result<i32> {
        let counters: Collection<Document> = self.db.collection(COUNTERS);

        let counter = counters
            .find_one_and_update(
                doc! { "_id": ARCHIVE_SEQUENCE },
                doc! { "$inc": { "seq": 1 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::configuration("Archive id sequence is unavailable"))?;

        sequence_value(&counter)
    }
}

/// Reads the counter's `seq`. `$inc` widens it to int64 once it passes
/// `i32::MAX`, which means no archive id is left to hand out.
fn sequence_value(counter: &Document) -> Result<i32> {
    match counter.get("seq") {
        Some(Bson::Int32(seq)) => Ok(*seq),
        Some(Bson::Int64(seq)) => i32::try_from(*seq).map_err(|_| id_space_exhausted()),
        other => Err(AppError::configuration(format!(
            "Corrupt archive id sequence: {:?}",
            other
        ))),
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl ArchiveService for MongoArchiveService {
    async fn save_archive(&self, archive: Archive) -> Result<Archive> {
        archive.check()?;

        let client_id = archive.archive_id;
        loop {
            let archive_id = if client_id == 0 {
                self.next_archive_id().await?
            } else {
                client_id
            };

            let saved = archive.clone().with_id(archive_id);
            let document = ArchiveDocument::from_archive(saved.clone(), BsonDateTime::now());

            match self.archives().insert_one(&document).await {
                Ok(_) => {
                    tracing::debug!("Inserted archive {}", archive_id);
                    return Ok(saved);
                }
                // The sequence can land on an id a client already picked.
                Err(e) if is_duplicate_key(&e) && client_id == 0 => continue,
                Err(e) if is_duplicate_key(&e) => {
                    return Err(AppError::invalid_argument(format!(
                        "Archive {} already exists",
                        archive_id
                    )));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn find_all_archives(&self) -> Result<Vec<Archive>> {
        let cursor = self.archives().find(doc! {}).await?;
        let documents: Vec<ArchiveDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Archive::from).collect())
    }

    async fn find_archive(&self, archive_id: i32) -> Result<Option<Archive>> {
        ensure_valid_id(archive_id)?;

        let document = self.archives().find_one(doc! { "_id": archive_id }).await?;
        Ok(document.map(Archive::from))
    }

    async fn update_archive(&self, archive: Archive) -> Result<Archive> {
        ensure_valid_id(archive.archive_id)?;
        archive.check()?;

        let archive_id = archive.archive_id;
        let collection = self.archives();

        let existing = collection
            .find_one(doc! { "_id": archive_id })
            .await?
            .ok_or_else(|| archive_not_found(archive_id))?;

        let updated = archive.with_id(archive_id);
        let document = ArchiveDocument::from_archive(updated.clone(), existing.created_at);

        let result = collection
            .replace_one(doc! { "_id": archive_id }, &document)
            .await?;

        // Deleted between the lookup and the replace.
        if result.matched_count == 0 {
            return Err(archive_not_found(archive_id));
        }

        Ok(updated)
    }

    async fn delete_archive(&self, archive_id: i32) -> Result<()> {
        ensure_valid_id(archive_id)?;

        let result = self
            .archives()
            .delete_one(doc! { "_id": archive_id })
            .await?;

        if result.deleted_count == 0 {
            return Err(archive_not_found(archive_id));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_reads_int32_counter() {
        assert_eq!(sequence_value(&doc! { "seq": 7 }).unwrap(), 7);
    }

    #[test]
    fn sequence_accepts_int64_within_range() {
        assert_eq!(sequence_value(&doc! { "seq": 12_i64 }).unwrap(), 12);
    }

    #[test]
    fn sequence_past_largest_id_reports_exhaustion() {
        let past_max = i64::from(i32::MAX) + 1;
        let counter = doc! { "seq": past_max };

        assert!(matches!(
            sequence_value(&counter),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn sequence_with_wrong_type_is_a_configuration_error() {
        assert!(matches!(
            sequence_value(&doc! { "seq": "seven" }),
            Err(AppError::ConfigurationError(_))
        ));
        assert!(matches!(
            sequence_value(&doc! {}),
            Err(AppError::ConfigurationError(_))
        ));
    }
}
