use std::collections::HashSet;

use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::article::Article;

/// Archive as it travels over HTTP.
///
/// Every field falls back to its default when absent, so `{}` decodes to an
/// empty archive and is rejected by [`Archive::check`] rather than by the
/// JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Archive {
    #[validate(range(min = 0, message = "Archive id must not be negative"))]
    pub archive_id: i32,

    #[validate(length(min = 1, message = "Archive name is required"))]
    pub archive_name: String,

    // Unordered: clients must not rely on the array order.
    pub articles: HashSet<Article>,
}

impl Archive {
    pub fn new(archive_id: i32, archive_name: impl Into<String>) -> Self {
        Archive {
            archive_id,
            archive_name: archive_name.into(),
            articles: HashSet::new(),
        }
    }

    pub fn with_article(mut self, link: impl Into<String>, title: impl Into<String>) -> Self {
        self.articles.insert(Article::new(self.archive_id, link, title));
        self
    }

    /// Checks the invariants an archive must hold before it is persisted.
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if self.archive_name.trim().is_empty() {
            return Err(AppError::invalid_argument("Archive name is required"));
        }

        // Articles may omit the back-reference; a conflicting one is an error.
        if let Some(stray) = self
            .articles
            .iter()
            .find(|a| a.archive_id != 0 && a.archive_id != self.archive_id)
        {
            return Err(AppError::invalid_argument(format!(
                "Article '{}' belongs to archive {}, not {}",
                stray.title, stray.archive_id, self.archive_id
            )));
        }

        Ok(())
    }

    /// Assigns `archive_id` and points every article back at it.
    pub fn with_id(mut self, archive_id: i32) -> Self {
        self.archive_id = archive_id;
        self.articles = self
            .articles
            .into_iter()
            .map(|mut article| {
                article.archive_id = archive_id;
                article
            })
            .collect();
        self
    }
}

/// Storage shape in the `archives` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveDocument {
    #[serde(rename = "_id")]
    pub id: i32,
    pub archive_name: String,
    pub articles: Vec<Article>,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl ArchiveDocument {
    pub fn from_archive(archive: Archive, created_at: BsonDateTime) -> Self {
        ArchiveDocument {
            id: archive.archive_id,
            archive_name: archive.archive_name,
            articles: archive.articles.into_iter().collect(),
            created_at,
            updated_at: BsonDateTime::now(),
        }
    }
}

impl From<ArchiveDocument> for Archive {
    fn from(doc: ArchiveDocument) -> Self {
        Archive {
            archive_id: doc.id,
            archive_name: doc.archive_name,
            articles: doc.articles.into_iter().collect(),
        }
    }
}
