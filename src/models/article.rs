use serde::{Deserialize, Serialize};

/// A link+title record owned by exactly one archive.
///
/// `archive_id` is a back-reference to the owning [`Archive`](super::archive::Archive);
/// the archive holds the articles, never the other way round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    pub archive_id: i32,
    pub link: String,
    pub title: String,
}

impl Article {
    pub fn new(archive_id: i32, link: impl Into<String>, title: impl Into<String>) -> Self {
        Article {
            archive_id,
            link: link.into(),
            title: title.into(),
        }
    }
}
