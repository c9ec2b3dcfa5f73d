use mongodb::{Client, Database};

use crate::config::AppConfig;
use crate::errors::{AppError, Result};

pub async fn get_db_client(config: &AppConfig) -> Result<Database> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::configuration("DATABASE_URL must be set"))?;

    let client = Client::with_uri_str(database_url).await?;
    let db = client.database(&config.database_name);

    // Verify database is reachable by listing collections
    match db.list_collection_names().await {
        Ok(collections) => {
            tracing::info!("✅ Connected to database: {}", config.database_name);
            tracing::info!("📂 Collections found: {:?}", collections);
        }
        Err(e) => {
            tracing::warn!(
                "⚠️ Database '{}' may not exist or is inaccessible: {}",
                config.database_name,
                e
            );
        }
    }

    Ok(db)
}
