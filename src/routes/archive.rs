use axum::{routing::get, Router};

use crate::{handlers::archive, state::AppState};

pub fn archive_routes() -> Router<AppState> {
    Router::new()
        // List archives / create a new archive
        .route("/", get(archive::get_archives).post(archive::create_archive))

        // Fetch, replace or remove a single archive
        .route(
            "/:id",
            get(archive::get_archive)
                .put(archive::update_archive)
                .delete(archive::delete_archive),
        )
}
