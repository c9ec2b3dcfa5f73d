#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use archive_api::build_router;
use archive_api::errors::{AppError, Result};
use archive_api::models::archive::Archive;
use archive_api::models::article::Article;
use archive_api::services::ArchiveService;
use archive_api::state::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// What a scripted call should answer.
#[derive(Clone, Debug)]
pub enum Reply<T> {
    Ok(T),
    InvalidArgument,
    NotFound,
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<T> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::InvalidArgument => Err(AppError::invalid_argument("rejected by stub")),
            Reply::NotFound => Err(AppError::not_found("missing in stub")),
        }
    }
}

/// Hand-written stand-in for the service layer.
///
/// Each operation answers with the reply scripted for it and records the
/// argument it was called with. Calling an unscripted operation panics so a
/// test notices unexpected traffic.
#[derive(Default)]
pub struct StubArchiveService {
    save: Mutex<Option<Reply<Archive>>>,
    find_all: Mutex<Option<Vec<Archive>>>,
    find: Mutex<Option<Reply<Option<Archive>>>>,
    update: Mutex<Option<Reply<Archive>>>,
    delete: Mutex<Option<Reply<()>>>,
    pub saved: Mutex<Vec<Archive>>,
    pub looked_up: Mutex<Vec<i32>>,
    pub updated: Mutex<Vec<Archive>>,
    pub deleted: Mutex<Vec<i32>>,
}

impl StubArchiveService {
    pub fn on_save(self, reply: Reply<Archive>) -> Self {
        *self.save.lock().unwrap() = Some(reply);
        self
    }

    pub fn on_find_all(self, archives: Vec<Archive>) -> Self {
        *self.find_all.lock().unwrap() = Some(archives);
        self
    }

    pub fn on_find(self, reply: Reply<Option<Archive>>) -> Self {
        *self.find.lock().unwrap() = Some(reply);
        self
    }

    pub fn on_update(self, reply: Reply<Archive>) -> Self {
        *self.update.lock().unwrap() = Some(reply);
        self
    }

    pub fn on_delete(self, reply: Reply<()>) -> Self {
        *self.delete.lock().unwrap() = Some(reply);
        self
    }
}

fn scripted<T: Clone>(slot: &Mutex<Option<Reply<T>>>, operation: &str) -> Result<T> {
    slot.lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| panic!("unexpected call to {operation}"))
        .into_result()
}

#[async_trait]
impl ArchiveService for StubArchiveService {
    async fn save_archive(&self, archive: Archive) -> Result<Archive> {
        self.saved.lock().unwrap().push(archive);
        scripted(&self.save, "save_archive")
    }

    async fn find_all_archives(&self) -> Result<Vec<Archive>> {
        Ok(self
            .find_all
            .lock()
            .unwrap()
            .clone()
            .expect("unexpected call to find_all_archives"))
    }

    async fn find_archive(&self, archive_id: i32) -> Result<Option<Archive>> {
        self.looked_up.lock().unwrap().push(archive_id);
        scripted(&self.find, "find_archive")
    }

    async fn update_archive(&self, archive: Archive) -> Result<Archive> {
        self.updated.lock().unwrap().push(archive);
        scripted(&self.update, "update_archive")
    }

    async fn delete_archive(&self, archive_id: i32) -> Result<()> {
        self.deleted.lock().unwrap().push(archive_id);
        scripted(&self.delete, "delete_archive")
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Build the application router around the given service.
pub fn build_test_app(service: Arc<dyn ArchiveService>) -> Router {
    build_router(AppState::new(service))
}

/// The archive most tests start from: id 1, "software", one article.
pub fn software_archive() -> Archive {
    let mut articles = HashSet::new();
    articles.insert(Article::new(1, "link to article", "title of article"));
    Archive {
        archive_id: 1,
        archive_name: "software".to_string(),
        articles,
    }
}

/// Send a request with an optional JSON body; return status and raw body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json)
        }
        None => Body::empty(),
    };

    send_request(app, builder.body(body).unwrap()).await
}

/// Send a fully built request; return status and raw body.
pub async fn send_request(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

/// Like [`send`], but parse the response body as an `Archive`.
pub async fn send_for_archive(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Option<Archive>) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).ok())
}
