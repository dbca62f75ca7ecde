//! Handlers Layer
//!
//! axum handlers that bridge HTTP requests to the repository.

mod item_handlers;


use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::{IdGenerator, Item};
use crate::repository::Repository;

pub use item_handlers::{create_item, delete_item, list_items, CreateForm, HandlerError};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository<Item>>,
    pub ids: Arc<IdGenerator>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository<Item>>) -> Self {
        Self::with_ids(repo, IdGenerator::new())
    }

    pub fn with_ids(repo: Arc<dyn Repository<Item>>, ids: IdGenerator) -> Self {
        Self {
            repo,
            ids: Arc::new(ids),
        }
    }
}

/// API routes plus static files from `static_dir` (`/` serves `index.html`).
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/new", post(create_item))
        .route("/items/{id}", get(delete_item))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
