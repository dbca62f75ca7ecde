//! Item Handlers
//!
//! `GET /items`, `POST /items/new`, `GET /items/{id}`. Failures answer with
//! an empty body; the cause only goes to the log.

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use super::AppState;
use crate::domain::{sort_items, DomainError, Item};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("error fetching items: {0}")]
    Fetch(DomainError),
    #[error("error reading form: {0}")]
    Form(#[from] FormRejection),
    #[error("error decoding item: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Rejected(#[from] DomainError),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match &self {
            HandlerError::Fetch(_) => {
                tracing::error!("{}", self);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            HandlerError::Form(_) | HandlerError::Decode(_) | HandlerError::Rejected(_) => {
                tracing::warn!("{}", self);
                StatusCode::BAD_REQUEST.into_response()
            }
        }
    }
}

/// Form body of `POST /items/new`; a missing field decodes as empty.
#[derive(Debug, Deserialize)]
pub struct CreateForm {
    #[serde(default)]
    pub data: String,
}

/// All items, important first, then oldest first
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, HandlerError> {
    let mut items = state.repo.list().await.map_err(HandlerError::Fetch)?;
    sort_items(&mut items);
    Ok(Json(items))
}

/// Create from the JSON in `data`. The client's ID is replaced. Every
/// failure, an unreadable form included, is a 400.
pub async fn create_item(
    State(state): State<AppState>,
    form: Result<Form<CreateForm>, FormRejection>,
) -> Result<(), HandlerError> {
    let Form(form) = form?;
    let mut item: Item = serde_json::from_str(&form.data)?;
    let (created_at, id) = state.ids.next(Utc::now());
    item.created_at = created_at;
    item.id = id;
    item.check()?;

    state.repo.create(&item).await?;
    tracing::info!(id = %item.id, priority = item.priority, "item created");
    Ok(())
}

/// Delete by ID. Unknown IDs succeed.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(), HandlerError> {
    state.repo.delete(&id).await?;
    tracing::info!(id = %id, "item deleted");
    Ok(())
}
