//! Post Routes
//!
//! - GET /posts - List all entries
//! - POST /posts - Create an entry

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::journal::{Entry, NewEntry, DEFAULT_USER_ID};
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::ServerState;

/// Create request body; `userId` may be omitted
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    #[serde(default = "default_user_id")]
    pub user_id: u64,
}

fn default_user_id() -> u64 {
    DEFAULT_USER_ID
}

/// GET /posts
pub async fn list_posts(State(state): State<Arc<ServerState>>) -> ServerResult<Json<Vec<Entry>>> {
    let entries = state.provider.list_entries().await?;
    Ok(Json(entries))
}

/// POST /posts
///
/// Returns 201 with the stored entry.
pub async fn create_post(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CreatePostRequest>,
) -> ServerResult<(StatusCode, Json<Entry>)> {
    validate_create_request(&req)?;

    let new_entry = NewEntry {
        title: req.title,
        body: req.body,
        user_id: req.user_id,
    };
    let entry = state.provider.create_entry(&new_entry).await?;

    tracing::debug!(id = entry.id, "Stored post");
    Ok((StatusCode::CREATED, Json(entry)))
}

fn validate_create_request(req: &CreatePostRequest) -> ServerResult<()> {
    if req.title.trim().is_empty() {
        return Err(ServerError::Validation("title is required".into()));
    }
    if req.body.trim().is_empty() {
        return Err(ServerError::Validation("body is required".into()));
    }
    Ok(())
}
