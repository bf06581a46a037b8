// ============================
// crates/backend-lib/src/handlers/feed.rs
// ============================
//! Social feed handlers.
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::middleware::CurrentUser;
use crate::error::AppError;
use crate::models::Post;
use crate::store::Store;
use crate::validation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NewPostRequest {
    pub content: String,
}

/// `GET /api/feed`
pub async fn list_feed<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Post>>, AppError> {
    Ok(Json(state.store.list_posts().await?))
}

/// `POST /api/feed`
///
/// The author is the identity the gate resolved, never a client-supplied
/// field.
pub async fn create_post<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<NewPostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    validation::validate_content(&req.content)?;

    let post = Post {
        id: Uuid::new_v4(),
        author_id: user.id,
        author: user.username,
        content: req.content,
        created_at: Utc::now(),
    };
    let post = state.store.create_post(post).await?;

    Ok((StatusCode::CREATED, Json(post)))
}
