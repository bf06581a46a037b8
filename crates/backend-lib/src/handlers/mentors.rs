// ============================
// crates/backend-lib/src/handlers/mentors.rs
// ============================
//! Mentor directory listing with filters.
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::MentorProfile;
use crate::store::{MentorFilter, Store};
use crate::AppState;

/// Query parameters: `search` plus comma-separated `companies`, `skills`
/// and `domains` lists.
#[derive(Debug, Default, Deserialize)]
pub struct MentorQuery {
    pub search: Option<String>,
    pub companies: Option<String>,
    pub skills: Option<String>,
    pub domains: Option<String>,
}

fn split_csv(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// `GET /api/mentors`
pub async fn list_mentors<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<MentorQuery>,
) -> Result<Json<Vec<MentorProfile>>, AppError> {
    let filter = MentorFilter {
        search: params.search,
        companies: split_csv(params.companies),
        skills: split_csv(params.skills),
        domains: split_csv(params.domains),
    };
    Ok(Json(state.store.list_mentors(&filter).await?))
}
