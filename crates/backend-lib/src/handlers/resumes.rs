// ============================
// crates/backend-lib/src/handlers/resumes.rs
// ============================
//! Resume review workflow: register a resume, list, inspect, comment.
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::middleware::CurrentUser;
use crate::error::AppError;
use crate::models::{Resume, ResumeComment};
use crate::store::Store;
use crate::validation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NewResumeRequest {
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct NewCommentRequest {
    pub text: String,
}

/// `POST /api/resumes`
pub async fn create_resume<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<NewResumeRequest>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    validation::validate_content(&req.file_name)?;

    let resume = Resume {
        id: Uuid::new_v4(),
        student_id: user.id,
        file_name: req.file_name,
        comments: vec![],
        created_at: Utc::now(),
    };
    let resume = state.store.create_resume(resume).await?;

    Ok((StatusCode::CREATED, Json(resume)))
}

/// `GET /api/resumes`
pub async fn list_resumes<S: Store>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Resume>>, AppError> {
    Ok(Json(state.store.list_resumes().await?))
}

/// `GET /api/resumes/{id}`
pub async fn get_resume<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    let resume = state
        .store
        .find_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound("resume".to_string()))?;
    Ok(Json(resume))
}

/// `POST /api/resumes/{id}/comments`
pub async fn add_comment<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<Uuid>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<NewCommentRequest>,
) -> Result<(StatusCode, Json<ResumeComment>), AppError> {
    validation::validate_content(&req.text)?;

    let mut resume = state
        .store
        .find_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound("resume".to_string()))?;

    let comment = ResumeComment {
        author_id: user.id,
        text: req.text,
        created_at: Utc::now(),
    };
    resume.comments.push(comment.clone());
    state.store.save_resume(&resume).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}
