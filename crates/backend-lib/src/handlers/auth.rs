// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Signup and login handlers.
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use metrics::counter;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::{hash_password_secure, verify_password};
use crate::error::AppError;
use crate::models::{Education, Experience, PublicUser, Role, Specialty, User};
use crate::store::Store;
use crate::validation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub education: Option<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub mentor_specialty: Option<Specialty>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// `POST /api/auth/signup`
pub async fn signup<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(mut req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    validation::validate_username(&req.username)?;
    validation::validate_email(&req.email)?;
    validation::validate_password(&req.password, &state.settings.password_requirements)?;

    // The secret is derived before the record ever exists; the plaintext
    // buffer is wiped once hashed.
    let password_hash = hash_password_secure(&mut req.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        AppError::Internal("password hashing failed".to_string())
    })?;

    let user = User {
        id: Uuid::new_v4(),
        username: req.username,
        email: req.email,
        password_hash,
        role: req.role,
        bio: req.bio,
        education: req.education,
        experience: req.experience,
        skills: req.skills,
        // Specialty only means something on a mentor account.
        mentor_specialty: if req.role == Role::Mentor {
            req.mentor_specialty
        } else {
            None
        },
        mentor_sessions: vec![],
        profile_picture: None,
        created_at: Utc::now(),
    };

    let user = state.store.create_user(user).await?;
    counter!("auth_signups_total").increment(1);
    tracing::info!(user_id = %user.id, role = ?user.role, "account created");

    Ok((StatusCode::CREATED, Json(user.public())))
}

/// `POST /api/auth/login`
///
/// Unknown handle and wrong password stay distinct in logs but share one
/// outward `InvalidCredentials` outcome, so accounts cannot be enumerated.
pub async fn login<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = match state.store.find_user_by_handle(&req.email).await? {
        Some(user) => user,
        None => {
            tracing::debug!("login rejected: unknown handle");
            counter!("auth_logins_total", "outcome" => "failure").increment(1);
            return Err(AppError::InvalidCredentials);
        },
    };

    // A corrupt stored hash is a server fault, not a credential failure.
    let verified = verify_password(&user.password_hash, &req.password).map_err(|e| {
        tracing::error!(user_id = %user.id, error = %e, "password verification failed");
        AppError::Internal("password verification failed".to_string())
    })?;

    if !verified {
        tracing::debug!(user_id = %user.id, "login rejected: wrong password");
        counter!("auth_logins_total", "outcome" => "failure").increment(1);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id)?;
    counter!("auth_logins_total", "outcome" => "success").increment(1);

    Ok(Json(LoginResponse {
        token,
        user: user.public(),
    }))
}
