// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
//! Profile handlers and the role-gated mentor-session route.
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::auth::middleware::CurrentUser;
use crate::auth::password::hash_password_secure;
use crate::error::AppError;
use crate::models::{Education, Experience, MentorSession, PublicUser, Role, Specialty};
use crate::store::Store;
use crate::validation;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub education: Option<Education>,
    pub experience: Option<Vec<Experience>>,
    pub skills: Option<Vec<String>>,
    pub mentor_specialty: Option<Specialty>,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewSessionRequest {
    pub title: String,
    pub date: DateTime<Utc>,
}

/// `GET /api/users/me`
pub async fn get_profile(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<PublicUser> {
    Json(user.public())
}

/// `PATCH /api/users/me`
///
/// Partial update: absent fields stay untouched. Only a password change
/// goes through the hasher; any other update leaves the stored secret
/// byte-for-byte as it was.
pub async fn update_profile<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(mut user)): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, AppError> {
    if let Some(username) = req.username {
        validation::validate_username(&username)?;
        user.username = username;
    }
    if let Some(email) = req.email {
        validation::validate_email(&email)?;
        user.email = email;
    }
    if let Some(bio) = req.bio {
        user.bio = Some(bio);
    }
    if let Some(education) = req.education {
        user.education = Some(education);
    }
    if let Some(experience) = req.experience {
        user.experience = experience;
    }
    if let Some(skills) = req.skills {
        user.skills = skills;
    }
    if let Some(picture) = req.profile_picture {
        user.profile_picture = Some(picture);
    }
    // Specialty is a mentor-only attribute; silently ignored otherwise.
    if user.role == Role::Mentor {
        if let Some(specialty) = req.mentor_specialty {
            user.mentor_specialty = Some(specialty);
        }
    }
    if let Some(mut password) = req.password {
        validation::validate_password(&password, &state.settings.password_requirements)?;
        user.password_hash = hash_password_secure(&mut password).map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AppError::Internal("password hashing failed".to_string())
        })?;
    }

    state.store.save_user(&user).await?;
    Ok(Json(user.public()))
}

/// `POST /api/users/me/sessions`
///
/// The gate admits any authenticated identity here; the mentor-only policy
/// is this handler's own check.
pub async fn add_mentor_session<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    Extension(CurrentUser(mut user)): Extension<CurrentUser>,
    Json(req): Json<NewSessionRequest>,
) -> Result<(StatusCode, Json<MentorSession>), AppError> {
    if user.role != Role::Mentor {
        return Err(AppError::Forbidden(
            "only mentors can add sessions".to_string(),
        ));
    }

    validation::validate_content(&req.title)?;

    let session = MentorSession {
        title: req.title,
        date: req.date,
    };
    user.mentor_sessions.push(session.clone());
    state.store.save_user(&user).await?;

    Ok((StatusCode::CREATED, Json(session)))
}
