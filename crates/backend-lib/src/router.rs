// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router: public auth/directory routes plus the gated API surface.
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::middleware::require_auth;
use crate::handlers;
use crate::store::Store;
use crate::AppState;

/// Create the API router.
///
/// Everything behind `require_auth` receives a resolved `CurrentUser`
/// extension; the public routes never see one.
pub fn create_router<S: Store + 'static>(state: Arc<AppState<S>>) -> Router {
    let public = Router::new()
        .route("/api/auth/signup", post(handlers::auth::signup::<S>))
        .route("/api/auth/login", post(handlers::auth::login::<S>))
        .route("/api/mentors", get(handlers::mentors::list_mentors::<S>));

    let protected = Router::new()
        .route(
            "/api/users/me",
            get(handlers::users::get_profile).patch(handlers::users::update_profile::<S>),
        )
        .route(
            "/api/users/me/sessions",
            post(handlers::users::add_mentor_session::<S>),
        )
        .route(
            "/api/feed",
            get(handlers::feed::list_feed::<S>).post(handlers::feed::create_post::<S>),
        )
        .route(
            "/api/resumes",
            get(handlers::resumes::list_resumes::<S>).post(handlers::resumes::create_resume::<S>),
        )
        .route("/api/resumes/{id}", get(handlers::resumes::get_resume::<S>))
        .route(
            "/api/resumes/{id}/comments",
            post(handlers::resumes::add_comment::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<S>,
        ));

    public
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
