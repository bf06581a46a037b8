// ============================
// crates/backend-lib/src/auth/middleware.rs
// ============================
//! Request gate for protected routes.
//!
//! Per request: extract the bearer credential, verify it, re-resolve the
//! subject from the store, then attach the identity to the request
//! extensions. Role policy is not enforced here; routes that need it check
//! `CurrentUser`'s role themselves.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use metrics::counter;

use crate::error::AppError;
use crate::models::User;
use crate::store::Store;
use crate::AppState;

/// The identity resolved by the gate, readable by downstream handlers via
/// `Extension<CurrentUser>`. Resolved once per request; not re-verified
/// mid-request.
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// Authorization middleware for all protected routes.
pub async fn require_auth<S: Store + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(request.headers()) else {
        counter!("auth_gate_rejected_total", "reason" => "missing_credential").increment(1);
        return Err(AppError::AuthRequired);
    };

    let user_id = state.tokens.verify(token).map_err(|err| {
        tracing::debug!(error = %err, "token rejected");
        counter!("auth_gate_rejected_total", "reason" => "invalid_token").increment(1);
        AppError::from(err)
    })?;

    // The token was well-formed and unexpired, but its referent may have
    // disappeared since issuance.
    let Some(user) = state.store.find_user_by_id(user_id).await? else {
        tracing::debug!(%user_id, "token subject no longer exists");
        counter!("auth_gate_rejected_total", "reason" => "stale_identity").increment(1);
        return Err(AppError::StaleIdentity);
    };

    counter!("auth_gate_admitted_total").increment(1);
    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// `Authorization: Bearer <token>` is the sole accepted transport.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
