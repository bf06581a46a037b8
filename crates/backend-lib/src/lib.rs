// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the MentoreTalk API server.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod store;
pub mod validation;

use std::time::Duration;

use crate::auth::TokenIssuer;
use crate::config::Settings;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// Built once at process start; the signing secret and store connection are
/// explicit constructor inputs rather than ambient globals, so the auth
/// components test in isolation with fake keys and stores.
pub struct AppState<S> {
    /// Storage backend
    pub store: S,
    /// Session token issuer/verifier
    pub tokens: TokenIssuer,
    /// Settings snapshot
    pub settings: Settings,
}

impl<S: Store> AppState<S> {
    /// Create a new application state
    pub fn new(store: S, settings: Settings) -> Self {
        let tokens = TokenIssuer::new(
            &settings.jwt_secret,
            Duration::from_secs(settings.token_ttl_secs),
        );
        Self {
            store,
            tokens,
            settings,
        }
    }
}
