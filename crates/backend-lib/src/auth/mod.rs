// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module: credential hashing, token issuance/verification,
//! and the request gate.

pub mod middleware;
pub mod password;
pub mod token;

pub use middleware::{require_auth, CurrentUser};
pub use password::{hash_password, hash_password_secure, verify_password, PasswordRequirements};
pub use token::{Claims, TokenError, TokenIssuer};
