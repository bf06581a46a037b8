// crates/backend-lib/src/handlers/mod.rs

//! Route handlers for the MentoreTalk REST API.

pub mod auth;
pub mod feed;
pub mod mentors;
pub mod resumes;
pub mod users;
