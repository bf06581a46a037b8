// ============================
// crates/backend-lib/src/models.rs
// ============================
//! Persisted document types and their client-facing views.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Student,
}

/// Mentor specialty tags, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Specialty {
    CareerGuidance,
    TechSkills,
    PersonalDevelopment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub responsibilities: String,
}

/// A session slot a mentor offers, appended via the role-gated route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorSession {
    pub title: String,
    pub date: DateTime<Utc>,
}

/// Identity record. The `password_hash` field only ever holds the one-way
/// scrypt transform of the submitted password, never the original bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Login handle; uniqueness is enforced at the store level.
    pub email: String,
    pub password_hash: String,
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
    #[serde(default)]
    pub mentor_sessions: Vec<MentorSession>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Client-facing view, with the stored secret stripped.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            bio: self.bio.clone(),
            education: self.education.clone(),
            experience: self.experience.clone(),
            skills: self.skills.clone(),
            mentor_specialty: self.mentor_specialty,
            mentor_sessions: self.mentor_sessions.clone(),
            profile_picture: self.profile_picture.clone(),
            created_at: self.created_at,
        }
    }
}

/// What the API returns for a user. Deliberately has no secret field at all,
/// so it cannot leak one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub bio: Option<String>,
    pub education: Option<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<String>,
    pub mentor_specialty: Option<Specialty>,
    pub mentor_sessions: Vec<MentorSession>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Entry in the mentor directory. A separate collection from identities,
/// as in the product's data model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorProfile {
    pub id: Uuid,
    pub name: String,
    pub bio: String,
    pub company: String,
    pub skills: Vec<String>,
    pub domains: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Social feed post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    /// Username snapshot at posting time.
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Resume submitted for review. Only metadata is kept; file durability is
/// out of scope for this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub id: Uuid,
    pub student_id: Uuid,
    pub file_name: String,
    #[serde(default)]
    pub comments: Vec<ResumeComment>,
    pub created_at: DateTime<Utc>,
}

/// Threaded review comment on a resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeComment {
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
