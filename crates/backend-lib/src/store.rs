// ============================
// crates/backend-lib/src/store.rs
// ============================
//! Storage abstraction with flat-file implementation.
//!
//! The auth core only needs `create_user`/`find_user_by_handle`/
//! `find_user_by_id`/`save_user` with handle uniqueness; the rest of the
//! trait carries the peripheral collections (mentor directory, feed,
//! resumes). The trait is the seam where a document database would plug in.
use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs as tokio_fs;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{MentorProfile, Post, Resume, User};

/// Query filters for the mentor directory.
#[derive(Debug, Default, Clone)]
pub struct MentorFilter {
    /// Case-insensitive substring match over name or bio.
    pub search: Option<String>,
    /// Profile's company must be one of these, when non-empty.
    pub companies: Vec<String>,
    /// Any-overlap membership, when non-empty.
    pub skills: Vec<String>,
    /// Any-overlap membership, when non-empty.
    pub domains: Vec<String>,
}

impl MentorFilter {
    pub fn matches(&self, profile: &MentorProfile) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !profile.name.to_lowercase().contains(&needle)
                && !profile.bio.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if !self.companies.is_empty() && !self.companies.contains(&profile.company) {
            return false;
        }
        if !self.skills.is_empty() && !self.skills.iter().any(|s| profile.skills.contains(s)) {
            return false;
        }
        if !self.domains.is_empty() && !self.domains.iter().any(|d| profile.domains.contains(d)) {
            return false;
        }
        true
    }
}

/// Trait for storage backends
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist a new identity. Fails with `DuplicateHandle` when the handle
    /// (email) is already registered; the existing record is left untouched.
    async fn create_user(&self, user: User) -> Result<User, AppError>;

    /// Look up an identity by its login handle.
    async fn find_user_by_handle(&self, handle: &str) -> Result<Option<User>, AppError>;

    /// Look up an identity by primary key.
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Persist changes to an existing identity. A handle change re-checks
    /// uniqueness.
    async fn save_user(&self, user: &User) -> Result<(), AppError>;

    /// Mentor directory listing, filtered.
    async fn list_mentors(&self, filter: &MentorFilter) -> Result<Vec<MentorProfile>, AppError>;

    /// Add an entry to the mentor directory. There is no public route for
    /// this; entries are seeded out-of-band (ops tooling, tests).
    async fn create_mentor_profile(&self, profile: MentorProfile) -> Result<(), AppError>;

    /// Feed, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;

    async fn create_post(&self, post: Post) -> Result<Post, AppError>;

    async fn create_resume(&self, resume: Resume) -> Result<Resume, AppError>;

    /// All submitted resumes, newest first.
    async fn list_resumes(&self) -> Result<Vec<Resume>, AppError>;

    async fn find_resume(&self, id: Uuid) -> Result<Option<Resume>, AppError>;

    async fn save_resume(&self, resume: &Resume) -> Result<(), AppError>;
}

const USERS_DIR: &str = "users";
const MENTORS_DIR: &str = "mentors";
const POSTS_DIR: &str = "posts";
const RESUMES_DIR: &str = "resumes";

/// Flat-file implementation of the Store trait.
///
/// One JSON document per record under the data directory. The handle index
/// is rebuilt from the user documents at startup and kept in memory; it is
/// the single point where handle uniqueness is enforced.
#[derive(Clone)]
pub struct FlatFileStore {
    root: PathBuf,
    handles: std::sync::Arc<DashMap<String, Uuid>>,
}

impl FlatFileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        for dir in [USERS_DIR, MENTORS_DIR, POSTS_DIR, RESUMES_DIR] {
            fs::create_dir_all(root.join(dir))?;
        }

        let handles = DashMap::new();
        for entry in fs::read_dir(root.join(USERS_DIR))? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let content = fs::read_to_string(&path)?;
                let user: User = serde_json::from_str(&content)?;
                handles.insert(user.email.clone(), user.id);
            }
        }

        Ok(Self {
            root,
            handles: std::sync::Arc::new(handles),
        })
    }

    fn doc_path(&self, dir: &str, id: Uuid) -> PathBuf {
        self.root.join(dir).join(format!("{id}.json"))
    }

    /// Stage to a temp file, then rename. A failed write never clobbers
    /// the existing document.
    async fn write_doc<T: Serialize>(&self, dir: &str, id: Uuid, doc: &T) -> Result<(), AppError> {
        let path = self.doc_path(dir, id);
        let staging = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(doc)?;
        tokio_fs::write(&staging, json).await?;
        tokio_fs::rename(&staging, &path).await?;
        Ok(())
    }

    async fn read_doc<T: DeserializeOwned>(
        &self,
        dir: &str,
        id: Uuid,
    ) -> Result<Option<T>, AppError> {
        let path = self.doc_path(dir, id);
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio_fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn read_all<T: DeserializeOwned>(&self, dir: &str) -> Result<Vec<T>, AppError> {
        let mut docs = Vec::new();
        let mut entries = tokio_fs::read_dir(self.root.join(dir)).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let content = tokio_fs::read_to_string(&path).await?;
                docs.push(serde_json::from_str(&content)?);
            }
        }
        Ok(docs)
    }
}

#[async_trait]
impl Store for FlatFileStore {
    async fn create_user(&self, user: User) -> Result<User, AppError> {
        use dashmap::mapref::entry::Entry;

        // Claim the handle before touching the filesystem; the entry guard
        // is dropped before any await point.
        match self.handles.entry(user.email.clone()) {
            Entry::Occupied(_) => return Err(AppError::DuplicateHandle),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            },
        }

        if let Err(err) = self.write_doc(USERS_DIR, user.id, &user).await {
            self.handles.remove(&user.email);
            return Err(err);
        }
        Ok(user)
    }

    async fn find_user_by_handle(&self, handle: &str) -> Result<Option<User>, AppError> {
        let Some(id) = self.handles.get(handle).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_user_by_id(id).await
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.read_doc(USERS_DIR, id).await
    }

    async fn save_user(&self, user: &User) -> Result<(), AppError> {
        use dashmap::mapref::entry::Entry;

        let existing: User = self
            .read_doc(USERS_DIR, user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("user".to_string()))?;

        if existing.email == user.email {
            return self.write_doc(USERS_DIR, user.id, user).await;
        }

        // Claim the new handle first, as create_user does; the old handle is
        // released only once the document is on disk, and a failed write
        // rolls the claim back so index and documents never disagree.
        match self.handles.entry(user.email.clone()) {
            Entry::Occupied(_) => return Err(AppError::DuplicateHandle),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            },
        }

        if let Err(err) = self.write_doc(USERS_DIR, user.id, user).await {
            self.handles.remove(&user.email);
            return Err(err);
        }
        self.handles.remove(&existing.email);
        Ok(())
    }

    async fn list_mentors(&self, filter: &MentorFilter) -> Result<Vec<MentorProfile>, AppError> {
        let mut mentors: Vec<MentorProfile> = self
            .read_all::<MentorProfile>(MENTORS_DIR)
            .await?
            .into_iter()
            .filter(|profile| filter.matches(profile))
            .collect();
        mentors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(mentors)
    }

    async fn create_mentor_profile(&self, profile: MentorProfile) -> Result<(), AppError> {
        self.write_doc(MENTORS_DIR, profile.id, &profile).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let mut posts: Vec<Post> = self.read_all(POSTS_DIR).await?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn create_post(&self, post: Post) -> Result<Post, AppError> {
        self.write_doc(POSTS_DIR, post.id, &post).await?;
        Ok(post)
    }

    async fn create_resume(&self, resume: Resume) -> Result<Resume, AppError> {
        self.write_doc(RESUMES_DIR, resume.id, &resume).await?;
        Ok(resume)
    }

    async fn list_resumes(&self) -> Result<Vec<Resume>, AppError> {
        let mut resumes: Vec<Resume> = self.read_all(RESUMES_DIR).await?;
        resumes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(resumes)
    }

    async fn find_resume(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        self.read_doc(RESUMES_DIR, id).await
    }

    async fn save_resume(&self, resume: &Resume) -> Result<(), AppError> {
        self.write_doc(RESUMES_DIR, resume.id, resume).await
    }
}
