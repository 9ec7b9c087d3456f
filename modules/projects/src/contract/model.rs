use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

/// Opaque user identifier. Identity is established upstream.
pub type UserId = u64;

/// Largest user id a project may record as owner or collaborator.
pub const MAX_USER_ID: UserId = i64::MAX as UserId;

/// Store-assigned project identifier.
pub type ProjectId = u64;

/// Pure project model for in-process consumers (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    /// Creating user. Never changes after insert.
    pub owner_id: UserId,
    /// Users with read-only standing. Never contains `owner_id`.
    pub collaborators: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn is_owner(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    pub fn is_collaborator(&self, user: UserId) -> bool {
        self.collaborators.contains(&user)
    }
}

/// Data for creating a new project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Replacement values for the mutable fields of a project.
///
/// Both fields are written on update; a `None` description clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: String,
    pub description: Option<String>,
}

impl ProjectUpdate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
