use async_trait::async_trait;

use crate::contract::model::{Project, ProjectId, UserId};

/// Fields the store needs to create a project; the store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectRecord {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// Errors carry no business meaning; the service reports all of them as internal.
#[async_trait]
pub trait ProjectsRepository: Send + Sync {
    /// Load a project with its collaborator set.
    async fn find_by_id(&self, id: ProjectId) -> anyhow::Result<Option<Project>>;
    /// Every project the user owns or collaborates on, ordered by id.
    async fn find_all_for_user(&self, user: UserId) -> anyhow::Result<Vec<Project>>;
    /// Persist a new project with no collaborators and return it with its id.
    async fn insert(&self, record: NewProjectRecord) -> anyhow::Result<Project>;
    /// Write name, description and `updated_at` of an existing project.
    ///
    /// Owner and collaborators are never touched by this call.
    async fn save(&self, project: &Project) -> anyhow::Result<()>;
    /// Delete a project and its collaborator rows. Returns true if it existed.
    async fn delete(&self, id: ProjectId) -> anyhow::Result<bool>;
    /// Add `user` to the collaborator set; adding an existing member is a no-op.
    async fn add_collaborator(&self, id: ProjectId, user: UserId) -> anyhow::Result<()>;
    /// Remove `user` from the collaborator set. Returns true if a row was removed.
    async fn remove_collaborator(&self, id: ProjectId, user: UserId) -> anyhow::Result<bool>;
}
