use async_trait::async_trait;

use crate::contract::{
    error::ProjectsError,
    model::{NewProject, Project, ProjectId, ProjectUpdate, UserId},
};

/// Public API trait for the projects module.
///
/// Every call takes the already-authenticated acting user explicitly.
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// All projects the user owns or collaborates on
    async fn list_projects(&self, user: UserId) -> Result<Vec<Project>, ProjectsError>;

    /// A single project visible to the user
    async fn get_project(&self, user: UserId, id: ProjectId) -> Result<Project, ProjectsError>;

    /// Create a project owned by `user`
    async fn create_project(
        &self,
        user: UserId,
        new_project: NewProject,
    ) -> Result<Project, ProjectsError>;

    /// Replace name and description (owner only)
    async fn update_project(
        &self,
        user: UserId,
        id: ProjectId,
        update: ProjectUpdate,
    ) -> Result<Project, ProjectsError>;

    /// Delete a project (owner only)
    async fn delete_project(&self, user: UserId, id: ProjectId) -> Result<(), ProjectsError>;

    /// Grant read-only standing to `target` (owner only)
    async fn add_collaborator(
        &self,
        user: UserId,
        id: ProjectId,
        target: UserId,
    ) -> Result<Project, ProjectsError>;

    /// Revoke `target`'s standing (owner only); absent targets are a no-op
    async fn remove_collaborator(
        &self,
        user: UserId,
        id: ProjectId,
        target: UserId,
    ) -> Result<Project, ProjectsError>;
}
