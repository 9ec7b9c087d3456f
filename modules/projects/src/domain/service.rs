use std::sync::Arc;

use crate::contract::model::{
    NewProject, Project, ProjectId, ProjectUpdate, UserId, MAX_USER_ID,
};
use crate::domain::access::{self, AccessDecision, ProjectAction};
use crate::domain::error::DomainError;
use crate::domain::events::ProjectDomainEvent;
use crate::domain::ports::EventPublisher;
use crate::domain::repo::{NewProjectRecord, ProjectsRepository};
use chrono::Utc;
use tracing::{debug, error, info, instrument};

/// Domain service orchestrating project use cases.
///
/// Each call resolves the project, asks the access engine, then mutates the store.
/// Depends only on the repository and event ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ProjectsRepository>,
    events: Arc<dyn EventPublisher<ProjectDomainEvent>>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
    pub max_description_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
            max_description_length: 1000,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn ProjectsRepository>,
        events: Arc<dyn EventPublisher<ProjectDomainEvent>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            events,
            config,
        }
    }

    #[instrument(name = "projects.service.list_projects", skip(self))]
    pub async fn list_projects(&self, user: UserId) -> Result<Vec<Project>, DomainError> {
        debug!("Listing projects visible to user");

        let projects = self
            .repo
            .find_all_for_user(user)
            .await
            .map_err(|e| store_error("find_all_for_user", e))?;

        let visible: Vec<Project> = projects
            .into_iter()
            .filter(|p| access::check(p, user, ProjectAction::View).is_granted())
            .collect();

        debug!("Found {} visible projects", visible.len());
        Ok(visible)
    }

    #[instrument(name = "projects.service.get_project", skip(self))]
    pub async fn get_project(&self, user: UserId, id: ProjectId) -> Result<Project, DomainError> {
        debug!("Getting project by id");
        let project = self.load_visible(user, id).await?;
        debug!("Successfully retrieved project");
        Ok(project)
    }

    #[instrument(
        name = "projects.service.create_project",
        skip(self, new_project),
        fields(name = %new_project.name)
    )]
    pub async fn create_project(
        &self,
        user: UserId,
        new_project: NewProject,
    ) -> Result<Project, DomainError> {
        info!("Creating new project");

        validate_user_id(user)?;
        let name = self.validate_name(&new_project.name)?;
        let description = self.validate_description(new_project.description)?;

        let project = self
            .repo
            .insert(NewProjectRecord {
                name,
                description,
                owner_id: user,
                created_at: Utc::now(),
            })
            .await
            .map_err(|e| store_error("insert", e))?;

        self.events.publish(&ProjectDomainEvent::Created {
            id: project.id,
            by: user,
            at: project.created_at,
        });

        info!("Successfully created project with id={}", project.id);
        Ok(project)
    }

    #[instrument(name = "projects.service.update_project", skip(self, update))]
    pub async fn update_project(
        &self,
        user: UserId,
        id: ProjectId,
        update: ProjectUpdate,
    ) -> Result<Project, DomainError> {
        info!("Updating project");

        let name = self.validate_name(&update.name)?;
        let description = self.validate_description(update.description)?;

        let mut project = self.load_visible(user, id).await?;
        self.require(&project, user, ProjectAction::Edit)?;

        project.name = name;
        project.description = description;
        project.updated_at = Utc::now();

        self.repo
            .save(&project)
            .await
            .map_err(|e| store_error("save", e))?;

        self.events.publish(&ProjectDomainEvent::Updated {
            id,
            by: user,
            at: project.updated_at,
        });

        info!("Successfully updated project");
        Ok(project)
    }

    #[instrument(name = "projects.service.delete_project", skip(self))]
    pub async fn delete_project(&self, user: UserId, id: ProjectId) -> Result<(), DomainError> {
        info!("Deleting project");

        let project = self.load_visible(user, id).await?;
        self.require(&project, user, ProjectAction::Delete)?;

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| store_error("delete", e))?;

        // Lost a race with another delete.
        if !deleted {
            return Err(DomainError::project_not_found(id));
        }

        self.events.publish(&ProjectDomainEvent::Deleted {
            id,
            by: user,
            at: Utc::now(),
        });

        info!("Successfully deleted project");
        Ok(())
    }

    /// Grant `target` read-only standing.
    ///
    /// Adding the owner is rejected; adding an existing collaborator changes nothing.
    #[instrument(name = "projects.service.add_collaborator", skip(self))]
    pub async fn add_collaborator(
        &self,
        user: UserId,
        id: ProjectId,
        target: UserId,
    ) -> Result<Project, DomainError> {
        info!("Adding collaborator");

        let mut project = self.load_visible(user, id).await?;
        self.require(&project, user, ProjectAction::ManageCollaborators)?;

        if project.is_owner(target) {
            return Err(DomainError::owner_as_collaborator(id, target));
        }
        validate_user_id(target)?;
        if project.is_collaborator(target) {
            debug!("User is already a collaborator, nothing to do");
            return Ok(project);
        }

        self.repo
            .add_collaborator(id, target)
            .await
            .map_err(|e| store_error("add_collaborator", e))?;
        project.collaborators.insert(target);

        self.events.publish(&ProjectDomainEvent::CollaboratorAdded {
            id,
            by: user,
            collaborator: target,
            at: Utc::now(),
        });

        info!("Successfully added collaborator");
        Ok(project)
    }

    /// Revoke `target`'s standing. Removing a non-collaborator succeeds without effect.
    #[instrument(name = "projects.service.remove_collaborator", skip(self))]
    pub async fn remove_collaborator(
        &self,
        user: UserId,
        id: ProjectId,
        target: UserId,
    ) -> Result<Project, DomainError> {
        info!("Removing collaborator");

        let mut project = self.load_visible(user, id).await?;
        self.require(&project, user, ProjectAction::ManageCollaborators)?;

        if !project.is_collaborator(target) {
            debug!("User is not a collaborator, nothing to do");
            return Ok(project);
        }

        let removed = self
            .repo
            .remove_collaborator(id, target)
            .await
            .map_err(|e| store_error("remove_collaborator", e))?;
        project.collaborators.remove(&target);

        if removed {
            self.events.publish(&ProjectDomainEvent::CollaboratorRemoved {
                id,
                by: user,
                collaborator: target,
                at: Utc::now(),
            });
        }

        info!("Successfully removed collaborator");
        Ok(project)
    }

    // --- access helpers ---

    /// Load a project the user may view.
    ///
    /// Absent projects and projects the user has no standing on both yield
    /// `ProjectNotFound`, so existence never leaks to outsiders.
    async fn load_visible(&self, user: UserId, id: ProjectId) -> Result<Project, DomainError> {
        let project = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| store_error("find_by_id", e))?
            .ok_or_else(|| DomainError::project_not_found(id))?;

        match access::check(&project, user, ProjectAction::View) {
            AccessDecision::Granted => Ok(project),
            AccessDecision::Denied { .. } => {
                debug!("User has no standing on project");
                Err(DomainError::project_not_found(id))
            }
        }
    }

    /// Require `action` on a project the caller can already see.
    fn require(
        &self,
        project: &Project,
        user: UserId,
        action: ProjectAction,
    ) -> Result<(), DomainError> {
        match access::check(project, user, action) {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Denied { standing } => {
                debug!(?standing, %action, "Access denied");
                Err(DomainError::access_denied(project.id, user, action))
            }
        }
    }

    // --- validation helpers ---

    fn validate_name(&self, name: &str) -> Result<String, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::empty_name());
        }
        let len = name.chars().count();
        if len > self.config.max_name_length {
            return Err(DomainError::name_too_long(len, self.config.max_name_length));
        }
        Ok(name.to_owned())
    }

    fn validate_description(
        &self,
        description: Option<String>,
    ) -> Result<Option<String>, DomainError> {
        let Some(description) = description else {
            return Ok(None);
        };
        let description = description.trim();
        if description.is_empty() {
            return Ok(None);
        }
        let len = description.chars().count();
        if len > self.config.max_description_length {
            return Err(DomainError::description_too_long(
                len,
                self.config.max_description_length,
            ));
        }
        Ok(Some(description.to_owned()))
    }
}

/// Ids recorded on a project must fit every store's key range.
fn validate_user_id(user: UserId) -> Result<(), DomainError> {
    if user > MAX_USER_ID {
        return Err(DomainError::user_id_out_of_range(user, MAX_USER_ID));
    }
    Ok(())
}

fn store_error(operation: &'static str, err: anyhow::Error) -> DomainError {
    let message = format!("{operation}: {err:#}");
    error!(operation, error = %message, "Project store call failed");
    DomainError::database(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::events::NoopEventPublisher;
    use crate::infra::storage::memory_repo::InMemoryProjectsRepository;

    fn service_with(config: ServiceConfig) -> Service {
        Service::new(
            Arc::new(InMemoryProjectsRepository::new()),
            Arc::new(NoopEventPublisher),
            config,
        )
    }

    fn service() -> Service {
        service_with(ServiceConfig::default())
    }

    #[test]
    fn test_validate_name_trims() {
        let svc = service();
        assert_eq!(svc.validate_name("  Apollo  ").unwrap(), "Apollo");
        assert!(matches!(svc.validate_name(""), Err(DomainError::EmptyName)));
        assert!(matches!(svc.validate_name(" \t\n"), Err(DomainError::EmptyName)));
    }

    #[test]
    fn test_validate_name_length_counts_chars() {
        let svc = service_with(ServiceConfig {
            max_name_length: 3,
            ..ServiceConfig::default()
        });
        assert!(svc.validate_name("äöü").is_ok());
        assert!(matches!(
            svc.validate_name("abcd"),
            Err(DomainError::NameTooLong { len: 4, max: 3 })
        ));
    }

    #[test]
    fn test_validate_description_normalizes_blank() {
        let svc = service();
        assert_eq!(svc.validate_description(None).unwrap(), None);
        assert_eq!(svc.validate_description(Some("   ".into())).unwrap(), None);
        assert_eq!(
            svc.validate_description(Some(" launch ".into())).unwrap(),
            Some("launch".to_owned())
        );
    }

    #[test]
    fn test_validate_description_too_long() {
        let svc = service_with(ServiceConfig {
            max_description_length: 5,
            ..ServiceConfig::default()
        });
        assert!(matches!(
            svc.validate_description(Some("abcdef".into())),
            Err(DomainError::DescriptionTooLong { len: 6, max: 5 })
        ));
    }

    #[test]
    fn test_validate_user_id_bounds() {
        assert!(validate_user_id(0).is_ok());
        assert!(validate_user_id(MAX_USER_ID).is_ok());
        assert!(matches!(
            validate_user_id(MAX_USER_ID + 1),
            Err(DomainError::UserIdOutOfRange { .. })
        ));
    }

    #[test]
    fn test_store_error_is_internal() {
        let err = store_error("insert", anyhow::anyhow!("connection reset"));
        assert_eq!(err.kind(), crate::contract::error::ErrorKind::Internal);
        assert!(err.to_string().contains("insert: connection reset"));
    }
}
