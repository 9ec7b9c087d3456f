use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::ProjectsApi,
    error::ProjectsError,
    model::{NewProject, Project, ProjectId, ProjectUpdate, UserId},
};
use crate::domain::service::Service;

/// Local implementation of the ProjectsApi trait that delegates to the domain service
pub struct ProjectsLocalClient {
    service: Arc<Service>,
}

impl ProjectsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ProjectsApi for ProjectsLocalClient {
    async fn list_projects(&self, user: UserId) -> Result<Vec<Project>, ProjectsError> {
        self.service.list_projects(user).await.map_err(Into::into)
    }

    async fn get_project(&self, user: UserId, id: ProjectId) -> Result<Project, ProjectsError> {
        self.service.get_project(user, id).await.map_err(Into::into)
    }

    async fn create_project(
        &self,
        user: UserId,
        new_project: NewProject,
    ) -> Result<Project, ProjectsError> {
        self.service
            .create_project(user, new_project)
            .await
            .map_err(Into::into)
    }

    async fn update_project(
        &self,
        user: UserId,
        id: ProjectId,
        update: ProjectUpdate,
    ) -> Result<Project, ProjectsError> {
        self.service
            .update_project(user, id, update)
            .await
            .map_err(Into::into)
    }

    async fn delete_project(&self, user: UserId, id: ProjectId) -> Result<(), ProjectsError> {
        self.service.delete_project(user, id).await.map_err(Into::into)
    }

    async fn add_collaborator(
        &self,
        user: UserId,
        id: ProjectId,
        target: UserId,
    ) -> Result<Project, ProjectsError> {
        self.service
            .add_collaborator(user, id, target)
            .await
            .map_err(Into::into)
    }

    async fn remove_collaborator(
        &self,
        user: UserId,
        id: ProjectId,
        target: UserId,
    ) -> Result<Project, ProjectsError> {
        self.service
            .remove_collaborator(user, id, target)
            .await
            .map_err(Into::into)
    }
}
