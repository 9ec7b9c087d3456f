use thiserror::Error;

use crate::contract::error::ErrorKind;
use crate::contract::model::{ProjectId, UserId};
use crate::domain::access::ProjectAction;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Project not found: {id}")]
    ProjectNotFound { id: ProjectId },

    #[error("User {user} may not {action} project {id}")]
    AccessDenied {
        id: ProjectId,
        user: UserId,
        action: ProjectAction,
    },

    #[error("Project name cannot be empty")]
    EmptyName,

    #[error("Project name too long: {len} characters (max: {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("Project description too long: {len} characters (max: {max})")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("User {user} owns project {id} and cannot be a collaborator")]
    OwnerAsCollaborator { id: ProjectId, user: UserId },

    #[error("User id {user} is out of range (max: {max})")]
    UserIdOutOfRange { user: UserId, max: UserId },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn project_not_found(id: ProjectId) -> Self {
        Self::ProjectNotFound { id }
    }

    pub fn access_denied(id: ProjectId, user: UserId, action: ProjectAction) -> Self {
        Self::AccessDenied { id, user, action }
    }

    pub fn empty_name() -> Self {
        Self::EmptyName
    }

    pub fn name_too_long(len: usize, max: usize) -> Self {
        Self::NameTooLong { len, max }
    }

    pub fn description_too_long(len: usize, max: usize) -> Self {
        Self::DescriptionTooLong { len, max }
    }

    pub fn owner_as_collaborator(id: ProjectId, user: UserId) -> Self {
        Self::OwnerAsCollaborator { id, user }
    }

    pub fn user_id_out_of_range(user: UserId, max: UserId) -> Self {
        Self::UserIdOutOfRange { user, max }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProjectNotFound { .. } => ErrorKind::NotFound,
            Self::AccessDenied { .. } => ErrorKind::Forbidden,
            Self::EmptyName
            | Self::NameTooLong { .. }
            | Self::DescriptionTooLong { .. }
            | Self::OwnerAsCollaborator { .. }
            | Self::UserIdOutOfRange { .. } => ErrorKind::InvalidInput,
            Self::Database { .. } => ErrorKind::Internal,
        }
    }
}
