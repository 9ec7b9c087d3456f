use std::fmt;

use thiserror::Error;

use crate::contract::model::ProjectId;

/// Closed set of failure categories a boundary has to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input; never retried.
    InvalidInput,
    /// Project absent, or present but invisible to the caller.
    NotFound,
    /// Caller can see the project but lacks the privilege for the action.
    Forbidden,
    /// Store failure.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that are safe to expose outside the module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectsError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Project not found: {id}")]
    NotFound { id: ProjectId },

    #[error("Not allowed to {action} project {id}")]
    Forbidden { id: ProjectId, action: &'static str },

    #[error("Internal error")]
    Internal,
}

impl ProjectsError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn not_found(id: ProjectId) -> Self {
        Self::NotFound { id }
    }

    pub fn forbidden(id: ProjectId, action: &'static str) -> Self {
        Self::Forbidden { id, action }
    }

    pub fn internal() -> Self {
        Self::Internal
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Internal => ErrorKind::Internal,
        }
    }
}

impl From<crate::domain::error::DomainError> for ProjectsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            ProjectNotFound { id } => Self::not_found(id),
            AccessDenied { id, action, .. } => Self::forbidden(id, action.as_str()),
            EmptyName => Self::invalid_input("Project name cannot be empty"),
            NameTooLong { len, max } => Self::invalid_input(format!(
                "Project name too long: {} characters (max: {})",
                len, max
            )),
            DescriptionTooLong { len, max } => Self::invalid_input(format!(
                "Project description too long: {} characters (max: {})",
                len, max
            )),
            OwnerAsCollaborator { .. } => {
                Self::invalid_input("The owner cannot be added as a collaborator")
            }
            UserIdOutOfRange { user, max } => Self::invalid_input(format!(
                "User id {} is out of range (max: {})",
                user, max
            )),
            Database { .. } => Self::internal(),
        }
    }
}
