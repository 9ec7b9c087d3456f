use chrono::{DateTime, Utc};

use crate::contract::model::{ProjectId, UserId};

/// Transport-agnostic domain event.
///
/// `by` is the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectDomainEvent {
    Created {
        id: ProjectId,
        by: UserId,
        at: DateTime<Utc>,
    },
    Updated {
        id: ProjectId,
        by: UserId,
        at: DateTime<Utc>,
    },
    Deleted {
        id: ProjectId,
        by: UserId,
        at: DateTime<Utc>,
    },
    CollaboratorAdded {
        id: ProjectId,
        by: UserId,
        collaborator: UserId,
        at: DateTime<Utc>,
    },
    CollaboratorRemoved {
        id: ProjectId,
        by: UserId,
        collaborator: UserId,
        at: DateTime<Utc>,
    },
}

impl ProjectDomainEvent {
    pub fn project_id(&self) -> ProjectId {
        match self {
            Self::Created { id, .. }
            | Self::Updated { id, .. }
            | Self::Deleted { id, .. }
            | Self::CollaboratorAdded { id, .. }
            | Self::CollaboratorRemoved { id, .. } => *id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "project.created",
            Self::Updated { .. } => "project.updated",
            Self::Deleted { .. } => "project.deleted",
            Self::CollaboratorAdded { .. } => "project.collaborator_added",
            Self::CollaboratorRemoved { .. } => "project.collaborator_removed",
        }
    }
}
