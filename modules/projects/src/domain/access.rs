//! Access decisions for projects.
//!
//! Everything here is a pure function of `(owner, collaborators, requester, action)`.
//! Collaborators may only view; every mutation, including managing the
//! collaborator set, belongs to the owner. The engine never fails: callers turn a
//! denial into whichever error fits their use case.

use std::collections::BTreeSet;
use std::fmt;

use crate::contract::model::{Project, UserId};

/// Something a user may try to do with a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectAction {
    /// Read a single project or see it in a listing.
    View,
    /// Change name or description.
    Edit,
    Delete,
    /// Add or remove collaborators.
    ManageCollaborators,
}

impl ProjectAction {
    pub const ALL: [ProjectAction; 4] = [
        Self::View,
        Self::Edit,
        Self::Delete,
        Self::ManageCollaborators,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::ManageCollaborators => "manage collaborators of",
        }
    }
}

impl fmt::Display for ProjectAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's relationship to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Standing {
    Owner,
    Collaborator,
    None,
}

impl Standing {
    /// Whether this standing allows `action`.
    pub fn permits(self, action: ProjectAction) -> bool {
        match (self, action) {
            (Self::Owner, _) => true,
            (Self::Collaborator, ProjectAction::View) => true,
            (Self::Collaborator, _) | (Self::None, _) => false,
        }
    }

    /// Owner or collaborator.
    pub fn can_view(self) -> bool {
        self.permits(ProjectAction::View)
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    /// Carries the standing so the caller can pick between "not found" and "forbidden".
    Denied { standing: Standing },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Classify `requester` against a project's owner and collaborator set.
pub fn standing(owner_id: UserId, collaborators: &BTreeSet<UserId>, requester: UserId) -> Standing {
    if requester == owner_id {
        Standing::Owner
    } else if collaborators.contains(&requester) {
        Standing::Collaborator
    } else {
        Standing::None
    }
}

pub fn is_permitted(
    owner_id: UserId,
    collaborators: &BTreeSet<UserId>,
    requester: UserId,
    action: ProjectAction,
) -> bool {
    standing(owner_id, collaborators, requester).permits(action)
}

/// Check `requester` against a loaded project.
pub fn check(project: &Project, requester: UserId, action: ProjectAction) -> AccessDecision {
    let standing = standing(project.owner_id, &project.collaborators, requester);
    if standing.permits(action) {
        AccessDecision::Granted
    } else {
        AccessDecision::Denied { standing }
    }
}
