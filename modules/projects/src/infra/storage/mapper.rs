//! Conversions between stored rows and contract models.
//!
//! Ids are `u64` in the domain and `BIGINT` in the database.

use std::collections::BTreeSet;

use anyhow::Context;

use crate::contract::model::Project;
use crate::infra::storage::entity::{collaborator, project};

pub fn to_db_id(id: u64) -> anyhow::Result<i64> {
    i64::try_from(id).with_context(|| format!("id {id} exceeds the storage range"))
}

pub fn from_db_id(id: i64) -> anyhow::Result<u64> {
    u64::try_from(id).with_context(|| format!("stored id {id} is negative"))
}

/// Build a contract project from its row and the collaborator rows belonging to it.
pub fn entity_to_contract(
    row: project::Model,
    collaborators: impl IntoIterator<Item = collaborator::Model>,
) -> anyhow::Result<Project> {
    let collaborators = collaborators
        .into_iter()
        .map(|c| from_db_id(c.user_id))
        .collect::<anyhow::Result<BTreeSet<_>>>()?;

    Ok(Project {
        id: from_db_id(row.id)?,
        name: row.name,
        description: row.description,
        owner_id: from_db_id(row.owner_id)?,
        collaborators,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_id_range_checks() {
        assert_eq!(to_db_id(42).unwrap(), 42);
        assert!(to_db_id(u64::MAX).is_err());
        assert_eq!(from_db_id(7).unwrap(), 7);
        assert!(from_db_id(-1).is_err());
    }

    #[test]
    fn test_entity_to_contract() {
        let now = Utc::now();
        let row = project::Model {
            id: 3,
            name: "Apollo".to_owned(),
            description: Some("launch".to_owned()),
            owner_id: 1,
            created_at: now,
            updated_at: now,
        };
        let rows = [
            collaborator::Model {
                project_id: 3,
                user_id: 5,
            },
            collaborator::Model {
                project_id: 3,
                user_id: 2,
            },
        ];

        let project = entity_to_contract(row, rows).unwrap();
        assert_eq!(project.id, 3);
        assert_eq!(project.owner_id, 1);
        assert_eq!(project.collaborators, BTreeSet::from([2, 5]));
        assert_eq!(project.description.as_deref(), Some("launch"));
    }
}
