//! SeaORM-backed repository implementation for the domain port.
//!
//! This struct is generic over `C: ConnectionTrait + TransactionTrait`, so you can
//! construct it with a `DatabaseConnection` **or** an outer transaction.
//! Operations that touch both tables run inside their own (nested) transaction.

use std::collections::HashMap;

use anyhow::Context;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::contract::model::{Project, ProjectId, UserId};
use crate::domain::repo::{NewProjectRecord, ProjectsRepository};
use crate::infra::storage::entity::{collaborator, project};
use crate::infra::storage::mapper::{entity_to_contract, to_db_id};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmProjectsRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmProjectsRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    /// Load collaborator rows for `rows` with one query and build contract models.
    async fn attach_collaborators(&self, rows: Vec<project::Model>) -> anyhow::Result<Vec<Project>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut by_project: HashMap<i64, Vec<collaborator::Model>> = HashMap::new();
        for c in collaborator::Entity::find()
            .filter(collaborator::Column::ProjectId.is_in(ids))
            .all(&self.conn)
            .await
            .context("load collaborators failed")?
        {
            by_project.entry(c.project_id).or_default().push(c);
        }

        rows.into_iter()
            .map(|row| {
                let collaborators = by_project.remove(&row.id).unwrap_or_default();
                entity_to_contract(row, collaborators)
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl<C> ProjectsRepository for SeaOrmProjectsRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ProjectId) -> anyhow::Result<Option<Project>> {
        // Ids beyond the storage range cannot exist.
        let Ok(db_id) = i64::try_from(id) else {
            return Ok(None);
        };

        let Some(row) = project::Entity::find_by_id(db_id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?
        else {
            return Ok(None);
        };

        let mut projects = self.attach_collaborators(vec![row]).await?;
        Ok(projects.pop())
    }

    async fn find_all_for_user(&self, user: UserId) -> anyhow::Result<Vec<Project>> {
        let Ok(user) = i64::try_from(user) else {
            return Ok(Vec::new());
        };

        let shared: Vec<i64> = collaborator::Entity::find()
            .filter(collaborator::Column::UserId.eq(user))
            .all(&self.conn)
            .await
            .context("find shared projects failed")?
            .into_iter()
            .map(|c| c.project_id)
            .collect();

        let rows = project::Entity::find()
            .filter(
                Condition::any()
                    .add(project::Column::OwnerId.eq(user))
                    .add(project::Column::Id.is_in(shared)),
            )
            .order_by_asc(project::Column::Id)
            .all(&self.conn)
            .await
            .context("find_all_for_user failed")?;

        self.attach_collaborators(rows).await
    }

    async fn insert(&self, record: NewProjectRecord) -> anyhow::Result<Project> {
        let m = project::ActiveModel {
            id: NotSet,
            name: Set(record.name),
            description: Set(record.description),
            owner_id: Set(to_db_id(record.owner_id)?),
            created_at: Set(record.created_at),
            updated_at: Set(record.created_at),
        };
        let row = m.insert(&self.conn).await.context("insert failed")?;
        entity_to_contract(row, std::iter::empty::<collaborator::Model>())
    }

    async fn save(&self, p: &Project) -> anyhow::Result<()> {
        // Owner and created_at stay NotSet so they are never written.
        let m = project::ActiveModel {
            id: Set(to_db_id(p.id)?),
            name: Set(p.name.clone()),
            description: Set(p.description.clone()),
            updated_at: Set(p.updated_at),
            ..Default::default()
        };
        let _ = m.update(&self.conn).await.context("save failed")?;
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> anyhow::Result<bool> {
        let Ok(db_id) = i64::try_from(id) else {
            return Ok(false);
        };

        let txn = self.conn.begin().await.context("begin delete failed")?;
        collaborator::Entity::delete_many()
            .filter(collaborator::Column::ProjectId.eq(db_id))
            .exec(&txn)
            .await
            .context("delete collaborators failed")?;
        let res = project::Entity::delete_by_id(db_id)
            .exec(&txn)
            .await
            .context("delete failed")?;
        txn.commit().await.context("commit delete failed")?;

        Ok(res.rows_affected > 0)
    }

    async fn add_collaborator(&self, id: ProjectId, user: UserId) -> anyhow::Result<()> {
        let project_id = to_db_id(id)?;
        let user_id = to_db_id(user)?;

        let txn = self.conn.begin().await.context("begin add_collaborator failed")?;
        let owner = project::Entity::find_by_id(project_id)
            .one(&txn)
            .await
            .context("load project failed")?
            .map(|p| p.owner_id)
            .with_context(|| format!("project {id} does not exist"))?;
        anyhow::ensure!(
            owner != user_id,
            "owner {user} cannot collaborate on project {id}"
        );

        let m = collaborator::ActiveModel {
            project_id: Set(project_id),
            user_id: Set(user_id),
        };
        collaborator::Entity::insert(m)
            .on_conflict(
                OnConflict::columns([
                    collaborator::Column::ProjectId,
                    collaborator::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .context("add_collaborator failed")?;
        txn.commit().await.context("commit add_collaborator failed")?;

        Ok(())
    }

    async fn remove_collaborator(&self, id: ProjectId, user: UserId) -> anyhow::Result<bool> {
        let (Ok(project_id), Ok(user_id)) = (i64::try_from(id), i64::try_from(user)) else {
            return Ok(false);
        };

        let res = collaborator::Entity::delete_many()
            .filter(collaborator::Column::ProjectId.eq(project_id))
            .filter(collaborator::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("remove_collaborator failed")?;
        Ok(res.rows_affected > 0)
    }
}
