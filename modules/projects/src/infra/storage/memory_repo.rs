//! In-process store backed by a hash map.
//!
//! Each trait call holds the lock for its whole body, so every operation is atomic.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::contract::model::{Project, ProjectId, UserId};
use crate::domain::repo::{NewProjectRecord, ProjectsRepository};

pub struct InMemoryProjectsRepository {
    projects: RwLock<HashMap<ProjectId, Project>>,
    next_id: AtomicU64,
}

impl InMemoryProjectsRepository {
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.projects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.read().is_empty()
    }
}

impl Default for InMemoryProjectsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectsRepository for InMemoryProjectsRepository {
    async fn find_by_id(&self, id: ProjectId) -> anyhow::Result<Option<Project>> {
        Ok(self.projects.read().get(&id).cloned())
    }

    async fn find_all_for_user(&self, user: UserId) -> anyhow::Result<Vec<Project>> {
        let projects = self.projects.read();
        let mut found: Vec<Project> = projects
            .values()
            .filter(|p| p.owner_id == user || p.collaborators.contains(&user))
            .cloned()
            .collect();
        found.sort_by_key(|p| p.id);
        Ok(found)
    }

    async fn insert(&self, record: NewProjectRecord) -> anyhow::Result<Project> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let project = Project {
            id,
            name: record.name,
            description: record.description,
            owner_id: record.owner_id,
            collaborators: BTreeSet::new(),
            created_at: record.created_at,
            updated_at: record.created_at,
        };

        self.projects.write().insert(id, project.clone());
        Ok(project)
    }

    async fn save(&self, project: &Project) -> anyhow::Result<()> {
        let mut projects = self.projects.write();
        let stored = projects
            .get_mut(&project.id)
            .ok_or_else(|| anyhow::anyhow!("project {} does not exist", project.id))?;

        project.name.clone_into(&mut stored.name);
        stored.description.clone_from(&project.description);
        stored.updated_at = project.updated_at;
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> anyhow::Result<bool> {
        Ok(self.projects.write().remove(&id).is_some())
    }

    async fn add_collaborator(&self, id: ProjectId, user: UserId) -> anyhow::Result<()> {
        let mut projects = self.projects.write();
        let project = projects
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("project {id} does not exist"))?;
        anyhow::ensure!(
            project.owner_id != user,
            "owner {user} cannot collaborate on project {id}"
        );
        project.collaborators.insert(user);
        Ok(())
    }

    async fn remove_collaborator(&self, id: ProjectId, user: UserId) -> anyhow::Result<bool> {
        let mut projects = self.projects.write();
        Ok(projects
            .get_mut(&id)
            .is_some_and(|p| p.collaborators.remove(&user)))
    }
}
