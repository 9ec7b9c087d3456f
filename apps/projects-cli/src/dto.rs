use chrono::{DateTime, Utc};
use serde::Serialize;

use projects::contract::error::ProjectsError;
use projects::contract::model::{Project, ProjectId, UserId};

/// JSON view of a project as printed on stdout
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDto {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub collaborators: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectListDto {
    pub projects: Vec<ProjectDto>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedDto {
    pub id: ProjectId,
    pub deleted: bool,
}

/// Error body printed on stderr
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDto {
    pub error: &'static str,
    pub message: String,
}

impl From<Project> for ProjectDto {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            owner_id: p.owner_id,
            collaborators: p.collaborators.into_iter().collect(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<Vec<Project>> for ProjectListDto {
    fn from(projects: Vec<Project>) -> Self {
        let projects: Vec<ProjectDto> = projects.into_iter().map(Into::into).collect();
        Self {
            total: projects.len(),
            projects,
        }
    }
}

impl From<&ProjectsError> for ErrorDto {
    fn from(err: &ProjectsError) -> Self {
        Self {
            error: err.kind().as_str(),
            message: err.to_string(),
        }
    }
}
