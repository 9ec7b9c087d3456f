use std::process::ExitCode;

use serde::Serialize;

use projects::contract::client::ProjectsApi;
use projects::contract::error::{ErrorKind, ProjectsError};
use projects::contract::model::{NewProject, ProjectId, ProjectUpdate, UserId};

use crate::dto::{DeletedDto, ErrorDto, ProjectDto, ProjectListDto};

/// Project operation requested on the command line, already bound to an acting user.
#[derive(Debug, Clone)]
pub enum ProjectCommand {
    List,
    Get {
        id: ProjectId,
    },
    Create {
        name: String,
        description: Option<String>,
    },
    Update {
        id: ProjectId,
        name: String,
        description: Option<String>,
    },
    Delete {
        id: ProjectId,
    },
    Share {
        id: ProjectId,
        user: UserId,
    },
    Unshare {
        id: ProjectId,
        user: UserId,
    },
}

/// Process exit code for a failed operation.
pub fn exit_code_for(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::InvalidInput => 3,
        ErrorKind::NotFound => 4,
        ErrorKind::Forbidden => 5,
    }
}

/// Run `command` as `user` and print the JSON result.
pub async fn execute(api: &dyn ProjectsApi, user: UserId, command: ProjectCommand) -> ExitCode {
    tracing::debug!(user, ?command, "Executing command");

    let result = match command {
        ProjectCommand::List => api
            .list_projects(user)
            .await
            .and_then(|p| to_json(&ProjectListDto::from(p))),
        ProjectCommand::Get { id } => api
            .get_project(user, id)
            .await
            .and_then(|p| to_json(&ProjectDto::from(p))),
        ProjectCommand::Create { name, description } => {
            let new_project = NewProject { name, description };
            api.create_project(user, new_project)
                .await
                .and_then(|p| to_json(&ProjectDto::from(p)))
        }
        ProjectCommand::Update {
            id,
            name,
            description,
        } => {
            let update = ProjectUpdate { name, description };
            api.update_project(user, id, update)
                .await
                .and_then(|p| to_json(&ProjectDto::from(p)))
        }
        ProjectCommand::Delete { id } => api
            .delete_project(user, id)
            .await
            .and_then(|()| to_json(&DeletedDto { id, deleted: true })),
        ProjectCommand::Share { id, user: target } => api
            .add_collaborator(user, id, target)
            .await
            .and_then(|p| to_json(&ProjectDto::from(p))),
        ProjectCommand::Unshare { id, user: target } => api
            .remove_collaborator(user, id, target)
            .await
            .and_then(|p| to_json(&ProjectDto::from(p))),
    };

    match result {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let body = serde_json::to_string(&ErrorDto::from(&err))
                .unwrap_or_else(|_| err.to_string());
            eprintln!("{body}");
            ExitCode::from(exit_code_for(err.kind()))
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ProjectsError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize output");
        ProjectsError::internal()
    })
}
