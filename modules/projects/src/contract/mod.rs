pub mod client;
pub mod error;
pub mod model;

pub use client::ProjectsApi;
pub use error::{ErrorKind, ProjectsError};
pub use model::{NewProject, Project, ProjectId, ProjectUpdate, UserId};
