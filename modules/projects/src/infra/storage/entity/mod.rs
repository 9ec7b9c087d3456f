pub mod collaborator;
pub mod project;
