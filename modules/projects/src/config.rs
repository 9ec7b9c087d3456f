use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the projects module (`modules.projects` in the app config)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectsConfig {
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
            max_description_length: default_max_description_length(),
        }
    }
}

impl ProjectsConfig {
    /// Parse the module section of the app config; a missing section means defaults.
    pub fn from_module_value(value: Option<&serde_json::Value>) -> anyhow::Result<Self> {
        match value {
            Some(v) => Ok(serde_json::from_value(v.clone())?),
            None => Ok(Self::default()),
        }
    }
}

impl From<&ProjectsConfig> for ServiceConfig {
    fn from(cfg: &ProjectsConfig) -> Self {
        Self {
            max_name_length: cfg.max_name_length,
            max_description_length: cfg.max_description_length,
        }
    }
}

fn default_max_name_length() -> usize {
    100
}

fn default_max_description_length() -> usize {
    1000
}
