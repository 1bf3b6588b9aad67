//! The project aggregate: the declarative input of one generation run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::validate_name;
use super::graph::ProjectGraph;
use crate::domain::DomainError;

/// Aggregate root of a generation request.
///
/// Created once per request and never mutated during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub repository_name: String,
    pub modification_details: ModificationDetails,
    pub graph: ProjectGraph,
    pub metadata: ProjectMetadata,
}

impl Project {
    /// Create a project whose repository shares its name.
    pub fn new(name: impl Into<String>, graph: ProjectGraph) -> Self {
        let name = name.into();
        Self {
            repository_name: name.clone(),
            name,
            modification_details: ModificationDetails::default(),
            graph,
            metadata: ProjectMetadata::default(),
        }
    }

    pub fn with_repository_name(mut self, repository_name: impl Into<String>) -> Self {
        self.repository_name = repository_name.into();
        self
    }

    pub fn with_metadata(mut self, metadata: ProjectMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_modification_details(mut self, details: ModificationDetails) -> Self {
        self.modification_details = details;
        self
    }

    /// Validate the project name and the graph.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name("project", &self.name)?;
        if self.repository_name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "repositoryName",
            });
        }
        self.graph.validate()
    }
}

/// Who created / last updated the project, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationDetails {
    pub created_by: String,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ModificationDetails {
    /// Details for a request made by `user` right now.
    pub fn now(user: impl Into<String>) -> Self {
        let user = user.into();
        let now = Utc::now();
        Self {
            created_by: user.clone(),
            updated_by: user,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for ModificationDetails {
    fn default() -> Self {
        Self {
            created_by: String::new(),
            updated_by: String::new(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Git identity plus any free-form metadata carried by the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_platform_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_platform_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_platform_user_name: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ProjectMetadata {
    pub fn with_git_platform_user_name(mut self, user: impl Into<String>) -> Self {
        self.git_platform_user_name = Some(user.into());
        self
    }

    /// The git platform user name, required for image and workflow names.
    pub fn require_git_platform_user_name(&self) -> Result<&str, DomainError> {
        self.git_platform_user_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "gitPlatformUserName",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_keeps_unknown_keys() {
        let json = r#"{"gitPlatformUserName":"octo","gitPlatformName":"github","team":"core"}"#;
        let meta: ProjectMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(meta.git_platform_user_name.as_deref(), Some("octo"));
        assert_eq!(meta.git_platform_name.as_deref(), Some("github"));
        assert_eq!(meta.extra.get("team"), Some(&serde_json::json!("core")));
    }

    #[test]
    fn git_user_is_required_and_trimmed() {
        let meta = ProjectMetadata::default();
        assert_eq!(
            meta.require_git_platform_user_name().unwrap_err(),
            DomainError::MissingRequiredField {
                field: "gitPlatformUserName"
            }
        );

        let meta = meta.with_git_platform_user_name(" octo ");
        assert_eq!(meta.require_git_platform_user_name().unwrap(), "octo");
    }

    #[test]
    fn project_name_must_be_a_directory_name() {
        assert!(Project::new("shop", ProjectGraph::new()).validate().is_ok());
        assert!(Project::new("my shop", ProjectGraph::new()).validate().is_err());
        assert!(
            Project::new("shop", ProjectGraph::new())
                .with_repository_name("")
                .validate()
                .is_err()
        );
    }
}
