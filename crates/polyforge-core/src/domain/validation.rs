use crate::domain::{
    entities::{ProjectStructure, Template, common::validate_name, project::Project},
    error::DomainError,
};

/// Centralized domain validation.
///
/// Adapters and services call these instead of reaching into entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Project name, repository name and graph invariants.
    pub fn validate_project(project: &Project) -> Result<(), DomainError> {
        project.validate()
    }

    pub fn validate_name(kind: &'static str, name: &str) -> Result<(), DomainError> {
        validate_name(kind, name)
    }

    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
