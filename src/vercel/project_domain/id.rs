//! Persisted identity of a project domain: `<projectID>:<domainName>`

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("invalid project domain id {0:?}: expected <project_id>:<name>")]
    MissingSeparator(String),
    #[error("invalid project domain id {0:?}: project id is empty")]
    EmptyProjectId(String),
    #[error("invalid project domain id {0:?}: project id must not contain ':'")]
    SeparatorInProjectId(String),
    #[error("invalid project domain id {0:?}: domain name is empty")]
    EmptyName(String),
}

/// Project id and domain name addressing one project domain.
///
/// The string form splits on the first colon, so the name may itself
/// contain colons while the project id may not. Both parts are non-empty,
/// so every constructed id formats to a string that parses back to itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectDomainId {
    project_id: String,
    name: String,
}

impl ProjectDomainId {
    pub fn new(project_id: impl Into<String>, name: impl Into<String>) -> Result<Self, IdError> {
        let project_id = project_id.into();
        let name = name.into();
        let id = || format!("{}{}{}", project_id, SEPARATOR, name);

        if project_id.is_empty() {
            return Err(IdError::EmptyProjectId(id()));
        }
        if project_id.contains(SEPARATOR) {
            return Err(IdError::SeparatorInProjectId(id()));
        }
        if name.is_empty() {
            return Err(IdError::EmptyName(id()));
        }

        Ok(Self { project_id, name })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ProjectDomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.project_id, SEPARATOR, self.name)
    }
}

impl FromStr for ProjectDomainId {
    type Err = IdError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let (project_id, name) = id
            .split_once(SEPARATOR)
            .ok_or_else(|| IdError::MissingSeparator(id.to_string()))?;

        Self::new(project_id, name)
    }
}
