//! Request and response shapes of the project domain endpoints

use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Status codes the API accepts for a domain redirect
pub const REDIRECT_STATUS_CODES: [u16; 4] = [301, 302, 307, 308];

/// Status code the API applies when a redirect is changed through PATCH
pub const UPDATE_REDIRECT_STATUS_CODE: u16 = 307;

/// Project domain as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDomain {
    pub name: String,
    pub project_id: String,
    /// Milliseconds since epoch
    #[serde(default)]
    pub created_at: i64,
    /// Milliseconds since epoch
    #[serde(default)]
    pub updated_at: i64,
    /// Empty when the domain does not redirect
    #[serde(default, deserialize_with = "null_as_empty")]
    pub redirect: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /v8/projects/{id}/domains`
///
/// The API treats a missing field differently from an empty one, so every
/// optional field is left out of the payload when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectDomain {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
}

impl CreateProjectDomain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Body of `PATCH /v8/projects/{id}/domains/{name}`
///
/// Only the redirect can be changed in place. `None` sends an empty
/// object so an unchanged redirect is never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateProjectDomain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Check a declared redirect status code against the accepted set
pub fn validate_redirect_status_code(code: i64) -> Result<u16> {
    match u16::try_from(code) {
        Ok(code) if REDIRECT_STATUS_CODES.contains(&code) => Ok(code),
        _ => bail!(
            "invalid redirect_status_code {}: expected one of 301, 302, 307, 308",
            code
        ),
    }
}
