//! Project Domains
//!
//! Create, read, update and delete the domains attached to a project.
//! Every call may be scoped to a team with an optional team id.

mod id;
mod types;

pub use id::{IdError, ProjectDomainId};
pub use types::{
    validate_redirect_status_code, CreateProjectDomain, ProjectDomain, UpdateProjectDomain,
    REDIRECT_STATUS_CODES, UPDATE_REDIRECT_STATUS_CODE,
};

use super::http::VercelHttpClient;
use anyhow::{Context, Result};
use reqwest::Method;

/// Build `/v8/projects/{project_id}/domains`
pub fn domains_path(project_id: &str) -> String {
    format!("/v8/projects/{}/domains", urlencoding::encode(project_id))
}

/// Build `/v8/projects/{project_id}/domains/{name}`
pub fn domain_path(project_id: &str, name: &str) -> String {
    format!(
        "{}/{}",
        domains_path(project_id),
        urlencoding::encode(name)
    )
}

/// Append the `teamId` query parameter when a team scope is given
pub fn with_team(path: String, team_id: Option<&str>) -> String {
    match team_id.filter(|team| !team.is_empty()) {
        Some(team) => format!("{}?teamId={}", path, urlencoding::encode(team)),
        None => path,
    }
}

fn decode(body: &str) -> Result<ProjectDomain> {
    serde_json::from_str(body).context("unable to unmarshal project domain")
}

/// Project domain endpoints of the v8 projects API
#[derive(Clone, Copy)]
pub struct ProjectDomainHandler<'a> {
    http: &'a VercelHttpClient,
}

impl<'a> ProjectDomainHandler<'a> {
    pub fn new(http: &'a VercelHttpClient) -> Self {
        Self { http }
    }

    /// Attach a domain to a project, returning the identity to persist
    pub async fn create(
        &self,
        project_id: &str,
        domain: &CreateProjectDomain,
        team_id: Option<&str>,
    ) -> Result<ProjectDomainId> {
        let path = with_team(domains_path(project_id), team_id);
        let body = self
            .http
            .request(Method::POST, &path, Some(domain))
            .await
            .context("unable to create project domain")?;

        let created = decode(&body)?;
        tracing::debug!("Created project domain {} on {}", created.name, project_id);

        Ok(ProjectDomainId::new(project_id, created.name)?)
    }

    pub async fn read(
        &self,
        project_id: &str,
        name: &str,
        team_id: Option<&str>,
    ) -> Result<ProjectDomain> {
        let path = with_team(domain_path(project_id, name), team_id);
        let body = self
            .http
            .request::<()>(Method::GET, &path, None)
            .await
            .context("unable to fetch project domain from vercel")?;

        decode(&body)
    }

    pub async fn update(
        &self,
        project_id: &str,
        name: &str,
        update: &UpdateProjectDomain,
        team_id: Option<&str>,
    ) -> Result<ProjectDomain> {
        let path = with_team(domain_path(project_id, name), team_id);
        let body = self
            .http
            .request(Method::PATCH, &path, Some(update))
            .await
            .context("unable to update project domain")?;

        decode(&body)
    }

    /// Remove a domain from a project. The response body is discarded.
    pub async fn delete(&self, project_id: &str, name: &str, team_id: Option<&str>) -> Result<()> {
        let path = with_team(domain_path(project_id, name), team_id);
        self.http
            .request::<()>(Method::DELETE, &path, None)
            .await
            .context("unable to delete project domain")?;

        Ok(())
    }
}
