//! `vercel_project_domain` lifecycle operations
//!
//! Each operation reads what it needs from a [`ResourceData`], makes the
//! matching API call, and only writes local state after the call succeeded.

use super::resource_data::ResourceData;
use super::schema::{get_schema, ResourceSchema};
use crate::vercel::client::VercelClient;
use crate::vercel::error::is_not_found;
use crate::vercel::project_domain::{
    validate_redirect_status_code, CreateProjectDomain, ProjectDomain, ProjectDomainId,
    UpdateProjectDomain, UPDATE_REDIRECT_STATUS_CODE,
};
use anyhow::{bail, Context, Result};
use serde_json::Value;

pub const RESOURCE_TYPE: &str = "vercel_project_domain";

/// Schema of the project domain resource
pub fn schema() -> &'static ResourceSchema {
    get_schema(RESOURCE_TYPE).unwrap_or_else(|| panic!("{} schema is not embedded", RESOURCE_TYPE))
}

fn parse_id<D: ResourceData + ?Sized>(data: &D) -> Result<ProjectDomainId> {
    Ok(data.id().parse::<ProjectDomainId>()?)
}

fn team_id<D: ResourceData + ?Sized>(data: &D) -> Option<String> {
    data.get_ok_string("team_id")
}

/// Copy the fields the API owns into local state
fn set_remote_fields<D: ResourceData + ?Sized>(data: &mut D, domain: &ProjectDomain) -> Result<()> {
    data.set("name", Value::from(domain.name.as_str()))?;
    data.set("project_id", Value::from(domain.project_id.as_str()))?;
    data.set("created_at", Value::from(domain.created_at))?;
    data.set("updated_at", Value::from(domain.updated_at))?;
    Ok(())
}

pub async fn create<D: ResourceData + ?Sized>(data: &mut D, client: &VercelClient) -> Result<()> {
    let project_id = data
        .get_ok_string("project_id")
        .context("project_id is required")?;
    let name = data.get_ok_string("name").context("name is required")?;
    ProjectDomainId::new(project_id.as_str(), name.as_str())?;

    let mut domain = CreateProjectDomain::new(name);
    domain.redirect = data.get_ok_string("redirect");
    domain.redirect_status_code = data
        .get_ok_int("redirect_status_code")
        .map(validate_redirect_status_code)
        .transpose()?;
    domain.git_branch = data.get_ok_string("git_branch");

    let id = client
        .project_domain()
        .create(&project_id, &domain, team_id(data).as_deref())
        .await?;

    data.set("redirect", domain.redirect.map_or(Value::Null, Value::from))?;
    data.set(
        "redirect_status_code",
        domain.redirect_status_code.map_or(Value::Null, Value::from),
    )?;
    data.set_id(id.to_string());

    tracing::info!("Created project domain {}", id);

    read(data, client).await?;
    if data.id().is_empty() {
        bail!("project domain {} disappeared right after creation", id);
    }

    Ok(())
}

/// Refresh local state from the API.
///
/// A domain that no longer exists clears the identity so the host drops
/// the record; this is not an error.
pub async fn read<D: ResourceData + ?Sized>(data: &mut D, client: &VercelClient) -> Result<()> {
    let id = parse_id(data)?;

    match client
        .project_domain()
        .read(id.project_id(), id.name(), team_id(data).as_deref())
        .await
    {
        Ok(domain) => set_remote_fields(data, &domain),
        Err(err) if is_not_found(&err) => {
            tracing::warn!("Project domain {} not found, removing it from state", id);
            data.set_id(String::new());
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Apply an in-place change. Only the redirect can change this way; any
/// force-new attribute in the change set is rejected before the API call.
pub async fn update<D: ResourceData + ?Sized>(data: &mut D, client: &VercelClient) -> Result<()> {
    let id = parse_id(data)?;

    let changed: Vec<&str> = schema()
        .attributes
        .keys()
        .map(String::as_str)
        .filter(|key| data.has_change(key))
        .collect();
    if schema().requires_replace(changed.iter().copied()) {
        bail!(
            "project domain {} cannot be updated in place, changed: {}",
            id,
            changed.join(", ")
        );
    }

    let mut update = UpdateProjectDomain::default();
    if data.has_change("redirect") {
        update.redirect = Some(data.get_string("redirect"));
    }

    let domain = client
        .project_domain()
        .update(id.project_id(), id.name(), &update, team_id(data).as_deref())
        .await?;

    set_remote_fields(data, &domain)?;
    data.set("redirect", Value::from(domain.redirect.as_str()))?;
    data.set(
        "redirect_status_code",
        Value::from(UPDATE_REDIRECT_STATUS_CODE),
    )?;

    tracing::info!("Updated project domain {}", id);

    Ok(())
}

pub async fn delete<D: ResourceData + ?Sized>(data: &mut D, client: &VercelClient) -> Result<()> {
    let id = parse_id(data)?;

    client
        .project_domain()
        .delete(id.project_id(), id.name(), team_id(data).as_deref())
        .await?;

    tracing::info!("Deleted project domain {}", id);

    Ok(())
}
