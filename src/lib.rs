//! Project domain resource for a Vercel provisioning provider
//!
//! Translates a declared `vercel_project_domain` resource into calls
//! against the Vercel projects API and persists the `<projectID>:<name>`
//! identity needed to find it again.
//!
//! - [`vercel`] - REST client: transport, errors, project domain endpoints
//! - [`provider`] - Resource schema, state accessor and lifecycle operations
//! - [`config`] - Persistent CLI configuration

pub mod config;
pub mod provider;
pub mod vercel;

/// Version injected at compile time via VPD_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("VPD_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
