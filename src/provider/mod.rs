//! Provider resources
//!
//! The pieces a provisioning host needs to manage a resource type: its
//! schema, an accessor over declared configuration and persisted state,
//! and the create/read/update/delete operations.
//!
//! # Architecture
//!
//! - [`schema`] - Attribute definitions embedded from `src/schemas/*.json`
//! - [`resource_data`] - The [`ResourceData`] accessor and an in-memory implementation
//! - [`project_domain`] - Lifecycle operations of `vercel_project_domain`

pub mod project_domain;
pub mod resource_data;
pub mod schema;

pub use resource_data::{InMemoryResourceData, ResourceData, ResourceState};
