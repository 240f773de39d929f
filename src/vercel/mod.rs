//! Vercel API interaction module
//!
//! This module provides the core functionality for talking to the Vercel
//! REST API: the HTTP transport, the client handed to resource operations,
//! and the project domain endpoints.
//!
//! # Module Structure
//!
//! - [`client`] - Main Vercel client injected into every operation
//! - [`error`] - Typed API errors (transport vs. HTTP status)
//! - [`http`] - HTTP utilities for REST API calls
//! - [`project_domain`] - Project domain endpoints and payloads
//!
//! # Example
//!
//! ```ignore
//! use vercel_project_domain::vercel::client::VercelClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = VercelClient::new("my-token")?;
//!     // Scope to a team with Some("team_id")
//!     let domain = client.project_domain().read("prj_123", "a.example.com", None).await?;
//!     println!("{}", domain.redirect);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod project_domain;
