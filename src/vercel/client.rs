//! Vercel Client
//!
//! Main client handed to every resource operation. Holds the HTTP
//! transport and exposes one handler per API area.

use super::http::{VercelHttpClient, DEFAULT_API_URL};
use super::project_domain::ProjectDomainHandler;
use anyhow::Result;

/// Main Vercel client
#[derive(Clone)]
pub struct VercelClient {
    pub http: VercelHttpClient,
}

impl VercelClient {
    /// Create a client against the production API
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL, token)
    }

    /// Create a client against a custom endpoint (proxies, mock servers)
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            http: VercelHttpClient::new(base_url, token)?,
        })
    }

    /// Project domain endpoints
    pub fn project_domain(&self) -> ProjectDomainHandler<'_> {
        ProjectDomainHandler::new(&self.http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_targets_production_api() {
        let client = VercelClient::new("token").unwrap();
        assert_eq!(client.http.base_url().as_str(), "https://api.vercel.com/");
    }

    #[test]
    fn test_with_base_url_rejects_garbage() {
        assert!(VercelClient::with_base_url("::::", "token").is_err());
    }
}
