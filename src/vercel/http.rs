//! HTTP utilities for Vercel REST API calls

use super::error::{error_message, ApiError};
use anyhow::{Context, Result};
use reqwest::{Client, Method};
use serde::Serialize;
use url::Url;

/// Production API endpoint
pub const DEFAULT_API_URL: &str = "https://api.vercel.com";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Vercel API calls
#[derive(Clone)]
pub struct VercelHttpClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl VercelHttpClient {
    /// Create a new HTTP client against `base_url`
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;

        let client = Client::builder()
            .user_agent(concat!("vercel-project-domain/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            token: token.to_string(),
        })
    }

    /// Base URL every request path is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Issue a request and return the raw response body.
    ///
    /// `path` is relative to the base URL and may carry a query string.
    /// The response is always consumed before returning, whether the
    /// status was a success or not. Non-2xx statuses become
    /// [`ApiError::Status`].
    pub async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!("{} {}", method, path);

        let mut request = self
            .client
            .request(method, self.url_for(path))
            .bearer_auth(&self.token);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        let response_body = response.text().await.map_err(|source| ApiError::Transport {
            path: path.to_string(),
            source,
        })?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(ApiError::Status {
                status,
                message: error_message(status, &response_body),
            }
            .into());
        }

        Ok(response_body)
    }
}
