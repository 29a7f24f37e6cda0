use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::errors::LookupError;
use crate::models::Profile;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Read-only source of user profiles.
///
/// The controller only ever talks to this trait, which keeps the HTTP client
/// out of its tests.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<Profile, LookupError>;
}

/// Creates a preconfigured HTTP client with required headers.
pub fn build_client() -> Result<Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("rust-github-profile-client"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

    Client::builder()
        .default_headers(headers)
        .build()
        .context("Failed to build HTTP client")
}

/// [`ProfileLookup`] backed by the GitHub REST API.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn user_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.base_url, encode_path_segment(username))
    }
}

#[async_trait]
impl ProfileLookup for GitHubClient {
    /// Fetches a GitHub user by username.
    async fn fetch_profile(&self, username: &str) -> Result<Profile, LookupError> {
        let url = self.user_url(username);
        debug!(%url, "fetching profile");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.bytes().await?;
        let profile = serde_json::from_slice::<Profile>(&body)?;

        Ok(profile)
    }
}

/// Percent-encodes a username so it stays a single path segment.
fn encode_path_segment(s: &str) -> String {
    s.bytes()
        .map(|b| match b {
            b if b.is_ascii_alphanumeric() || b"-._~".contains(&b) => (b as char).to_string(),
            b => format!("%{b:02X}"),
        })
        .collect()
}
