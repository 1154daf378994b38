use crate::prelude::*;
use colnotes_core::column::DEFAULT_API_BASE;

/// GitHub API configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_base: String,
    pub token: String,
}

impl GitHubConfig {
    /// Build the configuration from values collected by the CLI
    ///
    /// `token` comes from `--token` or `GHTOKEN`. An empty token is treated as
    /// missing. `api_base` comes from `--api-base` or `GITHUB_API_URL` and
    /// falls back to the public GitHub API.
    pub fn resolve(token: Option<String>, api_base: Option<String>) -> Result<Self, Error> {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::Configuration("Please set the GHTOKEN environment variable.".to_string())
            })?;

        let api_base = api_base
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self { api_base, token })
    }
}
