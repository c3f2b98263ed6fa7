//! GitHub Actions event context

use crate::error::{Error, Result};
use crate::types::Repo;
use serde::Deserialize;
use std::path::Path;

/// Author of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// GitHub login
    pub login: String,
}

/// Base branch of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Base {
    /// Commit the configuration is read at
    pub sha: String,
}

/// The slice of the `pull_request` webhook object the runner needs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Draft pull requests are skipped
    #[serde(default)]
    pub draft: bool,
    /// Author; never mentioned in their own pull request
    pub user: User,
    /// Base branch
    pub base: Base,
}

/// Repository and pull request the run is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    /// Repository the event fired in
    pub repo: Repo,
    /// Pull request from the event payload
    pub pull_request: PullRequest,
}

#[derive(Deserialize)]
struct Payload {
    pull_request: Option<PullRequest>,
}

impl EventContext {
    /// Build from a webhook payload
    pub fn from_payload(repo: Repo, payload: &str) -> Result<Self> {
        let payload: Payload = serde_json::from_str(payload)
            .map_err(|e| Error::EventParse(format!("Invalid event payload: {}", e)))?;
        let pull_request = payload
            .pull_request
            .ok_or_else(|| Error::EventParse("not a pull request event".to_string()))?;

        Ok(Self { repo, pull_request })
    }

    /// Build from the webhook payload file at `path`
    pub fn from_event_file(repo: Repo, path: impl AsRef<Path>) -> Result<Self> {
        let payload = std::fs::read_to_string(path)?;
        Self::from_payload(repo, &payload)
    }

    /// Build from `GITHUB_REPOSITORY` and `GITHUB_EVENT_PATH`
    pub fn from_env() -> Result<Self> {
        let repository = required_env("GITHUB_REPOSITORY")?;
        let event_path = required_env("GITHUB_EVENT_PATH")?;
        Self::from_event_file(Repo::parse(&repository)?, event_path)
    }
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Config(format!("{} is not set", name)))
}
