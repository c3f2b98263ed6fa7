//! GitHub REST API client

use crate::error::{Error, Result};
use crate::traits::IssueComments;
use crate::types::{IssueComment, Repo};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_API_URL: &str = "https://api.github.com";
const PER_PAGE: usize = 100;
// Safety limit to prevent infinite pagination loops
const MAX_PAGES: u32 = 1000;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Media type for a pull request rendered as a unified diff
pub const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";

/// GitHub API response for a changed pull request file
#[derive(Debug, Deserialize)]
struct GitHubFile {
    filename: String,
}

/// GitHub API response for a file from the contents endpoint
#[derive(Debug, Deserialize)]
struct GitHubContent {
    #[serde(default)]
    content: Option<String>,
}

/// GitHub API client for pull request files, repository contents and
/// issue comments
#[derive(Clone)]
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("codemention/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Create from `GITHUB_API_URL` and `GITHUB_TOKEN`
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        Self::new(base_url, token)
    }

    /// API base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_as(method, path, JSON_MEDIA_TYPE)
    }

    fn request_as(&self, method: Method, path: &str, media_type: &'static str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(ACCEPT, HeaderValue::from_static(media_type))
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(format!("GitHub API request to {} failed: {}", path, e)))?;
        check_status(response, path)
    }

    /// Fetch a file from the contents endpoint at `git_ref`.
    ///
    /// Returns the raw base64 payload, or `None` when the response carries
    /// no content (directories, submodules, oversized files).
    pub async fn get_content(
        &self,
        repo: &Repo,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<String>> {
        let api_path = format!("/repos/{}/{}/contents/{}", repo.owner, repo.repo, path);
        debug!(path, git_ref, "Reading repository content");

        let request = self.request(Method::GET, &api_path).query(&[("ref", git_ref)]);
        let value: serde_json::Value = self.send(request, &api_path).await?.json().await?;

        // Directory listings come back as arrays
        if value.is_array() {
            return Ok(None);
        }
        let content: GitHubContent = serde_json::from_value(value)?;
        Ok(content.content)
    }

    /// List the file names changed by a pull request, following pagination
    pub async fn list_pull_files(&self, repo: &Repo, pull_number: u64) -> Result<Vec<String>> {
        let api_path = format!(
            "/repos/{}/{}/pulls/{}/files",
            repo.owner, repo.repo, pull_number
        );
        let files: Vec<GitHubFile> = self.get_paginated(&api_path).await?;
        Ok(files.into_iter().map(|f| f.filename).collect())
    }

    /// Fetch a pull request rendered as a unified diff
    pub async fn get_pull_diff(&self, repo: &Repo, pull_number: u64) -> Result<String> {
        let api_path = format!("/repos/{}/{}/pulls/{}", repo.owner, repo.repo, pull_number);
        let request = self.request_as(Method::GET, &api_path, DIFF_MEDIA_TYPE);
        Ok(self.send(request, &api_path).await?.text().await?)
    }

    async fn get_paginated<T>(&self, api_path: &str) -> Result<Vec<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut all = Vec::new();
        let mut page = 1;

        // GitHub returns at most 100 items per page
        loop {
            let request = self
                .request(Method::GET, api_path)
                .query(&[("page", page.to_string()), ("per_page", PER_PAGE.to_string())]);
            let items: Vec<T> = self.send(request, api_path).await?.json().await?;

            let last_page = items.len() < PER_PAGE;
            all.extend(items);
            if last_page {
                break;
            }

            page += 1;
            if page > MAX_PAGES {
                return Err(Error::Http(format!(
                    "Too many pages in GitHub API response for {}",
                    api_path
                )));
            }
        }

        Ok(all)
    }
}

/// Map non-success responses to errors, spotting rate limiting
fn check_status(response: Response, path: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let remaining = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok());
    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && remaining == Some("0"));
    if rate_limited {
        return Err(Error::RateLimitExceeded(format!(
            "GitHub API rate limit exceeded for {}. Remaining: {}",
            path,
            remaining.unwrap_or("0")
        )));
    }

    Err(Error::Http(format!(
        "GitHub API returned {} for {}",
        status, path
    )))
}

#[derive(serde::Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

impl IssueComments for GitHubApiClient {
    async fn list_comments(&self, repo: &Repo, issue_number: u64) -> Result<Vec<IssueComment>> {
        let api_path = format!(
            "/repos/{}/{}/issues/{}/comments",
            repo.owner, repo.repo, issue_number
        );
        self.get_paginated(&api_path).await
    }

    async fn create_comment(&self, repo: &Repo, issue_number: u64, body: &str) -> Result<()> {
        let api_path = format!(
            "/repos/{}/{}/issues/{}/comments",
            repo.owner, repo.repo, issue_number
        );
        let request = self
            .request(Method::POST, &api_path)
            .json(&CommentBody { body });
        self.send(request, &api_path).await?;
        Ok(())
    }

    async fn update_comment(&self, repo: &Repo, comment_id: u64, body: &str) -> Result<()> {
        let api_path = format!(
            "/repos/{}/{}/issues/comments/{}",
            repo.owner, repo.repo, comment_id
        );
        let request = self
            .request(Method::PATCH, &api_path)
            .json(&CommentBody { body });
        self.send(request, &api_path).await?;
        Ok(())
    }
}
