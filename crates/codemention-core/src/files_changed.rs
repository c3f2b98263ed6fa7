//! Listing the files changed in a pull request

use crate::error::Result;
use crate::http::GitHubApiClient;
use crate::traits::FilesChangedReader;
use crate::types::Repo;
use memchr::memchr_iter;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Placeholder path git uses for the missing side of an add or delete
pub const DEV_NULL: &str = "/dev/null";

/// Reads changed files from the paginated pull request files endpoint
#[derive(Debug, Clone)]
pub struct GitHubFilesChangedReader {
    client: Arc<GitHubApiClient>,
}

impl GitHubFilesChangedReader {
    /// Create a reader backed by `client`
    pub fn new(client: Arc<GitHubApiClient>) -> Self {
        Self { client }
    }
}

impl FilesChangedReader for GitHubFilesChangedReader {
    async fn read(&self, repo: &Repo, pull_number: u64) -> Result<Vec<String>> {
        let files: Vec<String> = self
            .client
            .list_pull_files(repo, pull_number)
            .await?
            .into_iter()
            .filter(|f| f != DEV_NULL)
            .collect();
        debug!("Files changed: {:?}", files);
        Ok(files)
    }
}

/// Reads changed files by parsing the pull request's unified diff
#[derive(Debug, Clone)]
pub struct DiffFilesChangedReader {
    client: Arc<GitHubApiClient>,
}

impl DiffFilesChangedReader {
    /// Create a reader backed by `client`
    pub fn new(client: Arc<GitHubApiClient>) -> Self {
        Self { client }
    }
}

impl FilesChangedReader for DiffFilesChangedReader {
    async fn read(&self, repo: &Repo, pull_number: u64) -> Result<Vec<String>> {
        let diff = self.client.get_pull_diff(repo, pull_number).await?;
        let files = parse_unified_diff(&diff);
        debug!("Files changed: {:?}", files);
        Ok(files)
    }
}

/// Extract the paths touched by a unified diff.
///
/// Paths come from the `---`/`+++` headers, falling back to the
/// `rename`/`diff --git` lines for sections without content hunks (binary
/// files, pure renames, mode changes). Output is in first-seen order,
/// de-duplicated, without `/dev/null`.
pub fn parse_unified_diff(diff: &str) -> Vec<String> {
    let mut collector = PathCollector::default();
    let mut section = Section::default();

    for line in lines(diff) {
        if let Some(header) = line.strip_prefix("diff --git ") {
            collector.finish(&mut section);
            section.git_header = Some(header);
        } else if let Some(path) = line.strip_prefix("--- ") {
            section.push(header_path(path, "a/"));
        } else if let Some(path) = line.strip_prefix("+++ ") {
            section.push(header_path(path, "b/"));
        } else if let Some(path) = line.strip_prefix("rename from ") {
            section.renames.push(path);
        } else if let Some(path) = line.strip_prefix("rename to ") {
            section.renames.push(path);
        }
    }
    collector.finish(&mut section);

    collector.paths
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut start = 0;
    memchr_iter(b'\n', bytes)
        .chain(std::iter::once(bytes.len()))
        .filter_map(move |end| {
            if start > end {
                return None;
            }
            let line = &text[start..end];
            start = end + 1;
            Some(line.strip_suffix('\r').unwrap_or(line))
        })
}

/// Path from a `---`/`+++` header, without quotes, prefix or timestamp
fn header_path<'a>(raw: &'a str, prefix: &str) -> &'a str {
    let raw = raw.split('\t').next().unwrap_or(raw);
    let raw = raw
        .strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .unwrap_or(raw);
    raw.strip_prefix(prefix).unwrap_or(raw)
}

#[derive(Default)]
struct Section<'a> {
    git_header: Option<&'a str>,
    headers: Vec<&'a str>,
    renames: Vec<&'a str>,
}

impl<'a> Section<'a> {
    fn push(&mut self, path: &'a str) {
        self.headers.push(path);
    }
}

#[derive(Default)]
struct PathCollector {
    seen: HashSet<String>,
    paths: Vec<String>,
}

impl PathCollector {
    fn add(&mut self, path: &str) {
        if path.is_empty() || path == DEV_NULL {
            return;
        }
        if self.seen.insert(path.to_string()) {
            self.paths.push(path.to_string());
        }
    }

    fn finish(&mut self, section: &mut Section<'_>) {
        let section = std::mem::take(section);
        if !section.headers.is_empty() {
            section.headers.iter().for_each(|p| self.add(p));
        } else if !section.renames.is_empty() {
            section.renames.iter().for_each(|p| self.add(p));
        } else if let Some(header) = section.git_header {
            // "a/<old> b/<new>"; split on the last " b/" so spaces survive
            if let Some(index) = header.rfind(" b/") {
                self.add(header_path(&header[..index], "a/"));
                self.add(&header[index + 3..]);
            }
        }
    }
}
