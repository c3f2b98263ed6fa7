//! # CodeMention Core
//!
//! Mention users and teams on a pull request when it changes files matching
//! their rules.
//!
//! A run reads the repository's rules at the pull request's base commit,
//! lists the changed files, keeps the rules whose glob patterns match, renders
//! a Markdown comment and creates or updates the single comment this tool
//! manages on the pull request. Each step sits behind a trait in [`traits`],
//! and [`Runner`] wires them together.
//!
//! ## Example
//!
//! ```no_run
//! use codemention_core::{
//!     github_runner, ConfigFileType, EventContext, GitHubApiClient, GitHubFilesChangedReader,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> codemention_core::Result<()> {
//! let client = Arc::new(GitHubApiClient::from_env());
//! let files = GitHubFilesChangedReader::new(Arc::clone(&client));
//! let runner = github_runner(client, ConfigFileType::Yaml, files);
//! runner.run(&EventContext::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod configuration;
pub mod error;
pub mod evaluator;
pub mod event;
pub mod files_changed;
pub mod http;
pub mod patterns;
pub mod render;
pub mod runner;
pub mod traits;
pub mod types;
pub mod upsert;

#[cfg(test)]
mod log_capture;

pub use configuration::{parse_configuration, GitHubConfigurationReader};
pub use error::{Error, Result};
pub use evaluator::evaluate;
pub use event::{EventContext, PullRequest};
pub use files_changed::{parse_unified_diff, DiffFilesChangedReader, GitHubFilesChangedReader};
pub use http::GitHubApiClient;
pub use patterns::{parse_codeowners_like, PatternMatcher};
pub use render::{MarkdownCommentRenderer, FOOTER};
pub use runner::Runner;
pub use types::{
    CommentConfiguration, ConfigFileType, Configuration, IssueComment, MatchedRule, Mention,
    MentionRule, Repo,
};
pub use upsert::GitHubCommentUpserter;

use std::sync::Arc;
use traits::FilesChangedReader;

/// Runner backed by the GitHub REST API, generic over how changed files are listed
pub type GitHubRunner<F = GitHubFilesChangedReader> = Runner<
    GitHubConfigurationReader,
    F,
    MarkdownCommentRenderer,
    GitHubCommentUpserter<Arc<GitHubApiClient>>,
>;

/// Build a [`Runner`] whose GitHub collaborators share `client`
pub fn github_runner<F: FilesChangedReader>(
    client: Arc<GitHubApiClient>,
    file_type: ConfigFileType,
    files_changed_reader: F,
) -> GitHubRunner<F> {
    Runner::new(
        GitHubConfigurationReader::new(Arc::clone(&client), file_type),
        files_changed_reader,
        MarkdownCommentRenderer::new(),
        GitHubCommentUpserter::new(client),
    )
}
