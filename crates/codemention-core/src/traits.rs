//! Collaborator traits
//!
//! Each seam of the pipeline is a one-method trait so the runner stays
//! generic: concrete GitHub-backed implementations in production, in-memory
//! doubles in tests. Async methods return `impl Future + Send`, so there is
//! no boxing and no dynamic dispatch.

use crate::error::Result;
use crate::types::{CommentConfiguration, Configuration, IssueComment, MatchedRule, Repo};
use std::future::Future;
use std::sync::Arc;

/// Reads a repository's mention configuration
pub trait ConfigurationReader: Send + Sync {
    /// Read configuration from `repo` at `git_ref`
    fn read(
        &self,
        repo: &Repo,
        git_ref: &str,
    ) -> impl Future<Output = Result<Configuration>> + Send;
}

/// Lists the files changed in a pull request
pub trait FilesChangedReader: Send + Sync {
    /// Paths changed by pull request `pull_number`, excluding `/dev/null`
    fn read(
        &self,
        repo: &Repo,
        pull_number: u64,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Turns matched rules into a pull request comment body
pub trait CommentRenderer: Send + Sync {
    /// Render the comment; the result always ends with the sentinel footer
    fn render(
        &self,
        rules: &[MatchedRule],
        comment_configuration: Option<&CommentConfiguration>,
    ) -> Result<String>;
}

/// Creates or updates the single managed pull request comment
pub trait CommentUpserter: Send + Sync {
    /// Reconcile `comment` against the comments already on the pull request
    fn upsert(
        &self,
        repo: &Repo,
        pull_number: u64,
        rules: &[MatchedRule],
        comment: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Issue comment endpoints used by the upserter
pub trait IssueComments: Send + Sync {
    /// All comments on an issue or pull request, in API order
    fn list_comments(
        &self,
        repo: &Repo,
        issue_number: u64,
    ) -> impl Future<Output = Result<Vec<IssueComment>>> + Send;

    /// Post a new comment
    fn create_comment(
        &self,
        repo: &Repo,
        issue_number: u64,
        body: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Replace the body of an existing comment
    fn update_comment(
        &self,
        repo: &Repo,
        comment_id: u64,
        body: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

impl<T: ConfigurationReader> ConfigurationReader for Arc<T> {
    fn read(
        &self,
        repo: &Repo,
        git_ref: &str,
    ) -> impl Future<Output = Result<Configuration>> + Send {
        (**self).read(repo, git_ref)
    }
}

impl<T: FilesChangedReader> FilesChangedReader for Arc<T> {
    fn read(
        &self,
        repo: &Repo,
        pull_number: u64,
    ) -> impl Future<Output = Result<Vec<String>>> + Send {
        (**self).read(repo, pull_number)
    }
}

impl<T: CommentRenderer> CommentRenderer for Arc<T> {
    fn render(
        &self,
        rules: &[MatchedRule],
        comment_configuration: Option<&CommentConfiguration>,
    ) -> Result<String> {
        (**self).render(rules, comment_configuration)
    }
}

impl<T: CommentUpserter> CommentUpserter for Arc<T> {
    fn upsert(
        &self,
        repo: &Repo,
        pull_number: u64,
        rules: &[MatchedRule],
        comment: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        (**self).upsert(repo, pull_number, rules, comment)
    }
}

impl<T: IssueComments> IssueComments for Arc<T> {
    fn list_comments(
        &self,
        repo: &Repo,
        issue_number: u64,
    ) -> impl Future<Output = Result<Vec<IssueComment>>> + Send {
        (**self).list_comments(repo, issue_number)
    }

    fn create_comment(
        &self,
        repo: &Repo,
        issue_number: u64,
        body: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        (**self).create_comment(repo, issue_number, body)
    }

    fn update_comment(
        &self,
        repo: &Repo,
        comment_id: u64,
        body: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        (**self).update_comment(repo, comment_id, body)
    }
}
