//! Reconciliation of the rendered comment with the pull request's comments

use crate::error::Result;
use crate::render::FOOTER;
use crate::traits::{CommentUpserter, IssueComments};
use crate::types::{IssueComment, MatchedRule, Repo};
use tracing::info;

/// What the upserter will do for a given comment list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    /// No managed comment yet and at least one rule matched
    Create,
    /// Managed comment exists with a different body
    Update {
        /// Id of the managed comment
        comment_id: u64,
    },
    /// No managed comment and nothing matched
    SkipNoRules,
    /// Managed comment already has the rendered body
    SkipUnchanged,
}

/// Whether `body` belongs to a comment this tool posted.
///
/// Current comments end with [`FOOTER`]; older releases put it first.
pub fn is_codemention_comment(body: &str) -> bool {
    body.starts_with(FOOTER) || body.ends_with(FOOTER)
}

/// First managed comment, in the order the API returned them
pub fn find_codemention_comment(comments: &[IssueComment]) -> Option<&IssueComment> {
    comments
        .iter()
        .find(|c| c.body.as_deref().is_some_and(is_codemention_comment))
}

/// Decide between create, update and skip
pub fn plan_upsert(comments: &[IssueComment], rule_count: usize, rendered: &str) -> UpsertAction {
    match find_codemention_comment(comments) {
        None if rule_count > 0 => UpsertAction::Create,
        None => UpsertAction::SkipNoRules,
        Some(existing) if existing.body.as_deref() == Some(rendered) => {
            UpsertAction::SkipUnchanged
        }
        Some(existing) => UpsertAction::Update {
            comment_id: existing.id,
        },
    }
}

/// Upserts the managed comment through an [`IssueComments`] backend
#[derive(Debug, Clone)]
pub struct GitHubCommentUpserter<C> {
    comments: C,
}

impl<C: IssueComments> GitHubCommentUpserter<C> {
    /// Create an upserter over `comments`
    pub fn new(comments: C) -> Self {
        Self { comments }
    }
}

impl<C: IssueComments> CommentUpserter for GitHubCommentUpserter<C> {
    async fn upsert(
        &self,
        repo: &Repo,
        pull_number: u64,
        rules: &[MatchedRule],
        comment: &str,
    ) -> Result<()> {
        let existing = self.comments.list_comments(repo, pull_number).await?;

        match plan_upsert(&existing, rules.len(), comment) {
            UpsertAction::Create => {
                info!("Creating a pull request comment");
                self.comments
                    .create_comment(repo, pull_number, comment)
                    .await
            }
            UpsertAction::Update { comment_id } => {
                info!(comment_id, "Updating pull request comment");
                self.comments
                    .update_comment(repo, comment_id, comment)
                    .await
            }
            UpsertAction::SkipNoRules => {
                info!("Not creating a pull request comment. No rules matched.");
                Ok(())
            }
            UpsertAction::SkipUnchanged => {
                info!("Not updating pull request comment. Comment body matched.");
                Ok(())
            }
        }
    }
}
