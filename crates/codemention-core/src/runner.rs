//! Pipeline orchestration for a single pull request event

use crate::error::Result;
use crate::evaluator::evaluate;
use crate::event::EventContext;
use crate::traits::{CommentRenderer, CommentUpserter, ConfigurationReader, FilesChangedReader};
use tracing::debug;

/// Runs the read, evaluate, render and upsert steps for one event.
///
/// Collaborators are injected at construction; the runner owns no state of
/// its own and can be reused across events.
#[derive(Debug, Clone)]
pub struct Runner<C, F, R, U> {
    configuration_reader: C,
    files_changed_reader: F,
    comment_renderer: R,
    comment_upserter: U,
}

impl<C, F, R, U> Runner<C, F, R, U>
where
    C: ConfigurationReader,
    F: FilesChangedReader,
    R: CommentRenderer,
    U: CommentUpserter,
{
    /// Create a runner from its collaborators
    pub fn new(
        configuration_reader: C,
        files_changed_reader: F,
        comment_renderer: R,
        comment_upserter: U,
    ) -> Self {
        Self {
            configuration_reader,
            files_changed_reader,
            comment_renderer,
            comment_upserter,
        }
    }

    /// Mention the owners of the files changed by the event's pull request.
    ///
    /// Draft pull requests are skipped without touching any collaborator.
    /// The first error from any step aborts the run.
    pub async fn run(&self, context: &EventContext) -> Result<()> {
        let pull_request = &context.pull_request;
        if pull_request.draft {
            debug!("Skipping draft pull request");
            return Ok(());
        }

        let (configuration, files_changed) = futures::try_join!(
            self.configuration_reader
                .read(&context.repo, &pull_request.base.sha),
            self.files_changed_reader
                .read(&context.repo, pull_request.number),
        )?;

        let matched_rules = evaluate(
            &configuration.rules,
            files_changed.as_slice(),
            &pull_request.user.login,
        );
        let comment = self
            .comment_renderer
            .render(&matched_rules, configuration.comment_configuration.as_ref())?;

        self.comment_upserter
            .upsert(&context.repo, pull_request.number, &matched_rules, &comment)
            .await
    }
}
