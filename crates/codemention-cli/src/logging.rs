//! Tracing setup for the action
//!
//! Human-readable logs go to stderr. Inside GitHub Actions, warnings and
//! errors are also echoed to stdout as workflow commands so they surface as
//! annotations on the run.

use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Whether the process runs inside a GitHub Actions job
pub fn in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Install the global subscriber; filter from `CODEMENTION_LOG`
pub fn init_tracing() {
    let actions = in_github_actions();

    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("CODEMENTION_LOG")
                .unwrap_or_else(|_| EnvFilter::new("codemention=info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(!actions)
                .with_writer(std::io::stderr),
        )
        .with(actions.then_some(ActionsLayer))
        .try_init();
}

/// Escape text for a workflow command's message part
pub fn escape_command_data(text: &str) -> String {
    text.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Render a `::warning::`/`::error::` workflow command
pub fn workflow_command(command: &str, message: &str) -> String {
    format!("::{}::{}", command, escape_command_data(message))
}

/// A tracing layer that turns WARN and ERROR events into workflow commands
pub struct ActionsLayer;

impl<S> Layer<S> for ActionsLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let command = match *event.metadata().level() {
            Level::ERROR => "error",
            Level::WARN => "warning",
            _ => return,
        };

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        println!("{}", workflow_command(command, &visitor.finish()));
    }
}

/// Collects the message and any extra fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_command_data() {
        assert_eq!(escape_command_data("50%\r\nnext"), "50%25%0D%0Anext");
    }

    #[test]
    fn test_workflow_command() {
        assert_eq!(
            workflow_command("error", "Error: No content for .github/codemention.yml"),
            "::error::Error: No content for .github/codemention.yml"
        );
        assert_eq!(workflow_command("warning", "a\nb"), "::warning::a%0Ab");
    }

    #[test]
    fn test_message_visitor_appends_fields() {
        let visitor = MessageVisitor {
            message: "Updating pull request comment".to_string(),
            fields: " comment_id=7".to_string(),
        };
        assert_eq!(visitor.finish(), "Updating pull request comment comment_id=7");
    }
}
