//! Pull request comment rendering

pub mod helpers;
pub mod markdown;

pub use helpers::{MarkdownEscapeHelper, MARKDOWN_ESCAPE_HELPER};
pub use markdown::markdown_escape;

use crate::error::Result;
use crate::traits::CommentRenderer;
use crate::types::{CommentConfiguration, MatchedRule, Mention};
use handlebars::Handlebars;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Sentinel appended to every rendered comment, used to find it again
pub const FOOTER: &str = "<!-- codemention header -->";

/// Preamble used when `commentConfiguration.preamble` is not set
pub const DEFAULT_COMMENT_PREAMBLE: &str = "[CodeMention](https://github.com/tobyhs/codemention):";

/// Template used when `commentConfiguration.template` is not set
pub const DEFAULT_TEMPLATE: &str = "{{preamble}}
| File Patterns | Mentions |
| - | - |
{{#each matchedRules}}
| {{#each patterns}}{{markdownEscape this}}{{#unless @last}}<br>{{/unless}}{{/each}} | {{#each mentions}}@{{this}}{{#unless @last}}, {{/unless}}{{/each}} |
{{/each}}

{{#if epilogue}}
{{epilogue}}
{{/if}}
";

const DEPRECATION_WARNING: &str = concat!(
    "The preamble and epilogue options in commentConfiguration are deprecated. ",
    "Use template instead."
);

/// Variables available to comment templates
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContext<'a> {
    /// Mention rules that matched files changed in the pull request
    pub matched_rules: &'a [MatchedRule],
    /// Matched rules regrouped per mentioned user/team
    pub mentions: Vec<Mention>,
    /// Content above the rules table
    pub preamble: Option<&'a str>,
    /// Content below the rules table
    pub epilogue: Option<&'a str>,
}

/// Renders comments with the built-in table or a repository template
#[derive(Clone)]
pub struct MarkdownCommentRenderer {
    hb: Handlebars<'static>,
}

impl MarkdownCommentRenderer {
    /// Renderer with HTML escaping off and `markdownEscape` registered
    pub fn new() -> Self {
        let mut hb = Handlebars::new();
        hb.register_escape_fn(|str| str.to_string());
        hb.register_helper("markdownEscape", Box::new(MARKDOWN_ESCAPE_HELPER));
        Self { hb }
    }
}

impl std::fmt::Debug for MarkdownCommentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownCommentRenderer").finish_non_exhaustive()
    }
}

impl Default for MarkdownCommentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentRenderer for MarkdownCommentRenderer {
    fn render(
        &self,
        rules: &[MatchedRule],
        comment_configuration: Option<&CommentConfiguration>,
    ) -> Result<String> {
        if comment_configuration.is_some_and(CommentConfiguration::uses_deprecated_options) {
            warn!("{}", DEPRECATION_WARNING);
        }

        let source = comment_configuration
            .and_then(|c| c.template.as_deref())
            .unwrap_or(DEFAULT_TEMPLATE);
        let context = TemplateContext {
            matched_rules: rules,
            mentions: mentions_by_name(rules),
            preamble: Some(
                comment_configuration
                    .and_then(|c| c.preamble.as_deref())
                    .unwrap_or(DEFAULT_COMMENT_PREAMBLE),
            ),
            epilogue: comment_configuration.and_then(|c| c.epilogue.as_deref()),
        };

        let mut comment = self.hb.render_template(source, &context)?;
        comment.push_str(FOOTER);
        Ok(comment)
    }
}

/// Group matched files by mentioned name.
///
/// Names come out sorted by code point, so `Bob` precedes `alice`, and each
/// name's files are sorted the same way and unique.
pub fn mentions_by_name(rules: &[MatchedRule]) -> Vec<Mention> {
    let mut names_to_files: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for rule in rules {
        for name in &rule.mentions {
            names_to_files
                .entry(name)
                .or_default()
                .extend(rule.matched_files.iter().map(String::as_str));
        }
    }

    names_to_files
        .into_iter()
        .map(|(name, files)| Mention {
            name: name.to_string(),
            matched_files: files.into_iter().map(str::to_string).collect(),
        })
        .collect()
}
