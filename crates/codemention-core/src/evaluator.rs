//! Rule evaluation against a pull request's changed files

use crate::patterns::PatternMatcher;
use crate::types::{MatchedRule, MentionRule};

/// Narrow `rules` to the ones that apply to `changed_files`
///
/// The pull request author is removed from every rule's mentions so they
/// are not notified about their own pull request. A rule is kept only if
/// it matched at least one file and still mentions someone. Output order
/// follows `rules`. Patterns that are not valid globs match their own text.
pub fn evaluate<S: AsRef<str>>(
    rules: &[MentionRule],
    changed_files: &[S],
    author_login: &str,
) -> Vec<MatchedRule> {
    let mut matched = Vec::new();

    for rule in rules {
        let mentions: Vec<String> = rule
            .mentions
            .iter()
            .filter(|mention| mention.as_str() != author_login)
            .cloned()
            .collect();
        if mentions.is_empty() {
            continue;
        }

        let matcher = PatternMatcher::new(&rule.patterns);
        let matched_files: Vec<String> = matcher
            .filter(changed_files)
            .into_iter()
            .map(str::to_string)
            .collect();
        if matched_files.is_empty() {
            continue;
        }

        matched.push(MatchedRule {
            patterns: rule.patterns.clone(),
            mentions,
            matched_files,
        });
    }

    matched
}
