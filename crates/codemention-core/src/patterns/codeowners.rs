//! CODEOWNERS-like configuration format
//!
//! ```text
//! # comment
//! db/migrate/**   @cto @dba
//! .github/**      @ci   # trailing comment
//! ```

use crate::error::{Error, Result};
use crate::types::{Configuration, MentionRule};

/// Parse a CODEOWNERS-like file into a [`Configuration`]
///
/// One rule per line: the first token is a single glob pattern, the rest
/// are mentions with any leading `@` removed. Negation (`!`) is rejected.
pub fn parse_codeowners_like(text: &str) -> Result<Configuration> {
    let mut rules = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line
            .split_whitespace()
            .take_while(|token| !token.starts_with('#'));

        if line.contains('!') {
            return Err(Error::UnsupportedSyntax(format!(
                "negation is not supported in codeowners-like configuration (line {}: {})",
                line_number, line
            )));
        }

        let pattern = match tokens.next() {
            Some(pattern) => pattern,
            None => continue,
        };
        let mentions: Vec<String> = tokens
            .map(|token| token.strip_prefix('@').unwrap_or(token).to_string())
            .collect();

        if mentions.is_empty() {
            return Err(Error::Config(format!(
                "line {} must have a pattern and at least one mention: {}",
                line_number, line
            )));
        }

        rules.push(MentionRule {
            patterns: vec![pattern.to_string()],
            mentions,
        });
    }

    Ok(Configuration {
        rules,
        comment_configuration: None,
    })
}
