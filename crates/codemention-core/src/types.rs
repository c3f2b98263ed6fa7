//! Core type definitions
//!
//! Everything here is a plain value: built fresh from collaborator
//! responses on each run and dropped once the comment is upserted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifiers for a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repo {
    /// Owner of the repo
    pub owner: String,
    /// Name of the repo
    pub repo: String,
}

impl Repo {
    /// Create a repo identifier
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse an `owner/repo` string such as `GITHUB_REPOSITORY`
    pub fn parse(full_name: &str) -> Result<Self> {
        match full_name.split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(Self::new(owner, repo))
            }
            _ => Err(Error::Config(format!(
                "Invalid repository format: {} (expected owner/repo)",
                full_name
            ))),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A rule that determines who to mention when files match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRule {
    /// File patterns to match for the rule
    pub patterns: Vec<String>,
    /// Names of users or teams to mention (without the at sign)
    #[serde(default)]
    pub mentions: Vec<String>,
}

/// Options for the comment posted by the bot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentConfiguration {
    /// Handlebars-style template for the pull request comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Content above the rules table. Deprecated in favour of `template`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,

    /// Content below the rules table. Deprecated in favour of `template`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epilogue: Option<String>,
}

impl CommentConfiguration {
    /// Whether any of the deprecated preamble/epilogue options is set
    pub fn uses_deprecated_options(&self) -> bool {
        self.preamble.is_some() || self.epilogue.is_some()
    }
}

/// Repository configuration, read from the pull request's base commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Rules for mentioning
    #[serde(default)]
    pub rules: Vec<MentionRule>,
    /// Configuration for the comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_configuration: Option<CommentConfiguration>,
}

impl Configuration {
    /// Check structural invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.patterns.is_empty() {
                return Err(Error::Config(format!(
                    "rule {} has no patterns",
                    index + 1
                )));
            }
        }
        Ok(())
    }
}

/// A [`MentionRule`] narrowed to the files changed in a pull request
///
/// Only built for rules with at least one matched file and at least one
/// mention left after the pull request author is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedRule {
    /// File patterns of the rule, in configured order
    pub patterns: Vec<String>,
    /// Mentions of the rule, minus the pull request author
    pub mentions: Vec<String>,
    /// The changed files that matched this rule
    pub matched_files: Vec<String>,
}

/// Per-identity view over matched rules, exposed to templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    /// User or team name (without the at sign)
    pub name: String,
    /// Sorted, de-duplicated files across all rules mentioning `name`
    pub matched_files: Vec<String>,
}

/// Format of the repository configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigFileType {
    /// `.github/codemention.yml`
    #[default]
    Yaml,
    /// `.github/CODEMENTION`, one `pattern @mention...` rule per line
    CodeownersLike,
}

impl ConfigFileType {
    /// Repository path of the configuration file for this format
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Yaml => ".github/codemention.yml",
            Self::CodeownersLike => ".github/CODEMENTION",
        }
    }

    /// Input value naming this format
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::CodeownersLike => "codeowners-like",
        }
    }
}

impl FromStr for ConfigFileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "yaml" => Ok(Self::Yaml),
            "codeowners-like" => Ok(Self::CodeownersLike),
            other => Err(Error::Config(format!(
                "invalid configFileType '{}' (expected \"yaml\" or \"codeowners-like\")",
                other
            ))),
        }
    }
}

/// A comment on an issue or pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueComment {
    /// Comment id
    pub id: u64,
    /// Comment body, absent for some API responses
    #[serde(default)]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_repo_parse() {
        let repo = Repo::parse("tobyhs/codemention").unwrap();
        assert_eq!(repo, Repo::new("tobyhs", "codemention"));
        assert_eq!(repo.to_string(), "tobyhs/codemention");
    }

    #[test]
    fn test_repo_parse_invalid() {
        for input in ["invalid", "/repo", "owner/", "a/b/c", ""] {
            assert_matches!(Repo::parse(input), Err(Error::Config(_)), "{}", input);
        }
    }

    #[test]
    fn test_config_file_type_from_str() {
        assert_eq!("yaml".parse::<ConfigFileType>().unwrap(), ConfigFileType::Yaml);
        assert_eq!(
            "codeowners-like".parse::<ConfigFileType>().unwrap(),
            ConfigFileType::CodeownersLike
        );
        let err = "json".parse::<ConfigFileType>().unwrap_err();
        assert!(err.to_string().contains("invalid configFileType 'json'"));
    }

    #[test]
    fn test_configuration_deserializes_camel_case() {
        let yaml = r#"
rules:
  - patterns: ["db/migrate/**"]
    mentions: ["cto", "dba"]
commentConfiguration:
  preamble: "hello"
"#;
        let config: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.rules[0].mentions, vec!["cto", "dba"]);
        let comment = config.comment_configuration.unwrap();
        assert_eq!(comment.preamble.as_deref(), Some("hello"));
        assert!(comment.uses_deprecated_options());
    }

    #[test]
    fn test_configuration_validate_rejects_empty_patterns() {
        let config = Configuration {
            rules: vec![MentionRule {
                patterns: vec![],
                mentions: vec!["ci".into()],
            }],
            comment_configuration: None,
        };
        assert_matches!(config.validate(), Err(Error::Config(_)));
    }

    #[test]
    fn test_matched_rule_serializes_for_templates() {
        let rule = MatchedRule {
            patterns: vec!["*.rb".into()],
            mentions: vec!["ci".into()],
            matched_files: vec!["a.rb".into()],
        };
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["matchedFiles"][0], "a.rb");
    }
}
