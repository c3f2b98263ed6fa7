//! Reading the repository's mention configuration

use crate::error::{Error, Result};
use crate::http::GitHubApiClient;
use crate::patterns::parse_codeowners_like;
use crate::traits::ConfigurationReader;
use crate::types::{ConfigFileType, Configuration, Repo};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;
use tracing::debug;

/// Parse configuration text in the given format
pub fn parse_configuration(text: &str, file_type: ConfigFileType) -> Result<Configuration> {
    let configuration = match file_type {
        ConfigFileType::Yaml => {
            // An empty document deserializes to null
            if text.trim().is_empty() {
                Configuration::default()
            } else {
                serde_yaml::from_str::<Option<Configuration>>(text)?.unwrap_or_default()
            }
        }
        ConfigFileType::CodeownersLike => parse_codeowners_like(text)?,
    };
    configuration.validate()?;
    Ok(configuration)
}

/// Decode a base64 payload from the contents endpoint.
///
/// GitHub wraps the encoded text at 60 columns, so whitespace is dropped
/// before decoding.
pub fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    String::from_utf8(bytes).map_err(|e| Error::Other(format!("Content is not UTF-8: {}", e)))
}

/// Reads `.github/codemention.yml` (or `.github/CODEMENTION`) through the
/// repository contents API
#[derive(Debug, Clone)]
pub struct GitHubConfigurationReader {
    client: Arc<GitHubApiClient>,
    file_type: ConfigFileType,
}

impl GitHubConfigurationReader {
    /// Create a reader for configuration files of `file_type`
    pub fn new(client: Arc<GitHubApiClient>, file_type: ConfigFileType) -> Self {
        Self { client, file_type }
    }
}

impl ConfigurationReader for GitHubConfigurationReader {
    async fn read(&self, repo: &Repo, git_ref: &str) -> Result<Configuration> {
        let path = self.file_type.path();
        debug!("Reading {} on {}", path, git_ref);

        let encoded = self
            .client
            .get_content(repo, path, git_ref)
            .await?
            .ok_or_else(|| Error::MissingContent(format!("No content for {}", path)))?;

        parse_configuration(&decode_content(&encoded)?, self.file_type)
    }
}
