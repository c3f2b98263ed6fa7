#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod logging;

use clap::Parser;
use codemention_core::{
    github_runner, ConfigFileType, DiffFilesChangedReader, Error, EventContext, GitHubApiClient,
    GitHubFilesChangedReader, Repo,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "codemention",
    version,
    about = "Mention users and teams on pull requests that change their files"
)]
struct Cli {
    /// GitHub token used to read the repository and post the comment
    #[arg(long, env = "INPUT_GITHUBTOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Configuration format: yaml or codeowners-like
    #[arg(long, env = "INPUT_CONFIGFILETYPE", default_value = "yaml")]
    config_file_type: String,

    /// List changed files from the pull request diff instead of the files API
    #[arg(long, env = "CODEMENTION_FILES_FROM_DIFF")]
    files_from_diff: bool,

    /// Path to the webhook event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Repository in owner/repo form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    api_url: String,
}

/// Filter empty string from Option (Actions passes "" for unset inputs)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn main() {
    logging::init_tracing();

    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            let message = format!("Error: {}", e);
            eprintln!("{}", message);
            if logging::in_github_actions() {
                println!("{}", logging::workflow_command("error", &message));
            }
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Validated before anything touches the network
    let file_type: ConfigFileType = match cli.config_file_type.as_str() {
        "" => ConfigFileType::default(),
        value => value.parse()?,
    };

    let token = clean_opt(&cli.github_token)
        .map(str::to_string)
        .or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()))
        .ok_or_else(|| Error::Config("githubToken input is required".to_string()))?;

    let repository = clean_opt(&cli.repository)
        .ok_or_else(|| Error::Config("GITHUB_REPOSITORY is not set".to_string()))?;
    let event_path = cli
        .event_path
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| Error::Config("GITHUB_EVENT_PATH is not set".to_string()))?;
    let context = EventContext::from_event_file(Repo::parse(repository)?, event_path)?;

    let client = Arc::new(GitHubApiClient::new(cli.api_url, Some(token)));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Runtime(format!("failed to create runtime: {}", e)))?;

    rt.block_on(async {
        if cli.files_from_diff {
            let reader = DiffFilesChangedReader::new(Arc::clone(&client));
            github_runner(client, file_type, reader).run(&context).await
        } else {
            let reader = GitHubFilesChangedReader::new(Arc::clone(&client));
            github_runner(client, file_type, reader).run(&context).await
        }
    })?;

    Ok(())
}
