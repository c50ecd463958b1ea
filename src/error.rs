use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitissueError {
    #[error("{0}")]
    Validation(String),

    #[error("GitHub token is required. Set GITHUB_TOKEN env var or use --token flag")]
    TokenRequired,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitHub API error: {0}")]
    GitHub(String),

    #[error("failed to fetch repositories for {org}: {cause}")]
    Fetch { org: String, cause: String },

    #[error("no repositories found in {0}")]
    EmptyTarget(String),

    #[error("failed to create issue in {repository}: {cause}")]
    Submit { repository: String, cause: String },

    #[error("{failed} of {total} issue submission(s) failed")]
    SubmissionsFailed { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl From<octocrab::Error> for GitissueError {
    fn from(err: octocrab::Error) -> Self {
        GitissueError::GitHub(describe(&err))
    }
}

/// One-line description of an API failure, preferring GitHub's own message.
pub fn describe(err: &octocrab::Error) -> String {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            format!("{} ({})", source.message, source.status_code)
        }
        other => other.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, GitissueError>;
