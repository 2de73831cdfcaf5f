use thiserror::Error;

/// Everything that can go wrong during a single provider attempt.
///
/// The resolver treats every variant the same way (log and move on), but
/// keeping them apart makes the logs and the tests say what actually happened.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Transport failure: {0}")]
    Transport(reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider returned an empty reply")]
    EmptyReply,

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),
}

// Drop the request URL, Gemini carries its key in the query string.
impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.without_url())
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),

    #[error("Failed to set up provider: {0}")]
    Provider(#[from] ProviderError),
}
