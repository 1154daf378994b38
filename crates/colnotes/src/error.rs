#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    InvalidInput(#[from] colnotes_core::Error),

    #[error("{0}")]
    UserAbort(String),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to fetch data from GitHub API: {status} {reason}")]
    Api { status: u16, reason: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Failed to decode GitHub API response: {0}")]
    Decode(String),
}
