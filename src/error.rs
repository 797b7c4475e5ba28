use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcpError {
    #[error("No staged changes. Run 'git add' first.")]
    NoStagedChanges,

    #[error("{0}")]
    InvalidOptions(String),

    #[error("Invalid merge method '{0}'. Expected one of: merge, squash, rebase")]
    InvalidMergeMethod(String),

    #[error("No 'origin' remote configured")]
    NoOriginRemote,

    #[error("Could not parse remote '{remote}' ({url}). Only SSH and HTTPS URLs on {host} are supported")]
    UnsupportedRemote {
        remote: String,
        url: String,
        host: String,
    },

    #[error("'{0}' was not found in PATH")]
    CommandNotFound(String),

    #[error("Command '{command}' failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Could not determine GitHub username. Run 'gh auth login' first")]
    UnknownUser,

    #[error("PR was created ({url}) but merging failed: {stderr}")]
    MergeFailed { url: String, stderr: String },

    #[error("PR was created ({url}) but enabling auto-merge failed: {stderr}")]
    AutoMergeFailed { url: String, stderr: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signal handler error: {0}")]
    SignalHandler(String),

    #[error("Cancelled.")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AcpError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AcpError::Interrupted => 130,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AcpError>;
