use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The user left the checklist without confirming. Not a failure.
    #[error("Selection aborted by user")]
    Aborted,

    /// The event/render driver could not start or died mid-session.
    #[error("terminal driver failed: {0}")]
    Terminal(String),

    #[error("account name is required as the first argument")]
    MissingAccount,

    #[error("vault: {0}")]
    Vault(String),

    #[error("failed to parse {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("encryption failed: {0}")]
    Crypto(String),

    #[error("opening exports is only supported on macOS")]
    UnsupportedPlatform,

    #[error("{app} exited with {status}")]
    OpenFailed { app: String, status: String },

    #[error("logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn json(what: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Json {
            what: what.into(),
            source,
        }
    }

    /// True for the clean "user cancelled" exit path.
    pub fn is_abort(&self) -> bool {
        matches!(self, Error::Aborted)
    }
}
