use thiserror::Error;

/// Errors raised anywhere in the semgroup workspace.
#[derive(Error, Debug)]
pub enum SemgroupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Circuit error: {0}")]
    Circuit(String),

    #[error("Group error: {0}")]
    Group(String),

    #[error("Group out of sync: local {local}, on-chain {onchain}")]
    GroupOutOfSync { local: String, onchain: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SemgroupError {
    /// True for errors caused by missing or invalid configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, SemgroupError::Config(_))
    }
}

/// Result alias used across the workspace.
pub type SemgroupResult<T> = Result<T, SemgroupError>;
