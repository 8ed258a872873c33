use thiserror::Error;

#[derive(Error, Debug)]
pub enum PingViewError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pingview operations
pub type Result<T> = std::result::Result<T, PingViewError>;

impl PingViewError {
    /// Creates a new invalid payload error
    pub fn invalid_payload<S: Into<String>>(msg: S) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Creates a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a new input error
    pub fn input<S: Into<String>>(msg: S) -> Self {
        Self::Input(msg.into())
    }

    /// Returns the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Serialization(_) | Self::InvalidPayload(_) => "payload",
            Self::Config(_) => "config",
            Self::Input(_) => "input",
            Self::Io(_) => "io",
        }
    }
}
