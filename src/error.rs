use thiserror::Error;

/// Result type for receiver operations
pub type Result<T> = std::result::Result<T, AvrError>;

/// Errors that can occur when controlling a receiver
#[derive(Error, Debug)]
pub enum AvrError {
    /// A caller-supplied value was rejected before anything was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The request could not be delivered or the response not received
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The receiver answered a status poll with something we cannot interpret
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Caller-side contract violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Raw volume outside the device range
    #[error("volume {0} is outside 0..=185")]
    VolumeOutOfRange(i32),

    /// Volume percentage outside 0..=100
    #[error("volume percentage {0} is outside 0..=100")]
    PercentOutOfRange(i32),

    /// Input name not present in the input table
    #[error("unknown input: {0}")]
    UnknownInput(String),

    /// Mode name not accepted by a mode setting
    #[error("unknown {setting} mode: {value}")]
    UnknownMode {
        /// Setting the value was meant for
        setting: &'static str,
        /// The rejected value
        value: String,
    },
}

/// Failures of the HTTP collaborator
#[derive(Error, Debug)]
pub enum TransportError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// The receiver answered with a non-success HTTP status
    #[error("HTTP status {0}")]
    Status(u16),

    /// URL could not be split into host, port and path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP framing could not be parsed
    #[error("Invalid HTTP response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for AvrError {
    fn from(err: serde_json::Error) -> Self {
        AvrError::MalformedResponse(err.to_string())
    }
}

impl AvrError {
    /// Whether the receiver could not be reached for this call
    pub fn is_transport(&self) -> bool {
        matches!(self, AvrError::Transport(_))
    }

    /// Whether the call was rejected before reaching the network
    pub fn is_validation(&self) -> bool {
        matches!(self, AvrError::Validation(_))
    }
}
