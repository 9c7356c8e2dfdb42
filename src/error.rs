//! Error types for the keuzegids client.

/// Top-level error type for the wizard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {key}. {hint}")]
    MissingEnvVar { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors talking to the decision service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Could not reach the decision service: {0}")]
    Transport(String),

    #[error("Decision service returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Malformed response from the decision service: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::MalformedPayload(e.to_string())
        } else {
            ServiceError::Transport(e.to_string())
        }
    }
}

/// User input rejected during the wizard flow.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("'{value}' is not a valid {field}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Choice {choice} is out of range (1-{max})")]
    ChoiceOutOfRange { choice: usize, max: usize },

    #[error("No choice is expected at this step")]
    NotAwaitingChoice,

    #[error("No numeric input is expected at this step")]
    NotAwaitingInput,
}

/// Result type alias for the wizard.
pub type Result<T> = std::result::Result<T, Error>;
