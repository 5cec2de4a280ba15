use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("Domain not found in account: {domain}")]
    NotFound { domain: String },

    #[error("Domain is registered to another party: {domain}")]
    NotOwned { domain: String },

    #[error("Domain is not registered: {domain}")]
    NotRegistered { domain: String },

    #[error("{command} failed: {}", errors.join("; "))]
    Unknown {
        command: String,
        errors: Vec<String>,
    },

    #[error("No registrant contact in response for {domain}")]
    MissingRegistrant { domain: String },

    #[error("Malformed {command} response: {message}")]
    MalformedResponse { command: String, message: String },

    #[error("Invalid domain name '{name}': {reason}")]
    InvalidDomainName { name: String, reason: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Registrar API returned HTTP {status}")]
    Http { status: u16 },

    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// Coarse grouping used by the CLI to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Remote,
    Input,
    Transport,
    Config,
}

impl RegistrarError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. }
            | Self::NotOwned { .. }
            | Self::NotRegistered { .. }
            | Self::Unknown { .. }
            | Self::MissingRegistrant { .. }
            | Self::MalformedResponse { .. } => ErrorCategory::Remote,
            Self::InvalidDomainName { .. } | Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::Http { .. } | Self::Request(_) | Self::Serialization(_) => {
                ErrorCategory::Transport
            }
            Self::Io(_)
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
        }
    }

    /// True for every error that means "this domain is not in the account".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::MissingRegistrant { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistrarError>;
