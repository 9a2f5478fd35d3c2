//! Error types for the cfctl platform client.

use thiserror::Error;

/// Controller error code returned when an organization name is taken.
pub const ORGANIZATION_NAME_TAKEN: u32 = 30002;

/// Controller error code returned when a space name is taken within an org.
pub const SPACE_NAME_TAKEN: u32 = 40002;

/// Repository and transport errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{kind} {name} not found")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} {name} already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("Server error, status code: {status}, error code: {code}, message: {description}")]
    Http {
        status: u16,
        code: u32,
        description: String,
    },

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Error performing request: {0}")]
    Transport(String),

    #[error("Invalid response from server: {0}")]
    Decode(String),

    #[error("No API endpoint targeted. Use 'cfctl api' to set an endpoint.")]
    NoEndpoint,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ApiError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        ApiError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn already_exists(kind: &'static str, name: impl Into<String>) -> Self {
        ApiError::AlreadyExists {
            kind,
            name: name.into(),
        }
    }
}

/// Target store and settings errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Could not determine home directory")]
    Home,

    #[error("An org must be targeted before targeting a space")]
    NoOrganization,
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Settings(err.to_string())
    }
}

/// Malformed or conflicting command-line invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Incorrect Usage: {message}")]
pub struct UsageError {
    pub message: String,
}

impl UsageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wrong number of positional arguments.
    pub fn arity() -> Self {
        Self::new("wrong number of arguments")
    }
}

/// A precondition that did not hold
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequirementFailure {
    pub message: String,
}

impl RequirementFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ApiError> for RequirementFailure {
    fn from(err: ApiError) -> Self {
        RequirementFailure::new(err.to_string())
    }
}

impl From<ConfigError> for RequirementFailure {
    fn from(err: ConfigError) -> Self {
        RequirementFailure::new(err.to_string())
    }
}

/// Failure raised by a command body after its requirements passed
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("{0}")]
    Message(String),
}
