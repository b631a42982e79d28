//! Core error types for devwell-core.
//!
//! The taxonomy mirrors how failures actually surface: storage and network
//! failures (`StoreError`), identity failures (`AuthError`), rejected user
//! commands (`ValidationError`), and configuration problems (`ConfigError`).

use thiserror::Error;

/// Core error type for devwell-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Local or remote persistence errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Identity/authentication errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Rejected user commands
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the blob store, document store, or their transports.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    /// A remote call did not complete within its deadline.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The remote rejected the operation by access policy.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// No document exists under the requested key.
    #[error("Not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Any other backend failure.
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether this failure is a connectivity problem rather than a
    /// definitive rejection. Connectivity failures are treated as soft by
    /// the auth gate (optimistic local completion, offline flag).
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            StoreError::NetworkUnavailable(_) | StoreError::Timeout { .. }
        )
    }
}

/// Identity provider errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email/password pair was rejected.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An account already exists for the email.
    #[error("An account already exists for {0}")]
    EmailInUse(String),

    /// Operation requires a signed-in identity.
    #[error("No identity is signed in")]
    NotSignedIn,

    /// Transport or backend failure while talking to the provider.
    #[error("Identity backend error: {0}")]
    Store(#[from] StoreError),
}

/// Rejected user commands.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A break is already running; it must be completed first.
    #[error("A break is already in progress (id {0})")]
    BreakInProgress(String),

    /// Completion was requested with no break running.
    #[error("No break is in progress")]
    NoActiveBreak,

    /// Completion id does not match the in-flight break.
    #[error("Break id mismatch: expected {expected}, got {got}")]
    BreakIdMismatch { expected: String, got: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Data-directory resolution or file IO failed.
    #[error("Configuration IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file exists but is not valid TOML.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized back to TOML.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
