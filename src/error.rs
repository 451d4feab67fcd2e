//! Error types for the portal client
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the portal data layer
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations, etc.)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// HTTP transport error
    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },

    /// Unexpected HTTP status from the API
    #[snafu(display("API returned {status} for {path}"))]
    ApiStatus { status: u16, path: String },

    /// Rate-limit rejection (HTTP 429), normalized from response headers
    #[snafu(display(
        "Rate limited: retry after {retry_after_secs:?}s ({remaining:?} remaining)"
    ))]
    RateLimited {
        retry_after_secs: Option<u64>,
        remaining: Option<u64>,
    },

    /// Attachment exceeds the client-side size limit
    #[snafu(display("File '{name}' is {size} bytes, over the {limit} byte limit"))]
    UploadTooLarge { name: String, size: u64, limit: u64 },

    /// Record was created but one or more document uploads failed
    #[snafu(display("Application {record_id} created but document upload failed: {message}"))]
    PartialSubmission { record_id: String, message: String },

    /// Client-side required-field validation failure
    #[snafu(display("Validation failed on step '{step}': {fields:?}"))]
    Validation { step: String, fields: Vec<String> },

    /// Channel send error
    #[snafu(display("Channel send error: {message}"))]
    ChannelSend { message: String },

    /// Push-channel connection error
    #[snafu(display("Connection error: {message}"))]
    Connection { message: String },

    /// Token store error (missing or undecryptable token)
    #[snafu(display("Token error: {message}"))]
    Token { message: String },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Http { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
