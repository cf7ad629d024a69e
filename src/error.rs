//! Error types for the pipeline.
//!
//! [`PipelineError`] is the tagged variant the orchestrator carries into its
//! run report. Each component has its own error enum that converts into it.

use std::path::PathBuf;

use thiserror::Error;

/// Any failure that aborts a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The warehouse could not be reached. Nothing was written.
    #[error("Database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// The insert or its commit failed. The transaction was rolled back.
    #[error("Warehouse write failed: {0}")]
    Write(#[source] sqlx::Error),

    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),
}

impl PipelineError {
    /// Short taxonomy name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Fetch(_) => "fetch",
            Self::Connection(_) => "connection",
            Self::Write(_) => "write",
            Self::Notify(_) => "notify",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] ini::ParseError),

    #[error("Section [{0}] not found in config file")]
    MissingSection(String),

    #[error("Key '{key}' not found in section [{section}]")]
    MissingKey { section: String, key: String },

    #[error("Invalid value '{value}' for key '{key}' in section [{section}]")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build request URL: {0}")]
    Url(String),

    /// Connection refused, DNS failure, timeout and the like.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Missing field '{0}' in response")]
    MissingField(&'static str),

    #[error("Failed to parse field '{field}' from '{value}'")]
    InvalidField { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Message(String),

    /// Authentication or delivery failure reported by the relay.
    #[error("SMTP delivery failed: {0}")]
    Delivery(String),
}
