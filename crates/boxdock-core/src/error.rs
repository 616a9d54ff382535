//! Central error type for Boxdock.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoxdockError {
    #[error("settings file not found at {0} (run `boxdock setup` first)")]
    SettingsNotFound(PathBuf),

    #[error("failed to read settings file {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("settings file {path} is missing required key {key}")]
    MissingKey { path: PathBuf, key: &'static str },

    #[error("invalid Homebox URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(
        "incomplete Cloudflare Access credentials: both client id and client secret are required"
    )]
    IncompleteCredentials,

    #[error("could not locate a configuration directory for this platform")]
    NoConfigDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BoxdockError>;
