// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimrunError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No file at given path: {0:?}")]
    NotFound(PathBuf),

    #[error("Could not start process '{command}': {source}")]
    ProcessStart {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode input as {encoding}")]
    Decode { encoding: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SimrunError>;
