//! Error types for BhittiNav

use thiserror::Error;

/// BhittiNav error type
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Transport failed: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for NavError {
    fn from(e: toml::de::Error) -> Self {
        NavError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
