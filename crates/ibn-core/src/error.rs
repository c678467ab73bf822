//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ibn_protocol::ProtocolError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] ibn_wizard::WizardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feature registration error: {0}")]
    Feature(String),
}
