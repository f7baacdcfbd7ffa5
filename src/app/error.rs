use thiserror::Error;

use crate::workflow::WorkflowError;

#[derive(Error, Debug)]
pub enum HooklineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Integration error: {0}")]
    Integration(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HooklineError>;
