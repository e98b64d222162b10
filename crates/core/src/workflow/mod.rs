//! Multi-step operations that tie the API, storage and session together.

mod auth;
mod cards;

use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StorageError;
use crate::validation::ValidationError;

pub use auth::{AuthFlow, LoginOutcome};
pub use cards::{create_card, load_catalog};

/// Failure of a workflow step.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The server call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The server accepted the call but the result could not be saved locally.
    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

impl WorkflowError {
    /// Text for a transient notification.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Api(err) => err.user_message(fallback).to_string(),
            Self::Storage(_) => fallback.to_string(),
        }
    }
}
