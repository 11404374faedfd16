//! crates/agency_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the toolkit's external collaborators.
//! The core only ever talks to a text-completion service and a client/project
//! repository through these traits, so it never depends on a concrete HTTP
//! client or storage backend.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::{Client, Feedback, Project};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
    #[error("Upstream service error: {0}")]
    Upstream(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A single prompt for a text-completion model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Submits a prompt and returns the raw text of the first completion.
    async fn complete(&self, request: &CompletionRequest) -> PortResult<String>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_client_by_email(&self, email: &str) -> PortResult<Client>;

    async fn get_project(&self, project_id: &str) -> PortResult<Project>;

    /// Records the feedback and prepends it to the project's message list,
    /// when the project exists.
    async fn add_feedback(&self, feedback: Feedback) -> PortResult<Feedback>;
}
