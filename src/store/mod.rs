//! Template persistence boundary.
//!
//! Templates are edited locally but owned by an external store once
//! submitted. This module defines the async store interface plus two
//! backends: an in-memory store for tests and local work, and an HTTP
//! client for the portal backend. Failures are surfaced to the caller as
//! [`StoreError`]; nothing here retries automatically.

mod factory;
mod http;
mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::template::{Template, TemplateDraft};

pub use factory::create_template_store;
pub use http::HttpTemplateStore;
pub use memory::MemoryTemplateStore;

/// Errors from template store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No stored template with this id
    #[error("Template not found: {0}")]
    NotFound(Uuid),

    /// The store rejected the request with a non-success status
    #[error("Template store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Request could not be completed (connection, timeout, malformed body)
    #[error("Template store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Asynchronous template persistence interface.
///
/// All operations may fail; callers display the error and let the user
/// retry. Implementations must not swallow failures beyond a log line.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Fetch every stored template.
    async fn list(&self) -> StoreResult<Vec<Template>>;

    /// Persist a new template, returning the stored form with its
    /// assigned id and timestamps.
    async fn create(&self, draft: TemplateDraft) -> StoreResult<Template>;

    /// Replace the name and bodies of an existing template.
    async fn update(&self, id: Uuid, draft: TemplateDraft) -> StoreResult<Template>;

    /// Remove a stored template.
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}
