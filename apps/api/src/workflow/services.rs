//! The three narrow service seams consumed by `WorkflowController`.
//!
//! `BackendClient` implements all three over HTTP; tests substitute stubs.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::mail::models::{GenerateMailRequest, SendMailRequest};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend could not be reached or the connection failed mid-call.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with `success: false` or a non-2xx status.
    #[error("Rejected by backend: {message}")]
    Rejected { message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait DraftService: Send + Sync {
    /// Returns the generated body.
    async fn generate(&self, request: &GenerateMailRequest) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait RegenerationService: Send + Sync {
    /// Returns the rewritten body.
    async fn regenerate(&self, current_draft: &str) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait DispatchService: Send + Sync {
    /// Sends once. Returns the backend's confirmation message.
    async fn dispatch(&self, request: &SendMailRequest) -> Result<String, ServiceError>;
}

/// The service bundle handed to the controller.
#[derive(Clone)]
pub struct MailServices {
    pub drafts: Arc<dyn DraftService>,
    pub regenerator: Arc<dyn RegenerationService>,
    pub dispatcher: Arc<dyn DispatchService>,
}

impl MailServices {
    /// All three seams served by one implementation.
    pub fn from_single<T>(service: Arc<T>) -> Self
    where
        T: DraftService + RegenerationService + DispatchService + 'static,
    {
        Self {
            drafts: service.clone(),
            regenerator: service.clone(),
            dispatcher: service,
        }
    }
}
