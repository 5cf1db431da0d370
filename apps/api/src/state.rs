use std::sync::Arc;

use crate::llm_client::LanguageModel;
use crate::mail::dispatch::MailTransport;

/// Shared application state injected into all route handlers via Axum extractors.
/// Handlers are stateless; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Generative-language provider. Default: GeminiClient.
    pub llm: Arc<dyn LanguageModel>,
    /// Outbound mail provider. Default: SmtpMailer.
    pub mailer: Arc<dyn MailTransport>,
}
