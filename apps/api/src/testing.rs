//! Test doubles for the provider seams (`LanguageModel`, `MailTransport`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::llm_client::{LanguageModel, LlmError};
use crate::mail::dispatch::{MailError, MailTransport, OutgoingMail};
use crate::state::AppState;

enum Reply {
    Echo,
    Fixed(String),
    Fail(Box<dyn Fn() -> LlmError + Send + Sync>),
}

/// A language model that echoes the prompt, returns fixed text, or fails.
pub struct StubModel {
    reply: Reply,
    calls: AtomicUsize,
}

impl StubModel {
    fn with(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns the prompt itself, so every prompt constraint is visible in the output.
    pub fn echo() -> Self {
        Self::with(Reply::Echo)
    }

    pub fn fixed(text: &str) -> Self {
        Self::with(Reply::Fixed(text.to_string()))
    }

    pub fn failing(error: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self::with(Reply::Fail(Box::new(error)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Echo => Ok(prompt.to_string()),
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::Fail(error) => Err(error()),
        }
    }
}

/// Records messages instead of sending them. `rejecting()` simulates a relay refusal.
#[derive(Default)]
pub struct StubTransport {
    sent: Mutex<Vec<OutgoingMail>>,
    reject: bool,
}

impl StubTransport {
    pub fn rejecting() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for StubTransport {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        if self.reject {
            let source = "no at sign"
                .parse::<lettre::Address>()
                .expect_err("stub address must be invalid");
            return Err(MailError::InvalidAddress {
                field: "sender",
                value: "stub".to_string(),
                source,
            });
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

pub fn app_state(llm: Arc<StubModel>, mailer: Arc<StubTransport>) -> AppState {
    AppState { llm, mailer }
}
