//! HTTP client for the mail backend. One request per call, no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::mail::models::{
    GenerateMailRequest, GenerateMailResponse, RegenerateMailRequest, RegenerateMailResponse,
    SendMailRequest, StatusResponse,
};
use crate::workflow::services::{DispatchService, DraftService, RegenerationService, ServiceError};

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Client pointed at `BACKEND_URI`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(Config::backend_uri_from_env())
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ServiceError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<StatusResponse>(&raw)
                .map(|r| r.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            return Err(ServiceError::Rejected { message });
        }

        serde_json::from_str(&raw).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

fn rejected_unless(success: bool) -> Result<(), ServiceError> {
    if success {
        Ok(())
    } else {
        Err(ServiceError::Rejected {
            message: "success: false".to_string(),
        })
    }
}

#[async_trait]
impl DraftService for BackendClient {
    async fn generate(&self, request: &GenerateMailRequest) -> Result<String, ServiceError> {
        let response: GenerateMailResponse = self.post("/generateMail", request).await?;
        rejected_unless(response.success)?;
        Ok(response.mail_body)
    }
}

#[async_trait]
impl RegenerationService for BackendClient {
    async fn regenerate(&self, current_draft: &str) -> Result<String, ServiceError> {
        let request = RegenerateMailRequest {
            current_draft: current_draft.to_string(),
        };
        let response: RegenerateMailResponse = self.post("/regenerateMail", &request).await?;
        rejected_unless(response.success)?;
        Ok(response.new_draft)
    }
}

#[async_trait]
impl DispatchService for BackendClient {
    async fn dispatch(&self, request: &SendMailRequest) -> Result<String, ServiceError> {
        let response: StatusResponse = self.post("/sendMail", request).await?;
        rejected_unless(response.success)?;
        Ok(response.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::llm_client::LlmError;
    use crate::routes::build_router;
    use crate::testing::{app_state, StubModel, StubTransport};

    /// Serves the real router with stub providers on an ephemeral port.
    async fn spawn_backend(llm: StubModel, mailer: Arc<StubTransport>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = build_router(app_state(Arc::new(llm), mailer));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn generate_request() -> GenerateMailRequest {
        GenerateMailRequest {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            resume: "http://drive/x".to_string(),
            your_name: "JANE".to_string(),
            college: "MIT".to_string(),
            phone: "555-0100".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generate_and_dispatch_against_live_router() {
        let mailer = Arc::new(StubTransport::default());
        let url = spawn_backend(StubModel::echo(), mailer.clone()).await;
        let client = BackendClient::new(format!("{url}/")).unwrap();

        let body = client.generate(&generate_request()).await.unwrap();
        assert!(body.contains("http://drive/x"));

        let message = client
            .dispatch(&SendMailRequest {
                email: "hr@acme.com".to_string(),
                subject: "Job Application for Engineer role".to_string(),
                body,
            })
            .await
            .unwrap();
        assert_eq!(message, "Mail sent successfully!");
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_backend_failure_maps_to_rejected_with_message() {
        let url = spawn_backend(
            StubModel::failing(|| LlmError::EmptyContent),
            Arc::new(StubTransport::default()),
        )
        .await;
        let client = BackendClient::new(url).unwrap();

        match client.regenerate("Dear Team").await {
            Err(ServiceError::Rejected { message }) => {
                assert_eq!(message, "Error regenerating mail.")
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = BackendClient::new(format!("http://{addr}")).unwrap();
        let err = client.regenerate("Dear Team").await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }
}
