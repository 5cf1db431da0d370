//! Axum route handlers for the Mail API.
//!
//! Each handler catches and reports its own failures, so one failed provider
//! call never affects later requests.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::{AppError, SEND_FAILED};
use crate::mail::dispatch::{MailError, OutgoingMail};
use crate::mail::drafter::generate_mail_body;
use crate::mail::models::{
    GenerateMailRequest, GenerateMailResponse, RegenerateMailRequest, RegenerateMailResponse,
    SendMailRequest, StatusResponse,
};
use crate::mail::regenerator::regenerate_mail;
use crate::state::AppState;

pub const SEND_SUCCEEDED: &str = "Mail sent successfully!";

/// Malformed JSON is reported in the same `{success:false}` shape as every other failure.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// POST /generateMail
///
/// Produces a draft body from the merged job request and applicant profile.
pub async fn handle_generate_mail(
    State(state): State<AppState>,
    payload: Result<Json<GenerateMailRequest>, JsonRejection>,
) -> Result<Json<GenerateMailResponse>, AppError> {
    let request = json_body(payload)?;
    let mail_body = generate_mail_body(state.llm.as_ref(), &request).await?;

    Ok(Json(GenerateMailResponse {
        success: true,
        mail_body,
    }))
}

/// POST /regenerateMail
pub async fn handle_regenerate_mail(
    State(state): State<AppState>,
    payload: Result<Json<RegenerateMailRequest>, JsonRejection>,
) -> Result<Json<RegenerateMailResponse>, AppError> {
    let request = json_body(payload)?;
    let new_draft = regenerate_mail(state.llm.as_ref(), &request.current_draft).await?;

    Ok(Json(RegenerateMailResponse {
        success: true,
        new_draft,
    }))
}

/// POST /sendMail
///
/// One send attempt. Missing recipient or body is rejected before the transport is touched.
pub async fn handle_send_mail(
    State(state): State<AppState>,
    payload: Result<Json<SendMailRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let request = json_body(payload)?;

    if request.email.trim().is_empty() {
        return Err(AppError::Validation("Recipient email is missing".to_string()));
    }
    if request.body.trim().is_empty() {
        return Err(AppError::Validation("Mail body is empty".to_string()));
    }

    let mail = OutgoingMail {
        to: request.email.trim().to_string(),
        subject: request.subject,
        body: request.body,
    };

    state.mailer.send(mail).await.map_err(|e| match e {
        MailError::InvalidAddress { field: "recipient", .. } => {
            AppError::Validation("Recipient email is invalid".to_string())
        }
        other => AppError::mail(SEND_FAILED, other),
    })?;

    Ok(Json(StatusResponse {
        success: true,
        message: SEND_SUCCEEDED.to_string(),
    }))
}
