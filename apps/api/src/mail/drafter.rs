//! Mail Draft — composes the fixed draft prompt and delegates to the model.
//!
//! Flow: validate request → build prompt → LLM generate → structural check → body.
//!
//! An unusable provider answer (blank, blocked, malformed) yields
//! `DRAFT_UNAVAILABLE` instead of an error. Transport and API errors propagate.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::errors::{AppError, GENERATE_FAILED};
use crate::llm_client::LanguageModel;
use crate::mail::models::GenerateMailRequest;
use crate::mail::prompts::{
    common_fragments, fill_template, CLOSING_SALUTATION, DRAFT_PROMPT_TEMPLATE, DRAFT_WORD_TARGET,
};

pub const DRAFT_UNAVAILABLE: &str = "Generated email text unavailable.";

/// How far a draft may drift from `DRAFT_WORD_TARGET` before it is flagged.
const WORD_TARGET_TOLERANCE: usize = 75;

/// Structural facts about a generated draft. Logged, never enforced; wording
/// is up to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftInspection {
    pub word_count: usize,
    pub near_word_target: bool,
    pub includes_resume_link: bool,
    pub includes_closing: bool,
}

impl DraftInspection {
    pub fn is_well_formed(&self) -> bool {
        self.near_word_target && self.includes_resume_link && self.includes_closing
    }
}

/// `Dear {person},` when a contact is named, otherwise the team greeting.
pub fn greeting(person_name: Option<&str>) -> String {
    match person_name {
        Some(name) => format!("Dear {},", name.trim()),
        None => "Dear Hiring Team,".to_string(),
    }
}

/// The signature block every draft must end with.
pub fn closing_block(your_name: &str, college: &str, phone: &str) -> String {
    format!("{CLOSING_SALUTATION}\n\n{your_name}\n{college}\n{phone}")
}

/// Builds the draft prompt. The `Job ID:` line is present iff a job ID was given.
pub fn build_draft_prompt(request: &GenerateMailRequest) -> String {
    let job_id_line = request
        .job_id()
        .map(|id| format!("Job ID: {}\n", id.trim()))
        .unwrap_or_default();

    let mut values: HashMap<&'static str, String> = common_fragments();
    values.extend([
        ("greeting", greeting(request.person_name())),
        ("company", request.company.clone()),
        ("role", request.role.clone()),
        ("job_id_line", job_id_line),
        ("resume", request.resume.clone()),
        (
            "closing",
            closing_block(&request.your_name, &request.college, &request.phone),
        ),
    ]);

    fill_template(DRAFT_PROMPT_TEMPLATE, &values)
}

/// Checks the structural constraints of a generated body.
pub fn inspect_draft(body: &str, request: &GenerateMailRequest) -> DraftInspection {
    let word_count = body.split_whitespace().count();
    let closing_lines = [
        CLOSING_SALUTATION,
        request.your_name.as_str(),
        request.college.as_str(),
        request.phone.as_str(),
    ];

    DraftInspection {
        word_count,
        near_word_target: word_count.abs_diff(DRAFT_WORD_TARGET) <= WORD_TARGET_TOLERANCE,
        includes_resume_link: body.contains(request.resume.trim()),
        includes_closing: closing_lines.iter().all(|line| body.contains(line.trim())),
    }
}

/// Generates a draft body for a validated request.
pub async fn generate_mail_body(
    llm: &dyn LanguageModel,
    request: &GenerateMailRequest,
) -> Result<String, AppError> {
    request.validate()?;

    let prompt = build_draft_prompt(request);
    info!(
        "Generating draft for role '{}' at '{}'",
        request.role, request.company
    );

    let body = match llm.generate_text(&prompt).await {
        Ok(body) => body,
        Err(e) if e.is_unusable_response() => {
            warn!("Draft provider returned no usable text: {e}");
            return Ok(DRAFT_UNAVAILABLE.to_string());
        }
        Err(e) => return Err(AppError::llm(GENERATE_FAILED, e)),
    };

    let inspection = inspect_draft(&body, request);
    if !inspection.is_well_formed() {
        warn!("Draft deviates from prompt constraints: {inspection:?}");
    }
    info!("Draft generated ({} words)", inspection.word_count);

    Ok(body)
}
