//! Mail Regeneration — rewrites an existing draft through the same model.

use tracing::info;

use crate::errors::{AppError, REGENERATE_FAILED};
use crate::llm_client::LanguageModel;
use crate::mail::prompts::{common_fragments, fill_template, REGENERATE_PROMPT_TEMPLATE};

pub fn build_regenerate_prompt(current_draft: &str) -> String {
    let mut values = common_fragments();
    values.insert("current_draft", current_draft.to_string());
    fill_template(REGENERATE_PROMPT_TEMPLATE, &values)
}

/// Returns a rewritten draft. Any provider failure, including an empty answer,
/// is an error so the caller keeps its existing draft.
pub async fn regenerate_mail(
    llm: &dyn LanguageModel,
    current_draft: &str,
) -> Result<String, AppError> {
    if current_draft.trim().is_empty() {
        return Err(AppError::Validation(
            "currentDraft cannot be empty".to_string(),
        ));
    }

    info!("Regenerating draft of {} chars", current_draft.len());
    let new_draft = llm
        .generate_text(&build_regenerate_prompt(current_draft))
        .await
        .map_err(|e| AppError::llm(REGENERATE_FAILED, e))?;

    if new_draft.trim().is_empty() {
        return Err(AppError::llm(REGENERATE_FAILED, "provider returned a blank draft"));
    }

    Ok(new_draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::testing::StubModel;

    #[tokio::test]
    async fn test_regenerated_draft_is_never_empty() {
        let llm = StubModel::fixed("Dear Hiring Team,\n\nI am excited to apply.");
        let draft = regenerate_mail(&llm, "Dear Team, I want the job.").await.unwrap();
        assert!(!draft.trim().is_empty());
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_current_draft_verbatim() {
        let llm = StubModel::echo();
        let draft = regenerate_mail(&llm, "Resume: http://drive/{x}").await.unwrap();
        assert!(draft.contains("Original Email:\nResume: http://drive/{x}"));
    }

    #[tokio::test]
    async fn test_empty_draft_is_rejected_without_provider_call() {
        let llm = StubModel::echo();
        let err = regenerate_mail(&llm, "  \n").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_provider_output_is_unsuccessful() {
        let llm = StubModel::failing(|| LlmError::EmptyContent);
        let err = regenerate_mail(&llm, "Dear Team").await.unwrap_err();
        assert!(matches!(err, AppError::Llm { public, .. } if public == REGENERATE_FAILED));
    }
}
