//! Wire types for the mail endpoints. Shared by the axum handlers and the
//! client-side `BackendClient`, so both ends agree on one schema.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Body of `POST /generateMail`: a job request merged with the stored profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMailRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// Resume link, included verbatim in the draft.
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub your_name: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub phone: String,
}

impl GenerateMailRequest {
    pub fn person_name(&self) -> Option<&str> {
        present(self.person_name.as_deref())
    }

    pub fn job_id(&self) -> Option<&str> {
        present(self.job_id.as_deref())
    }

    /// Names of required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("company", &self.company),
            ("role", &self.role),
            ("resume", &self.resume),
            ("yourName", &self.your_name),
            ("college", &self.college),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMailResponse {
    pub success: bool,
    pub mail_body: String,
}

/// Body of `POST /regenerateMail`. The key name `currentDraft` is fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateMailRequest {
    #[serde(default)]
    pub current_draft: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateMailResponse {
    pub success: bool,
    pub new_draft: String,
}

/// Body of `POST /sendMail`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMailRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

/// Success body of `/sendMail`, and the failure body of every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Treats blank optional form fields as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_uses_camel_case_keys() {
        let json = serde_json::json!({
            "personName": "",
            "company": "Acme",
            "role": "Engineer",
            "jobId": "R-42",
            "resume": "http://drive/x",
            "yourName": "JANE",
            "college": "MIT",
            "phone": "555-0100"
        });
        let request: GenerateMailRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.person_name(), None);
        assert_eq!(request.job_id(), Some("R-42"));
        assert_eq!(request.your_name, "JANE");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_lists_blank_required_fields() {
        let request = GenerateMailRequest {
            role: "Engineer".to_string(),
            resume: "  ".to_string(),
            your_name: "JANE".to_string(),
            college: "MIT".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        };
        assert_eq!(request.missing_fields(), vec!["company", "resume"]);
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_regenerate_request_reads_current_draft_key() {
        let request: RegenerateMailRequest =
            serde_json::from_str(r#"{"currentDraft": "Dear Team"}"#).unwrap();
        assert_eq!(request.current_draft, "Dear Team");
    }
}
