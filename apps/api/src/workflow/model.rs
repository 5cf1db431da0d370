//! Applicant profile, job request, and draft mail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mail::dispatch::DEFAULT_SUBJECT;
use crate::mail::models::GenerateMailRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Profile field '{0}' is required")]
    MissingField(&'static str),
}

/// The applicant identity reused across sessions. Fields are uppercased at
/// creation and never change afterwards; the only way to alter a profile is
/// to clear it and create a new one.
///
/// Serialized with the same keys the browser client stores under `userInfo`.
/// Deserialization goes through `new`, so a stored record is uppercased on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredProfile")]
pub struct ApplicantProfile {
    #[serde(rename = "yourName")]
    name: String,
    #[serde(rename = "college")]
    institution: String,
    phone: String,
}

#[derive(Deserialize)]
struct StoredProfile {
    #[serde(rename = "yourName")]
    name: String,
    college: String,
    phone: String,
}

impl TryFrom<StoredProfile> for ApplicantProfile {
    type Error = ProfileError;

    fn try_from(stored: StoredProfile) -> Result<Self, Self::Error> {
        Self::new(&stored.name, &stored.college, &stored.phone)
    }
}

impl ApplicantProfile {
    pub fn new(name: &str, institution: &str, phone: &str) -> Result<Self, ProfileError> {
        for (field, value) in [("name", name), ("institution", institution), ("phone", phone)] {
            if value.trim().is_empty() {
                return Err(ProfileError::MissingField(field));
            }
        }

        Ok(Self {
            name: name.to_uppercase(),
            institution: institution.to_uppercase(),
            phone: phone.to_uppercase(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn institution(&self) -> &str {
        &self.institution
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// A record read back from storage counts only if every field survived.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.institution.trim().is_empty()
            && !self.phone.trim().is_empty()
    }
}

/// Per-application fields, supplied fresh for each draft. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobRequest {
    pub person_name: Option<String>,
    pub company: String,
    pub role: String,
    pub job_id: Option<String>,
    /// Recipient address.
    pub email: String,
    pub resume_link: String,
}

impl JobRequest {
    /// Required fields that are blank, in form order. An email without a
    /// plausible address shape counts as missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.company.trim().is_empty() {
            missing.push("company");
        }
        if self.role.trim().is_empty() {
            missing.push("role");
        }
        if !is_plausible_email(&self.email) {
            missing.push("email");
        }
        if self.resume_link.trim().is_empty() {
            missing.push("resumeLink");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Merges the job fields with the stored profile into the backend payload.
    pub fn to_generate_request(&self, profile: &ApplicantProfile) -> GenerateMailRequest {
        GenerateMailRequest {
            person_name: self.person_name.clone(),
            company: self.company.clone(),
            role: self.role.clone(),
            job_id: self.job_id.clone(),
            resume: self.resume_link.clone(),
            your_name: profile.name().to_string(),
            college: profile.institution().to_string(),
            phone: profile.phone().to_string(),
        }
    }
}

/// The subject/body pair under review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftMail {
    pub subject: String,
    pub body: String,
}

impl DraftMail {
    pub fn for_role(role: &str, body: String) -> Self {
        Self {
            subject: default_subject(role),
            body,
        }
    }

    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

pub fn default_subject(role: &str) -> String {
    let role = role.trim();
    if role.is_empty() {
        DEFAULT_SUBJECT.to_string()
    } else {
        format!("Job Application for {role} role")
    }
}

/// An address `lettre` will accept at send time, with a dotted domain.
pub fn is_plausible_email(value: &str) -> bool {
    value
        .trim()
        .parse::<lettre::Address>()
        .is_ok_and(|address| address.domain().contains('.'))
}
