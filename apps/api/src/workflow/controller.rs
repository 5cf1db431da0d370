//! Workflow Controller — drives one session through profile entry, draft
//! generation, review, regeneration, and sending.
//!
//! The controller is the only consumer of the mail services. Every guard is
//! checked here before a call is made; a failed guard produces a warning
//! `Notice` and no network traffic. Actions take `&mut self`, so at most one
//! external call is outstanding per session.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::mail::models::SendMailRequest;
use crate::workflow::model::{is_plausible_email, ApplicantProfile, DraftMail, JobRequest};
use crate::workflow::notice::Notice;
use crate::workflow::services::{MailServices, ServiceError};
use crate::workflow::state::{Controls, FailureReason, WorkflowState};
use crate::workflow::store::ProfileStore;

/// The draft under review plus the route state that travels with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    pub draft: DraftMail,
    pub role: String,
    pub recipient: String,
}

pub struct WorkflowController {
    store: Arc<dyn ProfileStore>,
    services: MailServices,
    state: WorkflowState,
    profile: Option<ApplicantProfile>,
    session: Option<ReviewSession>,
    notice: Option<Notice>,
}

impl WorkflowController {
    /// Creates a controller in `CollectingProfile`. Call `start` to pick up a stored profile.
    pub fn new(store: Arc<dyn ProfileStore>, services: MailServices) -> Self {
        Self {
            store,
            services,
            state: WorkflowState::default(),
            profile: None,
            session: None,
            notice: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn profile(&self) -> Option<&ApplicantProfile> {
        self.profile.as_ref()
    }

    pub fn session(&self) -> Option<&ReviewSession> {
        self.session.as_ref()
    }

    pub fn draft(&self) -> Option<&DraftMail> {
        self.session.as_ref().map(|s| &s.draft)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn controls(&self) -> Controls {
        self.state
            .controls(self.draft().is_some_and(DraftMail::has_body))
    }

    /// Whether the generate control is enabled for the given form contents.
    pub fn can_generate(&self, form: &JobRequest) -> bool {
        self.controls().generate && form.is_complete()
    }

    fn transition(&mut self, target: WorkflowState) {
        if self.state.can_transition_to(target) {
            debug!("Workflow {:?} -> {:?}", self.state, target);
        } else {
            warn!("Unexpected workflow transition {:?} -> {:?}", self.state, target);
        }
        self.state = target;
    }

    fn reject(&mut self, notice: Notice) -> bool {
        warn!("Action rejected in {:?}: {}", self.state, notice.text);
        self.notice = Some(notice);
        false
    }

    /// Loads a stored profile and skips straight to the job form if one exists.
    pub fn start(&mut self) {
        match self.store.get() {
            Ok(Some(profile)) => {
                info!("Found stored profile; skipping profile entry");
                self.profile = Some(profile);
                self.transition(WorkflowState::CollectingJobRequest);
            }
            Ok(None) => self.transition(WorkflowState::CollectingProfile),
            Err(e) => {
                warn!("Could not read stored profile: {e}");
                self.transition(WorkflowState::CollectingProfile);
            }
        }
    }

    /// Stores the uppercased profile and moves to the job form.
    pub fn submit_profile(&mut self, name: &str, institution: &str, phone: &str) -> bool {
        if self.state != WorkflowState::CollectingProfile {
            return self.reject(Notice::warning("Your info is already saved."));
        }

        let profile = match ApplicantProfile::new(name, institution, phone) {
            Ok(profile) => profile,
            Err(e) => {
                debug!("Profile rejected: {e}");
                return self.reject(Notice::warning("Please fill in your basic info first!"));
            }
        };

        if let Err(e) = self.store.set(&profile) {
            warn!("Could not persist profile: {e}");
            return self.reject(Notice::error("Could not save your info."));
        }

        self.profile = Some(profile);
        self.notice = None;
        self.transition(WorkflowState::CollectingJobRequest);
        true
    }

    /// Requests a draft for the job. On success the session moves to review.
    pub async fn submit_job_request(&mut self, request: JobRequest) -> bool {
        if self.state != WorkflowState::CollectingJobRequest {
            return self.reject(Notice::warning("A draft can't be generated right now."));
        }

        // Re-read the store: the profile may have been cleared elsewhere.
        let profile = match self.store.get() {
            Ok(Some(profile)) => profile,
            Ok(None) | Err(_) => {
                self.profile = None;
                return self.reject(Notice::warning("Please fill in your basic info first!"));
            }
        };

        let missing = request.missing_fields();
        if !missing.is_empty() {
            return self.reject(Notice::warning(format!(
                "Please fill in: {}.",
                missing.join(", ")
            )));
        }

        self.profile = Some(profile.clone());
        self.notice = Some(Notice::info("Generating..."));
        self.transition(WorkflowState::Generating);

        let payload = request.to_generate_request(&profile);
        match self.services.drafts.generate(&payload).await {
            Ok(body) => {
                info!("Draft ready for {} at {}", request.role, request.company);
                self.session = Some(ReviewSession {
                    draft: DraftMail::for_role(&request.role, body),
                    role: request.role,
                    recipient: request.email.trim().to_string(),
                });
                self.notice = None;
                self.transition(WorkflowState::Reviewing);
                true
            }
            Err(e) => {
                warn!("Draft generation failed: {e}");
                self.session = None;
                self.notice = Some(Notice::error("Error generating draft mail!"));
                self.transition(WorkflowState::Failed(FailureReason::DraftError));
                false
            }
        }
    }

    /// Returns to the job form after a failed draft.
    pub fn retry(&mut self) -> bool {
        if !matches!(self.state, WorkflowState::Failed(_)) {
            return false;
        }
        self.notice = None;
        self.transition(WorkflowState::CollectingJobRequest);
        true
    }

    pub fn edit_subject(&mut self, subject: impl Into<String>) -> bool {
        match (self.state, self.session.as_mut()) {
            (WorkflowState::Reviewing, Some(session)) => {
                session.draft.subject = subject.into();
                true
            }
            _ => false,
        }
    }

    pub fn edit_body(&mut self, body: impl Into<String>) -> bool {
        match (self.state, self.session.as_mut()) {
            (WorkflowState::Reviewing, Some(session)) => {
                session.draft.body = body.into();
                true
            }
            _ => false,
        }
    }

    /// Replaces the body with a rewritten version. On any failure the
    /// existing body is kept.
    pub async fn regenerate(&mut self) -> bool {
        if self.state != WorkflowState::Reviewing {
            return self.reject(Notice::warning("Please wait for the current action to finish."));
        }
        let current = self.draft().map(|d| d.body.clone()).unwrap_or_default();
        if current.trim().is_empty() {
            return self.reject(Notice::warning("No draft available to regenerate."));
        }

        self.notice = Some(Notice::info("Regenerating draft..."));
        self.transition(WorkflowState::Regenerating);

        let regenerated = match self.services.regenerator.regenerate(&current).await {
            Ok(new_draft) if !new_draft.trim().is_empty() => {
                if let Some(session) = self.session.as_mut() {
                    session.draft.body = new_draft;
                }
                self.notice = Some(Notice::success("Draft regenerated!"));
                true
            }
            Ok(_) => {
                warn!("Regeneration returned an empty draft");
                self.notice = Some(Notice::error("Failed to regenerate mail."));
                false
            }
            Err(ServiceError::Transport(e)) => {
                warn!("Regeneration transport error: {e}");
                self.notice = Some(Notice::warning("Error regenerating mail. Check backend."));
                false
            }
            Err(e) => {
                warn!("Regeneration unsuccessful: {e}");
                self.notice = Some(Notice::error("Failed to regenerate mail."));
                false
            }
        };

        self.transition(WorkflowState::Reviewing);
        regenerated
    }

    /// Sends the reviewed draft once. Success starts a fresh job form;
    /// failure keeps the draft for another attempt.
    pub async fn send(&mut self) -> bool {
        if self.state != WorkflowState::Reviewing {
            return self.reject(Notice::warning("Please wait for the current action to finish."));
        }
        let Some(session) = self.session.clone() else {
            return self.reject(Notice::warning("No draft available. Please generate mail first."));
        };
        if !is_plausible_email(&session.recipient) {
            return self.reject(Notice::warning("Recipient email is missing!"));
        }
        if !session.draft.has_body() {
            return self.reject(Notice::warning("Please wait for the mail to be generated."));
        }

        self.notice = Some(Notice::info("Sending..."));
        self.transition(WorkflowState::Sending);

        let request = SendMailRequest {
            email: session.recipient.clone(),
            subject: session.draft.subject.clone(),
            body: session.draft.body.clone(),
        };

        match self.services.dispatcher.dispatch(&request).await {
            Ok(message) => {
                info!("Mail dispatched to {}: {message}", session.recipient);
                self.transition(WorkflowState::Sent);
                self.notice = Some(Notice::success("Mail sent successfully!"));
                self.session = None;
                self.transition(WorkflowState::CollectingJobRequest);
                true
            }
            Err(ServiceError::Transport(e)) => {
                warn!("Send transport error: {e}");
                self.notice = Some(Notice::warning("Error sending mail. Check backend."));
                self.transition(WorkflowState::Reviewing);
                false
            }
            Err(e) => {
                warn!("Send unsuccessful: {e}");
                self.notice = Some(Notice::error("Failed to send mail."));
                self.transition(WorkflowState::Reviewing);
                false
            }
        }
    }

    /// Leaves the review page for the job form. Drops the draft.
    pub fn navigate_home(&mut self) {
        if self.profile.is_none() {
            self.transition(WorkflowState::CollectingProfile);
            return;
        }
        self.session = None;
        self.transition(WorkflowState::CollectingJobRequest);
    }

    /// Clears the stored profile and all session state. If the store can't
    /// be cleared the session is still dropped, and the notice says the
    /// profile will come back on the next `start`.
    pub fn logout(&mut self) -> bool {
        let cleared = match self.store.clear() {
            Ok(()) => {
                self.notice = None;
                true
            }
            Err(e) => {
                warn!("Could not clear stored profile: {e}");
                self.notice = Some(Notice::error("Could not clear your saved info."));
                false
            }
        };
        self.profile = None;
        self.session = None;
        self.transition(WorkflowState::CollectingProfile);
        cleared
    }
}
