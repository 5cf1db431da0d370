//! Workflow state machine — which step of the draft/send flow the session is in.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    DraftError,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DraftError => "draft_error",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The phases of one session.
///
/// Linear flow: CollectingProfile → CollectingJobRequest → Generating →
/// Reviewing ⇄ (Regenerating | Sending) → Sent → CollectingJobRequest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum WorkflowState {
    #[default]
    CollectingProfile,
    CollectingJobRequest,
    Generating,
    Reviewing,
    Regenerating,
    Sending,
    Sent,
    Failed(FailureReason),
}

impl WorkflowState {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: WorkflowState) -> bool {
        use WorkflowState::*;
        match (self, target) {
            // Logout is always possible.
            (_, CollectingProfile) => true,
            // Leaving the review page, or retrying after a failed draft.
            (CollectingProfile, CollectingJobRequest) => true,
            (Sent | Failed(_) | Reviewing | Generating | Regenerating | Sending, CollectingJobRequest) => {
                true
            }
            (CollectingJobRequest, Generating) => true,
            (Generating, Reviewing | Failed(_)) => true,
            (Reviewing, Reviewing | Regenerating | Sending) => true,
            (Regenerating, Reviewing) => true,
            (Sending, Reviewing | Sent) => true,
            _ => false,
        }
    }

    /// An external call is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Generating | Self::Regenerating | Self::Sending)
    }

    /// Enabled/disabled state of every control, derived from this state alone
    /// plus whether a non-empty draft body exists.
    pub fn controls(&self, has_draft_body: bool) -> Controls {
        let reviewing = matches!(self, Self::Reviewing);
        Controls {
            profile_form: matches!(self, Self::CollectingProfile),
            generate: matches!(self, Self::CollectingJobRequest),
            edit: reviewing,
            regenerate: reviewing && has_draft_body,
            send: reviewing && has_draft_body,
            retry: matches!(self, Self::Failed(_)),
        }
    }
}

/// Which UI controls accept input. `generate` additionally requires a
/// complete job form; see `WorkflowController::can_generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Controls {
    pub profile_form: bool,
    pub generate: bool,
    pub edit: bool,
    pub regenerate: bool,
    pub send: bool,
    pub retry: bool,
}
