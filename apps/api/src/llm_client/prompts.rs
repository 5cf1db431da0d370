// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments used by more than one template.

/// Keeps the model from producing a template the user must fill in.
pub const NO_PLACEHOLDERS_INSTRUCTION: &str =
    "Do not request any additional information and do not include placeholders or instructions.";

/// The subject is composed separately by the user.
pub const NO_SUBJECT_INSTRUCTION: &str = "Exclude the subject line.";

/// First-person voice so the output can be sent as-is.
pub const FIRST_PERSON_INSTRUCTION: &str =
    "Write the email as if I am sending it myself, ready to submit.";
