// Mail backend: draft generation, regeneration, and SMTP dispatch.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod dispatch;
pub mod drafter;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod regenerator;
pub mod render;
