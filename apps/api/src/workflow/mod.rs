// Client-side workflow: profile → job request → draft → review → send.
// The controller talks to the backend only through the traits in `services`.

pub mod backend;
pub mod controller;
pub mod model;
pub mod notice;
pub mod services;
pub mod state;
pub mod store;

pub use controller::{ReviewSession, WorkflowController};
pub use model::{ApplicantProfile, DraftMail, JobRequest};
pub use state::{Controls, FailureReason, WorkflowState};
