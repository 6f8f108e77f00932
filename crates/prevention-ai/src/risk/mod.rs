//! Diabetes risk comparison pipeline.
//!
//! The flow runs form state → request client → HTTP → prompt synthesis →
//! inference gateway → response parser, with the presenter rendering the
//! settled outcome. The completion backend sits behind a trait so the
//! output grammar is exercised without a live upstream.

pub mod charts;
pub mod client;
pub mod form;
pub mod inference;
pub mod parser;
pub mod presenter;
pub mod profile;
pub mod prompt;
pub mod router;
pub mod service;

pub use charts::{ChartReference, FEATURED_CHARTS};
pub use client::{ClientError, RiskRequestClient};
pub use form::{
    LifestyleFormState, MissingFieldsError, SubmissionPhase, SubmissionState, SubmissionToken,
};
pub use inference::{CompletionBackend, InferenceError, OpenAiBackend};
pub use parser::{parse_completion, FormatMismatchError};
pub use profile::{
    DietType, Direction, ExerciseLevel, InvalidFieldError, LifestyleProfile, PlannedProfile,
    ProfileSection, RiskComparisonRequest, RiskComparisonResult,
};
pub use prompt::{synthesize_prompt, SYSTEM_DIRECTIVE};
pub use router::risk_router;
pub use service::{RiskEstimateError, RiskEstimationService};
