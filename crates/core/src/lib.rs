#![forbid(unsafe_code)]

pub mod assessment;
pub mod model;

pub use assessment::{AssessmentError, AssessmentPhase, AssessmentSession, KeyInput, TickOutcome};
