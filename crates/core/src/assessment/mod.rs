mod keys;
mod session;

pub use keys::{KeyCommand, KeyInput};
pub use session::{
    AssessmentError, AssessmentPhase, AssessmentProgress, AssessmentSession,
    DEFAULT_TEST_DURATION_SECS, LOW_TIME_THRESHOLD_SECS, TickOutcome,
};
