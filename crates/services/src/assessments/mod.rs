mod loader;
mod workflow;

pub use loader::QuestionLoader;
pub use workflow::AssessmentService;
