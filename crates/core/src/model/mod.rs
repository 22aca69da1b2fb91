mod answer;
mod category;
mod ids;
mod profile;
mod question;
mod results;
mod resume;
mod settings;

pub use ids::QuestionId;

pub use answer::{AnswerRecord, Submission, SubmissionBody, SubmitTrigger, build_answer_records};
pub use category::{Category, NextStep, UnknownCategory};
pub use profile::{BRANCHES, Profile, ProfileCompletion, ProfileDraft, ProfileError};
pub use question::{AnswerLetter, OPTION_LETTERS, Question, QuestionError, QuestionRecord};
pub use results::{Prediction, Recommendations, ResultsReport, ScoreInput, TestCompletion};
pub use resume::{
    FeedbackKind, FeedbackLine, RESUME_EXTENSIONS, ResumeAnalysis, ResumeError, ResumeUpload,
    ScoreBand,
};
pub use settings::{ClientSettings, ClientSettingsDraft, DEFAULT_API_BASE_URL, SettingsError};
