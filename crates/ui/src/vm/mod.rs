mod assessment_vm;
mod dashboard_vm;
mod results_vm;
mod resume_vm;
mod time_fmt;

pub use assessment_vm::{
    AssessmentIntent, AssessmentOutcome, AssessmentVm, OptionVm, PaletteItemVm, open_assessment,
};
pub use dashboard_vm::{CategoryStatusVm, DashboardVm, map_category_status};
pub use results_vm::{RecommendationSectionVm, ResultsVm, map_recommendations};
pub use resume_vm::{ResumeAnalysisVm, ScoreVm};
pub use time_fmt::{format_countdown, format_redirect};
