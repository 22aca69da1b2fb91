mod assessment;
mod catalog;
mod dashboard;
mod login;
mod profile;
mod register;
mod results;
mod resume;
mod state;
mod transition;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use assessment::AssessmentView;
pub use catalog::TestsView;
pub use dashboard::DashboardView;
pub use login::LoginView;
pub use profile::ProfileView;
pub use register::RegisterView;
pub use results::ResultsView;
pub use resume::ResumeView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use transition::TransitionView;
