use std::sync::Arc;

use services::{
    AppServices, AssessmentService, AuthService, DashboardService, ProfileService, ResumeService,
};

pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn profile(&self) -> Arc<ProfileService>;
    fn dashboard(&self) -> Arc<DashboardService>;
    fn assessments(&self) -> Arc<AssessmentService>;
    fn resume(&self) -> Arc<ResumeService>;
}

impl UiApp for AppServices {
    fn auth(&self) -> Arc<AuthService> {
        AppServices::auth(self)
    }

    fn profile(&self) -> Arc<ProfileService> {
        AppServices::profile(self)
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        AppServices::dashboard(self)
    }

    fn assessments(&self) -> Arc<AssessmentService> {
        AppServices::assessments(self)
    }

    fn resume(&self) -> Arc<ResumeService> {
        AppServices::resume(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    profile: Arc<ProfileService>,
    dashboard: Arc<DashboardService>,
    assessments: Arc<AssessmentService>,
    resume: Arc<ResumeService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            profile: app.profile(),
            dashboard: app.dashboard(),
            assessments: app.assessments(),
            resume: app.resume(),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn assessments(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessments)
    }

    #[must_use]
    pub fn resume(&self) -> Arc<ResumeService> {
        Arc::clone(&self.resume)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
