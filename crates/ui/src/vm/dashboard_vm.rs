use campusfit_core::model::{Category, TestCompletion};
use services::DashboardOverview;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryStatusVm {
    pub category: Category,
    pub title: &'static str,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub profile_percent: u8,
    pub profile_complete: bool,
    pub resume_label: String,
    pub tests_label: String,
    pub tests_done: bool,
    pub readiness_label: &'static str,
    pub overall_percent: u8,
    pub categories: Vec<CategoryStatusVm>,
    /// First category without a score, if any.
    pub next_test: Option<Category>,
}

impl From<&DashboardOverview> for DashboardVm {
    fn from(overview: &DashboardOverview) -> Self {
        let profile = overview.profile_completion();
        let tests = overview.test_completion();
        let readiness_label = if overview.placement_ready() {
            "Ready"
        } else if tests.all_done() {
            "Not yet"
        } else {
            "Pending"
        };
        Self {
            profile_percent: profile.percent,
            profile_complete: profile.complete,
            resume_label: overview
                .resume_score()
                .map_or_else(|| "--".to_string(), |score| format!("{score}/10")),
            tests_label: format!("{}/{}", tests.count(), TestCompletion::TOTAL),
            tests_done: tests.all_done(),
            readiness_label,
            overall_percent: overview.overall_progress(),
            categories: map_category_status(&tests),
            next_test: Category::ALL
                .into_iter()
                .find(|category| !tests.is_done(*category)),
        }
    }
}

#[must_use]
pub fn map_category_status(tests: &TestCompletion) -> Vec<CategoryStatusVm> {
    Category::ALL
        .into_iter()
        .map(|category| CategoryStatusVm {
            category,
            title: category.title(),
            completed: tests.is_done(category),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusfit_core::model::{Profile, ResultsReport, ScoreInput};

    #[test]
    fn empty_overview_points_at_first_test() {
        let vm = DashboardVm::from(&DashboardOverview::default());
        assert_eq!(vm.profile_percent, 0);
        assert_eq!(vm.resume_label, "--");
        assert_eq!(vm.tests_label, "0/3");
        assert_eq!(vm.readiness_label, "Pending");
        assert_eq!(vm.overall_percent, 0);
        assert_eq!(vm.next_test, Some(Category::Aptitude));
    }

    #[test]
    fn partial_results_mark_completed_categories() {
        let overview = DashboardOverview {
            profile: Profile {
                resume_score: Some(83.0),
                ..Profile::default()
            },
            results: Some(ResultsReport {
                input: Some(ScoreInput {
                    aptitude: 5,
                    ..ScoreInput::default()
                }),
                ..ResultsReport::default()
            }),
        };
        let vm = DashboardVm::from(&overview);
        assert_eq!(vm.resume_label, "8/10");
        assert_eq!(vm.tests_label, "1/3");
        assert!(vm.categories[0].completed);
        assert!(!vm.categories[1].completed);
        assert_eq!(vm.next_test, Some(Category::Technical));
        // Resume 25 plus one test of three.
        assert_eq!(vm.overall_percent, 33);
    }
}
