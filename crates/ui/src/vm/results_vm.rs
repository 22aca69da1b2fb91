use campusfit_core::model::{Recommendations, ResultsReport, ScoreBand};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecommendationSectionVm {
    pub title: &'static str,
    pub items: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub band: ScoreBand,
    pub ready: bool,
    pub readiness_label: &'static str,
    pub company_fit: String,
    pub confidence_label: Option<String>,
    pub achievements: Vec<&'static str>,
    /// Non-empty sections only.
    pub sections: Vec<RecommendationSectionVm>,
    /// Server-side prediction failure, shown instead of a score breakdown.
    pub prediction_error: Option<String>,
}

impl From<&ResultsReport> for ResultsVm {
    fn from(report: &ResultsReport) -> Self {
        let score = report.overall_score();
        let ready = report.placement_ready();
        let mut achievements = vec!["Assessment Complete"];
        if score >= 80.0 {
            achievements.push("High Performer");
        }
        if score >= 60.0 {
            achievements.push("Good Score");
        }
        if ready {
            achievements.push("Placement Ready");
        }
        Self {
            score_label: format_score(score),
            band: ScoreBand::of(score),
            ready,
            readiness_label: if ready { "Yes" } else { "Not Yet" },
            company_fit: report.company_fit().to_string(),
            confidence_label: report
                .prediction
                .placement_confidence
                .map(|confidence| format!("{:.0}%", confidence * 100.0)),
            achievements,
            sections: map_recommendations(&report.recommendations),
            prediction_error: report.prediction.error.clone(),
        }
    }
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

#[must_use]
pub fn map_recommendations(recommendations: &Recommendations) -> Vec<RecommendationSectionVm> {
    [
        ("Strengths", &recommendations.strengths),
        ("Areas to Improve", &recommendations.improvements),
        ("Action Items", &recommendations.action_items),
        ("Recommended Companies", &recommendations.company_recommendations),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(title, items)| RecommendationSectionVm {
        title,
        items: items.clone(),
    })
    .collect()
}
