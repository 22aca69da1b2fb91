use campusfit_core::model::{FeedbackLine, ResumeAnalysis, ScoreBand};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreVm {
    pub label: String,
    pub band: ScoreBand,
}

impl ScoreVm {
    #[allow(clippy::cast_possible_truncation)]
    fn percent(score: f64) -> Self {
        Self {
            label: format!("{}%", score.round() as i64),
            band: ScoreBand::of(score),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumeAnalysisVm {
    pub overall: ScoreVm,
    pub quality: ScoreVm,
    pub ats: ScoreVm,
    pub quality_feedback: Vec<FeedbackLine>,
    pub ats_feedback: Vec<FeedbackLine>,
    pub assessment: Option<String>,
    pub recommendations: Vec<String>,
    pub stats_label: String,
    pub job_aware: bool,
}

impl From<&ResumeAnalysis> for ResumeAnalysisVm {
    fn from(analysis: &ResumeAnalysis) -> Self {
        let classify = |lines: &[String]| {
            lines
                .iter()
                .map(|line| FeedbackLine::classify(line))
                .filter(|line| !line.text.is_empty())
                .collect()
        };
        Self {
            overall: ScoreVm::percent(analysis.overall_score()),
            quality: ScoreVm::percent(analysis.quality_score),
            ats: ScoreVm::percent(analysis.ats_score),
            quality_feedback: classify(&analysis.quality_feedback),
            ats_feedback: classify(&analysis.ats_feedback),
            assessment: analysis.overall_assessment.clone(),
            recommendations: analysis.recommendations.clone(),
            stats_label: format!(
                "{} words, {} technical keywords",
                analysis.word_count, analysis.tech_keywords_found
            ),
            job_aware: analysis.job_aware,
        }
    }
}
