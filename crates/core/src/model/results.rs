use serde::{Deserialize, Serialize};

use crate::model::Category;

/// Scores and profile values the prediction was computed from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    #[serde(default)]
    pub cgpa: f64,
    #[serde(default)]
    pub backlogs: u32,
    #[serde(default)]
    pub certifications: u32,
    #[serde(default)]
    pub internship: u32,
    #[serde(default)]
    pub projects: u32,
    #[serde(default)]
    pub hackathon: u32,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub aptitude: u32,
    #[serde(default)]
    pub technical: u32,
    #[serde(default)]
    pub communication: u32,
    #[serde(default)]
    pub resume: f64,
}

impl ScoreInput {
    #[must_use]
    pub fn score_for(&self, category: Category) -> u32 {
        match category {
            Category::Aptitude => self.aptitude,
            Category::Technical => self.technical,
            Category::Communication => self.communication,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub placement_readiness: Option<i64>,
    #[serde(default)]
    pub company_fit: Option<String>,
    #[serde(default)]
    pub placement_confidence: Option<f64>,
    #[serde(default)]
    pub calculated_score: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub company_recommendations: Vec<String>,
}

/// Response of `GET /results`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsReport {
    #[serde(default)]
    pub input: Option<ScoreInput>,
    #[serde(default)]
    pub prediction: Prediction,
    #[serde(default)]
    pub recommendations: Recommendations,
}

/// How many of the three categories have a recorded score.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestCompletion {
    pub completed: Vec<Category>,
}

impl TestCompletion {
    pub const TOTAL: usize = Category::ALL.len();

    #[must_use]
    pub fn count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn is_done(&self, category: Category) -> bool {
        self.completed.contains(&category)
    }

    #[must_use]
    pub fn all_done(&self) -> bool {
        self.count() == Self::TOTAL
    }
}

impl ResultsReport {
    /// A category counts as completed once it has a score above zero.
    #[must_use]
    pub fn test_completion(&self) -> TestCompletion {
        let Some(input) = self.input.as_ref() else {
            return TestCompletion::default();
        };
        TestCompletion {
            completed: Category::ALL
                .into_iter()
                .filter(|category| input.score_for(*category) > 0)
                .collect(),
        }
    }

    #[must_use]
    pub fn placement_ready(&self) -> bool {
        self.prediction.placement_readiness == Some(1)
    }

    #[must_use]
    pub fn overall_score(&self) -> f64 {
        self.prediction.calculated_score.unwrap_or(0.0)
    }

    #[must_use]
    pub fn company_fit(&self) -> &str {
        self.prediction.company_fit.as_deref().unwrap_or("N/A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_results_and_counts_completed_tests() {
        let json = r#"{
            "input": {
                "cgpa": 8.2, "backlogs": 0, "certifications": 2, "internship": 1,
                "projects": 3, "hackathon": 1, "branch": "CSE",
                "aptitude": 7, "technical": 0, "communication": 5, "resume": 7.4
            },
            "prediction": {
                "placement_readiness": 1,
                "company_fit": "Product-Based",
                "placement_confidence": 0.82,
                "calculated_score": 61.5,
                "input_validated": true
            },
            "recommendations": {
                "strengths": ["Strong CGPA"],
                "improvements": [],
                "action_items": ["Practice mock interviews"],
                "company_recommendations": ["Google"],
                "focus_areas": { "technical": true }
            }
        }"#;
        let report: ResultsReport = serde_json::from_str(json).unwrap();
        let completion = report.test_completion();

        assert_eq!(completion.count(), 2);
        assert!(completion.is_done(Category::Aptitude));
        assert!(!completion.is_done(Category::Technical));
        assert!(report.placement_ready());
        assert_eq!(report.company_fit(), "Product-Based");
        assert_eq!(report.recommendations.company_recommendations, vec!["Google"]);
    }

    #[test]
    fn missing_prediction_is_not_ready() {
        let report: ResultsReport = serde_json::from_str(r#"{"prediction":{"placement_readiness":null}}"#).unwrap();
        assert!(!report.placement_ready());
        assert_eq!(report.test_completion().count(), 0);
        assert_eq!(report.company_fit(), "N/A");
    }
}
