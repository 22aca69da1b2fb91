use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File extensions the analyser accepts.
pub const RESUME_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResumeError {
    #[error("no file selected")]
    Empty,
    #[error("unsupported file type: {0}")]
    UnsupportedExtension(String),
}

/// A resume file ready to be uploaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumeUpload {
    file_name: String,
    bytes: Vec<u8>,
    job_description: Option<String>,
}

impl ResumeUpload {
    /// # Errors
    ///
    /// Returns `ResumeError` if the file is empty or its extension is not
    /// one of [`RESUME_EXTENSIONS`].
    pub fn new(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        job_description: Option<String>,
    ) -> Result<Self, ResumeError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(ResumeError::Empty);
        }
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !RESUME_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ResumeError::UnsupportedExtension(extension));
        }
        let job_description = job_description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        Ok(Self {
            file_name,
            bytes,
            job_description,
        })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn job_description(&self) -> Option<&str> {
        self.job_description.as_deref()
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Vec<u8>, Option<String>) {
        (self.file_name, self.bytes, self.job_description)
    }
}

/// Response of `POST /resume/upload`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub resume_score: Option<f64>,
    #[serde(default)]
    pub ats_score: f64,
    #[serde(default)]
    pub quality_score: f64,
    #[serde(default)]
    pub quality_feedback: Vec<String>,
    #[serde(default)]
    pub ats_feedback: Vec<String>,
    #[serde(default)]
    pub overall_assessment: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub tech_keywords_found: u32,
    #[serde(default)]
    pub job_aware: bool,
    #[serde(default)]
    pub resume_text: Option<String>,
}

impl ResumeAnalysis {
    #[must_use]
    pub fn overall_score(&self) -> f64 {
        self.score.or(self.resume_score).unwrap_or(0.0)
    }
}

/// Coarse rating used to colour a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    #[must_use]
    pub fn of(score: f64) -> Self {
        if score >= 80.0 {
            Self::Strong
        } else if score >= 60.0 {
            Self::Fair
        } else {
            Self::Weak
        }
    }

    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Fair => "fair",
            Self::Weak => "weak",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Heading,
    Positive,
    Negative,
}

/// A feedback line with its status decoration removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackLine {
    pub kind: FeedbackKind,
    pub text: String,
}

impl FeedbackLine {
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        if raw.contains("===") {
            return Self {
                kind: FeedbackKind::Heading,
                text: raw.replace("===", "").trim().to_string(),
            };
        }
        let kind = if raw.contains('✅') {
            FeedbackKind::Positive
        } else {
            FeedbackKind::Negative
        };
        let text = raw
            .chars()
            .filter(|ch| !matches!(ch, '✅' | '❌' | '⚠' | '\u{fe0f}'))
            .collect::<String>()
            .trim()
            .to_string();
        Self { kind, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_checks_extension_and_trims_description() {
        let upload = ResumeUpload::new("cv.PDF", vec![1, 2], Some("  rust dev ".into())).unwrap();
        assert_eq!(upload.job_description(), Some("rust dev"));

        let blank = ResumeUpload::new("cv.txt", vec![1], Some("   ".into())).unwrap();
        assert_eq!(blank.job_description(), None);

        assert_eq!(
            ResumeUpload::new("cv.png", vec![1], None),
            Err(ResumeError::UnsupportedExtension("png".into()))
        );
        assert_eq!(ResumeUpload::new("cv.pdf", Vec::new(), None), Err(ResumeError::Empty));
    }

    #[test]
    fn classifies_feedback_lines() {
        let heading = FeedbackLine::classify("=== CONTENT ===");
        assert_eq!(heading.kind, FeedbackKind::Heading);
        assert_eq!(heading.text, "CONTENT");

        let good = FeedbackLine::classify("✅ Strong use of action verbs");
        assert_eq!(good.kind, FeedbackKind::Positive);
        assert_eq!(good.text, "Strong use of action verbs");

        let warn = FeedbackLine::classify("⚠️ Use bullet points for better readability");
        assert_eq!(warn.kind, FeedbackKind::Negative);
        assert_eq!(warn.text, "Use bullet points for better readability");
    }

    #[test]
    fn overall_score_falls_back_to_resume_score() {
        let analysis: ResumeAnalysis =
            serde_json::from_str(r#"{"resume_score": 72.5, "ats_score": 20}"#).unwrap();
        assert!((analysis.overall_score() - 72.5).abs() < f64::EPSILON);
        assert_eq!(ScoreBand::of(analysis.overall_score()), ScoreBand::Fair);
        assert_eq!(ScoreBand::of(85.0), ScoreBand::Strong);
        assert_eq!(ScoreBand::of(10.0), ScoreBand::Weak);
    }
}
