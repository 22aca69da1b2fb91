use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Branches the prediction model knows about.
pub const BRANCHES: [&str; 6] = ["CSE", "ECE", "MECH", "CIVIL", "ISE", "AI&DS"];

const REQUIRED_FIELDS: usize = 2;
const OPTIONAL_FIELDS: usize = 5;
const MIN_OPTIONAL_FOR_COMPLETE: usize = 2;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("CGPA must be between 0 and 10, got {0}")]
    CgpaOutOfRange(f64),
    #[error("unknown branch: {0}")]
    UnknownBranch(String),
    #[error("{field} must be a whole number, got {raw:?}")]
    NotANumber { field: &'static str, raw: String },
}

/// Academic profile as stored by `GET/POST /profile`.
///
/// Every field is optional: a fresh account returns `{}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub backlogs: Option<u32>,
    #[serde(default)]
    pub certifications: Option<u32>,
    #[serde(default)]
    pub internship: Option<u32>,
    #[serde(default)]
    pub projects: Option<u32>,
    #[serde(default)]
    pub hackathon: Option<u32>,
    #[serde(default)]
    pub branch: Option<String>,
    /// Resume score in percent, written by the resume analyser.
    #[serde(default, skip_serializing)]
    pub resume_score: Option<f64>,
}

/// Raw form values as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub cgpa: String,
    pub backlogs: String,
    pub certifications: String,
    pub internship: String,
    pub projects: String,
    pub hackathon: String,
    pub branch: String,
}

impl ProfileDraft {
    /// Prefill the form from a stored profile.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        fn num(value: Option<u32>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }
        Self {
            cgpa: profile.cgpa.map(|v| v.to_string()).unwrap_or_default(),
            backlogs: num(profile.backlogs),
            certifications: num(profile.certifications),
            internship: num(profile.internship),
            projects: num(profile.projects),
            hackathon: num(profile.hackathon),
            branch: profile.branch.clone().unwrap_or_else(|| "CSE".into()),
        }
    }

    /// Validate the draft. Blank fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` for a non-numeric count, an out-of-range CGPA
    /// or an unknown branch.
    pub fn validate(self) -> Result<Profile, ProfileError> {
        let cgpa = match normalize(&self.cgpa) {
            Some(raw) => {
                let value: f64 = raw.parse().map_err(|_| ProfileError::NotANumber {
                    field: "cgpa",
                    raw: raw.to_string(),
                })?;
                if !(0.0..=10.0).contains(&value) {
                    return Err(ProfileError::CgpaOutOfRange(value));
                }
                Some(value)
            }
            None => None,
        };

        let branch = match normalize(&self.branch) {
            Some(raw) => {
                let upper = raw.to_ascii_uppercase();
                if !BRANCHES.contains(&upper.as_str()) {
                    return Err(ProfileError::UnknownBranch(raw.to_string()));
                }
                Some(upper)
            }
            None => None,
        };

        Ok(Profile {
            name: None,
            cgpa,
            backlogs: parse_count("backlogs", &self.backlogs)?,
            certifications: parse_count("certifications", &self.certifications)?,
            internship: parse_count("internship", &self.internship)?,
            projects: parse_count("projects", &self.projects)?,
            hackathon: parse_count("hackathon", &self.hackathon)?,
            branch,
            resume_score: None,
        })
    }
}

fn normalize(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_count(field: &'static str, raw: &str) -> Result<Option<u32>, ProfileError> {
    normalize(raw)
        .map(|value| {
            value.parse::<u32>().map_err(|_| ProfileError::NotANumber {
                field,
                raw: value.to_string(),
            })
        })
        .transpose()
}

/// How much of the profile has been filled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileCompletion {
    pub complete: bool,
    pub percent: u8,
    pub filled_required: usize,
    pub filled_optional: usize,
}

impl ProfileCompletion {
    pub const TOTAL_REQUIRED: usize = REQUIRED_FIELDS;
    pub const TOTAL_OPTIONAL: usize = OPTIONAL_FIELDS;

    /// Required fields weigh 60%, optional ones 40%. Zero counts do not
    /// count as filled.
    #[must_use]
    pub fn of(profile: &Profile) -> Self {
        let filled_required = [
            profile.cgpa.is_some(),
            profile
                .branch
                .as_deref()
                .is_some_and(|branch| !branch.trim().is_empty()),
        ]
        .into_iter()
        .filter(|filled| *filled)
        .count();

        let filled_optional = [
            profile.backlogs,
            profile.certifications,
            profile.internship,
            profile.projects,
            profile.hackathon,
        ]
        .into_iter()
        .filter(|value| value.is_some_and(|v| v > 0))
        .count();

        #[allow(clippy::cast_precision_loss)]
        let raw = (filled_required as f64 / REQUIRED_FIELDS as f64) * 60.0
            + (filled_optional as f64 / OPTIONAL_FIELDS as f64) * 40.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = raw.round().clamp(0.0, 100.0) as u8;

        Self {
            complete: filled_required == REQUIRED_FIELDS
                && filled_optional >= MIN_OPTIONAL_FOR_COMPLETE,
            percent,
            filled_required,
            filled_optional,
        }
    }
}

impl Profile {
    #[must_use]
    pub fn completion(&self) -> ProfileCompletion {
        ProfileCompletion::of(self)
    }

    /// Resume score on the 0..=10 scale the dashboard shows.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resume_score_out_of_ten(&self) -> Option<u8> {
        self.resume_score
            .filter(|score| *score > 0.0)
            .map(|score| (score / 10.0).round().clamp(0.0, 10.0) as u8)
    }
}
