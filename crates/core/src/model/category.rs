use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Assessment category offered by the question bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Aptitude,
    Technical,
    Communication,
}

/// Where the flow goes once a category has been submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextStep {
    Test(Category),
    Results,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Aptitude,
        Category::Technical,
        Category::Communication,
    ];

    /// Lowercase form, used for routes and `POST /tests/{category}`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Category::Aptitude => "aptitude",
            Category::Technical => "technical",
            Category::Communication => "communication",
        }
    }

    /// Uppercase form expected by `GET /questions/{CATEGORY}`.
    #[must_use]
    pub fn bank_key(self) -> &'static str {
        match self {
            Category::Aptitude => "APTITUDE",
            Category::Technical => "TECHNICAL",
            Category::Communication => "COMMUNICATION",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Category::Aptitude => "Aptitude",
            Category::Technical => "Technical",
            Category::Communication => "Communication",
        }
    }

    #[must_use]
    pub fn next_step(self) -> NextStep {
        match self {
            Category::Aptitude => NextStep::Test(Category::Technical),
            Category::Technical => NextStep::Test(Category::Communication),
            Category::Communication => NextStep::Results,
        }
    }

    /// Label for the submit button, which hints at the next step.
    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self.next_step() {
            NextStep::Test(Category::Technical) => "Continue to Technical",
            NextStep::Test(Category::Communication) => "Continue to Communication",
            NextStep::Test(_) | NextStep::Results => "Submit Test",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aptitude" => Ok(Category::Aptitude),
            "technical" => Ok(Category::Technical),
            "communication" => Ok(Category::Communication),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("APTITUDE".parse::<Category>(), Ok(Category::Aptitude));
        assert_eq!(" Technical ".parse::<Category>(), Ok(Category::Technical));
        assert!("history".parse::<Category>().is_err());
    }

    #[test]
    fn sequence_ends_with_results() {
        assert_eq!(
            Category::Aptitude.next_step(),
            NextStep::Test(Category::Technical)
        );
        assert_eq!(
            Category::Technical.next_step(),
            NextStep::Test(Category::Communication)
        );
        assert_eq!(Category::Communication.next_step(), NextStep::Results);
        assert_eq!(Category::Communication.submit_label(), "Submit Test");
    }

    #[test]
    fn path_forms() {
        assert_eq!(Category::Aptitude.bank_key(), "APTITUDE");
        assert_eq!(Category::Aptitude.slug(), "aptitude");
    }
}
