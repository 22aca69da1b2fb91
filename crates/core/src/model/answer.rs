use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Category, Question, QuestionId};

/// One entry of the submission body: what was picked and what was correct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(rename = "questionId")]
    pub question_id: QuestionId,
    pub selected: String,
    pub correct: String,
}

/// What caused the session to submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    TimeExpired,
}

/// The single submission a session produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub category: Category,
    pub trigger: SubmitTrigger,
    pub answers: Vec<AnswerRecord>,
}

/// Body of `POST /tests/{category}`.
#[derive(Debug, Serialize)]
pub struct SubmissionBody<'a> {
    pub answers: &'a [AnswerRecord],
}

impl Submission {
    #[must_use]
    pub fn body(&self) -> SubmissionBody<'_> {
        SubmissionBody {
            answers: &self.answers,
        }
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|record| !record.selected.is_empty())
            .count()
    }
}

/// Build answer records for every question in its original order.
///
/// Unanswered questions carry an empty `selected` value. Scoring is left to
/// the server.
#[must_use]
pub fn build_answer_records(
    questions: &[Question],
    selections: &BTreeMap<usize, usize>,
) -> Vec<AnswerRecord> {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = selections
                .get(&index)
                .and_then(|option| question.option(*option))
                .unwrap_or_default()
                .to_string();
            AnswerRecord {
                question_id: question.id().clone(),
                selected,
                correct: question.correct_option().to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerLetter;

    fn question(id: &str, options: [&str; 4], letter: &str) -> Question {
        Question::new(
            QuestionId::new(id),
            "prompt",
            None,
            options.iter().map(|o| (*o).to_string()).collect(),
            AnswerLetter::parse(letter).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn unanswered_question_keeps_id_and_correct_text() {
        let questions = vec![
            question("Q1", ["A1", "A2", "A3", "A4"], "b"),
            question("Q2", ["B1", "B2", "B3", "B4"], "c"),
        ];
        let mut selections = BTreeMap::new();
        selections.insert(0, 0);

        let records = build_answer_records(&questions, &selections);

        assert_eq!(
            records,
            vec![
                AnswerRecord {
                    question_id: QuestionId::new("Q1"),
                    selected: "A1".into(),
                    correct: "A2".into(),
                },
                AnswerRecord {
                    question_id: QuestionId::new("Q2"),
                    selected: String::new(),
                    correct: "B3".into(),
                },
            ]
        );
    }

    #[test]
    fn body_uses_camel_case_question_id() {
        let submission = Submission {
            category: Category::Aptitude,
            trigger: SubmitTrigger::Manual,
            answers: vec![AnswerRecord {
                question_id: QuestionId::new("Q1"),
                selected: "A1".into(),
                correct: "A2".into(),
            }],
        };
        let json = serde_json::to_value(submission.body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "answers": [{ "questionId": "Q1", "selected": "A1", "correct": "A2" }]
            })
        );
        assert_eq!(submission.answered_count(), 1);
    }
}
