use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::model::{Category, Question, Submission, SubmitTrigger, build_answer_records};

use super::keys::{KeyCommand, KeyInput};

/// Length of a test: 30 minutes.
pub const DEFAULT_TEST_DURATION_SECS: u32 = 1800;

/// Below this many seconds the timer is shown as a warning.
pub const LOW_TIME_THRESHOLD_SECS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssessmentPhase {
    Instructions,
    Active,
    Submitting,
    Terminated,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("no questions available")]
    NoQuestions,

    #[error("assessment is not active ({0:?})")]
    NotActive(AssessmentPhase),

    #[error("assessment has already left the instructions screen ({0:?})")]
    AlreadyStarted(AssessmentPhase),

    #[error("assessment is not submitting ({0:?})")]
    NotSubmitting(AssessmentPhase),

    #[error("option {option} does not exist for question {index}")]
    OptionOutOfRange { index: usize, option: usize },

    #[error("question {index} is out of range ({total} questions)")]
    IndexOutOfRange { index: usize, total: usize },
}

/// Result of a single one-second timer tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session is not running; nothing changed.
    Idle,
    Running { remaining_secs: u32 },
    /// Time ran out and the session moved to `Submitting`.
    Expired(Submission),
}

/// Answered-over-total, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssessmentProgress {
    pub total: usize,
    pub answered: usize,
    pub percent: u8,
}

/// One timed test over a fixed set of questions.
///
/// The phase is the single guard for every mutation: only an `Active`
/// session accepts answers, navigation and ticks, and only the move from
/// `Active` to `Submitting` yields a [`Submission`], so the timer and the
/// submit button cannot both submit.
pub struct AssessmentSession {
    category: Category,
    questions: Vec<Question>,
    selections: BTreeMap<usize, usize>,
    current: usize,
    remaining_secs: u32,
    phase: AssessmentPhase,
}

impl AssessmentSession {
    /// Create a session with the default duration, waiting on the
    /// instructions screen.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NoQuestions` if `questions` is empty.
    pub fn new(category: Category, questions: Vec<Question>) -> Result<Self, AssessmentError> {
        Self::with_duration(category, questions, DEFAULT_TEST_DURATION_SECS)
    }

    /// # Errors
    ///
    /// Returns `AssessmentError::NoQuestions` if `questions` is empty.
    pub fn with_duration(
        category: Category,
        questions: Vec<Question>,
        duration_secs: u32,
    ) -> Result<Self, AssessmentError> {
        if questions.is_empty() {
            return Err(AssessmentError::NoQuestions);
        }
        Ok(Self {
            category,
            questions,
            selections: BTreeMap::new(),
            current: 0,
            remaining_secs: duration_secs,
            phase: AssessmentPhase::Instructions,
        })
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn phase(&self) -> AssessmentPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == AssessmentPhase::Active
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn selection(&self, index: usize) -> Option<usize> {
        self.selections.get(&index).copied()
    }

    #[must_use]
    pub fn current_selection(&self) -> Option<usize> {
        self.selection(self.current)
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.selections.contains_key(&index)
    }

    #[must_use]
    pub fn progress(&self) -> AssessmentProgress {
        let total = self.questions.len();
        let answered = self.selections.len();
        let percent = if total == 0 {
            0
        } else {
            u8::try_from((answered * 100 + total / 2) / total).unwrap_or(100)
        };
        AssessmentProgress {
            total,
            answered,
            percent,
        }
    }

    /// Leave the instructions screen and start the clock.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::AlreadyStarted` outside `Instructions`.
    pub fn start(&mut self) -> Result<(), AssessmentError> {
        if self.phase != AssessmentPhase::Instructions {
            return Err(AssessmentError::AlreadyStarted(self.phase));
        }
        self.phase = AssessmentPhase::Active;
        Ok(())
    }

    /// Record `option` for the current question, replacing any earlier pick.
    /// Never moves to another question.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NotActive` outside `Active` and
    /// `AssessmentError::OptionOutOfRange` if the question has no such
    /// option. Neither changes any state.
    pub fn select_option(&mut self, option: usize) -> Result<(), AssessmentError> {
        self.ensure_active()?;
        if self.current_question().option(option).is_none() {
            return Err(AssessmentError::OptionOutOfRange {
                index: self.current,
                option,
            });
        }
        self.selections.insert(self.current, option);
        Ok(())
    }

    /// Move forward one question. Returns `false` at the last question or
    /// when not active.
    pub fn next(&mut self) -> bool {
        if !self.is_active() || self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move back one question. Returns `false` at the first question or
    /// when not active.
    pub fn previous(&mut self) -> bool {
        if !self.is_active() || self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// # Errors
    ///
    /// Returns `AssessmentError::NotActive` outside `Active` and
    /// `AssessmentError::IndexOutOfRange` for an invalid target.
    pub fn jump_to(&mut self, index: usize) -> Result<(), AssessmentError> {
        self.ensure_active()?;
        if index >= self.questions.len() {
            return Err(AssessmentError::IndexOutOfRange {
                index,
                total: self.questions.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Apply a key press. Returns `true` if it changed anything.
    pub fn handle_key(&mut self, key: KeyInput) -> bool {
        if !self.is_active() {
            return false;
        }
        match key.command() {
            Some(KeyCommand::Select(option)) => self.select_option(option).is_ok(),
            Some(KeyCommand::Previous) => self.previous(),
            Some(KeyCommand::Next) => self.next(),
            None => false,
        }
    }

    /// Advance the clock by one second.
    ///
    /// Reaching zero submits with whatever is recorded at that moment.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Running {
                remaining_secs: self.remaining_secs,
            };
        }
        match self.begin_submission(SubmitTrigger::TimeExpired) {
            Ok(submission) => TickOutcome::Expired(submission),
            Err(_) => TickOutcome::Idle,
        }
    }

    /// Move to `Submitting` and build the payload.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NotActive` if a submission already started
    /// or the session never started.
    pub fn begin_submission(
        &mut self,
        trigger: SubmitTrigger,
    ) -> Result<Submission, AssessmentError> {
        self.ensure_active()?;
        self.phase = AssessmentPhase::Submitting;
        Ok(Submission {
            category: self.category,
            trigger,
            answers: build_answer_records(&self.questions, &self.selections),
        })
    }

    /// The API answered (either way); the session is done.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NotSubmitting` outside `Submitting`.
    pub fn finish(&mut self) -> Result<(), AssessmentError> {
        if self.phase != AssessmentPhase::Submitting {
            return Err(AssessmentError::NotSubmitting(self.phase));
        }
        self.phase = AssessmentPhase::Terminated;
        Ok(())
    }

    /// Discard the session, e.g. when navigating away.
    pub fn abandon(&mut self) {
        self.phase = AssessmentPhase::Terminated;
    }

    fn ensure_active(&self) -> Result<(), AssessmentError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(AssessmentError::NotActive(self.phase))
        }
    }
}

impl fmt::Debug for AssessmentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentSession")
            .field("category", &self.category)
            .field("questions_len", &self.questions.len())
            .field("answered", &self.selections.len())
            .field("current", &self.current)
            .field("remaining_secs", &self.remaining_secs)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerLetter, AnswerRecord, QuestionId};

    fn question(id: &str, options: &[&str], letter: &str) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("prompt {id}"),
            None,
            options.iter().map(|o| (*o).to_string()).collect(),
            AnswerLetter::parse(letter).unwrap(),
        )
        .unwrap()
    }

    fn five_questions() -> Vec<Question> {
        (1..=5)
            .map(|i| question(&format!("Q{i}"), &["w", "x", "y", "z"], "a"))
            .collect()
    }

    fn active(questions: Vec<Question>, duration: u32) -> AssessmentSession {
        let mut session =
            AssessmentSession::with_duration(Category::Aptitude, questions, duration).unwrap();
        session.start().unwrap();
        session
    }

    #[test]
    fn empty_question_set_has_no_session() {
        let err = AssessmentSession::new(Category::Technical, Vec::new()).unwrap_err();
        assert_eq!(err, AssessmentError::NoQuestions);
    }

    #[test]
    fn starts_on_instructions_and_ignores_input_until_started() {
        let mut session = AssessmentSession::new(Category::Aptitude, five_questions()).unwrap();
        assert_eq!(session.phase(), AssessmentPhase::Instructions);
        assert_eq!(session.remaining_secs(), DEFAULT_TEST_DURATION_SECS);

        assert_eq!(session.tick(), TickOutcome::Idle);
        assert!(!session.next());
        assert!(session.select_option(0).is_err());
        assert_eq!(session.remaining_secs(), DEFAULT_TEST_DURATION_SECS);

        session.start().unwrap();
        assert!(session.is_active());
        assert!(matches!(
            session.start(),
            Err(AssessmentError::AlreadyStarted(AssessmentPhase::Active))
        ));
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut session = active(five_questions(), 60);
        assert!(!session.previous());
        assert_eq!(session.current_index(), 0);

        for _ in 0..10 {
            session.next();
        }
        assert_eq!(session.current_index(), 4);
        assert!(session.is_last());

        for _ in 0..10 {
            session.previous();
        }
        assert_eq!(session.current_index(), 0);

        session.jump_to(3).unwrap();
        assert_eq!(session.current_index(), 3);
        assert_eq!(
            session.jump_to(5),
            Err(AssessmentError::IndexOutOfRange { index: 5, total: 5 })
        );
        assert_eq!(session.current_index(), 3);
    }

    #[test]
    fn selection_survives_navigation_and_overwrites() {
        let mut session = active(five_questions(), 60);
        session.jump_to(2).unwrap();
        session.select_option(1).unwrap();
        assert_eq!(session.current_index(), 2);

        session.next();
        session.previous();
        assert_eq!(session.current_selection(), Some(1));

        session.select_option(3).unwrap();
        assert_eq!(session.selection(2), Some(3));
        assert_eq!(session.progress().answered, 1);
    }

    #[test]
    fn progress_reports_answered_share() {
        let mut session = active(five_questions(), 60);
        for index in 0..3 {
            session.jump_to(index).unwrap();
            session.select_option(0).unwrap();
        }
        let progress = session.progress();
        assert_eq!(progress.answered, 3);
        assert_eq!(progress.total, 5);
        assert_eq!(progress.percent, 60);
    }

    #[test]
    fn digit_key_for_missing_option_is_noop() {
        let questions = vec![question("Q1", &["yes", "no"], "a")];
        let mut session = active(questions, 60);

        assert!(!session.handle_key(KeyInput::Char('3')));
        assert_eq!(session.current_selection(), None);

        assert!(session.handle_key(KeyInput::Char('2')));
        assert_eq!(session.current_selection(), Some(1));
    }

    #[test]
    fn arrow_keys_navigate() {
        let mut session = active(five_questions(), 60);
        assert!(session.handle_key(KeyInput::ArrowRight));
        assert!(session.handle_key(KeyInput::ArrowRight));
        assert!(session.handle_key(KeyInput::ArrowLeft));
        assert_eq!(session.current_index(), 1);
        assert!(!session.handle_key(KeyInput::Char('r')));
    }

    #[test]
    fn last_tick_submits_exactly_once() {
        let mut session = active(five_questions(), 2);
        assert_eq!(
            session.tick(),
            TickOutcome::Running { remaining_secs: 1 }
        );

        let TickOutcome::Expired(submission) = session.tick() else {
            panic!("expected expiry");
        };
        assert_eq!(submission.trigger, SubmitTrigger::TimeExpired);
        assert_eq!(session.remaining_secs(), 0);
        assert_eq!(session.phase(), AssessmentPhase::Submitting);

        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.remaining_secs(), 0);
        assert!(matches!(
            session.begin_submission(SubmitTrigger::Manual),
            Err(AssessmentError::NotActive(AssessmentPhase::Submitting))
        ));
    }

    #[test]
    fn manual_submit_blocks_timer_expiry() {
        let mut session = active(five_questions(), 1);
        let submission = session.begin_submission(SubmitTrigger::Manual).unwrap();
        assert_eq!(submission.answers.len(), 5);

        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.remaining_secs(), 1);

        session.finish().unwrap();
        assert_eq!(session.phase(), AssessmentPhase::Terminated);
        assert!(session.finish().is_err());
    }

    #[test]
    fn expiry_scenario_builds_expected_payload() {
        let questions = vec![
            question("Q1", &["A1", "A2", "A3", "A4"], "b"),
            question("Q2", &["B1", "B2", "B3", "B4"], "c"),
        ];
        let mut session = active(questions, 1);
        session.select_option(0).unwrap();

        let TickOutcome::Expired(submission) = session.tick() else {
            panic!("expected expiry");
        };
        assert_eq!(submission.category, Category::Aptitude);
        assert_eq!(
            submission.answers,
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
    fn abandon_stops_everything() {
        let mut session = active(five_questions(), 10);
        session.abandon();
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert!(session.begin_submission(SubmitTrigger::Manual).is_err());
        assert!(!session.handle_key(KeyInput::ArrowRight));
    }
}
