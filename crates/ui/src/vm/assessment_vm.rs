use campusfit_core::assessment::{
    AssessmentPhase, AssessmentProgress, AssessmentSession, KeyInput, LOW_TIME_THRESHOLD_SECS,
    TickOutcome,
};
use campusfit_core::model::{Category, OPTION_LETTERS, Submission, SubmitTrigger};
use services::AssessmentService;

use crate::views::ViewError;
use crate::vm::time_fmt::format_countdown;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssessmentIntent {
    Start,
    Select(usize),
    Next,
    Previous,
    Jump(usize),
    Key(KeyInput),
    Tick,
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssessmentOutcome {
    Continue,
    Ignored,
    /// The session moved to `Submitting`; send this exactly once.
    Submit(Submission),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteItemVm {
    pub index: usize,
    pub number: usize,
    pub answered: bool,
    pub current: bool,
}

pub struct AssessmentVm {
    session: AssessmentSession,
}

impl AssessmentVm {
    #[must_use]
    pub fn new(session: AssessmentSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &AssessmentSession {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> AssessmentPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.session.category()
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("{} Test", self.category().title())
    }

    #[must_use]
    pub fn question_label(&self) -> String {
        format!(
            "Question {} of {}",
            self.session.current_index() + 1,
            self.session.total_questions()
        )
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        self.session.current_question().prompt()
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.session.current_question().image()
    }

    #[must_use]
    pub fn options(&self) -> Vec<OptionVm> {
        let selected = self.session.current_selection();
        self.session
            .current_question()
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| OptionVm {
                index,
                letter: OPTION_LETTERS.get(index).copied().unwrap_or('-'),
                text: text.clone(),
                selected: selected == Some(index),
            })
            .collect()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.session.remaining_secs()
    }

    #[must_use]
    pub fn timer_label(&self) -> String {
        format_countdown(self.session.remaining_secs())
    }

    /// Under five minutes left.
    #[must_use]
    pub fn low_time(&self) -> bool {
        self.session.remaining_secs() < LOW_TIME_THRESHOLD_SECS
    }

    #[must_use]
    pub fn progress(&self) -> AssessmentProgress {
        self.session.progress()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.progress();
        format!("{} of {} answered", progress.answered, progress.total)
    }

    #[must_use]
    pub fn palette(&self) -> Vec<PaletteItemVm> {
        let current = self.session.current_index();
        (0..self.session.total_questions())
            .map(|index| PaletteItemVm {
                index,
                number: index + 1,
                answered: self.session.is_answered(index),
                current: index == current,
            })
            .collect()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.session.is_first()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.session.is_last()
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        self.category().submit_label()
    }

    /// Apply a synchronous intent.
    ///
    /// `Start` needs the service and goes through [`AssessmentVm::start`].
    pub fn apply(&mut self, intent: AssessmentIntent) -> AssessmentOutcome {
        let changed = match intent {
            AssessmentIntent::Start => false,
            AssessmentIntent::Select(option) => self.session.select_option(option).is_ok(),
            AssessmentIntent::Next => self.session.next(),
            AssessmentIntent::Previous => self.session.previous(),
            AssessmentIntent::Jump(index) => self.session.jump_to(index).is_ok(),
            AssessmentIntent::Key(key) => self.session.handle_key(key),
            AssessmentIntent::Tick => {
                return match self.session.tick() {
                    TickOutcome::Idle => AssessmentOutcome::Ignored,
                    TickOutcome::Running { .. } => AssessmentOutcome::Continue,
                    TickOutcome::Expired(submission) => AssessmentOutcome::Submit(submission),
                };
            }
            AssessmentIntent::Submit => {
                return self
                    .session
                    .begin_submission(SubmitTrigger::Manual)
                    .map_or(AssessmentOutcome::Ignored, AssessmentOutcome::Submit);
            }
        };
        if changed {
            AssessmentOutcome::Continue
        } else {
            AssessmentOutcome::Ignored
        }
    }

    /// Dismiss the instructions and start the clock.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the session already started.
    pub async fn start(&mut self, service: &AssessmentService) -> Result<(), ViewError> {
        service
            .start(&mut self.session)
            .await
            .map_err(|_| ViewError::Unknown)
    }

    /// Mark the in-flight submission as answered, whatever the outcome.
    pub fn finish(&mut self) {
        if self.session.finish().is_err() {
            self.session.abandon();
        }
    }

    pub fn abandon(&mut self) {
        self.session.abandon();
    }
}

/// # Errors
///
/// Returns `ViewError::NoQuestions` when the category has nothing to show.
pub async fn open_assessment(
    service: &AssessmentService,
    category: Category,
) -> Result<AssessmentVm, ViewError> {
    service
        .open(category)
        .await
        .map(AssessmentVm::new)
        .ok_or(ViewError::NoQuestions)
}
