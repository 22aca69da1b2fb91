use std::time::Duration;

use campusfit_core::assessment::{AssessmentPhase, KeyInput};
use campusfit_core::model::{
    AnswerLetter, Category, Prediction, Profile, Question, QuestionId, Recommendations,
    ResultsReport, ScoreInput, SubmitTrigger,
};
use services::InMemoryPlacementApi;

use super::test_harness::{TEST_DURATION_SECS, ViewHarness, ViewKind, setup_view_harness};
use crate::vm::{AssessmentIntent, AssessmentVm};

fn question(id: &str, options: &[&str], letter: &str) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("Prompt {id}"),
        None,
        options.iter().map(|o| (*o).to_string()).collect(),
        AnswerLetter::parse(letter).unwrap(),
    )
    .unwrap()
}

fn aptitude_api() -> InMemoryPlacementApi {
    InMemoryPlacementApi::new().with_questions(
        Category::Aptitude,
        vec![
            question("Q1", &["A1", "A2"], "b"),
            question("Q2", &["B1", "B2", "B3", "B4"], "c"),
        ],
    )
}

async fn started_assessment(api: InMemoryPlacementApi) -> ViewHarness {
    let mut harness = setup_view_harness(ViewKind::Assessment(Category::Aptitude), api).await;
    harness.rebuild();
    harness.settle().await;
    harness.dispatch(AssessmentIntent::Start);
    harness.settle().await;
    harness
}

fn phase(harness: &ViewHarness) -> Option<AssessmentPhase> {
    harness.with_vm(|vm| vm.map(AssessmentVm::phase))
}

fn current_selection(harness: &ViewHarness) -> Option<usize> {
    harness.with_vm(|vm| vm.and_then(|vm| vm.session().current_selection()))
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_overview() {
    let api = InMemoryPlacementApi::new().with_profile(Profile {
        cgpa: Some(7.9),
        branch: Some("CSE".into()),
        resume_score: Some(64.0),
        ..Profile::default()
    });
    let mut harness = setup_view_harness(ViewKind::Dashboard, api).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("60%"), "missing profile percent in {html}");
    assert!(html.contains("6/10"), "missing resume score in {html}");
    assert!(html.contains("0/3"), "missing test count in {html}");
    assert!(html.contains("Begin Aptitude Test"), "missing next step in {html}");
    assert!(html.contains("Overall Progress"), "missing overall progress in {html}");
    assert!(html.contains("40%"), "missing overall percent in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_error_state() {
    let api = InMemoryPlacementApi::new();
    api.set_unavailable(true);
    let mut harness = setup_view_harness(ViewKind::Dashboard, api).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tests_view_smoke_marks_completed_categories() {
    let api = InMemoryPlacementApi::new().with_results(ResultsReport {
        input: Some(ScoreInput {
            aptitude: 5,
            ..ScoreInput::default()
        }),
        ..ResultsReport::default()
    });
    let mut harness = setup_view_harness(ViewKind::Tests, api).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Progress: 1/3"), "missing progress in {html}");
    assert!(html.contains("Completed"), "missing completed marker in {html}");
    assert!(html.contains("Communication Test"), "missing category in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_prediction() {
    let api = InMemoryPlacementApi::new().with_results(ResultsReport {
        prediction: Prediction {
            placement_readiness: Some(1),
            company_fit: Some("Product-Based".into()),
            placement_confidence: Some(0.8),
            calculated_score: Some(72.0),
            error: None,
        },
        recommendations: Recommendations {
            action_items: vec!["Practice mock interviews".into()],
            ..Recommendations::default()
        },
        ..ResultsReport::default()
    });
    let mut harness = setup_view_harness(ViewKind::Results, api).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Assessment Complete!"), "missing title in {html}");
    assert!(html.contains("Product-Based"), "missing company fit in {html}");
    assert!(html.contains("Practice mock interviews"), "missing action item in {html}");
    assert!(html.contains("Good Score"), "missing badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_surfaces_server_message() {
    let mut harness = setup_view_harness(ViewKind::Results, InMemoryPlacementApi::new()).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Error Loading Results"), "missing error title in {html}");
    assert!(html.contains("No results yet"), "missing server message in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn assessment_without_questions_offers_retry() {
    let mut harness = setup_view_harness(
        ViewKind::Assessment(Category::Communication),
        InMemoryPlacementApi::new(),
    )
    .await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No Questions Available"), "missing empty state in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(html.contains("Back to Dashboard"), "missing exit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn assessment_shows_instructions_then_starts_countdown() {
    let mut harness =
        setup_view_harness(ViewKind::Assessment(Category::Aptitude), aptitude_api()).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Start Test"), "missing start button in {html}");
    assert!(html.contains("2 Multiple Choice Questions"), "missing structure in {html}");
    assert!(!harness.countdown_running());

    harness.dispatch(AssessmentIntent::Start);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing question in {html}");
    assert!(html.contains("00:03"), "missing timer in {html}");
    assert!(harness.countdown_running());
    assert!(
        harness
            .services
            .settings()
            .load()
            .await
            .unwrap()
            .seen_test_instructions()
    );
}

#[tokio::test(flavor = "current_thread")]
async fn assessment_skips_instructions_once_seen() {
    let mut harness =
        setup_view_harness(ViewKind::Assessment(Category::Aptitude), aptitude_api()).await;
    harness
        .services
        .settings()
        .mark_instructions_seen()
        .await
        .unwrap();
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(!html.contains("Start Test"), "instructions shown again in {html}");
    assert!(html.contains("Question 1 of 2"), "missing question in {html}");
    assert_eq!(phase(&harness), Some(AssessmentPhase::Active));
}

#[tokio::test(flavor = "current_thread")]
async fn out_of_range_digit_records_nothing() {
    let mut harness = started_assessment(aptitude_api()).await;

    harness.dispatch(AssessmentIntent::Key(KeyInput::Char('3')));
    harness.settle().await;
    assert_eq!(current_selection(&harness), None);

    harness.dispatch(AssessmentIntent::Key(KeyInput::Char('2')));
    harness.settle().await;
    assert_eq!(current_selection(&harness), Some(1));
    let html = harness.render();
    assert!(html.contains("1 of 2 answered"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn countdown_runs_out_and_submits_once() {
    let api = aptitude_api();
    let mut harness = started_assessment(api.clone()).await;
    assert!(harness.countdown_running());

    harness.dispatch(AssessmentIntent::Select(0));
    harness.settle().await;
    assert!(api.submissions().is_empty());

    for _ in 0..=TEST_DURATION_SECS {
        tokio::time::advance(Duration::from_secs(1)).await;
        harness.settle().await;
    }

    let submissions = api.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].trigger, SubmitTrigger::TimeExpired);
    assert_eq!(submissions[0].answers[0].selected, "A1");
    assert_eq!(submissions[0].answers[1].selected, "");
    assert!(!harness.countdown_running());

    let html = harness.render();
    assert!(
        html.contains("Navigated to /tests/aptitude/complete"),
        "missing transition in {html}"
    );

    // The countdown is gone, so more time changes nothing.
    tokio::time::advance(Duration::from_secs(5)).await;
    harness.settle().await;
    assert_eq!(api.submissions().len(), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn leaving_during_submission_still_sends_once() {
    let api = aptitude_api();
    api.set_submit_latency(Duration::from_secs(2));
    let mut harness = started_assessment(api.clone()).await;

    harness.dispatch(AssessmentIntent::Select(1));
    harness.dispatch(AssessmentIntent::Submit);
    harness.drive_async().await;
    assert_eq!(phase(&harness), Some(AssessmentPhase::Submitting));
    assert!(!harness.countdown_running());
    assert!(api.submissions().is_empty());

    harness.unmount();
    assert!(harness.render().contains("Left the view"));
    assert_eq!(phase(&harness), None);

    tokio::time::advance(Duration::from_secs(3)).await;
    harness.settle().await;

    let submissions = api.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].trigger, SubmitTrigger::Manual);
    assert_eq!(submissions[0].answers[0].selected, "A2");
    assert!(harness.render().contains("Left the view"));
}

#[tokio::test(flavor = "current_thread")]
async fn failed_submission_shows_blocking_alert() {
    let api = aptitude_api();
    let mut harness = started_assessment(api.clone()).await;

    api.set_unavailable(true);
    harness.dispatch(AssessmentIntent::Submit);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("alertdialog"), "missing dialog in {html}");
    assert!(html.contains("Submission failed"), "missing title in {html}");
    assert!(api.submissions().is_empty());
    assert!(!harness.countdown_running());
    assert_eq!(phase(&harness), Some(AssessmentPhase::Terminated));
}
