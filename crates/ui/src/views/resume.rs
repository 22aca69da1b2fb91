use std::path::Path;

use dioxus::prelude::*;
use tracing::warn;

use campusfit_core::model::{FeedbackKind, FeedbackLine, RESUME_EXTENSIONS};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{ResumeAnalysisVm, ScoreVm};

#[derive(Clone, Debug, PartialEq)]
enum UploadState {
    Idle,
    Analyzing,
    Done(ResumeAnalysisVm),
    Error(ViewError),
}

fn file_name_of(path: &str) -> String {
    Path::new(path.trim())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[component]
pub fn ResumeView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut file_path = use_signal(String::new);
    let mut job_description = use_signal(String::new);
    let mut upload = use_signal(|| UploadState::Idle);

    let on_analyze = use_callback(move |()| {
        if upload() == UploadState::Analyzing {
            return;
        }
        let resume = ctx.resume();
        let path = file_path().trim().to_string();
        let description = job_description();
        if path.is_empty() {
            upload.set(UploadState::Error(ViewError::Message(
                "Choose a resume file first.".to_string(),
            )));
            return;
        }
        upload.set(UploadState::Analyzing);
        spawn(async move {
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(path = %path, error = %err, "could not read resume file");
                    upload.set(UploadState::Error(ViewError::Message(format!(
                        "Could not read {path}."
                    ))));
                    return;
                }
            };
            let next = match resume
                .analyze(&file_name_of(&path), bytes, Some(description))
                .await
            {
                Ok(analysis) => UploadState::Done(ResumeAnalysisVm::from(&analysis)),
                Err(err) => UploadState::Error(ViewError::from(err)),
            };
            upload.set(next);
        });
    });

    let accepted = RESUME_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ");
    let current = upload();

    rsx! {
        div { class: "page resume-page",
            h2 { "Resume Analysis" }
            p { "Upload your resume for instant feedback and job-specific analysis." }
            div { class: "resume-form",
                label { class: "resume-field",
                    span { "Resume file ({accepted})" }
                    input {
                        id: "resume-path",
                        r#type: "text",
                        placeholder: "/path/to/resume.pdf",
                        value: "{file_path}",
                        oninput: move |evt| file_path.set(evt.value()),
                    }
                }
                label { class: "resume-field",
                    span { "Job description (optional)" }
                    textarea {
                        id: "resume-job",
                        rows: "5",
                        value: "{job_description}",
                        oninput: move |evt| job_description.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    id: "resume-analyze",
                    r#type: "button",
                    disabled: current == UploadState::Analyzing,
                    onclick: move |_| on_analyze.call(()),
                    if current == UploadState::Analyzing { "Analyzing..." } else { "Analyze Resume" }
                }
            }
            match current {
                UploadState::Idle | UploadState::Analyzing => rsx! {},
                UploadState::Error(err) => rsx! {
                    p { class: "resume-error", role: "alert", "{err.message()}" }
                },
                UploadState::Done(vm) => rsx! {
                    AnalysisPanel { vm }
                },
            }
        }
    }
}

#[component]
fn AnalysisPanel(vm: ResumeAnalysisVm) -> Element {
    rsx! {
        section { class: "analysis",
            div { class: "stat-grid",
                ScoreCard { title: "Overall", score: vm.overall.clone() }
                ScoreCard { title: "Quality", score: vm.quality.clone() }
                ScoreCard { title: "ATS", score: vm.ats.clone() }
            }
            p { class: "analysis__stats", "{vm.stats_label}" }
            if vm.job_aware {
                p { class: "analysis__note", "Scored against the job description you provided." }
            }
            if let Some(text) = vm.assessment.as_ref() {
                p { class: "analysis__assessment", "{text}" }
            }
            FeedbackList { title: "Content Quality", lines: vm.quality_feedback.clone() }
            FeedbackList { title: "ATS Compatibility", lines: vm.ats_feedback.clone() }
            if !vm.recommendations.is_empty() {
                div { class: "analysis__recommendations",
                    h3 { "Recommendations" }
                    ul {
                        for item in vm.recommendations.iter() {
                            li { "{item}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ScoreCard(title: &'static str, score: ScoreVm) -> Element {
    rsx! {
        div { class: "stat-card stat-card--{score.band.css_modifier()}",
            span { class: "stat-card__title", "{title}" }
            span { class: "stat-card__value", "{score.label}" }
        }
    }
}

#[component]
fn FeedbackList(title: &'static str, lines: Vec<FeedbackLine>) -> Element {
    if lines.is_empty() {
        return rsx! {};
    }
    rsx! {
        div { class: "feedback",
            h3 { "{title}" }
            ul {
                for line in lines.iter() {
                    match line.kind {
                        FeedbackKind::Heading => rsx! {
                            li { class: "feedback__heading", "{line.text}" }
                        },
                        FeedbackKind::Positive => rsx! {
                            li { class: "feedback__item feedback__item--positive", "{line.text}" }
                        },
                        FeedbackKind::Negative => rsx! {
                            li { class: "feedback__item feedback__item--negative", "{line.text}" }
                        },
                    }
                }
            }
        }
    }
}
