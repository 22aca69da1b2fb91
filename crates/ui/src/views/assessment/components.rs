use dioxus::prelude::*;

use crate::vm::{AssessmentIntent, OptionVm, PaletteItemVm};

#[component]
pub(super) fn InstructionsPanel(
    title: String,
    total_questions: usize,
    duration_secs: u32,
    on_intent: EventHandler<AssessmentIntent>,
) -> Element {
    let minutes = duration_secs / 60;
    rsx! {
        div { class: "instructions",
            h2 { class: "instructions__title", "{title}" }
            p { class: "instructions__lead", "Read the instructions carefully before starting" }
            div { class: "instructions__grid",
                div { class: "instructions__item",
                    h3 { "Test Structure" }
                    p { "{total_questions} Multiple Choice Questions (MCQs)" }
                    p { "No negative marking" }
                }
                div { class: "instructions__item",
                    h3 { "Time Allowed" }
                    p { "{minutes} minutes" }
                    p { "The test is submitted automatically when time runs out" }
                }
                div { class: "instructions__item",
                    h3 { "Navigation" }
                    p {
                        "Press "
                        kbd { "1" } "-" kbd { "4" }
                        " to select an answer"
                    }
                    p {
                        "Use "
                        kbd { "←" } " " kbd { "→" }
                        " arrow keys to navigate between questions"
                    }
                    p { "Click on question numbers to jump to any question" }
                }
            }
            button {
                class: "btn btn-primary",
                id: "assessment-start",
                r#type: "button",
                onclick: move |_| on_intent.call(AssessmentIntent::Start),
                "Start Test"
            }
        }
    }
}

#[component]
pub(super) fn TimerBadge(label: String, low_time: bool) -> Element {
    let class = if low_time {
        "assessment-timer assessment-timer--low"
    } else {
        "assessment-timer"
    };
    rsx! {
        span { class: "{class}", id: "assessment-timer", role: "timer",
            "{label}"
        }
    }
}

#[component]
pub(super) fn QuestionCard(
    label: String,
    prompt: String,
    image: Option<String>,
    options: Vec<OptionVm>,
    on_intent: EventHandler<AssessmentIntent>,
) -> Element {
    rsx! {
        article { class: "question-card",
            p { class: "question-card__label", "{label}" }
            h3 { class: "question-card__prompt", "{prompt}" }
            if let Some(src) = image {
                img { class: "question-card__image", src: "{src}", alt: "Question illustration" }
            }
            div { class: "question-card__options", role: "radiogroup",
                for option in options {
                    button {
                        key: "{option.index}",
                        class: if option.selected { "option option--selected" } else { "option" },
                        r#type: "button",
                        role: "radio",
                        aria_checked: "{option.selected}",
                        onclick: move |_| on_intent.call(AssessmentIntent::Select(option.index)),
                        span { class: "option__letter", "{option.letter}" }
                        span { class: "option__text", "{option.text}" }
                    }
                }
            }
        }
    }
}

#[component]
pub(super) fn QuestionPalette(
    items: Vec<PaletteItemVm>,
    on_intent: EventHandler<AssessmentIntent>,
) -> Element {
    rsx! {
        aside { class: "palette",
            h3 { class: "palette__title", "Questions" }
            div { class: "palette__grid",
                for item in items {
                    button {
                        key: "{item.index}",
                        class: match (item.current, item.answered) {
                            (true, _) => "palette__cell palette__cell--current",
                            (false, true) => "palette__cell palette__cell--answered",
                            (false, false) => "palette__cell",
                        },
                        r#type: "button",
                        onclick: move |_| on_intent.call(AssessmentIntent::Jump(item.index)),
                        "{item.number}"
                    }
                }
            }
            div { class: "palette__legend",
                span { class: "palette__legend-item palette__legend-item--answered", "Answered" }
                span { class: "palette__legend-item", "Unanswered" }
            }
        }
    }
}

#[component]
pub(super) fn SubmitFailedDialog(message: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "dialog-overlay",
            div {
                class: "dialog",
                role: "alertdialog",
                aria_modal: "true",
                aria_labelledby: "submit-failed-title",
                h3 { id: "submit-failed-title", "Submission failed" }
                p { class: "dialog__message", "{message}" }
                p { "Your answers could not be saved. You will be taken back to the dashboard." }
                button {
                    class: "btn btn-primary",
                    id: "submit-failed-ok",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "OK"
                }
            }
        }
    }
}
