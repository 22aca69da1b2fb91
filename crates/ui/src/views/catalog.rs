use dioxus::prelude::*;
use dioxus_router::Link;

use campusfit_core::model::{Category, TestCompletion};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CategoryStatusVm, map_category_status};

fn description(status: &CategoryStatusVm) -> &'static str {
    match status.category {
        Category::Aptitude => "Test logical reasoning and problem-solving abilities",
        Category::Technical => "Evaluate programming and technical knowledge",
        Category::Communication => "Assess communication and soft skills",
    }
}

#[component]
pub fn TestsView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboard = ctx.dashboard();
    let resource = use_resource(move || {
        let dashboard = dashboard.clone();
        async move {
            let overview = dashboard.overview().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(overview.test_completion())
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page tests-page",
            h2 { "Available Assessments" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading Tests..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(completion) => rsx! {
                    p { class: "tests-progress",
                        "Progress: {completion.count()}/{TestCompletion::TOTAL}"
                    }
                    div { class: "tests-grid",
                        for status in map_category_status(&completion) {
                            div {
                                key: "{status.category}",
                                class: if status.completed { "test-card test-card--done" } else { "test-card" },
                                h3 { "{status.title} Test" }
                                p { "{description(&status)}" }
                                p { class: "test-card__meta", "30 minutes" }
                                if status.completed {
                                    span { class: "test-card__badge", "✓ Completed" }
                                }
                                Link {
                                    class: "btn btn-primary",
                                    to: Route::Assessment { category: status.category },
                                    if status.completed { "Retake" } else { "Start Now →" }
                                }
                            }
                        }
                    }
                    if completion.all_done() {
                        Link { class: "btn btn-secondary", to: Route::Results {}, "Ready to See Your Results?" }
                    }
                },
            }
        }
    }
}
