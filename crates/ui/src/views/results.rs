use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::ResultsVm;

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboard = ctx.dashboard();
    let resource = use_resource(move || {
        let dashboard = dashboard.clone();
        async move {
            let report = dashboard.results().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(ResultsVm::from(&report))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page results-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Calculating Your Results..." }
                },
                ViewState::Error(err) => rsx! {
                    h2 { "Error Loading Results" }
                    p { "{err.message()}" }
                    div { class: "results-actions",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                        Link { class: "btn btn-primary", to: Route::Tests {}, "Take Assessment" }
                    }
                },
                ViewState::Ready(vm) => rsx! {
                    h2 { "Assessment Complete!" }
                    p { "Here's your comprehensive performance analysis" }
                    if let Some(error) = vm.prediction_error.as_ref() {
                        p { class: "results-warning", role: "status", "{error}" }
                    }
                    div { class: "stat-grid",
                        div { class: "stat-card stat-card--{vm.band.css_modifier()}",
                            span { class: "stat-card__title", "Overall Score" }
                            span { class: "stat-card__value", "{vm.score_label}" }
                            span { class: "stat-card__note", "Out of 100" }
                        }
                        div { class: if vm.ready { "stat-card stat-card--strong" } else { "stat-card stat-card--weak" },
                            span { class: "stat-card__title", "Placement Ready" }
                            span { class: "stat-card__value", "{vm.readiness_label}" }
                            if let Some(confidence) = vm.confidence_label.as_ref() {
                                span { class: "stat-card__note", "Confidence {confidence}" }
                            }
                        }
                        div { class: "stat-card",
                            span { class: "stat-card__title", "Best Company Fit" }
                            span { class: "stat-card__value", "{vm.company_fit}" }
                            span { class: "stat-card__note", "Recommended company type" }
                        }
                    }
                    section { class: "results-achievements",
                        h3 { "Your Achievements" }
                        ul {
                            for badge in vm.achievements.iter() {
                                li { key: "{badge}", class: "badge", "{badge}" }
                            }
                        }
                    }
                    if !vm.sections.is_empty() {
                        section { class: "results-recommendations",
                            h3 { "Your Personalized Recommendations" }
                            for section in vm.sections.iter() {
                                div { key: "{section.title}", class: "recommendation",
                                    h4 { "{section.title}" }
                                    ul {
                                        for item in section.items.iter() {
                                            li { "{item}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
