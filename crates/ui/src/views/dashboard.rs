use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::DashboardVm;

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let dashboard = ctx.dashboard();
    let resource = use_resource(move || {
        let dashboard = dashboard.clone();
        async move {
            let overview = dashboard.overview().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(DashboardVm::from(&overview))
        }
    });
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        if let Some(Err(ViewError::Unauthorized)) = resource.value().read().as_ref() {
            let _ = navigator.replace(Route::Login {});
        }
    });

    rsx! {
        div { class: "page dashboard-page",
            h2 { "Your Progress Overview" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading Dashboard..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(vm) => rsx! {
                    div { class: "stat-grid",
                        StatCard {
                            title: "Profile",
                            value: format!("{}%", vm.profile_percent),
                            note: if vm.profile_complete { "✓ Complete" } else { "Update personal information" },
                        }
                        StatCard {
                            title: "Resume",
                            value: vm.resume_label.clone(),
                            note: "AI-powered analysis",
                        }
                        StatCard {
                            title: "Tests",
                            value: vm.tests_label.clone(),
                            note: if vm.tests_done { "✓ Complete" } else { "Skill assessments" },
                        }
                        StatCard {
                            title: "Placement",
                            value: vm.readiness_label.to_string(),
                            note: "View assessment results",
                        }
                    }
                    section { class: "overall-progress",
                        div { class: "overall-progress__header",
                            span { "Overall Progress" }
                            span { "{vm.overall_percent}%" }
                        }
                        div { class: "overall-progress__track",
                            div {
                                class: "overall-progress__bar",
                                style: "width: {vm.overall_percent}%",
                            }
                        }
                    }
                    section { class: "dashboard-next",
                        h3 { "What's Next?" }
                        if !vm.profile_complete {
                            Link { class: "next-step", to: Route::Profile {}, "Complete Profile →" }
                        }
                        if vm.resume_label == "--" {
                            Link { class: "next-step", to: Route::Resume {}, "Upload Resume →" }
                        }
                        if let Some(category) = vm.next_test {
                            Link {
                                class: "next-step",
                                to: Route::Assessment { category },
                                "Begin {category.title()} Test →"
                            }
                        } else {
                            Link { class: "next-step", to: Route::Results {}, "Ready to See Your Results? →" }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StatCard(title: &'static str, value: String, note: &'static str) -> Element {
    rsx! {
        div { class: "stat-card",
            span { class: "stat-card__title", "{title}" }
            span { class: "stat-card__value", "{value}" }
            span { class: "stat-card__note", "{note}" }
        }
    }
}
