use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use campusfit_core::model::{Category, NextStep};

use crate::routes::Route;
use crate::vm::format_redirect;

const REDIRECT_SECS: u32 = 5;

fn next_route(category: Category) -> (Route, String) {
    match category.next_step() {
        NextStep::Test(next) => (
            Route::Assessment { category: next },
            format!("{} Test", next.title()),
        ),
        NextStep::Results => (Route::Results {}, "your results".to_string()),
    }
}

#[component]
pub fn TransitionView(category: Category) -> Element {
    let navigator = use_navigator();
    let mut remaining = use_signal(|| REDIRECT_SECS);
    let (target, target_label) = next_route(category);
    let target_for_timer = target.clone();

    use_future(move || {
        let target = target_for_timer.clone();
        async move {
            loop {
                let left = *remaining.peek();
                if left == 0 {
                    break;
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
                remaining.set(left - 1);
            }
            let _ = navigator.replace(target);
        }
    });

    rsx! {
        div { class: "page transition-page",
            div { class: "transition-card",
                h2 { "{category.title()} Test Submitted" }
                p { "Your answers have been recorded." }
                p { class: "transition-card__countdown",
                    "Moving on to {target_label} in {format_redirect(remaining())}..."
                }
                button {
                    class: "btn btn-primary",
                    id: "transition-continue",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.replace(target.clone());
                    },
                    "Continue now"
                }
            }
        }
    }
}
