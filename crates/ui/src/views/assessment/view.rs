use std::time::Duration;

use dioxus::core::{Task, spawn_forever};
use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use tracing::{debug, warn};

use campusfit_core::assessment::{AssessmentPhase, KeyInput};
use campusfit_core::model::{Category, Submission};
use services::AssessmentServiceError;

use super::components::{
    InstructionsPanel, QuestionCard, QuestionPalette, SubmitFailedDialog, TimerBadge,
};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AssessmentIntent, AssessmentOutcome, AssessmentVm, open_assessment};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const TICK: Duration = Duration::from_secs(1);

fn key_input(key: &Key) -> KeyInput {
    match key {
        Key::Character(value) => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyInput::Char(ch),
                _ => KeyInput::Other,
            }
        }
        Key::ArrowLeft => KeyInput::ArrowLeft,
        Key::ArrowRight => KeyInput::ArrowRight,
        _ => KeyInput::Other,
    }
}

/// Route entry. Keyed on the category so switching tests builds a fresh
/// screen and drops the old countdown with it.
#[component]
pub fn AssessmentView(category: Category) -> Element {
    rsx! {
        AssessmentScreen { key: "{category}", category }
    }
}

#[component]
fn AssessmentScreen(category: Category) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let assessments = ctx.assessments();

    let vm = use_signal(|| None::<AssessmentVm>);
    let mut countdown = use_signal(|| None::<Task>);
    let submit_error = use_signal(|| None::<ViewError>);

    let assessments_for_resource = assessments.clone();
    let resource = use_resource(move || {
        let assessments = assessments_for_resource.clone();
        let mut vm = vm;
        async move {
            let opened = open_assessment(&assessments, category).await?;
            vm.set(Some(opened));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let submit = {
        let assessments = assessments.clone();
        use_callback(move |submission: Submission| {
            let mut countdown = countdown;
            if let Some(task) = countdown.write().take() {
                task.cancel();
                debug!(%category, "countdown cancelled for submission");
            }
            let assessments = assessments.clone();
            // Not tied to this screen: leaving mid-request must not drop the POST.
            spawn_forever(async move {
                let result = assessments.submit(&submission).await;
                if settle_submission(vm, submit_error, category, result) {
                    let _ = navigator.replace(Route::Transition { category });
                }
            });
        })
    };

    let dispatch_intent = use_callback(move |intent: AssessmentIntent| {
        let mut vm = vm;
        match intent {
            AssessmentIntent::Start => {
                let assessments = assessments.clone();
                spawn(async move {
                    let Some(mut local_vm) = vm.write().take() else {
                        return;
                    };
                    let result = local_vm.start(&assessments).await;
                    // Put the session back whatever happened so the screen stays usable.
                    vm.set(Some(local_vm));
                    if let Err(err) = result {
                        warn!(%category, error = ?err, "could not start assessment");
                    }
                });
            }
            other => {
                let outcome = vm.write().as_mut().map(|vm| vm.apply(other));
                if let Some(AssessmentOutcome::Submit(submission)) = outcome {
                    submit.call(submission);
                }
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<AssessmentTestHandles>() {
                handles.register(dispatch_intent, vm, countdown);
            }
        }
    }

    // The countdown only exists while the session is active.
    use_effect(move || {
        let active = vm
            .read()
            .as_ref()
            .is_some_and(|vm| vm.phase() == AssessmentPhase::Active);
        let running = countdown.peek().is_some();
        if active && !running {
            debug!(%category, "countdown started");
            let task = spawn(async move {
                loop {
                    tokio::time::sleep(TICK).await;
                    dispatch_intent.call(AssessmentIntent::Tick);
                }
            });
            countdown.set(Some(task));
            let _ = eval("document.getElementById(\"assessment-root\")?.focus();");
        } else if !active && running {
            if let Some(task) = countdown.write().take() {
                task.cancel();
                debug!(%category, "countdown cancelled");
            }
        }
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let input = key_input(&evt.data.key());
        if input.command().is_some() {
            evt.prevent_default();
            dispatch_intent.call(AssessmentIntent::Key(input));
        }
    });

    let vm_guard = vm.read();
    let phase = vm_guard.as_ref().map(AssessmentVm::phase);
    let failure = submit_error.read().clone();

    rsx! {
        div {
            class: "page assessment-page",
            id: "assessment-root",
            tabindex: "0",
            onkeydown: on_key,
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { class: "assessment-loading", "Loading Test Questions..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "assessment-empty",
                        h2 { "No Questions Available" }
                        p { "{err.message()}" }
                        div { class: "assessment-empty__actions",
                            button {
                                class: "btn btn-primary",
                                id: "assessment-retry",
                                r#type: "button",
                                onclick: move |_| {
                                    let mut resource = resource;
                                    resource.restart();
                                },
                                "Retry"
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| {
                                    let _ = navigator.push(Route::Dashboard {});
                                },
                                "Back to Dashboard"
                            }
                        }
                    }
                },
                ViewState::Ready(()) => match (vm_guard.as_ref(), phase) {
                    (Some(vm), Some(AssessmentPhase::Instructions)) => rsx! {
                        InstructionsPanel {
                            title: vm.title(),
                            total_questions: vm.session().total_questions(),
                            duration_secs: vm.remaining_secs(),
                            on_intent: dispatch_intent,
                        }
                    },
                    (Some(vm), Some(_)) => rsx! {
                        header { class: "assessment-header",
                            h2 { class: "assessment-header__title", "{vm.title()}" }
                            span { class: "assessment-header__progress", "{vm.progress_label()}" }
                            TimerBadge { label: vm.timer_label(), low_time: vm.low_time() }
                        }
                        if vm.low_time() && phase == Some(AssessmentPhase::Active) {
                            p { class: "assessment-warning", role: "status",
                                "Less than 5 minutes remaining"
                            }
                        }
                        div { class: "assessment-body",
                            div { class: "assessment-main",
                                QuestionCard {
                                    label: vm.question_label(),
                                    prompt: vm.prompt().to_string(),
                                    image: vm.image().map(str::to_string),
                                    options: vm.options(),
                                    on_intent: dispatch_intent,
                                }
                                nav { class: "assessment-nav",
                                    button {
                                        class: "btn btn-secondary",
                                        id: "assessment-previous",
                                        r#type: "button",
                                        disabled: vm.is_first(),
                                        onclick: move |_| dispatch_intent.call(AssessmentIntent::Previous),
                                        "Previous"
                                    }
                                    if vm.is_last() {
                                        button {
                                            class: "btn btn-primary",
                                            id: "assessment-submit",
                                            r#type: "button",
                                            disabled: phase != Some(AssessmentPhase::Active),
                                            onclick: move |_| dispatch_intent.call(AssessmentIntent::Submit),
                                            "{vm.submit_label()}"
                                        }
                                    } else {
                                        button {
                                            class: "btn btn-primary",
                                            id: "assessment-next",
                                            r#type: "button",
                                            onclick: move |_| dispatch_intent.call(AssessmentIntent::Next),
                                            "Next"
                                        }
                                    }
                                }
                            }
                            QuestionPalette { items: vm.palette(), on_intent: dispatch_intent }
                        }
                        if phase == Some(AssessmentPhase::Submitting) {
                            div { class: "assessment-submitting", role: "status", "Submitting..." }
                        }
                    },
                    _ => rsx! {
                        p { class: "assessment-loading", "Loading Test Questions..." }
                    },
                },
            }
            if let Some(err) = failure {
                SubmitFailedDialog {
                    message: err.message().to_string(),
                    on_close: move |()| {
                        let _ = navigator.replace(Route::Dashboard {});
                    },
                }
            }
        }
    }
}

/// Apply a finished submission to the screen. Returns `true` when the screen
/// is still mounted and the server accepted the answers.
fn settle_submission(
    mut vm: Signal<Option<AssessmentVm>>,
    mut submit_error: Signal<Option<ViewError>>,
    category: Category,
    result: Result<(), AssessmentServiceError>,
) -> bool {
    let Ok(mut guard) = vm.try_write() else {
        match result {
            Ok(()) => debug!(%category, "submission acknowledged after leaving the test"),
            Err(err) => {
                warn!(%category, error = %err, "assessment submission failed after leaving the test");
            }
        }
        return false;
    };
    if let Some(vm) = guard.as_mut() {
        vm.finish();
    }
    drop(guard);
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(%category, error = %err, "assessment submission failed");
            submit_error.set(Some(ViewError::from(err)));
            false
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct AssessmentTestHandles {
    dispatch: Rc<RefCell<Option<Callback<AssessmentIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<AssessmentVm>>>>>,
    countdown: Rc<RefCell<Option<Signal<Option<Task>>>>>,
}

#[cfg(test)]
impl AssessmentTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<AssessmentIntent>,
        vm: Signal<Option<AssessmentVm>>,
        countdown: Signal<Option<Task>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
        *self.countdown.borrow_mut() = Some(countdown);
    }

    pub(crate) fn dispatch(&self) -> Callback<AssessmentIntent> {
        (*self.dispatch.borrow()).expect("assessment dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<AssessmentVm>> {
        (*self.vm.borrow()).expect("assessment vm registered")
    }

    /// `false` once the screen is gone.
    pub(crate) fn countdown_running(&self) -> bool {
        (*self.countdown.borrow())
            .expect("assessment countdown registered")
            .try_peek()
            .is_ok_and(|task| task.is_some())
    }
}
