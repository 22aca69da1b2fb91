use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Debug, PartialEq)]
enum RegisterState {
    Editing,
    Submitting,
    Registered,
    Error(ViewError),
}

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut state = use_signal(|| RegisterState::Editing);

    let on_submit = use_callback(move |()| {
        if matches!(state(), RegisterState::Submitting | RegisterState::Registered) {
            return;
        }
        let auth = ctx.auth();
        let (name, mail, secret) = (username(), email(), password());
        state.set(RegisterState::Submitting);
        spawn(async move {
            match auth.register(&name, &mail, &secret).await {
                Ok(()) => {
                    state.set(RegisterState::Registered);
                    tokio::time::sleep(REDIRECT_DELAY).await;
                    let _ = navigator.replace(Route::Login {});
                }
                Err(err) => state.set(RegisterState::Error(ViewError::from(err))),
            }
        });
    });

    let current = state();
    let busy = matches!(current, RegisterState::Submitting | RegisterState::Registered);

    rsx! {
        div { class: "page auth-page",
            div { class: "auth-card",
                h2 { class: "auth-card__title", "Create your account" }
                match &current {
                    RegisterState::Registered => rsx! {
                        p { class: "auth-card__success", role: "status",
                            "Registration successful. Redirecting to sign in..."
                        }
                    },
                    RegisterState::Error(err) => rsx! {
                        p { class: "auth-card__error", role: "alert", "{err.message()}" }
                    },
                    RegisterState::Editing | RegisterState::Submitting => rsx! {},
                }
                label { class: "auth-field",
                    span { "Username" }
                    input {
                        id: "register-username",
                        r#type: "text",
                        value: "{username}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                label { class: "auth-field",
                    span { "Email" }
                    input {
                        id: "register-email",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "auth-field",
                    span { "Password" }
                    input {
                        id: "register-password",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    id: "register-submit",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_submit.call(()),
                    if current == RegisterState::Submitting { "Creating account..." } else { "Register" }
                }
                p { class: "auth-card__switch",
                    "Already registered? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
