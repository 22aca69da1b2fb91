use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use tracing::info;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut submitting = use_signal(|| false);

    let on_submit = use_callback(move |()| {
        if submitting() {
            return;
        }
        let auth = ctx.auth();
        let name = username();
        let secret = password();
        submitting.set(true);
        spawn(async move {
            match auth.login(&name, &secret).await {
                Ok(user) => {
                    info!(user = %user, "signed in");
                    error.set(None);
                    let _ = navigator.replace(Route::Dashboard {});
                }
                Err(err) => error.set(Some(ViewError::from(err))),
            }
            submitting.set(false);
        });
    });

    rsx! {
        div { class: "page auth-page",
            div { class: "auth-card",
                h2 { class: "auth-card__title", "Welcome back" }
                p { class: "auth-card__subtitle", "Sign in to continue your placement journey." }
                if let Some(err) = error.read().as_ref() {
                    p { class: "auth-card__error", role: "alert", "{err.message()}" }
                }
                label { class: "auth-field",
                    span { "Username" }
                    input {
                        id: "login-username",
                        r#type: "text",
                        value: "{username}",
                        oninput: move |evt| username.set(evt.value()),
                    }
                }
                label { class: "auth-field",
                    span { "Password" }
                    input {
                        id: "login-password",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                        onkeydown: move |evt: KeyboardEvent| {
                            if evt.data.key() == Key::Enter {
                                on_submit.call(());
                            }
                        },
                    }
                }
                button {
                    class: "btn btn-primary",
                    id: "login-submit",
                    r#type: "button",
                    disabled: submitting(),
                    onclick: move |_| on_submit.call(()),
                    if submitting() { "Signing in..." } else { "Sign In" }
                }
                p { class: "auth-card__switch",
                    "No account yet? "
                    Link { to: Route::Register {}, "Create one" }
                }
            }
        }
    }
}
