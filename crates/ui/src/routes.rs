use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use tracing::warn;

use campusfit_core::model::Category;

use crate::context::AppContext;
use crate::views::{
    AssessmentView, DashboardView, LoginView, ProfileView, RegisterView, ResultsView,
    ResumeView, TestsView, TransitionView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/auth/login", LoginView)] Login {},
    #[route("/auth/register", RegisterView)] Register {},
    #[layout(Layout)]
        #[redirect("/", || Route::Dashboard {})]
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/tests", TestsView)] Tests {},
        #[route("/tests/:category", AssessmentView)] Assessment { category: Category },
        #[route("/tests/:category/complete", TransitionView)] Transition { category: Category },
        #[route("/results", ResultsView)] Results {},
        #[route("/resume", ResumeView)] Resume {},
}

/// Signed-in shell. Without a stored token every page here bounces to login.
#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();
    let signed_in = use_resource(move || {
        let auth = auth.clone();
        async move { auth.is_signed_in().await.unwrap_or(false) }
    });

    use_effect(move || {
        if *signed_in.read() == Some(false) {
            let _ = navigator.replace(Route::Login {});
        }
    });

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let on_logout = use_callback(move |()| {
        let auth = ctx.auth();
        spawn(async move {
            if let Err(err) = auth.logout().await {
                warn!(error = %err, "logout failed");
            }
            let _ = navigator.replace(Route::Login {});
        });
    });

    rsx! {
        nav { class: "sidebar",
            h1 { "CampusFit" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Profile {}, "Profile" } }
                li { Link { to: Route::Tests {}, "Tests" } }
                li { Link { to: Route::Results {}, "Results" } }
                li { Link { to: Route::Resume {}, "Resume" } }
            }
            button {
                class: "sidebar__logout",
                r#type: "button",
                onclick: move |_| on_logout.call(()),
                "Logout"
            }
        }
    }
}
