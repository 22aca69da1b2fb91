use dioxus::prelude::*;

use campusfit_core::model::{BRANCHES, ProfileDraft};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
    Error(ViewError),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum NumberField {
    Backlogs,
    Certifications,
    Internship,
    Projects,
    Hackathon,
}

impl NumberField {
    const ALL: [NumberField; 5] = [
        NumberField::Backlogs,
        NumberField::Certifications,
        NumberField::Internship,
        NumberField::Projects,
        NumberField::Hackathon,
    ];

    fn label(self) -> &'static str {
        match self {
            NumberField::Backlogs => "Backlogs",
            NumberField::Certifications => "Certifications",
            NumberField::Internship => "Internships",
            NumberField::Projects => "Projects",
            NumberField::Hackathon => "Hackathons",
        }
    }

    fn get(self, draft: &ProfileDraft) -> &str {
        match self {
            NumberField::Backlogs => &draft.backlogs,
            NumberField::Certifications => &draft.certifications,
            NumberField::Internship => &draft.internship,
            NumberField::Projects => &draft.projects,
            NumberField::Hackathon => &draft.hackathon,
        }
    }

    fn set(self, draft: &mut ProfileDraft, value: String) {
        let slot = match self {
            NumberField::Backlogs => &mut draft.backlogs,
            NumberField::Certifications => &mut draft.certifications,
            NumberField::Internship => &mut draft.internship,
            NumberField::Projects => &mut draft.projects,
            NumberField::Hackathon => &mut draft.hackathon,
        };
        *slot = value;
    }
}

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let profile_service = ctx.profile();
    let profile_for_resource = profile_service.clone();
    let mut form = use_signal(ProfileDraft::default);
    let mut save_state = use_signal(|| SaveState::Idle);
    let mut loaded = use_signal(|| false);

    let resource = use_resource(move || {
        let profile = profile_for_resource.clone();
        async move { profile.load().await.map_err(ViewError::from) }
    });
    let state = view_state_from_resource(&resource);
    if let ViewState::Ready(profile) = &state
        && !loaded()
    {
        form.set(ProfileDraft::from_profile(profile));
        loaded.set(true);
    }

    let on_save = use_callback(move |()| {
        if save_state() == SaveState::Saving {
            return;
        }
        let profile_service = profile_service.clone();
        let draft = form();
        save_state.set(SaveState::Saving);
        spawn(async move {
            match profile_service.save(draft).await {
                Ok(_) => save_state.set(SaveState::Saved),
                Err(err) => save_state.set(SaveState::Error(ViewError::from(err))),
            }
        });
    });

    let draft = form();
    let status = match save_state() {
        SaveState::Idle => None,
        SaveState::Saving => Some(("profile-status", "Saving...".to_string())),
        SaveState::Saved => Some((
            "profile-status profile-status--ok",
            "Profile saved successfully!".to_string(),
        )),
        SaveState::Error(err) => Some((
            "profile-status profile-status--error",
            err.message().to_string(),
        )),
    };

    rsx! {
        div { class: "page profile-page",
            h2 { "Academic Profile" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading profile..." }
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
                ViewState::Ready(_) => rsx! {
                    if let Some((class, message)) = status {
                        p { class: "{class}", role: "status", "{message}" }
                    }
                    div { class: "profile-form",
                        label { class: "profile-field",
                            span { "CGPA" }
                            input {
                                id: "profile-cgpa",
                                r#type: "number",
                                step: "0.01",
                                min: "0",
                                max: "10",
                                value: "{draft.cgpa}",
                                oninput: move |evt| {
                                    let mut next = form();
                                    next.cgpa = evt.value();
                                    form.set(next);
                                    save_state.set(SaveState::Idle);
                                },
                            }
                        }
                        label { class: "profile-field",
                            span { "Branch" }
                            select {
                                id: "profile-branch",
                                value: "{draft.branch}",
                                onchange: move |evt| {
                                    let mut next = form();
                                    next.branch = evt.value();
                                    form.set(next);
                                    save_state.set(SaveState::Idle);
                                },
                                for branch in BRANCHES {
                                    option { key: "{branch}", value: "{branch}", "{branch}" }
                                }
                            }
                        }
                        for field in NumberField::ALL {
                            label { key: "{field.label()}", class: "profile-field",
                                span { "{field.label()}" }
                                input {
                                    r#type: "number",
                                    min: "0",
                                    value: "{field.get(&draft)}",
                                    oninput: move |evt| {
                                        let mut next = form();
                                        field.set(&mut next, evt.value());
                                        form.set(next);
                                        save_state.set(SaveState::Idle);
                                    },
                                }
                            }
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        id: "profile-save",
                        r#type: "button",
                        disabled: save_state() == SaveState::Saving,
                        onclick: move |_| on_save.call(()),
                        "Save Profile"
                    }
                },
            }
        }
    }
}
