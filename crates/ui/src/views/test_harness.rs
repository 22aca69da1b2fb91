use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use campusfit_core::model::Category;
use services::{AppServices, AssessmentService, InMemoryPlacementApi};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::assessment::AssessmentTestHandles;
use crate::views::{AssessmentView, DashboardView, ResultsView, TestsView};
use crate::vm::{AssessmentIntent, AssessmentVm};

/// Test duration used by the harness so expiry is a handful of ticks away.
pub const TEST_DURATION_SECS: u32 = 3;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Tests,
    Results,
    Assessment(Category),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    assessment_handles: Option<AssessmentTestHandles>,
    mount_switch: MountSwitch,
}

/// Lets a test take the view under test off screen, as navigating away would.
#[derive(Clone, Default)]
struct MountSwitch(Rc<RefCell<Option<Signal<bool>>>>);

#[derive(Clone, Copy)]
struct ViewMounted(Signal<bool>);

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    let mounted = use_signal(|| true);
    *props.mount_switch.0.borrow_mut() = Some(mounted);
    use_context_provider(|| ViewMounted(mounted));
    if let Some(handles) = props.assessment_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/:..segments")]
    Elsewhere { segments: Vec<String> },
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    let ViewMounted(mounted) = use_context::<ViewMounted>();
    if !mounted() {
        return rsx! { p { "Left the view" } };
    }
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Tests => rsx! { TestsView {} },
        ViewKind::Results => rsx! { ResultsView {} },
        ViewKind::Assessment(category) => rsx! { AssessmentView { category } },
    }
}

/// Where the view navigated to, e.g. after a submitted test.
#[component]
fn Elsewhere(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! { p { class: "navigated", "Navigated to /{path}" } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: InMemoryPlacementApi,
    pub services: Arc<AppServices>,
    pub assessment_handles: Option<AssessmentTestHandles>,
    mount_switch: MountSwitch,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let pending resources and spawned tasks settle.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    /// Unmount the view under test and flush the change.
    pub fn unmount(&mut self) {
        let mounted = (*self.mount_switch.0.borrow()).expect("harness rendered");
        self.dom.in_runtime(|| {
            let mut mounted = mounted;
            mounted.set(false);
        });
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    fn handles(&self) -> &AssessmentTestHandles {
        self.assessment_handles
            .as_ref()
            .expect("assessment handles for assessment views")
    }

    /// Dispatch an intent as the assessment screen would.
    pub fn dispatch(&self, intent: AssessmentIntent) {
        let dispatch = self.handles().dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
    }

    /// Sees `None` once the assessment screen has unmounted.
    pub fn with_vm<R>(&self, f: impl FnOnce(Option<&AssessmentVm>) -> R) -> R {
        let vm = self.handles().vm();
        self.dom.in_runtime(|| match vm.try_peek() {
            Ok(vm) => f(vm.as_ref()),
            Err(_) => f(None),
        })
    }

    pub fn countdown_running(&self) -> bool {
        let handles = self.handles();
        self.dom.in_runtime(|| handles.countdown_running())
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind, api: InMemoryPlacementApi) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::from_parts(Arc::new(api.clone()), &storage);
    let assessments = AssessmentService::new(Arc::new(api.clone()), services.settings())
        .with_duration(TEST_DURATION_SECS);
    let services = Arc::new(services.with_assessments(assessments));

    let assessment_handles = match view {
        ViewKind::Assessment(_) => Some(AssessmentTestHandles::default()),
        _ => None,
    };

    let mount_switch = MountSwitch::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&services),
            view,
            assessment_handles: assessment_handles.clone(),
            mount_switch: mount_switch.clone(),
        },
    );

    ViewHarness {
        dom,
        api,
        services,
        assessment_handles,
        mount_switch,
    }
}
