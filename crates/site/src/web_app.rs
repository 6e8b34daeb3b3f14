use std::rc::Rc;

use assistant_runtime::{use_workflow_store, AssistantConsole, AssistantProvider};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use serde_json::Value;
use ui_controller::{control_tables, ControllerConfig, Navigator, UiController, WorkflowStore};
use ui_surface_web::{TimerSettle, WebUiSurface};

use crate::screens::ScreenPlaceholder;

const HOME_PATH: &str = "/demo/dashboard";

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Content Ops Assistant" />
        <Meta name="description" content="Content operations workspace driven by an in-app assistant." />

        <Router>
            <AssistantShell />
        </Router>
    }
}

/// Router-backed navigation capability.
struct RouterNavigator {
    navigate: Rc<dyn Fn(&str)>,
}

impl RouterNavigator {
    fn from_router() -> Self {
        let navigate = use_navigate();
        Self {
            navigate: Rc::new(move |path: &str| navigate(path, NavigateOptions::default())),
        }
    }
}

impl Navigator for RouterNavigator {
    fn navigate(&self, path: &str) {
        (self.navigate)(path);
    }
}

/// Records the workflow the assistant started last.
struct SignalWorkflowStore {
    active: RwSignal<Option<String>>,
}

impl WorkflowStore for SignalWorkflowStore {
    fn start_workflow(&self, name: &str, params: &Value) {
        logging::log!("starting workflow `{name}` with {params}");
        self.active.set(Some(name.to_string()));
    }
}

#[component]
/// Navigation chrome, routed screens, and the assistant console. Must render inside a `Router`.
pub fn AssistantShell() -> impl IntoView {
    let config = ControllerConfig::default();
    let controller = UiController::with_config(
        Rc::new(WebUiSurface::from_config(&config)),
        Rc::new(RouterNavigator::from_router()),
        Rc::new(TimerSettle),
        config,
    );

    view! {
        <AssistantProvider controller=controller>
            <SiteNav />
            <ContentStore />
            <main class="site-root">
                <Routes>
                    <Route path="" view=|| view! { <Redirect path=HOME_PATH /> } />
                    <Route path="/demo/:screen" view=DemoScreenRoute />
                    <Route path="/login" view=|| view! { <ScreenPlaceholder route="login".to_string() /> } />
                </Routes>
            </main>
            <AssistantConsole />
        </AssistantProvider>
    }
}

#[component]
fn SiteNav() -> impl IntoView {
    let links = control_tables()
        .routes
        .iter()
        .map(|route| {
            view! {
                <li>
                    <A href=route.path.clone() class="site-nav-link">{route.name.clone()}</A>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="site-nav" data-ai-target="site.nav">
            <ul>{links}</ul>
        </nav>
    }
}

#[component]
fn ContentStore() -> impl IntoView {
    let active = create_rw_signal(None::<String>);
    use_workflow_store(Rc::new(SignalWorkflowStore { active }));

    view! {
        <Show when=move || active.with(Option::is_some)>
            <p class="workflow-status" role="status">
                {move || format!("Workflow running: {}", active.get().unwrap_or_default())}
            </p>
        </Show>
    }
}

#[component]
fn DemoScreenRoute() -> impl IntoView {
    let params = use_params_map();
    let route = move || {
        let screen = params
            .with(|map| map.get("screen").cloned())
            .unwrap_or_default();
        let path = format!("/demo/{screen}");
        control_tables()
            .routes
            .iter()
            .find(|route| route.path == path)
            .map(|route| route.name.clone())
    };

    // Rebuilt per screen so control points registered by the previous screen are cleaned up.
    move || match route() {
        Some(route) => view! { <ScreenPlaceholder route=route /> }.into_view(),
        None => view! {
            <section class="screen screen-unknown">
                <h1>"Unknown screen"</h1>
                <A href=HOME_PATH>"Back to dashboard"</A>
            </section>
        }
        .into_view(),
    }
}
