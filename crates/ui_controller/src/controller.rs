//! Action execution against the state registry, the UI surface, and the router.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, VecDeque},
    rc::Rc,
};

use assistant_contract::{ActionOutcome, ControllerSnapshot, StateRefToken, UiAction};
use leptos::logging;
use serde_json::{json, Map, Value};

use crate::{
    catalog::{control_tables, ControlTables},
    config::ControllerConfig,
    detect::{capitalize, detect_actions},
    error::ControlError,
    registry::{
        ExportHandler, StateRef, StateRegistry, WorkflowStore, CONTENT_STORE_REF,
        EXPORT_HANDLERS_REF,
    },
    surface::{
        ElementQuery, ImmediateSettle, Navigator, NoopNavigator, NoopUiSurface, Settle,
        SurfaceElement, UiSurface,
    },
};

/// Route the `workflow` action lands on after starting a workflow.
const WORKFLOW_ROUTE: &str = "create";

/// One executed action and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedAction {
    /// Action as submitted.
    pub action: UiAction,
    /// Outcome reported to the caller.
    pub outcome: ActionOutcome,
}

#[derive(Debug, Default)]
struct ControllerState {
    current_page: Option<String>,
    active_modals: BTreeSet<String>,
    history: VecDeque<ExecutedAction>,
    executed: usize,
}

/// Handle returned by registration entry points.
///
/// Dropping the handle does not unregister; call [`StateRefHandle::unregister`] on teardown.
#[derive(Clone)]
pub struct StateRefHandle {
    name: String,
    token: StateRefToken,
    registry: StateRegistry,
}

impl StateRefHandle {
    /// Registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registration token.
    pub fn token(&self) -> StateRefToken {
        self.token
    }

    /// Removes the binding unless a later registration already replaced it.
    pub fn unregister(&self) -> bool {
        self.registry.unregister_token(&self.name, self.token)
    }
}

impl std::fmt::Debug for StateRefHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateRefHandle")
            .field("name", &self.name)
            .field("token", &self.token)
            .finish()
    }
}

/// Translates [`UiAction`] values into registry calls, surface mutations, and navigation.
///
/// Cloning is cheap; clones share the registry, the active-modal set, and the history.
#[derive(Clone)]
pub struct UiController {
    config: Rc<ControllerConfig>,
    tables: &'static ControlTables,
    registry: StateRegistry,
    surface: Rc<dyn UiSurface>,
    navigator: Rc<dyn Navigator>,
    settle: Rc<dyn Settle>,
    state: Rc<RefCell<ControllerState>>,
}

impl UiController {
    /// Creates a controller with the default configuration.
    pub fn new(
        surface: Rc<dyn UiSurface>,
        navigator: Rc<dyn Navigator>,
        settle: Rc<dyn Settle>,
    ) -> Self {
        Self::with_config(surface, navigator, settle, ControllerConfig::default())
    }

    /// Creates a controller with an explicit configuration.
    pub fn with_config(
        surface: Rc<dyn UiSurface>,
        navigator: Rc<dyn Navigator>,
        settle: Rc<dyn Settle>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            config: Rc::new(config),
            tables: control_tables(),
            registry: StateRegistry::default(),
            surface,
            navigator,
            settle,
            state: Rc::new(RefCell::new(ControllerState::default())),
        }
    }

    /// Controller with no surface, no router, and no delays.
    pub fn headless() -> Self {
        Self::with_config(
            Rc::new(NoopUiSurface),
            Rc::new(NoopNavigator),
            Rc::new(ImmediateSettle),
            ControllerConfig::immediate(),
        )
    }

    /// Active configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Static control-point tables.
    pub fn tables(&self) -> &'static ControlTables {
        self.tables
    }

    /// Shared state-ref registry.
    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    /// Registers a setter under `name`. Last registration wins.
    pub fn register_state_ref(
        &self,
        name: impl Into<String>,
        setter: impl Fn(Value) + 'static,
    ) -> StateRefHandle {
        self.bind(name.into(), StateRef::Setter(Rc::new(setter)))
    }

    /// Registers the content-workflow capability under `contentStore`.
    pub fn register_workflow_store(&self, store: Rc<dyn WorkflowStore>) -> StateRefHandle {
        self.bind(
            CONTENT_STORE_REF.to_string(),
            StateRef::WorkflowStore(store),
        )
    }

    /// Registers export handlers keyed by data type under `exportHandlers`.
    pub fn register_export_handlers(
        &self,
        handlers: BTreeMap<String, ExportHandler>,
    ) -> StateRefHandle {
        self.bind(
            EXPORT_HANDLERS_REF.to_string(),
            StateRef::ExportHandlers(Rc::new(handlers)),
        )
    }

    fn bind(&self, name: String, state_ref: StateRef) -> StateRefHandle {
        let token = self.registry.register(name.clone(), state_ref);
        StateRefHandle {
            name,
            token,
            registry: self.registry.clone(),
        }
    }

    /// Removes any binding for `name`.
    pub fn unregister(&self, name: &str) -> bool {
        self.registry.unregister(name)
    }

    /// Removes the binding for `name` only if `token` still owns it.
    pub fn unregister_token(&self, name: &str, token: StateRefToken) -> bool {
        self.registry.unregister_token(name, token)
    }

    /// Executes one action. Resolution misses come back as failed outcomes.
    pub async fn execute(&self, action: UiAction) -> ActionOutcome {
        let result = match &action {
            UiAction::Navigate { target, params } => self.navigate(target, params.as_ref()).await,
            UiAction::Click { target } => self.click(target).await,
            UiAction::Modal { target, show } => self.modal(target, *show),
            UiAction::Form { target, data } => self.fill_form(target, data),
            UiAction::Workflow { target, params } => {
                self.start_workflow(target, params.as_ref()).await
            }
            UiAction::State { target, value } => self.set_state(target, value),
            UiAction::Scroll { target } => self.scroll(target),
            UiAction::Export { target, format } => self.export(target, format.as_deref()),
            UiAction::Toggle { target, show } => self.toggle(target, *show),
        };

        let kind = action.kind().as_str();
        let outcome = match result {
            Ok(outcome) => {
                logging::log!("assistant {kind} `{}`: {}", action.target(), outcome.message);
                outcome
            }
            Err(err) => {
                logging::warn!("assistant {kind} `{}` failed: {err}", action.target());
                ActionOutcome::failure(err.to_string())
            }
        };

        let limit = self.config.history_limit;
        let mut state = self.state.borrow_mut();
        state.executed += 1;
        if limit > 0 {
            while state.history.len() >= limit {
                state.history.pop_front();
            }
            state.history.push_back(ExecutedAction {
                action,
                outcome: outcome.clone(),
            });
        }
        drop(state);
        outcome
    }

    /// Executes `actions` strictly in order, awaiting the step delay between consecutive actions.
    ///
    /// A failed step does not stop the sequence and earlier mutations are never rolled back.
    pub async fn execute_sequence(&self, actions: Vec<UiAction>) -> Vec<ActionOutcome> {
        let total = actions.len();
        let mut outcomes = Vec::with_capacity(total);
        for (index, action) in actions.into_iter().enumerate() {
            outcomes.push(self.execute(action).await);
            if index + 1 < total {
                self.settle.settle(self.config.sequence_step_delay()).await;
            }
        }
        outcomes
    }

    /// Scans free text for action phrases without touching the registry.
    pub fn detect_action(&self, text: &str) -> Vec<UiAction> {
        detect_actions(text, self.tables)
    }

    /// Read-only snapshot of controller state.
    pub fn get_current_state(&self) -> ControllerSnapshot {
        let state = self.state.borrow();
        ControllerSnapshot {
            current_page: state.current_page.clone(),
            active_modals: state.active_modals.iter().cloned().collect(),
            registered_refs: self.registry.names(),
            executed_actions: state.executed,
        }
    }

    /// Most recent executed actions in order, at most `history_limit` of them.
    pub fn history(&self) -> Vec<ExecutedAction> {
        self.state.borrow().history.iter().cloned().collect()
    }

    /// Forgets executed actions and resets the executed count.
    pub fn clear_history(&self) {
        let mut state = self.state.borrow_mut();
        state.history.clear();
        state.executed = 0;
    }

    async fn navigate(
        &self,
        target: &str,
        params: Option<&Value>,
    ) -> Result<ActionOutcome, ControlError> {
        let path = self
            .tables
            .route(target)
            .ok_or_else(|| ControlError::UnknownRoute(target.to_string()))?;
        let path = path_with_query(path, params);

        self.navigator.navigate(&path);
        self.state.borrow_mut().current_page = Some(target.to_string());
        self.settle.settle(self.config.navigation_settle()).await;

        Ok(ActionOutcome::success(format!("Navigated to {path}"))
            .with_data(json!({ "page": target, "path": path })))
    }

    async fn click(&self, target: &str) -> Result<ActionOutcome, ControlError> {
        if self.click_query(ElementQuery::Marker(target.to_string())) {
            return Ok(ActionOutcome::success(format!("Clicked {target}")));
        }

        if let Some(button) = self.tables.button(target) {
            if let Some(workflow) = button.workflow.as_deref() {
                return self.start_workflow(workflow, None).await;
            }
            if let Some(route) = button.navigate.as_deref() {
                return self.navigate(route, None).await;
            }
            if let Some(modal) = button.modal.as_deref() {
                return self.modal(modal, true);
            }
            if let Some(function) = button.function.as_deref() {
                if let Some(setter) = self.registry.setter(function) {
                    setter(Value::Null);
                    return Ok(ActionOutcome::success(format!("Invoked {function}")));
                }
            }
        }

        if self.click_query(ElementQuery::Selector(target.to_string())) {
            return Ok(ActionOutcome::success(format!("Clicked {target}")));
        }

        Err(ControlError::NoButtonMatch(target.to_string()))
    }

    fn click_query(&self, query: ElementQuery) -> bool {
        self.surface
            .find(&query)
            .is_some_and(|element| self.surface.click(&element))
    }

    fn modal(&self, target: &str, show: bool) -> Result<ActionOutcome, ControlError> {
        let current_page = self.state.borrow().current_page.clone();
        let entry = self
            .tables
            .modal(target, current_page.as_deref())
            .ok_or_else(|| ControlError::UnknownModal(target.to_string()))?;
        let setter = self
            .registry
            .setter(&entry.setter)
            .ok_or_else(|| ControlError::MissingStateRef(entry.setter.clone()))?;

        setter(if show {
            entry.open_value.clone()
        } else {
            Value::Null
        });

        let active_modals: Vec<String> = {
            let mut state = self.state.borrow_mut();
            if show {
                state.active_modals.insert(target.to_string());
            } else {
                state.active_modals.remove(target);
            }
            state.active_modals.iter().cloned().collect()
        };

        let verb = if show { "Opened" } else { "Closed" };
        Ok(ActionOutcome::success(format!("{verb} {target}"))
            .with_data(json!({ "activeModals": active_modals })))
    }

    fn fill_form(
        &self,
        form_name: &str,
        data: &Map<String, Value>,
    ) -> Result<ActionOutcome, ControlError> {
        let form = self
            .tables
            .form(form_name)
            .ok_or_else(|| ControlError::UnknownForm(form_name.to_string()))?;

        let mut filled = Vec::new();
        for field in &form.fields {
            let Some(value) = data.get(&field.field) else {
                continue;
            };
            if let Some(setter) = self.registry.setter(&setter_name(&field.field)) {
                setter(value.clone());
                filled.push(field.field.clone());
                continue;
            }
            let written = self
                .surface
                .find(&ElementQuery::Selector(field.selector.clone()))
                .is_some_and(|element| self.surface.set_input_value(&element, &input_text(value)));
            if written {
                filled.push(field.field.clone());
            }
        }

        Ok(
            ActionOutcome::success(format!("Filled {} field(s) in {form_name}", filled.len()))
                .with_data(json!({ "filled": filled })),
        )
    }

    async fn start_workflow(
        &self,
        name: &str,
        params: Option<&Value>,
    ) -> Result<ActionOutcome, ControlError> {
        let store = self
            .registry
            .workflow_store()
            .ok_or(ControlError::MissingCapability(CONTENT_STORE_REF))?;
        let params = params.cloned().unwrap_or(Value::Null);

        store.start_workflow(name, &params);
        let navigation = self.navigate(WORKFLOW_ROUTE, Some(&params)).await?;

        Ok(ActionOutcome::success(format!("Started {name} workflow"))
            .with_data(json!({ "workflow": name, "navigation": navigation.data })))
    }

    fn set_state(&self, key: &str, value: &Value) -> Result<ActionOutcome, ControlError> {
        let setter = self
            .registry
            .setter(key)
            .ok_or_else(|| ControlError::MissingStateRef(key.to_string()))?;
        setter(value.clone());
        Ok(ActionOutcome::success(format!("Updated {key}")))
    }

    fn scroll(&self, target: &str) -> Result<ActionOutcome, ControlError> {
        let element = self
            .locate(target)
            .ok_or_else(|| ControlError::ElementNotFound(target.to_string()))?;
        if !self.surface.scroll_into_view(&element) {
            return Err(ControlError::ElementNotFound(target.to_string()));
        }
        Ok(ActionOutcome::success(format!("Scrolled to {target}")))
    }

    fn export(&self, data_type: &str, format: Option<&str>) -> Result<ActionOutcome, ControlError> {
        if let Some(handler) = self.registry.export_handler(data_type) {
            handler(format);
            return Ok(export_outcome(data_type, format));
        }
        if self.click_query(ElementQuery::ExportMarker(data_type.to_string())) {
            return Ok(export_outcome(data_type, format));
        }
        Err(ControlError::NoExportTarget(data_type.to_string()))
    }

    fn toggle(&self, target: &str, show: Option<bool>) -> Result<ActionOutcome, ControlError> {
        let element = self
            .locate(target)
            .ok_or_else(|| ControlError::ElementNotFound(target.to_string()))?;
        let visible = show.unwrap_or(!element.visible);
        if !self.surface.set_visible(&element, visible) {
            return Err(ControlError::ElementNotFound(target.to_string()));
        }
        let verb = if visible { "Showed" } else { "Hid" };
        Ok(ActionOutcome::success(format!("{verb} {target}")).with_data(json!({ "visible": visible })))
    }

    fn locate(&self, target: &str) -> Option<SurfaceElement> {
        self.surface
            .find(&ElementQuery::Marker(target.to_string()))
            .or_else(|| self.surface.find(&ElementQuery::Selector(target.to_string())))
    }
}

fn export_outcome(data_type: &str, format: Option<&str>) -> ActionOutcome {
    let label = format.unwrap_or("default format");
    ActionOutcome::success(format!("Exported {data_type} as {label}"))
        .with_data(json!({ "dataType": data_type, "format": format }))
}

/// Setter name a form field is bound to: `topic` becomes `setTopic`.
pub fn setter_name(field: &str) -> String {
    format!("set{}", capitalize(field))
}

fn input_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Appends scalar entries of a params object to `path` as a URL-encoded query string.
///
/// Non-object params and non-scalar entries are ignored.
pub fn path_with_query(path: &str, params: Option<&Value>) -> String {
    let Some(Value::Object(params)) = params else {
        return path.to_string();
    };
    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                _ => return None,
            };
            Some(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&text)
            ))
        })
        .collect();
    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, time::Duration};

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::surface::{MemoryNavigator, MemorySettle, MemoryUiSurface};

    struct Fixture {
        controller: UiController,
        surface: MemoryUiSurface,
        navigator: MemoryNavigator,
        settle: MemorySettle,
    }

    fn fixture() -> Fixture {
        let surface = MemoryUiSurface::default();
        let navigator = MemoryNavigator::default();
        let settle = MemorySettle::default();
        let controller = UiController::new(
            Rc::new(surface.clone()),
            Rc::new(navigator.clone()),
            Rc::new(settle.clone()),
        );
        Fixture {
            controller,
            surface,
            navigator,
            settle,
        }
    }

    fn recorder(controller: &UiController, name: &str) -> (StateRefHandle, Rc<RefCell<Vec<Value>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let handle = controller.register_state_ref(name, move |value| sink.borrow_mut().push(value));
        (handle, calls)
    }

    struct RecordingStore {
        started: RefCell<Vec<(String, Value)>>,
    }

    impl WorkflowStore for RecordingStore {
        fn start_workflow(&self, name: &str, params: &Value) {
            self.started
                .borrow_mut()
                .push((name.to_string(), params.clone()));
        }
    }

    #[test]
    fn sequence_results_match_input_length_and_order() {
        let fx = fixture();
        let (_handle, _calls) = recorder(&fx.controller, "setShowFixModal");
        let actions = vec![
            UiAction::navigate("diagnostics"),
            UiAction::navigate("unknown-xyz"),
            UiAction::open_modal("fixModal"),
        ];

        let outcomes = block_on(fx.controller.execute_sequence(actions.clone()));

        assert_eq!(outcomes.len(), 3);
        assert_eq!(
            outcomes.iter().map(|o| o.success).collect::<Vec<_>>(),
            vec![true, false, true]
        );
        let history: Vec<UiAction> = fx
            .controller
            .history()
            .into_iter()
            .map(|entry| entry.action)
            .collect();
        assert_eq!(history, actions);
        assert_eq!(
            fx.settle.delays(),
            vec![
                Duration::from_millis(300),
                Duration::from_millis(200),
                Duration::from_millis(200)
            ]
        );
    }

    #[test]
    fn state_action_invokes_latest_registration_with_exact_value() {
        let fx = fixture();
        let (_first, first_calls) = recorder(&fx.controller, "setTab");
        let (_second, second_calls) = recorder(&fx.controller, "setTab");

        let outcome = block_on(
            fx.controller
                .execute(UiAction::set_state("setTab", json!({ "tab": "seo" }))),
        );

        assert!(outcome.success);
        assert!(first_calls.borrow().is_empty());
        assert_eq!(*second_calls.borrow(), vec![json!({ "tab": "seo" })]);
    }

    #[test]
    fn state_action_fails_cleanly_when_unregistered() {
        let fx = fixture();
        let outcome = block_on(fx.controller.execute(UiAction::set_state("setTab", json!(1))));
        assert!(!outcome.success);
        assert_eq!(outcome.message, "no state ref registered for `setTab`");
    }

    #[test]
    fn navigate_resolves_known_route_and_rejects_unknown() {
        let fx = fixture();

        let ok = block_on(fx.controller.execute(UiAction::navigate("dashboard")));
        assert!(ok.success);
        assert_eq!(fx.navigator.history(), vec!["/demo/dashboard".to_string()]);
        assert_eq!(
            fx.controller.get_current_state().current_page.as_deref(),
            Some("dashboard")
        );

        let missing = block_on(fx.controller.execute(UiAction::navigate("unknown-xyz")));
        assert!(!missing.success);
        assert_eq!(fx.navigator.history().len(), 1);
        assert_eq!(
            fx.controller.get_current_state().current_page.as_deref(),
            Some("dashboard")
        );
    }

    #[test]
    fn navigate_appends_encoded_query() {
        let fx = fixture();
        block_on(fx.controller.execute(UiAction::navigate_with(
            "create",
            json!({ "topic": "AI automation", "type": "blog" }),
        )));
        assert_eq!(
            fx.navigator.history(),
            vec!["/demo/create?topic=AI%20automation&type=blog".to_string()]
        );
    }

    #[test]
    fn fix_modal_on_diagnostics_opens_and_is_reported() {
        let fx = fixture();
        let (_handle, calls) = recorder(&fx.controller, "setShowFixModal");

        block_on(fx.controller.execute(UiAction::navigate("diagnostics")));
        let outcome = block_on(fx.controller.execute(UiAction::open_modal("fixModal")));

        assert!(outcome.success);
        assert_eq!(*calls.borrow(), vec![json!(true)]);
        assert_eq!(outcome.data, Some(json!({ "activeModals": ["fixModal"] })));
        assert_eq!(
            fx.controller.get_current_state().active_modals,
            vec!["fixModal".to_string()]
        );

        let closed = block_on(fx.controller.execute(UiAction::close_modal("fixModal")));
        assert!(closed.success);
        assert_eq!(*calls.borrow(), vec![json!(true), Value::Null]);
        assert!(fx.controller.get_current_state().active_modals.is_empty());
    }

    #[test]
    fn modal_fails_without_config_or_setter() {
        let fx = fixture();
        let unknown = block_on(fx.controller.execute(UiAction::open_modal("nopeModal")));
        assert!(!unknown.success);

        let unbound = block_on(fx.controller.execute(UiAction::open_modal("fixModal")));
        assert!(!unbound.success);
        assert!(fx.controller.get_current_state().active_modals.is_empty());
    }

    #[test]
    fn click_prefers_marker_then_button_config_then_selector() {
        let fx = fixture();
        fx.surface
            .insert(ElementQuery::Marker("diagnostics.fix".to_string()), true);
        let (_handle, calls) = recorder(&fx.controller, "setShowFixModal");
        let (_export, export_calls) = recorder(&fx.controller, "setShowExportMenu");

        let marker = block_on(fx.controller.execute(UiAction::click("diagnostics.fix")));
        assert!(marker.success);
        assert!(calls.borrow().is_empty());
        assert_eq!(
            fx.surface
                .element(&ElementQuery::Marker("diagnostics.fix".to_string()))
                .map(|element| element.clicks),
            Some(1)
        );

        let configured = block_on(fx.controller.execute(UiAction::click("diagnostics.export")));
        assert!(configured.success);
        assert_eq!(*export_calls.borrow(), vec![json!(true)]);
        assert!(fx
            .controller
            .get_current_state()
            .active_modals
            .contains(&"exportMenu".to_string()));

        fx.surface
            .insert(ElementQuery::Selector("#save".to_string()), true);
        let selector = block_on(fx.controller.execute(UiAction::click("#save")));
        assert!(selector.success);

        let miss = block_on(fx.controller.execute(UiAction::click("nothing.here")));
        assert!(!miss.success);
    }

    #[test]
    fn click_invokes_registered_function_from_button_config() {
        let fx = fixture();
        let invoked = Rc::new(Cell::new(0));
        let counter = invoked.clone();
        let _handle = fx
            .controller
            .register_state_ref("runDiagnostics", move |_| counter.set(counter.get() + 1));

        let outcome = block_on(fx.controller.execute(UiAction::click("diagnostics.run")));
        assert!(outcome.success);
        assert_eq!(invoked.get(), 1);
    }

    #[test]
    fn workflow_requires_content_store_then_navigates_to_create() {
        let fx = fixture();
        let missing = block_on(fx.controller.execute(UiAction::workflow("content_creation", None)));
        assert!(!missing.success);
        assert!(fx.navigator.history().is_empty());

        let store = Rc::new(RecordingStore {
            started: RefCell::new(Vec::new()),
        });
        let _handle = fx.controller.register_workflow_store(store.clone());
        let outcome = block_on(fx.controller.execute(UiAction::workflow(
            "content_creation",
            Some(json!({ "type": "blog" })),
        )));

        assert!(outcome.success);
        assert_eq!(
            *store.started.borrow(),
            vec![("content_creation".to_string(), json!({ "type": "blog" }))]
        );
        assert_eq!(fx.navigator.history(), vec!["/demo/create?type=blog".to_string()]);
    }

    #[test]
    fn form_prefers_setters_and_falls_back_to_inputs() {
        let fx = fixture();
        let (_handle, topic_calls) = recorder(&fx.controller, "setTopic");
        let audience = ElementQuery::Selector("input[name='audience']".to_string());
        fx.surface.insert(audience.clone(), true);

        let data = json!({ "topic": "AI", "audience": "CMOs", "tone": "bold", "extra": 1 });
        let outcome = block_on(fx.controller.execute(UiAction::fill_form(
            "contentBrief",
            data.as_object().cloned().unwrap_or_default(),
        )));

        assert!(outcome.success);
        assert_eq!(outcome.data, Some(json!({ "filled": ["topic", "audience"] })));
        assert_eq!(*topic_calls.borrow(), vec![json!("AI")]);
        assert_eq!(
            fx.surface.element(&audience).and_then(|element| element.value),
            Some("CMOs".to_string())
        );
    }

    #[test]
    fn empty_form_data_is_a_silent_no_op() {
        let fx = fixture();
        let outcome = block_on(
            fx.controller
                .execute(UiAction::fill_form("contentBrief", Map::new())),
        );
        assert!(outcome.success);
        assert_eq!(outcome.data, Some(json!({ "filled": [] })));
    }

    #[test]
    fn export_prefers_handler_then_marker() {
        let fx = fixture();
        let formats = Rc::new(RefCell::new(Vec::new()));
        let sink = formats.clone();
        let mut handlers: BTreeMap<String, ExportHandler> = BTreeMap::new();
        handlers.insert(
            "diagnostics".to_string(),
            Rc::new(move |format: Option<&str>| {
                sink.borrow_mut().push(format.map(str::to_string))
            }),
        );
        let _handle = fx.controller.register_export_handlers(handlers);

        let handled = block_on(
            fx.controller
                .execute(UiAction::export("diagnostics", Some("csv".to_string()))),
        );
        assert!(handled.success);
        assert_eq!(*formats.borrow(), vec![Some("csv".to_string())]);

        let marker = ElementQuery::ExportMarker("playbook".to_string());
        fx.surface.insert(marker.clone(), true);
        let clicked = block_on(fx.controller.execute(UiAction::export("playbook", None)));
        assert!(clicked.success);
        assert_eq!(fx.surface.element(&marker).map(|element| element.clicks), Some(1));

        let missing = block_on(fx.controller.execute(UiAction::export("insights", None)));
        assert!(!missing.success);
    }

    #[test]
    fn toggle_flips_or_sets_visibility_and_scroll_requires_element() {
        let fx = fixture();
        let panel = ElementQuery::Marker("filters".to_string());
        fx.surface.insert(panel.clone(), true);

        block_on(fx.controller.execute(UiAction::toggle("filters", None)));
        assert_eq!(fx.surface.element(&panel).map(|element| element.visible), Some(false));
        block_on(fx.controller.execute(UiAction::toggle("filters", Some(true))));
        assert_eq!(fx.surface.element(&panel).map(|element| element.visible), Some(true));

        assert!(block_on(fx.controller.execute(UiAction::scroll("filters"))).success);
        assert!(!block_on(fx.controller.execute(UiAction::scroll("missing"))).success);
        assert!(!block_on(fx.controller.execute(UiAction::toggle("missing", None))).success);
    }

    #[test]
    fn stale_handle_unregister_keeps_newer_binding() {
        let fx = fixture();
        let (first, _) = recorder(&fx.controller, "setTab");
        let (second, calls) = recorder(&fx.controller, "setTab");

        assert!(!first.unregister());
        block_on(fx.controller.execute(UiAction::set_state("setTab", json!(2))));
        assert_eq!(*calls.borrow(), vec![json!(2)]);

        assert!(second.unregister());
        assert!(fx.controller.get_current_state().registered_refs.is_empty());
    }

    #[test]
    fn snapshot_reports_refs_and_history_count() {
        let fx = fixture();
        let _a = fx.controller.register_state_ref("setB", |_| {});
        let _b = fx.controller.register_state_ref("setA", |_| {});
        block_on(fx.controller.execute(UiAction::navigate("settings")));

        let snapshot = fx.controller.get_current_state();
        assert_eq!(
            snapshot.registered_refs,
            vec!["setA".to_string(), "setB".to_string()]
        );
        assert_eq!(snapshot.executed_actions, 1);

        fx.controller.clear_history();
        assert_eq!(fx.controller.get_current_state().executed_actions, 0);
    }

    #[test]
    fn history_keeps_only_the_most_recent_actions() {
        let controller = UiController::with_config(
            Rc::new(MemoryUiSurface::default()),
            Rc::new(MemoryNavigator::default()),
            Rc::new(ImmediateSettle),
            ControllerConfig {
                history_limit: 2,
                ..ControllerConfig::immediate()
            },
        );
        for target in ["dashboard", "analytics", "settings"] {
            block_on(controller.execute(UiAction::navigate(target)));
        }

        let retained = controller
            .history()
            .into_iter()
            .map(|entry| entry.action)
            .collect::<Vec<_>>();
        assert_eq!(
            retained,
            vec![UiAction::navigate("analytics"), UiAction::navigate("settings")]
        );
        assert_eq!(controller.get_current_state().executed_actions, 3);
    }

    #[test]
    fn headless_controller_detects_without_side_effects() {
        let controller = UiController::headless();
        assert_eq!(
            controller.detect_action("go to diagnostics"),
            vec![UiAction::navigate("diagnostics")]
        );
        assert_eq!(controller.get_current_state().executed_actions, 0);
    }
}
