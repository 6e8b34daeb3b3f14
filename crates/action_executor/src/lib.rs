//! Intent dispatcher for assistant commands.
//!
//! [`ActionExecutor::execute`] routes a command plus a pre-classified [`Intent`] to one handler,
//! which refines parameters by keyword, synthesizes a payload, and plans a [`UiAction`] sequence.
//! The planned sequence is then driven through the shared [`UiController`] before the result is
//! returned. Every path yields an [`ExecutionResult`]; nothing is raised to the caller.
//!
//! [`UiAction`]: assistant_contract::UiAction

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod handlers;
mod keywords;
mod suggestions;
mod synthetic;

use std::cell::RefCell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use assistant_contract::{ActionOutcome, ExecutionResult, Intent};
use leptos::logging;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Value};
use ui_controller::UiController;

pub use handlers::{workflow_steps, CONTENT_WORKFLOW};
pub use keywords::{classify_intent, extract_topic, first_match, first_word_match, KeywordRow};
pub use suggestions::suggestion_command;

use handlers::Request;

/// Dispatches commands to intent handlers and drives the controller with their action plans.
pub struct ActionExecutor {
    controller: UiController,
    rng: RefCell<StdRng>,
}

impl ActionExecutor {
    /// Creates a dispatcher seeded from the wall clock.
    pub fn new(controller: UiController) -> Self {
        Self::with_seed(controller, clock_seed())
    }

    /// Creates a dispatcher with a fixed seed so synthetic payloads are reproducible.
    pub fn with_seed(controller: UiController, seed: u64) -> Self {
        Self {
            controller,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Controller driven by this dispatcher.
    pub fn controller(&self) -> &UiController {
        &self.controller
    }

    /// Handles `command` with the handler for `intent`, then runs the planned UI actions in order.
    ///
    /// `params` may carry `topic`, `contentType`, `timeframe`, `format`, or `target` overrides.
    /// When a UI step fails the result turns into a failure: the step messages are appended to
    /// `message` and every step outcome is attached under `data.steps`. Earlier steps are not
    /// rolled back.
    pub async fn execute(&self, command: &str, intent: Intent, params: &Value) -> ExecutionResult {
        logging::log!("assistant dispatch {}: {command}", intent.as_str());

        let request = Request::new(command, params);
        let mut result = match intent {
            Intent::Create => self.create(&request),
            Intent::Analyze => self.analyze(&request),
            Intent::Optimize => self.optimize(&request),
            Intent::Show => self.show(&request),
            Intent::Navigate => self.navigate(&request),
            Intent::Export => self.export(&request),
            Intent::Schedule => self.schedule(&request),
            Intent::Fix => self.fix(&request),
            Intent::Automate => self.automate(&request),
            Intent::Generic => self.generic(&request),
        };

        if !result.ui_actions.is_empty() {
            let outcomes = self
                .controller
                .execute_sequence(result.ui_actions.clone())
                .await;
            let failures = outcomes
                .iter()
                .filter(|outcome| !outcome.success)
                .map(|outcome| outcome.message.as_str())
                .collect::<Vec<_>>();
            if !failures.is_empty() {
                let reasons = failures.join("; ");
                logging::warn!("assistant {} steps failed: {reasons}", intent.as_str());
                result.success = false;
                result.message = format!("{} Could not finish: {reasons}.", result.message);
                attach_steps(&mut result, &outcomes);
            }
        }

        result
    }

    /// Same as [`ActionExecutor::execute`] with a string intent label such as `display`.
    pub async fn execute_label(&self, command: &str, label: &str, params: &Value) -> ExecutionResult {
        self.execute(command, Intent::from_label(label), params)
            .await
    }

    fn with_rng<T>(&self, apply: impl FnOnce(&mut StdRng) -> T) -> T {
        apply(&mut self.rng.borrow_mut())
    }
}

fn attach_steps(result: &mut ExecutionResult, outcomes: &[ActionOutcome]) {
    let steps = Value::Array(
        outcomes
            .iter()
            .map(|outcome| json!({ "success": outcome.success, "message": outcome.message }))
            .collect(),
    );
    match result.data.as_mut() {
        Some(Value::Object(data)) => {
            data.insert("steps".to_string(), steps);
        }
        Some(other) => {
            let payload = other.take();
            *other = json!({ "payload": payload, "steps": steps });
        }
        None => result.data = Some(json!({ "steps": steps })),
    }
}

fn clock_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

    use assistant_contract::UiAction;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use ui_controller::{
        ExportHandler, ImmediateSettle, MemoryNavigator, MemoryUiSurface, WorkflowStore,
    };

    use super::*;

    struct Fixture {
        executor: ActionExecutor,
        navigator: MemoryNavigator,
    }

    fn fixture() -> Fixture {
        let navigator = MemoryNavigator::default();
        let controller = UiController::new(
            Rc::new(MemoryUiSurface::default()),
            Rc::new(navigator.clone()),
            Rc::new(ImmediateSettle),
        );
        Fixture {
            executor: ActionExecutor::with_seed(controller, 11),
            navigator,
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        started: RefCell<Vec<String>>,
    }

    impl WorkflowStore for RecordingStore {
        fn start_workflow(&self, name: &str, _params: &Value) {
            self.started.borrow_mut().push(name.to_string());
        }
    }

    #[test]
    fn linkedin_command_always_classifies_as_linkedin() {
        let fx = fixture();
        for command in [
            "create a linkedin post",
            "write a blog style linkedin update",
            "draft an email and a linkedin post about hiring",
        ] {
            let result = block_on(fx.executor.execute(command, Intent::Create, &json!({})));
            assert_eq!(
                result.workflow.map(|workflow| workflow.content_type),
                Some("linkedin".to_string()),
                "{command}"
            );
            assert!(!result.actions.is_empty());
        }
    }

    #[test]
    fn blog_about_ai_automation_end_to_end() {
        let fx = fixture();
        let store = Rc::new(RecordingStore::default());
        let _handle = fx.executor.controller().register_workflow_store(store.clone());

        let result = block_on(fx.executor.execute(
            "create a blog post about AI automation",
            Intent::Create,
            &json!({}),
        ));

        let workflow = result.workflow.clone().expect("workflow");
        assert_eq!(workflow.content_type, "blog");
        assert_eq!(workflow.topic.as_deref(), Some("AI automation"));
        assert_eq!(workflow.steps.first().map(String::as_str), Some("topic_research"));
        assert_eq!(workflow.steps.last().map(String::as_str), Some("publish"));

        let navigation = result.navigation.clone().expect("navigation");
        assert!(navigation.contains("AI%20automation"), "{navigation}");
        assert_eq!(*store.started.borrow(), vec![CONTENT_WORKFLOW.to_string()]);
        assert_eq!(fx.navigator.history(), vec![navigation]);
    }

    #[test]
    fn create_without_store_still_navigates() {
        let fx = fixture();
        let result = block_on(fx.executor.execute(
            "write an email",
            Intent::Create,
            &json!({ "topic": "Spring launch" }),
        ));
        assert_eq!(
            result.ui_actions,
            vec![UiAction::navigate_with(
                "create",
                json!({ "topic": "Spring launch", "type": "email" })
            )]
        );
        assert_eq!(
            fx.navigator.history(),
            vec!["/demo/create?topic=Spring%20launch&type=email".to_string()]
        );
    }

    #[test]
    fn fix_navigates_to_diagnostics_then_opens_fix_modal() {
        let fx = fixture();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let _handle = fx
            .executor
            .controller()
            .register_state_ref("setShowFixModal", move |value| sink.borrow_mut().push(value));

        let result = block_on(fx.executor.execute("fix the slow pages", Intent::Fix, &json!({})));

        assert_eq!(
            result.data.as_ref().and_then(|data| data["issueType"].as_str()),
            Some("performance")
        );
        assert_eq!(fx.navigator.history(), vec!["/demo/diagnostics".to_string()]);
        assert_eq!(*calls.borrow(), vec![json!(true)]);
        assert_eq!(
            fx.executor.controller().get_current_state().active_modals,
            vec!["fixModal".to_string()]
        );
    }

    #[test]
    fn export_uses_registered_handler_with_format() {
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
        let _handle = fx.executor.controller().register_export_handlers(handlers);

        let result = block_on(fx.executor.execute(
            "export the diagnostics audit as a spreadsheet",
            Intent::Export,
            &json!({}),
        ));

        assert!(result.success);
        assert_eq!(*formats.borrow(), vec![Some("csv".to_string())]);
    }

    #[test]
    fn navigate_without_target_falls_back_to_suggestions() {
        let fx = fixture();
        let result = block_on(fx.executor.execute("take me somewhere", Intent::Navigate, &json!({})));
        assert!(result.ui_actions.is_empty());
        assert_eq!(result.actions.len(), 4);
        assert!(fx.navigator.history().is_empty());
    }

    #[test]
    fn generic_runs_detected_actions() {
        let fx = fixture();
        let result = block_on(fx.executor.execute_label("go to diagnostics", "unknown", &json!({})));
        assert!(result.success);
        assert_eq!(result.ui_actions, vec![UiAction::navigate("diagnostics")]);
        assert_eq!(fx.navigator.history(), vec!["/demo/diagnostics".to_string()]);
    }

    #[test]
    fn generic_help_offers_examples() {
        let fx = fixture();
        let result = block_on(fx.executor.execute("help me please", Intent::Generic, &json!({})));
        let examples = result
            .data
            .as_ref()
            .and_then(|data| data["examples"].as_array())
            .map(Vec::len);
        assert_eq!(examples, Some(5));
        assert_eq!(result.actions.len(), 3);
    }

    #[test]
    fn display_label_maps_to_show_handler() {
        let fx = fixture();
        let result = block_on(fx.executor.execute_label("display my reports", "display", &json!({})));
        assert_eq!(result.navigation.as_deref(), Some("/demo/analytics"));
    }

    #[test]
    fn seeded_executors_produce_identical_payloads() {
        let first = fixture();
        let second = fixture();
        let a = block_on(first.executor.execute("analyze seo this quarter", Intent::Analyze, &json!({})));
        let b = block_on(second.executor.execute("analyze seo this quarter", Intent::Analyze, &json!({})));
        assert_eq!(a.data, b.data);
        assert_eq!(
            a.data.as_ref().and_then(|data| data["timeframe"].as_str()),
            Some("90d")
        );
    }

    #[test]
    fn timeframe_param_overrides_keywords() {
        let fx = fixture();
        let result = block_on(fx.executor.execute(
            "analyze traffic this week",
            Intent::Analyze,
            &json!({ "timeframe": "1y" }),
        ));
        assert_eq!(
            result.data.as_ref().and_then(|data| data["timeframe"].as_str()),
            Some("1y")
        );
    }

    #[test]
    fn export_without_target_reports_failed_step() {
        let fx = fixture();
        let result = block_on(fx.executor.execute(
            "export the diagnostics as csv",
            Intent::Export,
            &json!({}),
        ));

        assert!(!result.success);
        assert!(
            result.message.starts_with("Exporting diagnostics as CSV."),
            "{}",
            result.message
        );
        assert!(result.message.contains("no export handler"), "{}", result.message);
        let steps = result
            .data
            .as_ref()
            .and_then(|data| data["steps"].as_array())
            .cloned()
            .unwrap_or_default();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0]["success"], json!(false));
        assert_eq!(
            result.data.as_ref().and_then(|data| data["format"].as_str()),
            Some("csv")
        );
    }

    #[test]
    fn format_param_overrides_keywords() {
        let fx = fixture();
        let formats = Rc::new(RefCell::new(Vec::new()));
        let sink = formats.clone();
        let mut handlers: BTreeMap<String, ExportHandler> = BTreeMap::new();
        handlers.insert(
            "analytics".to_string(),
            Rc::new(move |format: Option<&str>| {
                sink.borrow_mut().push(format.map(str::to_string))
            }),
        );
        let _handle = fx.executor.controller().register_export_handlers(handlers);

        let result = block_on(fx.executor.execute(
            "export analytics as csv",
            Intent::Export,
            &json!({ "format": "JSON" }),
        ));

        assert!(result.success);
        assert_eq!(*formats.borrow(), vec![Some("json".to_string())]);
    }

    #[test]
    fn content_type_param_overrides_keywords() {
        let fx = fixture();
        let result = block_on(fx.executor.execute(
            "write a linkedin post",
            Intent::Create,
            &json!({ "contentType": "video" }),
        ));
        assert_eq!(
            result.workflow.map(|workflow| workflow.content_type),
            Some("video".to_string())
        );
    }

    #[test]
    fn optimize_opens_implementation_plan_on_playbook() {
        let fx = fixture();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let _handle = fx
            .executor
            .controller()
            .register_state_ref("setShowImplementationModal", move |value| {
                sink.borrow_mut().push(value)
            });

        let result = block_on(fx.executor.execute(
            "improve our landing page conversion",
            Intent::Optimize,
            &json!({}),
        ));

        assert!(result.success);
        assert_eq!(
            result.data.as_ref().and_then(|data| data["target"].as_str()),
            Some("conversion")
        );
        assert_eq!(
            result.ui_actions,
            vec![
                UiAction::navigate("playbook"),
                UiAction::open_modal("implementationModal"),
            ]
        );
        assert_eq!(fx.navigator.history(), vec!["/demo/playbook".to_string()]);
        assert_eq!(*calls.borrow(), vec![json!(true)]);
    }

    #[test]
    fn optimize_without_mounted_playbook_fails_on_modal_step() {
        let fx = fixture();
        let result = block_on(fx.executor.execute("optimize seo", Intent::Optimize, &json!({})));
        assert!(!result.success);
        assert_eq!(fx.navigator.history(), vec!["/demo/playbook".to_string()]);
        let steps = result
            .data
            .as_ref()
            .and_then(|data| data["steps"].as_array())
            .map(|steps| steps.iter().map(|step| step["success"].clone()).collect::<Vec<_>>());
        assert_eq!(steps, Some(vec![json!(true), json!(false)]));
    }

    #[test]
    fn schedule_navigates_to_calendar() {
        let fx = fixture();
        let result = block_on(fx.executor.execute(
            "schedule the newsletter for tomorrow",
            Intent::Schedule,
            &json!({}),
        ));

        assert!(result.success);
        let data = result.data.clone().unwrap_or_default();
        assert_eq!(data["timing"], json!("tomorrow"));
        assert_eq!(data["channel"], json!("email"));
        assert_eq!(data["suggestedSlots"].as_array().map(Vec::len), Some(3));
        assert_eq!(result.ui_actions, vec![UiAction::navigate("calendar")]);
        assert_eq!(fx.navigator.history(), vec!["/demo/calendar".to_string()]);
    }

    #[test]
    fn automate_opens_implementation_plan_on_playbook() {
        let fx = fixture();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let _handle = fx
            .executor
            .controller()
            .register_state_ref("setShowImplementationModal", move |value| {
                sink.borrow_mut().push(value)
            });

        let result = block_on(fx.executor.execute(
            "automate weekly reporting",
            Intent::Automate,
            &json!({}),
        ));

        assert!(result.success);
        let data = result.data.clone().unwrap_or_default();
        assert_eq!(data["automation"], json!("reporting"));
        assert_eq!(data["frequency"], json!("weekly"));
        assert_eq!(
            result.ui_actions,
            vec![
                UiAction::navigate("playbook"),
                UiAction::open_modal("implementationModal"),
            ]
        );
        assert_eq!(*calls.borrow(), vec![json!(true)]);
    }

    #[test]
    fn fix_ignores_keywords_inside_longer_words() {
        let fx = fixture();
        let result = block_on(fx.executor.execute(
            "fix typos in my linkedin post",
            Intent::Fix,
            &json!({}),
        ));
        assert_eq!(
            result.data.as_ref().and_then(|data| data["issueType"].as_str()),
            Some("content")
        );
    }

    #[test]
    fn show_falls_back_to_detected_control_points() {
        let fx = fixture();
        let result = block_on(fx.executor.execute(
            "show the emergency modal",
            Intent::Show,
            &json!({}),
        ));
        assert_eq!(result.ui_actions, vec![UiAction::open_modal("emergencyModal")]);
        assert!(fx.navigator.history().is_empty());
    }

    #[test]
    fn every_suggested_follow_up_drives_the_ui() {
        let commands = [
            (Intent::Create, "create a blog post about AI"),
            (Intent::Analyze, "analyze traffic"),
            (Intent::Optimize, "optimize seo"),
            (Intent::Show, "show analytics"),
            (Intent::Export, "export analytics"),
            (Intent::Schedule, "schedule a post"),
            (Intent::Fix, "fix broken links"),
            (Intent::Automate, "automate reporting"),
            (Intent::Generic, "help"),
            (Intent::Generic, "hmm"),
        ];
        let mut keys = std::collections::BTreeSet::new();
        for (intent, command) in commands {
            let fx = fixture();
            let result = block_on(fx.executor.execute(command, intent, &json!({})));
            assert!(!result.actions.is_empty(), "{command}");
            keys.extend(result.actions.into_iter().map(|action| action.action));
        }

        for key in keys {
            let (intent, command) =
                suggestion_command(&key).unwrap_or_else(|| panic!("unresolved suggestion {key}"));
            let fx = fixture();
            let result = block_on(fx.executor.execute(command, intent, &json!({})));
            assert!(!result.ui_actions.is_empty(), "{key}: {command}");
        }
    }

    #[test]
    fn every_contextual_command_drives_the_ui() {
        for context in ["dashboard", "content_studio", "analytics", "playbook", "elsewhere"] {
            for command in command_grammar::CommandGenerator.generate_contextual_commands(context) {
                let fx = fixture();
                let result = block_on(fx.executor.execute(
                    &command,
                    classify_intent(&command),
                    &json!({}),
                ));
                assert!(!result.ui_actions.is_empty(), "{context}: {command}");
            }
        }
    }
}
