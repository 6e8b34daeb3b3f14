//! One handler per intent. Each handler refines the command by keyword, plans a UI action
//! sequence, and synthesizes a payload; the dispatcher runs the planned sequence afterwards.

use assistant_contract::{ExecutionResult, SuggestedAction, UiAction, WorkflowDescriptor};
use command_grammar::CommandGenerator;
use serde_json::{json, Value};
use ui_controller::path_with_query;

use crate::{
    keywords::{
        extract_topic, first_match_or, first_word_match, is_help_request, mentioned_route,
        ANALYSIS_TYPES, AUTOMATIONS, CHANNELS, CONTENT_TYPES, DEFAULT_ANALYSIS_TYPE, DEFAULT_AUTOMATION,
        DEFAULT_CHANNEL, DEFAULT_CONTENT_TYPE, DEFAULT_EXPORT_DATA_TYPE, DEFAULT_EXPORT_FORMAT,
        DEFAULT_FREQUENCY, DEFAULT_ISSUE_TYPE, DEFAULT_OPTIMIZATION_TARGET,
        DEFAULT_SCHEDULE_TIMING, DEFAULT_TIMEFRAME, EXPORT_DATA_TYPES, EXPORT_FORMATS,
        FREQUENCIES, ISSUE_TYPES, OPTIMIZATION_TARGETS, SCHEDULE_TIMINGS, TIMEFRAMES, KeywordRow,
    },
    synthetic, ActionExecutor,
};

/// Workflow started by `create`.
pub const CONTENT_WORKFLOW: &str = "content_creation";

const DEFAULT_TOPIC: &str = "content marketing";
const FALLBACK_PATH: &str = "/demo/dashboard";

/// Command text plus loosely-typed caller params.
pub(crate) struct Request<'a> {
    pub(crate) command: &'a str,
    pub(crate) lower: String,
    pub(crate) params: &'a Value,
}

impl<'a> Request<'a> {
    pub(crate) fn new(command: &'a str, params: &'a Value) -> Self {
        Self {
            command,
            lower: command.to_lowercase(),
            params,
        }
    }

    /// Non-empty string param, used to override keyword extraction.
    fn param(&self, key: &str) -> Option<&'a str> {
        self.params
            .get(key)?
            .as_str()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn param_or(&self, key: &str, rows: &[KeywordRow], default: &'static str) -> String {
        match self.param(key) {
            Some(value) => value.to_lowercase(),
            None => first_match_or(&self.lower, rows, default).to_string(),
        }
    }
}

impl ActionExecutor {
    fn route_path(&self, route: &str) -> String {
        self.controller
            .tables()
            .route(route)
            .unwrap_or(FALLBACK_PATH)
            .to_string()
    }

    fn target_route(&self, request: &Request<'_>) -> Option<String> {
        let tables = self.controller.tables();
        request
            .param("target")
            .and_then(|target| tables.route_for_word(target))
            .or_else(|| mentioned_route(&request.lower, tables))
            .map(str::to_string)
    }

    pub(crate) fn create(&self, request: &Request<'_>) -> ExecutionResult {
        let content_type = request.param_or("contentType", CONTENT_TYPES, DEFAULT_CONTENT_TYPE);
        let topic = request
            .param("topic")
            .map(str::to_string)
            .or_else(|| extract_topic(request.command))
            .unwrap_or_else(|| DEFAULT_TOPIC.to_string());

        let workflow = WorkflowDescriptor {
            name: CONTENT_WORKFLOW.to_string(),
            content_type: content_type.clone(),
            topic: Some(topic.clone()),
            steps: workflow_steps(&content_type)
                .iter()
                .map(|step| step.to_string())
                .collect(),
        };
        let query = json!({ "topic": topic, "type": content_type });
        let navigation = path_with_query(&self.route_path("create"), Some(&query));

        // Without a content store the workflow action would fail before navigating.
        let ui_action = if self.controller.registry().workflow_store().is_some() {
            UiAction::workflow(CONTENT_WORKFLOW, Some(query))
        } else {
            UiAction::navigate_with("create", query)
        };
        let minutes = self.with_rng(|rng| synthetic::creation_minutes(rng, &content_type));

        ExecutionResult::success(format!(
            "Starting a {} about \"{topic}\". I'll walk you through {} steps.",
            content_label(&content_type),
            workflow.steps.len()
        ))
        .with_data(json!({
            "contentType": content_type,
            "topic": topic,
            "estimatedMinutes": minutes,
        }))
        .with_actions(vec![
            SuggestedAction::new("Generate outline", "generate_outline", "list"),
            SuggestedAction::new("Research keywords", "research_keywords", "search"),
            SuggestedAction::new("Schedule publication", "schedule_content", "calendar"),
        ])
        .with_navigation(navigation)
        .with_workflow(workflow)
        .with_ui_actions(vec![ui_action])
    }

    pub(crate) fn analyze(&self, request: &Request<'_>) -> ExecutionResult {
        let analysis_type = first_match_or(&request.lower, ANALYSIS_TYPES, DEFAULT_ANALYSIS_TYPE);
        let timeframe = request.param_or("timeframe", TIMEFRAMES, DEFAULT_TIMEFRAME);
        let route = match analysis_type {
            "seo" => "diagnostics",
            "competitor" => "insights",
            _ => "analytics",
        };
        let data = self.with_rng(|rng| synthetic::analysis(rng, analysis_type, &timeframe));

        ExecutionResult::success(format!(
            "Here is your {analysis_type} analysis for the last {}.",
            timeframe_label(&timeframe)
        ))
        .with_data(data)
        .with_actions(vec![
            SuggestedAction::new("Export report", "export_report", "download"),
            SuggestedAction::new("Optimize content", "optimize_content", "trending-up"),
            SuggestedAction::new("Compare periods", "compare_periods", "bar-chart"),
        ])
        .with_navigation(self.route_path(route))
        .with_ui_actions(vec![UiAction::navigate(route)])
    }

    pub(crate) fn optimize(&self, request: &Request<'_>) -> ExecutionResult {
        let target = request.param_or("target", OPTIMIZATION_TARGETS, DEFAULT_OPTIMIZATION_TARGET);
        let data = self.with_rng(|rng| synthetic::optimization(rng, &target));
        let current = data["currentScore"].as_u64().unwrap_or_default();
        let projected = data["projectedScore"].as_u64().unwrap_or_default();

        ExecutionResult::success(format!(
            "Your {target} score can move from {current} to {projected} with three changes."
        ))
        .with_data(data)
        .with_actions(vec![
            SuggestedAction::new("Apply recommendations", "apply_recommendations", "check"),
            SuggestedAction::new("Preview changes", "preview_changes", "eye"),
        ])
        .with_navigation(self.route_path("playbook"))
        .with_ui_actions(vec![
            UiAction::navigate("playbook"),
            UiAction::open_modal("implementationModal"),
        ])
    }

    pub(crate) fn show(&self, request: &Request<'_>) -> ExecutionResult {
        let route = match self.target_route(request) {
            Some(route) => route,
            None => {
                // "show the emergency modal" names a control point rather than a page.
                let detected = self.controller.detect_action(request.command);
                if !detected.is_empty() {
                    return detected_result(detected);
                }
                "dashboard".to_string()
            }
        };

        ExecutionResult::success(format!("Showing {route}."))
            .with_data(json!({ "view": route }))
            .with_actions(vec![
                SuggestedAction::new("Analyze performance", "analyze_performance", "bar-chart"),
                SuggestedAction::new("Export view", "export_view", "download"),
            ])
            .with_navigation(self.route_path(&route))
            .with_ui_actions(vec![UiAction::navigate(route)])
    }

    pub(crate) fn navigate(&self, request: &Request<'_>) -> ExecutionResult {
        let Some(route) = self.target_route(request) else {
            return self.generic(request);
        };

        ExecutionResult::success(format!("Navigating to {route}."))
            .with_navigation(self.route_path(&route))
            .with_ui_actions(vec![UiAction::navigate(route)])
    }

    pub(crate) fn export(&self, request: &Request<'_>) -> ExecutionResult {
        let format = request.param_or("format", EXPORT_FORMATS, DEFAULT_EXPORT_FORMAT);
        let data_type = request.param_or("target", EXPORT_DATA_TYPES, DEFAULT_EXPORT_DATA_TYPE);

        ExecutionResult::success(format!(
            "Exporting {data_type} as {}.",
            format.to_uppercase()
        ))
        .with_data(json!({
            "dataType": data_type,
            "format": format,
            "fileName": format!("{data_type}-export.{format}"),
        }))
        .with_actions(vec![
            SuggestedAction::new("Share export", "share_export", "share"),
            SuggestedAction::new("Schedule recurring export", "schedule_export", "repeat"),
        ])
        .with_ui_actions(vec![UiAction::export(data_type, Some(format))])
    }

    pub(crate) fn schedule(&self, request: &Request<'_>) -> ExecutionResult {
        let timing = first_match_or(&request.lower, SCHEDULE_TIMINGS, DEFAULT_SCHEDULE_TIMING);
        let channel = first_match_or(&request.lower, CHANNELS, DEFAULT_CHANNEL);
        let slots = self.with_rng(|rng| synthetic::publish_slots(rng));

        ExecutionResult::success(format!(
            "Found open {} slots for {}.",
            timing.replace('_', " "),
            channel.replace('_', " ")
        ))
        .with_data(json!({
            "timing": timing,
            "channel": channel,
            "suggestedSlots": slots,
        }))
        .with_actions(vec![
            SuggestedAction::new("Confirm first slot", "confirm_slot", "check"),
            SuggestedAction::new("Pick another time", "pick_time", "clock"),
        ])
        .with_navigation(self.route_path("calendar"))
        .with_ui_actions(vec![UiAction::navigate("calendar")])
    }

    pub(crate) fn fix(&self, request: &Request<'_>) -> ExecutionResult {
        let issue_type =
            first_word_match(&request.lower, ISSUE_TYPES).unwrap_or(DEFAULT_ISSUE_TYPE);
        let data = self.with_rng(|rng| synthetic::issues(rng, issue_type));
        let found = data["issuesFound"].as_u64().unwrap_or_default();

        ExecutionResult::success(format!(
            "Found {found} {} issues. Opening the fix panel.",
            issue_type.replace('_', " ")
        ))
        .with_data(data)
        .with_actions(vec![
            SuggestedAction::new("Fix critical issues first", "fix_critical", "alert-triangle"),
            SuggestedAction::new("Export issue list", "export_issues", "download"),
        ])
        .with_navigation(self.route_path("diagnostics"))
        .with_ui_actions(vec![
            UiAction::navigate("diagnostics"),
            UiAction::open_modal("fixModal"),
        ])
    }

    pub(crate) fn automate(&self, request: &Request<'_>) -> ExecutionResult {
        let automation = first_match_or(&request.lower, AUTOMATIONS, DEFAULT_AUTOMATION);
        let frequency = first_match_or(&request.lower, FREQUENCIES, DEFAULT_FREQUENCY);
        let hours = self.with_rng(|rng| synthetic::hours_saved(rng));

        ExecutionResult::success(format!(
            "Set up {frequency} {automation} automation. Estimated {hours} hours saved per week."
        ))
        .with_data(json!({
            "automation": automation,
            "frequency": frequency,
            "estimatedHoursSaved": hours,
        }))
        .with_actions(vec![
            SuggestedAction::new("Review automation rules", "review_rules", "settings"),
            SuggestedAction::new("Pause automation", "pause_automation", "pause"),
        ])
        .with_navigation(self.route_path("playbook"))
        .with_ui_actions(vec![
            UiAction::navigate("playbook"),
            UiAction::open_modal("implementationModal"),
        ])
    }

    pub(crate) fn generic(&self, request: &Request<'_>) -> ExecutionResult {
        let detected = self.controller.detect_action(request.command);
        if !detected.is_empty() {
            return detected_result(detected);
        }

        if is_help_request(&request.lower) {
            let context = self
                .controller
                .get_current_state()
                .current_page
                .unwrap_or_else(|| "dashboard".to_string());
            let examples = CommandGenerator.generate_contextual_commands(&context);
            return ExecutionResult::success(
                "I can create content, analyze performance, fix issues, and drive the app for you.",
            )
            .with_data(json!({ "examples": examples }))
            .with_actions(vec![
                SuggestedAction::new("View documentation", "open_docs", "book"),
                SuggestedAction::new("Contact support", "contact_support", "life-buoy"),
                SuggestedAction::new("Open content studio", "navigate_create", "edit"),
            ]);
        }

        ExecutionResult::success("I'm not sure what you meant. Here are some places to start.")
            .with_actions(vec![
                SuggestedAction::new("Go to dashboard", "navigate_dashboard", "home"),
                SuggestedAction::new("Create content", "navigate_create", "edit"),
                SuggestedAction::new("View analytics", "navigate_analytics", "bar-chart"),
                SuggestedAction::new("Run diagnostics", "navigate_diagnostics", "activity"),
            ])
    }
}

fn detected_result(detected: Vec<UiAction>) -> ExecutionResult {
    let summary = detected
        .iter()
        .map(|action| format!("{} {}", action.kind().as_str(), action.target()))
        .collect::<Vec<_>>()
        .join(", ");
    ExecutionResult::success(format!("On it: {summary}.")).with_ui_actions(detected)
}

/// Ordered steps of the content workflow for a content type.
pub fn workflow_steps(content_type: &str) -> &'static [&'static str] {
    match content_type {
        "linkedin" => &["topic_research", "hook_writing", "draft", "review", "publish"],
        "email" => &[
            "topic_research",
            "subject_lines",
            "draft",
            "personalization",
            "review",
            "publish",
        ],
        "social" => &["topic_research", "draft", "visual_assets", "review", "publish"],
        "video" => &["topic_research", "script", "storyboard", "review", "publish"],
        "whitepaper" => &["topic_research", "outline", "draft", "design", "review", "publish"],
        _ => &[
            "topic_research",
            "outline",
            "draft",
            "seo_optimization",
            "review",
            "publish",
        ],
    }
}

fn content_label(content_type: &str) -> &str {
    match content_type {
        "blog" => "blog post",
        "linkedin" => "LinkedIn post",
        "email" => "email campaign",
        "social" => "social post",
        "video" => "video script",
        other => other,
    }
}

fn timeframe_label(timeframe: &str) -> &str {
    match timeframe {
        "7d" => "7 days",
        "30d" => "30 days",
        "90d" => "90 days",
        "1y" => "12 months",
        other => other,
    }
}
