//! Shared assistant contracts used by the UI controller, the intent dispatcher, and the Leptos
//! runtime.
//!
//! This crate is intentionally runtime-agnostic. It defines serializable UI actions, per-action
//! outcomes, dispatcher results, and registry tokens without depending on Leptos, browser APIs, or
//! controller internals.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The fixed vocabulary of UI action kinds understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Route change to a logical destination.
    Navigate,
    /// Activation of a marked element or configured button.
    Click,
    /// Open or close a registered modal.
    Modal,
    /// Fill a known form.
    Form,
    /// Start a content workflow.
    Workflow,
    /// Direct write through a registered setter.
    State,
    /// Smooth-scroll an element into view.
    Scroll,
    /// Export a data set in a format.
    Export,
    /// Show, hide, or flip an element's visibility.
    Toggle,
}

impl ActionKind {
    /// Every action kind in declaration order.
    pub const ALL: [ActionKind; 9] = [
        Self::Navigate,
        Self::Click,
        Self::Modal,
        Self::Form,
        Self::Workflow,
        Self::State,
        Self::Scroll,
        Self::Export,
        Self::Toggle,
    ];

    /// Returns a stable string token for logs and diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::Click => "click",
            Self::Modal => "modal",
            Self::Form => "form",
            Self::Workflow => "workflow",
            Self::State => "state",
            Self::Scroll => "scroll",
            Self::Export => "export",
            Self::Toggle => "toggle",
        }
    }
}

/// One abstract UI mutation.
///
/// Actions are immutable once built and are consumed exactly once by the controller. The `target`
/// field is always a logical name (route, modal, button, form, state key, data type, or marker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiAction {
    /// Navigate to a logical route.
    Navigate {
        /// Logical route name such as `dashboard`.
        target: String,
        /// Optional query parameters appended to the resolved path.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        params: Option<Value>,
    },
    /// Click a marked element, a configured `category.action` button, or a raw selector.
    Click {
        /// Marker name, `category.action` key, or selector.
        target: String,
    },
    /// Open or close a configured modal.
    Modal {
        /// Logical modal name such as `fixModal`.
        target: String,
        /// `true` opens, `false` closes.
        #[serde(default = "default_show")]
        show: bool,
    },
    /// Fill fields of a known form.
    Form {
        /// Logical form name.
        target: String,
        /// Field name to value.
        #[serde(default)]
        data: Map<String, Value>,
    },
    /// Start a workflow through the registered content store.
    Workflow {
        /// Workflow name.
        target: String,
        /// Optional workflow parameters.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        params: Option<Value>,
    },
    /// Invoke a registered setter with a value.
    State {
        /// Registered state-ref name.
        target: String,
        /// Value passed to the setter.
        value: Value,
    },
    /// Scroll an element into view.
    Scroll {
        /// Marker name or selector.
        target: String,
    },
    /// Export a data set.
    Export {
        /// Data type such as `diagnostics`.
        target: String,
        /// Optional export format such as `csv`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    /// Set or flip an element's visibility.
    Toggle {
        /// Marker name or selector.
        target: String,
        /// Explicit visibility, or `None` to flip.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        show: Option<bool>,
    },
}

fn default_show() -> bool {
    true
}

impl UiAction {
    /// Navigation without query parameters.
    pub fn navigate(target: impl Into<String>) -> Self {
        Self::Navigate {
            target: target.into(),
            params: None,
        }
    }

    /// Navigation with query parameters.
    pub fn navigate_with(target: impl Into<String>, params: Value) -> Self {
        Self::Navigate {
            target: target.into(),
            params: Some(params),
        }
    }

    /// Click by marker, button key, or selector.
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
        }
    }

    /// Opens a modal.
    pub fn open_modal(target: impl Into<String>) -> Self {
        Self::Modal {
            target: target.into(),
            show: true,
        }
    }

    /// Closes a modal.
    pub fn close_modal(target: impl Into<String>) -> Self {
        Self::Modal {
            target: target.into(),
            show: false,
        }
    }

    /// Fills a form.
    pub fn fill_form(target: impl Into<String>, data: Map<String, Value>) -> Self {
        Self::Form {
            target: target.into(),
            data,
        }
    }

    /// Starts a workflow.
    pub fn workflow(target: impl Into<String>, params: Option<Value>) -> Self {
        Self::Workflow {
            target: target.into(),
            params,
        }
    }

    /// Writes a value through a registered setter.
    pub fn set_state(target: impl Into<String>, value: Value) -> Self {
        Self::State {
            target: target.into(),
            value,
        }
    }

    /// Scrolls an element into view.
    pub fn scroll(target: impl Into<String>) -> Self {
        Self::Scroll {
            target: target.into(),
        }
    }

    /// Exports a data type in an optional format.
    pub fn export(target: impl Into<String>, format: Option<String>) -> Self {
        Self::Export {
            target: target.into(),
            format,
        }
    }

    /// Toggles visibility.
    pub fn toggle(target: impl Into<String>, show: Option<bool>) -> Self {
        Self::Toggle {
            target: target.into(),
            show,
        }
    }

    /// Returns the action kind.
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Navigate { .. } => ActionKind::Navigate,
            Self::Click { .. } => ActionKind::Click,
            Self::Modal { .. } => ActionKind::Modal,
            Self::Form { .. } => ActionKind::Form,
            Self::Workflow { .. } => ActionKind::Workflow,
            Self::State { .. } => ActionKind::State,
            Self::Scroll { .. } => ActionKind::Scroll,
            Self::Export { .. } => ActionKind::Export,
            Self::Toggle { .. } => ActionKind::Toggle,
        }
    }

    /// Returns the logical target name.
    pub fn target(&self) -> &str {
        match self {
            Self::Navigate { target, .. }
            | Self::Click { target }
            | Self::Modal { target, .. }
            | Self::Form { target, .. }
            | Self::Workflow { target, .. }
            | Self::State { target, .. }
            | Self::Scroll { target }
            | Self::Export { target, .. }
            | Self::Toggle { target, .. } => target,
        }
    }
}

/// Result of executing one [`UiAction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Whether the action resolved and applied.
    pub success: bool,
    /// Human-readable description.
    pub message: String,
    /// Optional structured payload, such as the resolved path or filled fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ActionOutcome {
    /// Successful outcome without payload.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failed outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Attaches a payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Suggested follow-up shown beside a dispatcher result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAction {
    /// Display label.
    pub label: String,
    /// Stable action key the caller may send back.
    pub action: String,
    /// Optional icon hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl SuggestedAction {
    /// Creates a suggestion with an icon hint.
    pub fn new(label: impl Into<String>, action: impl Into<String>, icon: &str) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
            icon: Some(icon.to_string()),
        }
    }
}

/// Workflow started or proposed by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDescriptor {
    /// Workflow name such as `content_creation`.
    pub name: String,
    /// Content or automation sub-type.
    pub content_type: String,
    /// Optional topic the workflow is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Ordered step identifiers.
    pub steps: Vec<String>,
}

/// Dispatcher output for one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Whether the command was handled.
    pub success: bool,
    /// Natural-language response.
    pub message: String,
    /// Optional synthetic data payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Suggested follow-up actions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<SuggestedAction>,
    /// Navigation path the command leads to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<String>,
    /// Workflow descriptor when the command starts one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WorkflowDescriptor>,
    /// UI actions the dispatcher drove through the controller.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ui_actions: Vec<UiAction>,
}

impl ExecutionResult {
    /// Successful result with a message and nothing else.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            actions: Vec::new(),
            navigation: None,
            workflow: None,
            ui_actions: Vec::new(),
        }
    }

    /// Failed result with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::success(message)
        }
    }

    /// Attaches a data payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Replaces the suggestion list.
    pub fn with_actions(mut self, actions: Vec<SuggestedAction>) -> Self {
        self.actions = actions;
        self
    }

    /// Sets the navigation path.
    pub fn with_navigation(mut self, path: impl Into<String>) -> Self {
        self.navigation = Some(path.into());
        self
    }

    /// Sets the workflow descriptor.
    pub fn with_workflow(mut self, workflow: WorkflowDescriptor) -> Self {
        self.workflow = Some(workflow);
        self
    }

    /// Records the UI actions driven for this result.
    pub fn with_ui_actions(mut self, ui_actions: Vec<UiAction>) -> Self {
        self.ui_actions = ui_actions;
        self
    }
}

/// Coarse command classification assigned before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    /// Produce new content.
    Create,
    /// Report on performance.
    Analyze,
    /// Improve existing content.
    Optimize,
    /// Display a view.
    Show,
    /// Move to a screen.
    Navigate,
    /// Export data.
    Export,
    /// Schedule publication.
    Schedule,
    /// Repair diagnosed issues.
    Fix,
    /// Set up a recurring automation.
    Automate,
    /// Unrecognized; handled by the generic fallback.
    Generic,
}

impl Intent {
    /// Maps a caller-supplied label to an intent. Unknown labels map to [`Intent::Generic`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "create" => Self::Create,
            "analyze" | "analyse" => Self::Analyze,
            "optimize" | "optimise" => Self::Optimize,
            "show" | "display" => Self::Show,
            "navigate" => Self::Navigate,
            "export" => Self::Export,
            "schedule" => Self::Schedule,
            "fix" => Self::Fix,
            "automate" => Self::Automate,
            _ => Self::Generic,
        }
    }

    /// Returns the canonical label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Analyze => "analyze",
            Self::Optimize => "optimize",
            Self::Show => "show",
            Self::Navigate => "navigate",
            Self::Export => "export",
            Self::Schedule => "schedule",
            Self::Fix => "fix",
            Self::Automate => "automate",
            Self::Generic => "generic",
        }
    }
}

/// Read-only controller state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSnapshot {
    /// Logical name of the last successfully navigated route.
    pub current_page: Option<String>,
    /// Modals currently considered open, sorted.
    pub active_modals: Vec<String>,
    /// Registered state-ref names, sorted.
    pub registered_refs: Vec<String>,
    /// Number of actions executed since the last history reset.
    pub executed_actions: usize,
}

/// Opaque token identifying one state-ref registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateRefToken(pub u64);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn ui_action_serializes_with_type_tag() {
        let action = UiAction::export("diagnostics", Some("csv".to_string()));
        assert_eq!(
            serde_json::to_value(&action).expect("serialize"),
            json!({ "type": "export", "target": "diagnostics", "format": "csv" })
        );
    }

    #[test]
    fn modal_action_defaults_to_show() {
        let action: UiAction =
            serde_json::from_value(json!({ "type": "modal", "target": "fixModal" }))
                .expect("deserialize");
        assert_eq!(action, UiAction::open_modal("fixModal"));
        assert_eq!(action.kind(), ActionKind::Modal);
        assert_eq!(action.target(), "fixModal");
    }

    #[test]
    fn intent_labels_map_display_to_show_and_unknown_to_generic() {
        assert_eq!(Intent::from_label("display"), Intent::Show);
        assert_eq!(Intent::from_label(" Create "), Intent::Create);
        assert_eq!(Intent::from_label("summon"), Intent::Generic);
    }

    #[test]
    fn execution_result_omits_empty_optional_fields() {
        let value = serde_json::to_value(ExecutionResult::success("ok")).expect("serialize");
        assert_eq!(value, json!({ "success": true, "message": "ok" }));
    }

    #[test]
    fn action_kind_tokens_cover_every_kind() {
        let tokens = ActionKind::ALL.map(ActionKind::as_str);
        assert_eq!(
            tokens,
            [
                "navigate", "click", "modal", "form", "workflow", "state", "scroll", "export",
                "toggle"
            ]
        );
    }
}
