//! Assistant provider and context wiring.
#![allow(clippy::clone_on_copy)]

use std::rc::Rc;

use action_executor::{classify_intent, suggestion_command, ActionExecutor};
use assistant_contract::{ExecutionResult, Intent, SuggestedAction};
use leptos::*;
use serde_json::{Map, Value};
use ui_controller::UiController;

/// One line of the assistant conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    /// Command typed by the user with the intent it was labelled with.
    User {
        /// Command text.
        text: String,
        /// Intent passed to the dispatcher.
        intent: Intent,
    },
    /// Dispatcher response.
    Assistant(ExecutionResult),
}

#[derive(Clone, Copy)]
/// Leptos context for submitting commands and reading the conversation.
pub struct AssistantContext {
    /// Shared controller; screens register control points against it.
    pub controller: StoredValue<UiController>,
    /// Dispatcher driving the controller.
    pub executor: StoredValue<Rc<ActionExecutor>>,
    /// Conversation so far.
    pub transcript: RwSignal<Vec<TranscriptEntry>>,
    /// Whether a command is in flight.
    pub busy: RwSignal<bool>,
}

impl AssistantContext {
    /// Creates the context signals under the current reactive owner.
    pub fn new(executor: ActionExecutor) -> Self {
        Self {
            controller: store_value(executor.controller().clone()),
            executor: store_value(Rc::new(executor)),
            transcript: create_rw_signal(Vec::new()),
            busy: create_rw_signal(false),
        }
    }

    /// Classifies and dispatches `text` in the background. Blank input is ignored, as is any
    /// submission while a command is in flight.
    pub fn submit(&self, text: impl Into<String>) {
        let text = text.into();
        let command = text.trim();
        if command.is_empty() {
            return;
        }
        self.dispatch(command.to_string(), classify_intent(command));
    }

    /// Replays a suggested follow-up. Unknown keys fall back to classifying the label.
    pub fn submit_suggestion(&self, suggestion: &SuggestedAction) {
        match suggestion_command(&suggestion.action) {
            Some((intent, command)) => self.dispatch(command.to_string(), intent),
            None => self.submit(suggestion.label.clone()),
        }
    }

    fn dispatch(&self, command: String, intent: Intent) {
        // Sequences share the controller; a second one would interleave its steps.
        if self.busy.get_untracked() {
            logging::warn!("assistant busy, dropped `{command}`");
            return;
        }
        self.busy.set(true);
        let context = self.clone();
        spawn_local(async move {
            context
                .execute(&command, intent, &Value::Object(Map::new()))
                .await;
        });
    }

    /// Dispatches one command, recording both sides in the transcript.
    pub async fn execute(&self, command: &str, intent: Intent, params: &Value) -> ExecutionResult {
        self.transcript.update(|entries| {
            entries.push(TranscriptEntry::User {
                text: command.to_string(),
                intent,
            })
        });
        self.busy.set(true);

        let executor = self.executor.get_value();
        let result = executor.execute(command, intent, params).await;

        self.transcript
            .update(|entries| entries.push(TranscriptEntry::Assistant(result.clone())));
        self.busy.set(false);
        result
    }

    /// Logical name of the page the controller last navigated to.
    pub fn current_page(&self) -> Option<String> {
        self.controller
            .with_value(|controller| controller.get_current_state().current_page)
    }
}

#[component]
/// Provides [`AssistantContext`] to descendant components.
pub fn AssistantProvider(
    /// Controller wired to the host surface, router, and settle timer.
    controller: UiController,
    /// Fixed seed for synthetic payloads; the wall clock seeds when absent.
    #[prop(optional)]
    seed: Option<u64>,
    children: Children,
) -> impl IntoView {
    let executor = match seed {
        Some(seed) => ActionExecutor::with_seed(controller, seed),
        None => ActionExecutor::new(controller),
    };
    provide_context(AssistantContext::new(executor));

    children().into_view()
}

/// Returns the current [`AssistantContext`].
///
/// # Panics
///
/// Panics if called outside [`AssistantProvider`].
pub fn use_assistant() -> AssistantContext {
    use_context::<AssistantContext>().expect("AssistantContext not provided")
}
