//! Leptos integration for the assistant: a provider that owns the controller and dispatcher,
//! registration hooks that tie control points to component lifetimes, and a console component.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod console;
mod context;
mod hooks;

pub use console::AssistantConsole;
pub use context::{use_assistant, AssistantContext, AssistantProvider, TranscriptEntry};
pub use hooks::{
    bind_control_point, use_control_action, use_control_point, use_export_handlers,
    use_workflow_store,
};
