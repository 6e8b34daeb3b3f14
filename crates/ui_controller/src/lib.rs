//! Assistant UI controller: a registry of live control points exposed by mounted screens, a fixed
//! vocabulary of [`UiAction`](assistant_contract::UiAction) kinds executed against that registry
//! and an abstract UI surface, ordered action sequences, and a free-text action scanner.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod catalog;
mod config;
mod controller;
mod detect;
mod error;
mod registry;
mod surface;

pub use catalog::{
    control_point_catalog_json, control_tables, ButtonEntry, ControlTables, FormEntry, FormField,
    ModalEntry, ModalGroup, RouteEntry,
};
pub use config::ControllerConfig;
pub use controller::{path_with_query, setter_name, ExecutedAction, StateRefHandle, UiController};
pub use detect::detect_actions;
pub use error::ControlError;
pub use registry::{
    ExportHandler, StateRef, StateRegistry, StateSetter, WorkflowStore, CONTENT_STORE_REF,
    EXPORT_HANDLERS_REF,
};
pub use surface::{
    ElementQuery, ImmediateSettle, MemoryElement, MemoryNavigator, MemorySettle, MemoryUiSurface,
    Navigator, NoopNavigator, NoopUiSurface, Settle, SettleFuture, SurfaceElement, UiSurface,
};
