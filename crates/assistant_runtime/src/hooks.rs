//! Registration hooks screens use to expose control points to the assistant.
//!
//! Every hook registers against the shared controller and unregisters on cleanup. Teardown uses the
//! registration token, so a screen that unmounts after a newer screen re-registered the same name
//! leaves the newer binding in place.

use std::{collections::BTreeMap, rc::Rc};

use leptos::*;
use serde::de::DeserializeOwned;
use serde_json::Value;
use ui_controller::{ExportHandler, StateRefHandle, UiController, WorkflowStore};

use crate::context::use_assistant;

/// Binds `name` to a signal setter. `null` resets the signal to `T::default()`; values that do not
/// decode into `T` are logged and dropped.
pub fn bind_control_point<T>(
    controller: &UiController,
    name: impl Into<String>,
    signal: RwSignal<T>,
) -> StateRefHandle
where
    T: DeserializeOwned + Default + 'static,
{
    let name = name.into();
    let label = name.clone();
    controller.register_state_ref(name, move |value| match decode_value::<T>(value) {
        Ok(decoded) => signal.set(decoded),
        Err(err) => logging::warn!("control point `{label}` rejected value: {err}"),
    })
}

fn decode_value<T: DeserializeOwned + Default>(value: Value) -> Result<T, serde_json::Error> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value)
}

fn unregister_on_cleanup(handle: StateRefHandle) -> StateRefHandle {
    let owned = handle.clone();
    on_cleanup(move || {
        owned.unregister();
    });
    handle
}

/// Exposes `signal` to the assistant under `name` for the lifetime of the calling component.
pub fn use_control_point<T>(name: impl Into<String>, signal: RwSignal<T>) -> StateRefHandle
where
    T: DeserializeOwned + Default + 'static,
{
    let controller = use_assistant().controller.get_value();
    unregister_on_cleanup(bind_control_point(&controller, name, signal))
}

/// Exposes a named function, such as a button-config `function` target.
pub fn use_control_action(name: impl Into<String>, action: impl Fn() + 'static) -> StateRefHandle {
    let controller = use_assistant().controller.get_value();
    unregister_on_cleanup(controller.register_state_ref(name, move |_| action()))
}

/// Exposes the content-workflow capability.
pub fn use_workflow_store(store: Rc<dyn WorkflowStore>) -> StateRefHandle {
    let controller = use_assistant().controller.get_value();
    unregister_on_cleanup(controller.register_workflow_store(store))
}

/// Exposes export handlers keyed by data type.
pub fn use_export_handlers(handlers: BTreeMap<String, ExportHandler>) -> StateRefHandle {
    let controller = use_assistant().controller.get_value();
    unregister_on_cleanup(controller.register_export_handlers(handlers))
}
