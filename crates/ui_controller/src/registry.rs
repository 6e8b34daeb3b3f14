//! Named registry of live state handles exposed by mounted screens.
//!
//! Registration is last-write-wins per name. Every registration returns a [`StateRefToken`];
//! unregistering with a token that a later registration already replaced is a no-op, so a screen
//! tearing down never removes its successor's binding.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use assistant_contract::StateRefToken;
use serde_json::Value;

/// Registry name of the content-workflow capability.
pub const CONTENT_STORE_REF: &str = "contentStore";

/// Registry name of the export-handler map.
pub const EXPORT_HANDLERS_REF: &str = "exportHandlers";

/// Setter invoked with one value.
pub type StateSetter = Rc<dyn Fn(Value)>;

/// Export callback invoked with the requested format.
pub type ExportHandler = Rc<dyn Fn(Option<&str>)>;

/// Content-workflow capability registered under [`CONTENT_STORE_REF`].
pub trait WorkflowStore {
    /// Starts the named workflow.
    fn start_workflow(&self, name: &str, params: &Value);
}

/// One registered handle.
#[derive(Clone)]
pub enum StateRef {
    /// Value setter or named function.
    Setter(StateSetter),
    /// Workflow capability.
    WorkflowStore(Rc<dyn WorkflowStore>),
    /// Export handlers keyed by data type.
    ExportHandlers(Rc<BTreeMap<String, ExportHandler>>),
}

#[derive(Clone)]
struct Binding {
    token: StateRefToken,
    state_ref: StateRef,
}

#[derive(Default)]
struct RegistryState {
    next_token: u64,
    by_name: BTreeMap<String, Binding>,
}

/// Shared state-ref registry.
#[derive(Clone, Default)]
pub struct StateRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl StateRegistry {
    /// Binds `name` to `state_ref`, replacing any previous binding.
    pub fn register(&self, name: impl Into<String>, state_ref: StateRef) -> StateRefToken {
        let mut state = self.state.borrow_mut();
        state.next_token = state.next_token.saturating_add(1);
        let token = StateRefToken(state.next_token);
        state
            .by_name
            .insert(name.into(), Binding { token, state_ref });
        token
    }

    /// Removes the binding for `name`. Returns whether one existed.
    pub fn unregister(&self, name: &str) -> bool {
        self.state.borrow_mut().by_name.remove(name).is_some()
    }

    /// Removes the binding for `name` only if it still belongs to `token`.
    pub fn unregister_token(&self, name: &str, token: StateRefToken) -> bool {
        let mut state = self.state.borrow_mut();
        let owned = state
            .by_name
            .get(name)
            .is_some_and(|binding| binding.token == token);
        if owned {
            state.by_name.remove(name);
        }
        owned
    }

    /// Returns the current handle for `name`.
    pub fn get(&self, name: &str) -> Option<StateRef> {
        self.state
            .borrow()
            .by_name
            .get(name)
            .map(|binding| binding.state_ref.clone())
    }

    /// Returns the current setter for `name`, ignoring capability handles.
    pub fn setter(&self, name: &str) -> Option<StateSetter> {
        match self.get(name)? {
            StateRef::Setter(setter) => Some(setter),
            _ => None,
        }
    }

    /// Returns the registered content-workflow capability.
    pub fn workflow_store(&self) -> Option<Rc<dyn WorkflowStore>> {
        match self.get(CONTENT_STORE_REF)? {
            StateRef::WorkflowStore(store) => Some(store),
            _ => None,
        }
    }

    /// Returns the registered export handler for a data type.
    pub fn export_handler(&self, data_type: &str) -> Option<ExportHandler> {
        match self.get(EXPORT_HANDLERS_REF)? {
            StateRef::ExportHandlers(handlers) => handlers.get(data_type).cloned(),
            _ => None,
        }
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.state.borrow().by_name.keys().cloned().collect()
    }
}
