//! Resolution failures raised inside the controller.
//!
//! These never cross the controller boundary: [`crate::UiController::execute`] converts each one
//! into a failed [`assistant_contract::ActionOutcome`].

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Why an action could not be applied.
pub enum ControlError {
    /// The logical route name is not in the route table.
    #[error("unknown navigation target `{0}`")]
    UnknownRoute(String),
    /// No modal group declares the modal name.
    #[error("unknown modal `{0}`")]
    UnknownModal(String),
    /// A setter the action needs has not been registered.
    #[error("no state ref registered for `{0}`")]
    MissingStateRef(String),
    /// A required capability handle has not been registered.
    #[error("required capability `{0}` is not registered")]
    MissingCapability(&'static str),
    /// No element matched the marker or selector.
    #[error("element `{0}` not found")]
    ElementNotFound(String),
    /// The form name is not in the form table.
    #[error("unknown form `{0}`")]
    UnknownForm(String),
    /// Marker, button config, and selector lookups all missed.
    #[error("nothing to click for `{0}`")]
    NoButtonMatch(String),
    /// Neither an export handler nor an export trigger exists for the data type.
    #[error("no export handler or trigger for `{0}`")]
    NoExportTarget(String),
}
