//! Static control-point tables: routes, modal groups, button configs, and form field maps.
//!
//! The tables are authored in `control_points.toml`, validated by the build script, and loaded
//! once from the generated JSON payload.

use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::Value;

include!(concat!(env!("OUT_DIR"), "/control_points_generated.rs"));

/// Logical route entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteEntry {
    /// Logical route name.
    pub name: String,
    /// Concrete path.
    pub path: String,
    /// Alternate words that resolve to this route in free text.
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Modal binding inside a screen group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModalEntry {
    /// Logical modal name.
    pub name: String,
    /// Registered setter invoked to open or close the modal.
    pub setter: String,
    /// Value passed to the setter on open.
    pub open_value: Value,
}

/// Modals owned by one screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModalGroup {
    /// Screen name.
    pub screen: String,
    /// Route the screen is mounted at.
    pub route: String,
    /// Modal bindings.
    pub modals: Vec<ModalEntry>,
}

impl ModalGroup {
    fn modal(&self, name: &str) -> Option<&ModalEntry> {
        self.modals.iter().find(|modal| modal.name == name)
    }
}

/// Button re-dispatch target. The build script guarantees exactly one field is set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ButtonEntry {
    /// `category.action` key.
    pub key: String,
    /// Workflow to start.
    pub workflow: Option<String>,
    /// Route to navigate to.
    pub navigate: Option<String>,
    /// Modal to open.
    pub modal: Option<String>,
    /// Registered function to invoke.
    pub function: Option<String>,
}

/// One form field binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormField {
    /// Field name used in action data and setter naming.
    pub field: String,
    /// DOM selector used when no setter is registered.
    pub selector: String,
}

/// Field map for one form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormEntry {
    /// Logical form name.
    pub name: String,
    /// Field bindings in fill order.
    pub fields: Vec<FormField>,
}

/// All static lookup tables used by the controller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ControlTables {
    /// Route table.
    pub routes: Vec<RouteEntry>,
    /// Modal groups in declaration order.
    pub modal_groups: Vec<ModalGroup>,
    /// Button table.
    pub buttons: Vec<ButtonEntry>,
    /// Form table.
    pub forms: Vec<FormEntry>,
}

impl ControlTables {
    /// Returns the path for a logical route name.
    pub fn route(&self, name: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|route| route.name == name)
            .map(|route| route.path.as_str())
    }

    /// Resolves a free-text word or phrase to a route name via names and aliases.
    pub fn route_for_word(&self, word: &str) -> Option<&str> {
        let word = word.trim().to_lowercase();
        self.routes
            .iter()
            .find(|route| route.name == word || route.aliases.iter().any(|alias| *alias == word))
            .map(|route| route.name.as_str())
    }

    /// Returns the modal binding for `name`, preferring the group mounted at `current_route`.
    pub fn modal(&self, name: &str, current_route: Option<&str>) -> Option<&ModalEntry> {
        current_route
            .and_then(|route| {
                self.modal_groups
                    .iter()
                    .filter(|group| group.route == route)
                    .find_map(|group| group.modal(name))
            })
            .or_else(|| self.modal_groups.iter().find_map(|group| group.modal(name)))
    }

    /// Returns every distinct modal name.
    pub fn modal_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for modal in self.modal_groups.iter().flat_map(|group| &group.modals) {
            if !names.contains(&modal.name.as_str()) {
                names.push(modal.name.as_str());
            }
        }
        names
    }

    /// Returns the setter names a screen mounted at `route` is expected to register.
    pub fn modal_setters_for_route(&self, route: &str) -> Vec<&str> {
        self.modal_groups
            .iter()
            .filter(|group| group.route == route)
            .flat_map(|group| group.modals.iter().map(|modal| modal.setter.as_str()))
            .collect()
    }

    /// Returns the button config for a `category.action` key.
    pub fn button(&self, key: &str) -> Option<&ButtonEntry> {
        self.buttons.iter().find(|button| button.key == key)
    }

    /// Returns the form field map for a form name.
    pub fn form(&self, name: &str) -> Option<&FormEntry> {
        self.forms.iter().find(|form| form.name == name)
    }

    /// Returns the first form declaring `field`.
    pub fn form_with_field(&self, field: &str) -> Option<&FormEntry> {
        self.forms
            .iter()
            .find(|form| form.fields.iter().any(|entry| entry.field == field))
    }
}

/// Returns the generated control-point tables.
pub fn control_tables() -> &'static ControlTables {
    static TABLES: OnceLock<ControlTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        serde_json::from_str(CONTROL_POINT_CATALOG_JSON)
            .expect("generated control point catalog should parse")
    })
}

/// Returns the generated control-point catalog JSON payload.
pub fn control_point_catalog_json() -> &'static str {
    CONTROL_POINT_CATALOG_JSON
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn routes_cover_every_navigation_target() {
        let tables = control_tables();
        for name in [
            "dashboard",
            "content",
            "calendar",
            "create",
            "documents",
            "diagnostics",
            "playbook",
            "insights",
            "analytics",
            "assets",
            "settings",
            "login",
        ] {
            assert!(tables.route(name).is_some(), "missing route {name}");
        }
        assert_eq!(tables.route("dashboard"), Some("/demo/dashboard"));
        assert_eq!(tables.route("unknown-xyz"), None);
    }

    #[test]
    fn aliases_resolve_to_route_names() {
        let tables = control_tables();
        assert_eq!(tables.route_for_word("Home"), Some("dashboard"));
        assert_eq!(tables.route_for_word("reports"), Some("analytics"));
        assert_eq!(tables.route_for_word("nowhere"), None);
    }

    #[test]
    fn modal_lookup_prefers_current_screen_group() {
        let tables = control_tables();
        let fix = tables.modal("fixModal", None).expect("fix modal");
        assert_eq!(fix.setter, "setShowFixModal");
        assert_eq!(fix.open_value, json!(true));

        let insight = tables
            .modal("insightModal", Some("insights"))
            .expect("insight modal");
        assert_eq!(insight.open_value, json!("overview"));
    }

    #[test]
    fn diagnostics_route_exposes_its_modal_setters() {
        let setters = control_tables().modal_setters_for_route("diagnostics");
        assert_eq!(
            setters,
            vec![
                "setShowFixModal",
                "setShowImplementationModal",
                "setShowExportMenu"
            ]
        );
    }

    #[test]
    fn form_lookup_by_field_finds_owner() {
        let tables = control_tables();
        assert_eq!(
            tables.form_with_field("topic").map(|form| form.name.as_str()),
            Some("contentBrief")
        );
        assert!(tables.button("diagnostics.fix").is_some());
    }
}
