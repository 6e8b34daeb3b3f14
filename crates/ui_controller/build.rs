use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RouteEntry {
    name: String,
    path: String,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModalEntry {
    name: String,
    setter: String,
    open_value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModalGroup {
    screen: String,
    route: String,
    modals: Vec<ModalEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ButtonEntry {
    key: String,
    workflow: Option<String>,
    navigate: Option<String>,
    modal: Option<String>,
    function: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FormField {
    field: String,
    selector: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FormEntry {
    name: String,
    fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ControlPointCatalog {
    schema_version: u32,
    routes: Vec<RouteEntry>,
    modal_groups: Vec<ModalGroup>,
    buttons: Vec<ButtonEntry>,
    forms: Vec<FormEntry>,
}

fn validate(catalog: &ControlPointCatalog) -> Result<(), String> {
    if catalog.schema_version != 1 {
        return Err(format!(
            "control point schema mismatch: expected 1 found {}",
            catalog.schema_version
        ));
    }

    let mut route_words = BTreeSet::new();
    for route in &catalog.routes {
        if !route.path.starts_with('/') {
            return Err(format!("route `{}` path must start with `/`", route.name));
        }
        for word in std::iter::once(&route.name).chain(&route.aliases) {
            if !route_words.insert(word.to_lowercase()) {
                return Err(format!("duplicate route name or alias `{word}`"));
            }
        }
    }
    let route_exists = |name: &str| catalog.routes.iter().any(|route| route.name == name);

    let mut modal_names = BTreeSet::new();
    for group in &catalog.modal_groups {
        if !route_exists(&group.route) {
            return Err(format!(
                "modal group `{}` references unknown route `{}`",
                group.screen, group.route
            ));
        }
        for modal in &group.modals {
            modal_names.insert(modal.name.as_str());
        }
    }

    let mut button_keys = BTreeSet::new();
    for button in &catalog.buttons {
        if !button.key.contains('.') {
            return Err(format!("button key `{}` must be `category.action`", button.key));
        }
        if !button_keys.insert(button.key.as_str()) {
            return Err(format!("duplicate button key `{}`", button.key));
        }
        let targets = [
            button.workflow.is_some(),
            button.navigate.is_some(),
            button.modal.is_some(),
            button.function.is_some(),
        ];
        if targets.iter().filter(|set| **set).count() != 1 {
            return Err(format!(
                "button `{}` must name exactly one of workflow/navigate/modal/function",
                button.key
            ));
        }
        if let Some(route) = button.navigate.as_deref() {
            if !route_exists(route) {
                return Err(format!("button `{}` navigates to unknown route `{route}`", button.key));
            }
        }
        if let Some(modal) = button.modal.as_deref() {
            if !modal_names.contains(modal) {
                return Err(format!("button `{}` opens unknown modal `{modal}`", button.key));
            }
        }
    }

    let mut form_names = BTreeSet::new();
    for form in &catalog.forms {
        if !form_names.insert(form.name.as_str()) {
            return Err(format!("duplicate form `{}`", form.name));
        }
        if form.fields.is_empty() {
            return Err(format!("form `{}` has no fields", form.name));
        }
    }

    Ok(())
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("control_points.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: ControlPointCatalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if let Err(err) = validate(&catalog) {
        panic!("invalid control point catalog {}: {err}", path.display());
    }

    let json = serde_json::to_string_pretty(&catalog).expect("serialize control point catalog");
    let generated = format!(
        "/// Build-time generated control point catalog JSON.\n\
pub const CONTROL_POINT_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("control_points_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
