//! Placeholder screens that expose their modals, buttons, and forms to the assistant.

use std::{collections::BTreeMap, rc::Rc};

use assistant_contract::UiAction;
use assistant_runtime::{use_assistant, use_control_action, use_control_point, use_export_handlers};
use leptos::*;
use serde_json::Value;
use ui_controller::{control_tables, setter_name, ButtonEntry, ExportHandler, FormField, ModalEntry};

/// Forms rendered on each screen.
const SCREEN_FORMS: &[(&str, &[&str])] = &[
    ("create", &["contentBrief", "schedule"]),
    ("calendar", &["schedule"]),
    ("content", &["search"]),
    ("login", &["login"]),
];

/// Choices offered by select fields.
const SELECT_OPTIONS: &[(&str, &[&str])] = &[
    ("tone", &["professional", "friendly", "bold"]),
    ("channel", &["linkedin", "email", "blog", "social"]),
];

#[component]
/// Screen for one logical route.
pub fn ScreenPlaceholder(
    /// Logical route name from the control-point tables.
    route: String,
) -> impl IntoView {
    let tables = control_tables();
    let status = create_rw_signal(String::new());

    let modals = tables
        .modal_groups
        .iter()
        .filter(|group| group.route == route)
        .flat_map(|group| group.modals.iter())
        .map(|modal| {
            let open = create_rw_signal(Value::Null);
            use_control_point(modal.setter.clone(), open);
            (modal.clone(), open)
        })
        .collect::<Vec<_>>();

    let buttons = tables
        .buttons
        .iter()
        .filter(|button| button_on_screen(button, &route, &modals))
        .map(|button| view! { <ScreenButton button=button.clone() modals=modals.clone() status=status /> })
        .collect_view();

    let mut handlers: BTreeMap<String, ExportHandler> = BTreeMap::new();
    let export_type = route.clone();
    handlers.insert(
        route.clone(),
        Rc::new(move |format: Option<&str>| {
            let format = format.unwrap_or("pdf");
            logging::log!("exporting {export_type} as {format}");
            status.set(format!("Exported {export_type} as {format}"));
        }),
    );
    use_export_handlers(handlers);

    let forms = SCREEN_FORMS
        .iter()
        .find(|(screen, _)| *screen == route)
        .map(|(_, forms)| forms.iter().filter_map(|name| tables.form(name)).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
        .map(|form| {
            let fields = form
                .fields
                .iter()
                .map(|field| view! { <FormFieldInput field=field.clone() /> })
                .collect_view();
            view! {
                <form class="screen-form" data-ai-target=form.name.clone() on:submit=|ev| ev.prevent_default()>
                    {fields}
                </form>
            }
        })
        .collect_view();

    let panels = modals
        .iter()
        .map(|(modal, open)| view! { <ModalPanel modal=modal.clone() open=*open /> })
        .collect_view();

    let export_label = format!("Export {route}");
    view! {
        <section class="screen" data-screen=route.clone()>
            <h1>{route.clone()}</h1>
            <div class="screen-summary" data-ai-target=format!("{route}.summary")>
                <p>{format!("Overview for {route}.")}</p>
            </div>
            <div class="screen-actions">
                {buttons}
                <button type="button" data-export=route.clone() on:click=move |_| status.set(export_label.clone())>
                    "Export"
                </button>
            </div>
            {forms}
            {panels}
            <p class="screen-status" role="status">{move || status.get()}</p>
        </section>
    }
}

fn button_on_screen(button: &ButtonEntry, route: &str, modals: &[(ModalEntry, RwSignal<Value>)]) -> bool {
    if let Some(modal) = &button.modal {
        return modals.iter().any(|(entry, _)| &entry.name == modal);
    }
    if button.workflow.is_some() {
        return route == "create";
    }
    button.function.is_some() && button.key.split('.').next() == Some(route)
}

#[component]
fn ScreenButton(
    button: ButtonEntry,
    modals: Vec<(ModalEntry, RwSignal<Value>)>,
    status: RwSignal<String>,
) -> impl IntoView {
    let key = button.key.clone();

    let on_click: Rc<dyn Fn()> = if let Some(modal) = button.modal {
        match modals.into_iter().find(|(entry, _)| entry.name == modal) {
            Some((entry, open)) => Rc::new(move || open.set(entry.open_value.clone())),
            None => Rc::new(|| ()),
        }
    } else if let Some(workflow) = button.workflow {
        let controller = use_assistant().controller;
        Rc::new(move || {
            let controller = controller.get_value();
            let action = UiAction::workflow(workflow.clone(), None);
            spawn_local(async move {
                controller.execute(action).await;
            });
        })
    } else if let Some(function) = button.function {
        let label = function.clone();
        let run = move || {
            logging::log!("running {label}");
            status.set(format!("{label} finished"));
        };
        use_control_action(function, run.clone());
        Rc::new(run)
    } else {
        Rc::new(|| ())
    };

    view! {
        <button type="button" data-ai-target=key.clone() on:click=move |_| on_click()>
            {key}
        </button>
    }
}

#[component]
fn ModalPanel(modal: ModalEntry, open: RwSignal<Value>) -> impl IntoView {
    let is_closed = move || matches!(open.get(), Value::Null | Value::Bool(false));

    view! {
        <div class="screen-modal" role="dialog" data-ai-target=modal.name.clone() hidden=is_closed>
            <h2>{modal.name.clone()}</h2>
            <p>{move || format!("State: {}", open.get())}</p>
            <button type="button" on:click=move |_| open.set(Value::Null)>"Close"</button>
        </div>
    }
}

#[component]
fn FormFieldInput(field: FormField) -> impl IntoView {
    let value = create_rw_signal(String::new());
    use_control_point(setter_name(&field.field), value);

    let label = field.field.clone();
    let control = match parse_selector(&field.selector) {
        Some(("select", _, name)) => {
            let options = SELECT_OPTIONS
                .iter()
                .find(|(select, _)| *select == field.field)
                .map(|(_, options)| *options)
                .unwrap_or_default()
                .iter()
                .map(|option| view! { <option value=*option>{*option}</option> })
                .collect_view();
            view! {
                <select
                    name=name.to_string()
                    prop:value=move || value.get()
                    on:change=move |ev| value.set(event_target_value(&ev))
                >
                    <option value="">"Any"</option>
                    {options}
                </select>
            }
            .into_view()
        }
        Some((_, "type", kind)) => view! {
            <input
                type=kind.to_string()
                name=field.field.clone()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_view(),
        Some((_, _, name)) => view! {
            <input
                type="text"
                name=name.to_string()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_view(),
        None => {
            logging::warn!("unsupported selector `{}` for field `{}`", field.selector, field.field);
            ().into_view()
        }
    };

    view! {
        <label class="screen-field">
            <span>{label}</span>
            {control}
        </label>
    }
}

/// Splits `tag[attr='value']` into its parts.
fn parse_selector(selector: &str) -> Option<(&str, &str, &str)> {
    let (tag, rest) = selector.split_once('[')?;
    let (attr, value) = rest.strip_suffix(']')?.split_once('=')?;
    Some((tag, attr, value.trim_matches('\'')))
}
