//! Best-effort free-text scanner that turns phrases such as "go to diagnostics" or "export this as
//! csv" into [`UiAction`] values.
//!
//! Detection is a pure function of the input text and the static control-point tables; it never
//! consults the registry. Detected actions are returned in the order their phrases appear.

use std::sync::OnceLock;

use assistant_contract::UiAction;
use regex::Regex;
use serde_json::{Map, Value};

use crate::catalog::ControlTables;

const EXPORT_DATA_TYPES: &[&str] = &[
    "diagnostics",
    "playbook",
    "analytics",
    "insights",
    "calendar",
    "content",
    "dashboard",
    "report",
];

const DEFAULT_EXPORT_DATA_TYPE: &str = "report";
const DEFAULT_WORKFLOW: &str = "content_creation";

struct DetectPatterns {
    navigate: Regex,
    open: Regex,
    modal: Regex,
    click: Regex,
    workflow: Regex,
    export_verb: Regex,
    export_format: Regex,
    fill_into: Regex,
    fill_with: Regex,
}

fn patterns() -> &'static DetectPatterns {
    static PATTERNS: OnceLock<DetectPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |raw: &str| Regex::new(raw).expect("detect pattern should compile");
        DetectPatterns {
            navigate: compile(
                r"(?i)\b(?:go|navigate|take me|switch|head|jump)(?:\s+back)?\s+to\s+(?:the\s+)?([a-z]+)(?:\s+([a-z]+))?",
            ),
            open: compile(r"(?i)\b(?:open|show me|show)\s+(?:the\s+)?([a-z]+)(?:\s+([a-z]+))?"),
            modal: compile(
                r"(?i)\b(open|show|display|close|hide|dismiss)\s+(?:the\s+)?([a-z]+(?:\s+[a-z]+)?)\s+(?:modal|dialog|menu|panel|popup)\b",
            ),
            click: compile(r"(?i)\bclick(?:\s+on)?\s+(?:the\s+)?([a-z0-9_.\-]+)"),
            workflow: compile(
                r"(?i)\b(?:create|start|begin|launch|run)\s+(?:(?:a|an|the|new)\s+)*(?:([a-z_]+)\s+)?workflow\b",
            ),
            export_verb: compile(r"(?i)\b(?:export|download)\b"),
            export_format: compile(r"(?i)\b(?:as|to|in)\s+(?:an?\s+)?(csv|pdf|json|xlsx|excel|png)\b"),
            fill_into: compile(
                r#"(?i)\b(?:fill\s+in|fill|enter|type)\s+["']?(.+?)["']?\s+(?:in|into)\s+(?:the\s+)?([a-z]+)(?:\s+field)?\b"#,
            ),
            fill_with: compile(
                r#"(?i)\b(?:fill\s+in|fill|set)\s+(?:the\s+)?([a-z]+)(?:\s+field)?\s+(?:with|to)\s+["']?(.+?)["']?\s*$"#,
            ),
        }
    })
}

/// Scans `text` for action phrases.
pub fn detect_actions(text: &str, tables: &ControlTables) -> Vec<UiAction> {
    let patterns = patterns();
    let mut found: Vec<(usize, UiAction)> = Vec::new();

    let mut modal_spans = Vec::new();
    for captures in patterns.modal.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let words = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        let Some(name) = resolve_modal_name(words, tables) else {
            continue;
        };
        let verb = captures
            .get(1)
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_default();
        let show = !matches!(verb.as_str(), "close" | "hide" | "dismiss");
        modal_spans.push(whole.range());
        found.push((
            whole.start(),
            UiAction::Modal {
                target: name,
                show,
            },
        ));
    }

    for captures in patterns.navigate.captures_iter(text) {
        if let Some((start, route)) = route_capture(&captures, tables) {
            found.push((start, UiAction::navigate(route)));
        }
    }
    for captures in patterns.open.captures_iter(text) {
        let Some((start, route)) = route_capture(&captures, tables) else {
            continue;
        };
        if modal_spans.iter().any(|span| span.start == start) {
            continue;
        }
        found.push((start, UiAction::navigate(route)));
    }

    for captures in patterns.click.captures_iter(text) {
        if let (Some(whole), Some(target)) = (captures.get(0), captures.get(1)) {
            let target = target.as_str().trim_end_matches(['.', '-']);
            if !target.is_empty() {
                found.push((whole.start(), UiAction::click(target)));
            }
        }
    }

    for captures in patterns.workflow.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let name = match captures.get(1).map(|m| m.as_str().to_lowercase()) {
            None => DEFAULT_WORKFLOW.to_string(),
            Some(word) if word == "content" || word == "creation" => DEFAULT_WORKFLOW.to_string(),
            Some(word) => word,
        };
        found.push((whole.start(), UiAction::workflow(name, None)));
    }

    let export_verb = patterns
        .export_verb
        .find_iter(text)
        .find(|verb| !modal_spans.iter().any(|span| span.contains(&verb.start())));
    if let Some(verb) = export_verb {
        let rest = &text[verb.end()..];
        let format = patterns
            .export_format
            .captures(rest)
            .and_then(|captures| captures.get(1))
            .map(|m| normalize_format(m.as_str()));
        let lower = rest.to_lowercase();
        let data_type = EXPORT_DATA_TYPES
            .iter()
            .find(|data_type| lower.contains(*data_type))
            .copied()
            .unwrap_or(DEFAULT_EXPORT_DATA_TYPE);
        found.push((verb.start(), UiAction::export(data_type, format)));
    }

    for captures in patterns.fill_into.captures_iter(text) {
        if let (Some(whole), Some(value), Some(field)) =
            (captures.get(0), captures.get(1), captures.get(2))
        {
            if let Some(action) = form_action(field.as_str(), value.as_str(), tables) {
                found.push((whole.start(), action));
            }
        }
    }
    for captures in patterns.fill_with.captures_iter(text) {
        if let (Some(whole), Some(field), Some(value)) =
            (captures.get(0), captures.get(1), captures.get(2))
        {
            if let Some(action) = form_action(field.as_str(), value.as_str(), tables) {
                found.push((whole.start(), action));
            }
        }
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, action)| action).collect()
}

fn route_capture(captures: &regex::Captures<'_>, tables: &ControlTables) -> Option<(usize, String)> {
    let whole = captures.get(0)?;
    let first = captures.get(1)?.as_str();
    let two_words = captures
        .get(2)
        .and_then(|second| tables.route_for_word(&format!("{first} {}", second.as_str())));
    let route = two_words.or_else(|| tables.route_for_word(first))?;
    Some((whole.start(), route.to_string()))
}

fn resolve_modal_name(words: &str, tables: &ControlTables) -> Option<String> {
    let camel = camel_case(words);
    if camel.is_empty() {
        return None;
    }
    let candidates = [
        format!("{camel}Modal"),
        format!("{camel}Menu"),
        camel.clone(),
    ];
    let names = tables.modal_names();
    candidates.iter().find_map(|candidate| {
        names
            .iter()
            .find(|name| name.eq_ignore_ascii_case(candidate))
            .map(|name| name.to_string())
    })
}

fn camel_case(words: &str) -> String {
    let mut out = String::new();
    for (index, word) in words.split_whitespace().enumerate() {
        let word = word.to_lowercase();
        if index == 0 {
            out.push_str(&word);
        } else {
            out.push_str(&capitalize(&word));
        }
    }
    out
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn normalize_format(raw: &str) -> String {
    match raw.to_lowercase().as_str() {
        "excel" => "xlsx".to_string(),
        other => other.to_string(),
    }
}

fn form_action(field: &str, value: &str, tables: &ControlTables) -> Option<UiAction> {
    let field = field.to_lowercase();
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let form = tables.form_with_field(&field)?;
    let mut data = Map::new();
    data.insert(field, Value::String(value.to_string()));
    Some(UiAction::fill_form(form.name.clone(), data))
}
