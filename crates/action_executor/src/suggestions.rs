//! Follow-up suggestion keys and the commands they replay.

use assistant_contract::Intent;

/// Suggestion key, the intent it dispatches with, and the command text sent.
const SUGGESTION_COMMANDS: &[(&str, Intent, &str)] = &[
    ("generate_outline", Intent::Generic, "open the topic modal"),
    ("research_keywords", Intent::Analyze, "analyze seo keywords"),
    ("schedule_content", Intent::Schedule, "schedule this post"),
    ("export_report", Intent::Export, "export the analytics report as pdf"),
    ("optimize_content", Intent::Optimize, "optimize content engagement"),
    ("compare_periods", Intent::Analyze, "analyze performance this quarter"),
    ("apply_recommendations", Intent::Generic, "open the implementation modal"),
    ("preview_changes", Intent::Show, "show the playbook"),
    ("analyze_performance", Intent::Analyze, "analyze performance"),
    ("export_view", Intent::Export, "export this view as pdf"),
    ("share_export", Intent::Generic, "open the export menu"),
    ("schedule_export", Intent::Automate, "automate weekly reporting"),
    (
        "confirm_slot",
        Intent::Generic,
        "go to content studio and open the schedule modal",
    ),
    ("pick_time", Intent::Schedule, "schedule for next week"),
    ("fix_critical", Intent::Generic, "open the fix modal"),
    ("export_issues", Intent::Export, "export the diagnostics as csv"),
    ("review_rules", Intent::Generic, "open the implementation modal"),
    ("pause_automation", Intent::Navigate, "go to settings"),
    ("open_docs", Intent::Navigate, "go to documents"),
    ("contact_support", Intent::Navigate, "go to settings"),
    ("navigate_dashboard", Intent::Navigate, "go to dashboard"),
    ("navigate_create", Intent::Navigate, "go to create"),
    ("navigate_analytics", Intent::Navigate, "go to analytics"),
    ("navigate_diagnostics", Intent::Navigate, "go to diagnostics"),
];

/// Resolves a [`SuggestedAction::action`] key to the intent and command it replays.
///
/// [`SuggestedAction::action`]: assistant_contract::SuggestedAction::action
pub fn suggestion_command(key: &str) -> Option<(Intent, &'static str)> {
    SUGGESTION_COMMANDS
        .iter()
        .find(|(candidate, _, _)| *candidate == key)
        .map(|(_, intent, command)| (*intent, *command))
}
