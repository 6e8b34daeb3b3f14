//! Keyword tables used to refine a command into handler parameters.
//!
//! Every table is scanned in declaration order and the first entry with a keyword contained in the
//! lower-cased command wins. Table order is the only tie-break for commands mentioning several
//! keywords. Issue types and routes match whole words only.

use std::sync::OnceLock;

use assistant_contract::Intent;
use regex::Regex;
use ui_controller::ControlTables;

/// One table row: the resolved value and the substrings that select it.
pub type KeywordRow = (&'static str, &'static [&'static str]);

/// Content type for `create`.
pub const CONTENT_TYPES: &[KeywordRow] = &[
    ("linkedin", &["linkedin"]),
    ("email", &["email", "newsletter"]),
    ("blog", &["blog", "article", "post"]),
    ("social", &["twitter", "tweet", "instagram", "social"]),
    ("video", &["video", "youtube", "script"]),
    ("whitepaper", &["whitepaper", "white paper", "ebook", "guide"]),
];
/// Default content type.
pub const DEFAULT_CONTENT_TYPE: &str = "blog";

/// Analysis type for `analyze`.
pub const ANALYSIS_TYPES: &[KeywordRow] = &[
    ("seo", &["seo", "search", "ranking", "keyword"]),
    ("competitor", &["competitor", "competition", "rival"]),
    ("audience", &["audience", "demographic", "persona"]),
    ("content", &["content", "post", "article"]),
    ("performance", &["performance", "traffic", "engagement", "metric"]),
];
/// Default analysis type.
pub const DEFAULT_ANALYSIS_TYPE: &str = "performance";

/// Timeframe for `analyze`.
pub const TIMEFRAMES: &[KeywordRow] = &[
    ("7d", &["week", "7 days", "7d"]),
    ("90d", &["quarter", "90 days", "3 months"]),
    ("1y", &["year", "12 months", "annual"]),
    ("30d", &["month", "30 days"]),
];
/// Default timeframe.
pub const DEFAULT_TIMEFRAME: &str = "30d";

/// Optimization target for `optimize`.
pub const OPTIMIZATION_TARGETS: &[KeywordRow] = &[
    ("seo", &["seo", "search", "keyword"]),
    ("engagement", &["engagement", "social", "likes", "shares"]),
    ("conversion", &["conversion", "cta", "landing", "signup"]),
    ("readability", &["readability", "tone", "clarity"]),
];
/// Default optimization target.
pub const DEFAULT_OPTIMIZATION_TARGET: &str = "seo";

/// Export format.
pub const EXPORT_FORMATS: &[KeywordRow] = &[
    ("pdf", &["pdf"]),
    ("csv", &["csv", "spreadsheet"]),
    ("xlsx", &["excel", "xlsx"]),
    ("json", &["json"]),
    ("png", &["png", "image"]),
];
/// Default export format.
pub const DEFAULT_EXPORT_FORMAT: &str = "pdf";

/// Export data type.
pub const EXPORT_DATA_TYPES: &[KeywordRow] = &[
    ("diagnostics", &["diagnostic", "audit"]),
    ("playbook", &["playbook"]),
    ("analytics", &["analytics", "metric", "performance"]),
    ("insights", &["insight"]),
    ("calendar", &["calendar", "schedule"]),
];
/// Default export data type.
pub const DEFAULT_EXPORT_DATA_TYPE: &str = "report";

/// Timing for `schedule`.
pub const SCHEDULE_TIMINGS: &[KeywordRow] = &[
    ("tomorrow", &["tomorrow"]),
    ("next_week", &["next week"]),
    ("weekly", &["every week", "weekly"]),
    ("daily", &["every day", "daily"]),
    ("today", &["today", "tonight", "now"]),
];
/// Default schedule timing.
pub const DEFAULT_SCHEDULE_TIMING: &str = "next_available";

/// Publishing channel for `schedule`.
pub const CHANNELS: &[KeywordRow] = &[
    ("linkedin", &["linkedin"]),
    ("twitter", &["twitter", "tweet"]),
    ("email", &["email", "newsletter"]),
    ("blog", &["blog"]),
];
/// Default schedule channel.
pub const DEFAULT_CHANNEL: &str = "all_channels";

/// Issue type for `fix`.
pub const ISSUE_TYPES: &[KeywordRow] = &[
    ("seo", &["seo", "meta", "ranking", "rankings"]),
    ("performance", &["slow", "speed", "performance", "load", "loading", "latency"]),
    ("broken_links", &["broken", "link", "links", "404"]),
    ("accessibility", &["accessibility", "a11y", "alt text", "contrast"]),
    ("content", &["content", "typo", "typos", "grammar", "spelling"]),
];
/// Default issue type.
pub const DEFAULT_ISSUE_TYPE: &str = "general";

/// Automation kind for `automate`.
pub const AUTOMATIONS: &[KeywordRow] = &[
    ("publishing", &["publish", "posting"]),
    ("reporting", &["report"]),
    ("email", &["email", "newsletter"]),
    ("social", &["social", "twitter", "linkedin"]),
    ("optimization", &["optimiz", "seo"]),
];
/// Default automation kind.
pub const DEFAULT_AUTOMATION: &str = "workflow";

/// Automation frequency.
pub const FREQUENCIES: &[KeywordRow] = &[
    ("daily", &["daily", "every day"]),
    ("weekly", &["weekly", "every week"]),
    ("monthly", &["monthly", "every month"]),
];
/// Default automation frequency.
pub const DEFAULT_FREQUENCY: &str = "weekly";

/// Phrases that mark a generic command as a help request.
pub const HELP_PHRASES: &[&str] = &[
    "help",
    "how do",
    "how to",
    "what can",
    "support",
    "documentation",
    "docs",
];

const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::Automate, &["automate", "automation", "auto-"]),
    (Intent::Schedule, &["schedule", "plan ", "calendar"]),
    (Intent::Export, &["export", "download"]),
    (Intent::Fix, &["fix", "repair", "resolve", "broken"]),
    (Intent::Optimize, &["optimize", "optimise", "improve", "boost"]),
    (Intent::Analyze, &["analyze", "analyse", "analysis", "report on", "how is", "how are"]),
    (Intent::Create, &["create", "write", "draft", "generate", "make a", "compose"]),
    (Intent::Navigate, &["go to", "navigate", "take me", "switch to"]),
    (Intent::Show, &["show", "display", "view", "open", "see "]),
];

/// Returns the first row value whose keywords appear in `lower`.
pub fn first_match(lower: &str, rows: &[KeywordRow]) -> Option<&'static str> {
    rows.iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(value, _)| *value)
}

/// Returns the first row value whose keywords appear in `lower`, or `default`.
pub fn first_match_or(lower: &str, rows: &[KeywordRow], default: &'static str) -> &'static str {
    first_match(lower, rows).unwrap_or(default)
}

/// Like [`first_match`], but a keyword must appear as whole words.
pub fn first_word_match(lower: &str, rows: &[KeywordRow]) -> Option<&'static str> {
    let padded = padded_words(lower);
    rows.iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| has_word(&padded, keyword)))
        .map(|(value, _)| *value)
}

/// Pre-labels a raw command for callers that do not classify intent themselves.
///
/// The dispatcher never calls this; it trusts the supplied label.
pub fn classify_intent(text: &str) -> Intent {
    let lower = text.to_lowercase();
    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Generic)
}

/// Extracts the text after the first ` about `, ` on `, or ` for ` marker, keeping its casing.
pub fn extract_topic(command: &str) -> Option<String> {
    topic_patterns().iter().find_map(|pattern| {
        let topic = pattern
            .captures(command)?
            .get(1)?
            .as_str()
            .trim()
            .trim_end_matches(['.', '!', '?'])
            .trim();
        (!topic.is_empty()).then(|| topic.to_string())
    })
}

fn topic_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ["about", "on", "for"]
            .iter()
            .map(|marker| {
                Regex::new(&format!(r"(?is)\s{marker}\s(.*)$")).expect("topic pattern compiles")
            })
            .collect()
    })
}

/// Returns the first route whose name or alias appears as a whole word in `lower`.
pub fn mentioned_route<'a>(lower: &str, tables: &'a ControlTables) -> Option<&'a str> {
    let padded = padded_words(lower);
    tables
        .routes
        .iter()
        .find(|route| {
            std::iter::once(&route.name)
                .chain(&route.aliases)
                .any(|word| has_word(&padded, word))
        })
        .map(|route| route.name.as_str())
}

/// Collapses non-alphanumeric runs to single spaces and pads both ends.
fn padded_words(text: &str) -> String {
    let words = text
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!(" {words} ")
}

fn has_word(padded: &str, word: &str) -> bool {
    padded.contains(&format!(" {word} "))
}

/// Returns whether a generic command reads like a help request.
pub fn is_help_request(lower: &str) -> bool {
    HELP_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ui_controller::control_tables;

    use super::*;

    #[test]
    fn linkedin_wins_over_blog_and_email() {
        assert_eq!(
            first_match("write a linkedin post and an email about our blog", CONTENT_TYPES),
            Some("linkedin")
        );
        assert_eq!(first_match_or("make something", CONTENT_TYPES, DEFAULT_CONTENT_TYPE), "blog");
    }

    #[test]
    fn topic_keeps_original_casing() {
        assert_eq!(
            extract_topic("create a blog post about AI automation."),
            Some("AI automation".to_string())
        );
        assert_eq!(extract_topic("write an email ABOUT Q3 Results"), Some("Q3 Results".to_string()));
        assert_eq!(extract_topic("create a blog post"), None);
    }

    #[test]
    fn topic_survives_case_folding_that_changes_byte_length() {
        assert_eq!(
            extract_topic("İİ draft a post about Rust"),
            Some("Rust".to_string())
        );
        assert_eq!(
            extract_topic("write a guide about İstanbul travel!"),
            Some("İstanbul travel".to_string())
        );
    }

    #[test]
    fn issue_keywords_match_whole_words() {
        assert_eq!(
            first_word_match("fix typos in my linkedin post", ISSUE_TYPES),
            Some("content")
        );
        assert_eq!(first_word_match("fix the download page", ISSUE_TYPES), None);
        assert_eq!(
            first_word_match("repair broken links on the blog", ISSUE_TYPES),
            Some("broken_links")
        );
        assert_eq!(first_word_match("pages are loading slowly", ISSUE_TYPES), Some("performance"));
    }

    #[test]
    fn routes_are_matched_as_whole_words() {
        let tables = control_tables();
        assert_eq!(mentioned_route("show me the analytics page", tables), Some("analytics"));
        assert_eq!(mentioned_route("open my reports", tables), Some("analytics"));
        assert_eq!(mentioned_route("show me the playbooks", tables), None);
    }

    #[test]
    fn classifier_labels_common_phrasings() {
        assert_eq!(classify_intent("Create a LinkedIn post"), Intent::Create);
        assert_eq!(classify_intent("export the diagnostics as csv"), Intent::Export);
        assert_eq!(classify_intent("automate weekly reporting"), Intent::Automate);
        assert_eq!(classify_intent("go to settings"), Intent::Navigate);
        assert_eq!(classify_intent("hello there"), Intent::Generic);
    }
}
