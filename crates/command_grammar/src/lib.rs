//! Phrase grammar describing the command surface the assistant recognizes.
//!
//! This crate implements only a small declarative grammar: a cartesian expansion of
//! action/object/modifier/target/timeframe vocabularies plus a handful of cross products and fixed
//! example lists. It has no state and no side effects.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::collections::BTreeSet;

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

const ACTIONS: &[&str] = &[
    "create", "generate", "write", "draft", "analyze", "optimize", "schedule", "show", "export",
    "review",
];

const OBJECTS: &[&str] = &[
    "blog post",
    "linkedin post",
    "email campaign",
    "newsletter",
    "social media post",
    "case study",
    "whitepaper",
    "landing page",
];

const MODIFIERS: &[&str] = &["", "engaging", "SEO-optimized", "data-driven", "short", "detailed"];

const TARGETS: &[&str] = &[
    "",
    "for enterprise clients",
    "for small businesses",
    "for marketing teams",
    "for developers",
];

const TIMEFRAMES: &[&str] = &["", "today", "this week", "for next month", "for Q4"];

const CONTENT_TYPES: &[&str] = &[
    "blog post",
    "linkedin post",
    "email",
    "newsletter",
    "twitter thread",
    "case study",
    "press release",
];

const TOPICS: &[&str] = &[
    "AI automation",
    "content strategy",
    "marketing analytics",
    "customer retention",
    "product launches",
    "remote work",
    "data privacy",
    "SEO best practices",
];

const INDUSTRIES: &[&str] = &[
    "SaaS",
    "healthcare",
    "fintech",
    "e-commerce",
    "education",
    "manufacturing",
];

const METRICS: &[&str] = &[
    "engagement rate",
    "conversion rate",
    "click-through rate",
    "organic traffic",
    "bounce rate",
    "ROI",
];

const METRIC_TEMPLATES: &[&str] = &[
    "show me {metric} for last month",
    "analyze {metric} trends",
    "why did {metric} drop",
    "how can I improve {metric}",
];

const INDUSTRY_TEMPLATES: &[&str] = &[
    "create a content strategy for {industry}",
    "show {industry} benchmarks",
    "generate a {industry} case study",
];

const COMPLEX_EXAMPLES: &[&str] = &[
    "create a blog post about AI automation and schedule it for next Tuesday",
    "analyze last month's engagement and export the report as pdf",
    "find underperforming posts and optimize their headlines",
    "go to diagnostics and open the fix modal",
    "write three linkedin posts from our latest case study",
    "compare this quarter's conversion rate with last quarter",
];

const QUESTION_EXAMPLES: &[&str] = &[
    "what content performed best this week?",
    "which channel drives the most conversions?",
    "how is our SEO health trending?",
    "when is the best time to publish on linkedin?",
    "what should I write about next?",
    "why is traffic down?",
];

const AUTOMATION_EXAMPLES: &[&str] = &[
    "automate weekly performance reports",
    "automatically publish approved posts",
    "set up a monthly newsletter workflow",
    "automate social distribution for new blog posts",
    "send me a daily engagement summary",
];

// Average branching factors used by the size estimate. Empty vocabulary slots and phrasing
// variants make the real expansion differ from a plain product of list lengths.
const AVG_MODIFIER_BRANCHING: usize = 4;
const AVG_TARGET_BRANCHING: usize = 3;
const AVG_TIMEFRAME_BRANCHING: usize = 3;
const AVG_PHRASING_VARIANTS: usize = 2;

/// Screen contexts with dedicated suggestion lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenContext {
    /// Main dashboard.
    Dashboard,
    /// Content-creation studio.
    ContentStudio,
    /// Analytics views.
    Analytics,
    /// Playbook report viewer.
    Playbook,
}

impl ScreenContext {
    /// Parses a context name such as `content_studio`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Some(Self::Dashboard),
            "content_studio" | "content-studio" | "create" => Some(Self::ContentStudio),
            "analytics" => Some(Self::Analytics),
            "playbook" => Some(Self::Playbook),
            _ => None,
        }
    }
}

/// Read-only view of the grammar vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrammarTemplates {
    /// Leading verbs.
    pub actions: &'static [&'static str],
    /// Content objects.
    pub objects: &'static [&'static str],
    /// Optional adjectives; the empty string means "no modifier".
    pub modifiers: &'static [&'static str],
    /// Optional audience clauses.
    pub targets: &'static [&'static str],
    /// Optional time clauses.
    pub timeframes: &'static [&'static str],
    /// Content types crossed with topics.
    pub content_types: &'static [&'static str],
    /// Topics crossed with content types.
    pub topics: &'static [&'static str],
    /// Industry names.
    pub industries: &'static [&'static str],
    /// Metric names.
    pub metrics: &'static [&'static str],
}

/// Stateless entrypoint for command-surface enumeration.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandGenerator;

impl CommandGenerator {
    /// Returns the raw vocabularies.
    pub fn templates(&self) -> GrammarTemplates {
        GrammarTemplates {
            actions: ACTIONS,
            objects: OBJECTS,
            modifiers: MODIFIERS,
            targets: TARGETS,
            timeframes: TIMEFRAMES,
            content_types: CONTENT_TYPES,
            topics: TOPICS,
            industries: INDUSTRIES,
            metrics: METRICS,
        }
    }

    /// Expands the full grammar into a deduplicated list, preserving first-seen order.
    pub fn generate_all_commands(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen = BTreeSet::new();
        let mut push = |phrase: String| {
            if seen.insert(phrase.clone()) {
                out.push(phrase);
            }
        };

        for action in ACTIONS {
            for object in OBJECTS {
                for modifier in MODIFIERS {
                    for target in TARGETS {
                        for timeframe in TIMEFRAMES {
                            push(join_phrase(&[*action, *modifier, *object, *target, *timeframe]));
                        }
                    }
                }
            }
        }

        for content_type in CONTENT_TYPES {
            for topic in TOPICS {
                push(format!("write a {content_type} about {topic}"));
            }
        }

        for metric in METRICS {
            for template in METRIC_TEMPLATES {
                push(template.replace("{metric}", metric));
            }
        }

        for industry in INDUSTRIES {
            for template in INDUSTRY_TEMPLATES {
                push(template.replace("{industry}", industry));
            }
        }

        for example in COMPLEX_EXAMPLES
            .iter()
            .chain(QUESTION_EXAMPLES)
            .chain(AUTOMATION_EXAMPLES)
        {
            push((*example).to_string());
        }

        out
    }

    /// Returns up to `count` distinct commands drawn from the full surface.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<String> {
        self.generate_all_commands()
            .choose_multiple(rng, count)
            .cloned()
            .collect()
    }

    /// Returns the short suggestion list for a screen context name.
    ///
    /// Unknown context names receive a general-purpose list.
    pub fn generate_contextual_commands(&self, context: &str) -> Vec<String> {
        let suggestions: &[&str] = match ScreenContext::from_name(context) {
            Some(ScreenContext::Dashboard) => &[
                "show me this week's performance",
                "create a new blog post",
                "analyze content performance",
                "open diagnostics",
                "export the dashboard as pdf",
            ],
            Some(ScreenContext::ContentStudio) => &[
                "write a blog post about AI automation",
                "optimize this draft for SEO",
                "generate three headline options",
                "schedule this post for tomorrow",
                "create a linkedin version",
            ],
            Some(ScreenContext::Analytics) => &[
                "analyze engagement trends for last month",
                "analyze conversion rate by channel",
                "analyze why traffic dropped",
                "export analytics as csv",
                "show top performing content",
            ],
            Some(ScreenContext::Playbook) => &[
                "open the implementation panel",
                "open the emergency panel",
                "export the playbook as pdf",
                "automate weekly performance reports",
                "what should we fix first?",
            ],
            None => &[
                "go to dashboard",
                "create content",
                "show analytics",
                "open diagnostics",
                "show the content calendar",
            ],
        };
        suggestions.iter().map(|text| text.to_string()).collect()
    }

    /// Closed-form estimate of the grammar's combinatorial size.
    ///
    /// Uses fixed average branching factors instead of counting the generated list, so the result
    /// is deterministic but not equal to `generate_all_commands().len()`.
    pub fn estimate_total_commands(&self) -> usize {
        let core = ACTIONS.len()
            * OBJECTS.len()
            * AVG_MODIFIER_BRANCHING
            * AVG_TARGET_BRANCHING
            * AVG_TIMEFRAME_BRANCHING;
        let content = CONTENT_TYPES.len() * TOPICS.len() * AVG_PHRASING_VARIANTS;
        let metrics = METRICS.len() * METRIC_TEMPLATES.len();
        let industries = INDUSTRIES.len() * INDUSTRY_TEMPLATES.len();
        let fixed = COMPLEX_EXAMPLES.len() + QUESTION_EXAMPLES.len() + AUTOMATION_EXAMPLES.len();
        core + content + metrics + industries + fixed
    }
}

fn join_phrase(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
