//! Bounded synthetic payloads standing in for an analytics backend.
//!
//! All randomness flows through the caller's [`Rng`], so a seeded generator yields identical
//! payloads.

use rand::{seq::SliceRandom, Rng};
use serde_json::{json, Value};

const INSIGHTS: &[&str] = &[
    "Posts published before 10am earn higher engagement",
    "Long-form articles drive most organic sessions",
    "Video snippets outperform static images on social",
    "Newsletter click-through peaks mid-week",
    "Pages with FAQ sections rank for more long-tail queries",
    "Returning visitors convert at twice the rate of new visitors",
];

const PUBLISH_SLOTS: &[&str] = &[
    "Mon 09:00",
    "Tue 10:30",
    "Wed 12:00",
    "Thu 08:30",
    "Thu 15:00",
    "Fri 11:00",
];

/// Metrics payload for `analyze`.
pub fn analysis<R: Rng + ?Sized>(rng: &mut R, analysis_type: &str, timeframe: &str) -> Value {
    let views: u32 = rng.gen_range(5_000..=50_000);
    let engagement_rate: f64 = round1(rng.gen_range(1.5..8.0));
    let conversion_rate: f64 = round1(rng.gen_range(0.5..4.5));
    let growth: f64 = round1(rng.gen_range(-5.0..25.0));
    let insights: Vec<&str> = INSIGHTS.choose_multiple(rng, 3).copied().collect();

    json!({
        "analysisType": analysis_type,
        "timeframe": timeframe,
        "metrics": {
            "views": views,
            "engagementRate": engagement_rate,
            "conversionRate": conversion_rate,
            "growth": growth,
        },
        "insights": insights,
    })
}

/// Score payload for `optimize`.
pub fn optimization<R: Rng + ?Sized>(rng: &mut R, target: &str) -> Value {
    let current: u32 = rng.gen_range(40..=75);
    let improvement: u32 = rng.gen_range(10..=25);
    json!({
        "target": target,
        "currentScore": current,
        "projectedScore": (current + improvement).min(100),
        "recommendations": recommendations(target),
    })
}

fn recommendations(target: &str) -> [&'static str; 3] {
    match target {
        "engagement" => [
            "Open with a question or a bold statistic",
            "Add a visual every 300 words",
            "End with a clear call for comments",
        ],
        "conversion" => [
            "Move the primary call to action above the fold",
            "Reduce form fields to the essentials",
            "Add social proof near the signup button",
        ],
        "readability" => [
            "Shorten sentences longer than 25 words",
            "Break long paragraphs into lists",
            "Replace jargon with plain language",
        ],
        _ => [
            "Add the focus keyword to the title and first paragraph",
            "Write a meta description under 160 characters",
            "Link to three related internal articles",
        ],
    }
}

/// Issue-count payload for `fix`.
pub fn issues<R: Rng + ?Sized>(rng: &mut R, issue_type: &str) -> Value {
    let total: u32 = rng.gen_range(3..=12);
    let critical: u32 = rng.gen_range(0..=total / 3);
    let minutes: u32 = total * rng.gen_range(2..=6);
    json!({
        "issueType": issue_type,
        "issuesFound": total,
        "critical": critical,
        "estimatedFixMinutes": minutes,
    })
}

/// Suggested publishing slots for `schedule`, in weekly order.
pub fn publish_slots<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static str> {
    let mut picked: Vec<usize> = rand::seq::index::sample(rng, PUBLISH_SLOTS.len(), 3).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|index| PUBLISH_SLOTS[index]).collect()
}

/// Estimated weekly hours saved by an automation.
pub fn hours_saved<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(2..=15)
}

/// Estimated minutes to produce one piece of content.
pub fn creation_minutes<R: Rng + ?Sized>(rng: &mut R, content_type: &str) -> u32 {
    let base = match content_type {
        "social" => 5,
        "linkedin" => 10,
        "email" => 15,
        "video" | "whitepaper" => 45,
        _ => 25,
    };
    base + rng.gen_range(0..=10)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
