//! Turns raw model output into [`GeneratedFeedback`].
//!
//! Models often wrap JSON in markdown fences or add a sentence of preamble.
//! Normalization strips fences, tries a strict parse, then retries on the
//! outermost `{...}` span. A parsed document keeps its `summary` even when
//! `keywords` is malformed; only keyword items of the expected shape survive.
//! When no string `summary` can be recovered, the cleaned text becomes the
//! summary so the author still gets a reply.

use serde::Deserialize;
use serde_json::Value;

use super::{GeneratedFeedback, KeywordTag};

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// How the feedback was obtained from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationOutcome {
    /// The output parsed as the expected JSON document.
    Structured,
    /// The output did not parse; the cleaned text is used as the summary.
    Fallback,
}

/// Feedback together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFeedback {
    pub feedback: GeneratedFeedback,
    pub outcome: NormalizationOutcome,
}

#[derive(Debug, Deserialize)]
struct FeedbackDocument {
    summary: String,
    #[serde(default)]
    keywords: Value,
}

/// Keep the keyword items that decode; anything but an array yields none.
fn keyword_tags(keywords: Value) -> Vec<KeywordTag> {
    match keywords {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn skip_language_tag(rest: &str) -> &str {
    match rest.get(..JSON_TAG.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(JSON_TAG) => {
            rest.split_at(JSON_TAG.len()).1.trim_start()
        }
        _ => rest,
    }
}

/// Remove every code fence marker, including a `json` language tag after it.
fn strip_code_fences(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find(FENCE) {
        let (before, after) = rest.split_at(start);
        cleaned.push_str(before);
        rest = skip_language_tag(after.split_at(FENCE.len()).1);
    }
    cleaned.push_str(rest);
    cleaned.trim().to_owned()
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| text.split_at(end + 1).0.split_at(start).1)
}

fn parse_document(text: &str) -> Option<FeedbackDocument> {
    serde_json::from_str(text)
        .ok()
        .or_else(|| outermost_object(text).and_then(|span| serde_json::from_str(span).ok()))
}

/// Normalize raw generation output. Never fails.
///
/// # Examples
/// ```
/// use unbothered_backend::domain::{normalize_feedback, NormalizationOutcome};
///
/// let raw = "```json\n{\"summary\":\"Hi Ada.\",\"keywords\":[]}\n```";
/// let normalized = normalize_feedback(raw);
/// assert_eq!(normalized.outcome, NormalizationOutcome::Structured);
/// assert_eq!(normalized.feedback.summary(), "Hi Ada.");
/// ```
pub fn normalize_feedback(raw: &str) -> NormalizedFeedback {
    let cleaned = strip_code_fences(raw);
    match parse_document(&cleaned) {
        Some(FeedbackDocument { summary, keywords }) => NormalizedFeedback {
            feedback: GeneratedFeedback::new(summary, keyword_tags(keywords)),
            outcome: NormalizationOutcome::Structured,
        },
        None => NormalizedFeedback {
            feedback: GeneratedFeedback::summary_only(cleaned),
            outcome: NormalizationOutcome::Fallback,
        },
    }
}
