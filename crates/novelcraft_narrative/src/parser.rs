//! Line-oriented scrapers for model output.
//!
//! Both parsers are total: malformed text yields empty fields or a short
//! list, never an error.

use crate::types::{Recommendation, SettingKey, StorySetting};
use strum::IntoEnumIterator;
use tracing::warn;

/// Most recommendations returned per chapter.
pub const MAX_RECOMMENDATIONS: usize = 3;

const RECOMMENDATION_PATHS: &str = "Recommended summary paths:";

/// Extract a [`StorySetting`] from `Field: value` lines.
///
/// A line carrying a prefix sets that field; a repeated prefix overwrites
/// the earlier value. Lines that follow
/// `Characters:` without a recognized prefix are appended to the
/// characters field, space-joined.
///
/// # Examples
///
/// ```
/// use novelcraft_narrative::parse_setting;
///
/// let setting = parse_setting("Title: Foo\nGenre: Bar\nCharacters: Alice is kind.\nShe grew up poor.");
/// assert_eq!(setting.title(), "Foo");
/// assert_eq!(setting.characters(), "Alice is kind. She grew up poor.");
/// assert!(setting.theme().is_empty());
/// ```
pub fn parse_setting(text: &str) -> StorySetting {
    let mut setting = StorySetting::default();
    let mut current: Option<SettingKey> = None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if let Some(key) = SettingKey::iter().find(|k| line.starts_with(k.prefix())) {
            current = Some(key);
            let value = line[key.prefix().len()..].trim().to_string();
            setting.set(key, value);
        } else if current == Some(SettingKey::Characters) {
            let characters = setting.characters_mut();
            characters.push(' ');
            characters.push_str(line);
            *characters = characters.trim().to_string();
        }
    }

    let missing: Vec<&str> = SettingKey::iter()
        .filter(|k| setting.get(*k).is_empty())
        .map(|k| k.prefix())
        .collect();
    if !missing.is_empty() {
        warn!(?missing, "Setting response is missing fields");
    }

    setting
}

/// Extract up to three `Title:`/`Description:` pairs.
///
/// A `Description:` line completes the pending title. A `Title:` line
/// flushes a pending complete pair and starts a new one. Scanning stops as
/// soon as three pairs are collected.
///
/// # Examples
///
/// ```
/// use novelcraft_narrative::parse_recommendations;
///
/// let recs = parse_recommendations("Title: A\nDescription: B\nTitle: C\nDescription: D");
/// assert_eq!(recs.len(), 2);
/// assert_eq!(recs[1].title(), "C");
/// ```
pub fn parse_recommendations(text: &str) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(MAX_RECOMMENDATIONS);
    let mut title = String::new();
    let mut description = String::new();

    for raw in text.lines() {
        let line = raw.trim_start();
        if let Some(rest) = line.strip_prefix("Title:") {
            if !title.is_empty() && !description.is_empty() {
                recommendations.push(Recommendation::new(title.clone(), description.clone()));
            }
            title = rest.trim().to_string();
            description.clear();
        } else if let Some(rest) = line.strip_prefix("Description:") {
            description = rest.trim().to_string();
            if !title.is_empty() && !description.is_empty() {
                recommendations.push(Recommendation::new(title.clone(), description.clone()));
                title.clear();
                description.clear();
            }
        }

        if recommendations.len() == MAX_RECOMMENDATIONS {
            break;
        }
    }

    if recommendations.len() < MAX_RECOMMENDATIONS {
        warn!(
            count = recommendations.len(),
            "Recommendation response held fewer than three complete pairs"
        );
    }

    recommendations
}

/// Remove everything from the first "Recommended summary paths:" marker to
/// the end of the text, then trim.
///
/// # Examples
///
/// ```
/// use novelcraft_narrative::strip_recommendation_paths;
///
/// let text = "The rain fell.\n\nRecommended summary paths:\n1. Run\n2. Hide";
/// assert_eq!(strip_recommendation_paths(text), "The rain fell.");
/// assert_eq!(strip_recommendation_paths("  plain  "), "plain");
/// ```
pub fn strip_recommendation_paths(text: &str) -> String {
    let end = text.find(RECOMMENDATION_PATHS).unwrap_or(text.len());
    text[..end].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_repeated_field_overwrites() {
        let setting = parse_setting("Title: First\nTitle: Second\nGenre: Noir\nGenre: Gothic");
        assert_eq!(setting.title(), "Second");
        assert_eq!(setting.genre(), "Gothic");
    }

    #[test]
    fn test_repeated_characters_restarts_continuation() {
        let setting = parse_setting("Characters: Ann\nfirst draft\nCharacters: Bo\nher twin");
        assert_eq!(setting.characters(), "Bo her twin");
    }

    #[test]
    fn test_setting_continuation_only_after_characters() {
        let setting = parse_setting("Title: T\nstray line\nCharacters:\n  Ann: a pilot\n\n  Bo: her twin");
        assert_eq!(setting.title(), "T");
        assert_eq!(setting.characters(), "Ann: a pilot Bo: her twin");
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let setting = parse_setting("title: lower\nGENRE: upper");
        assert!(setting.is_empty());
    }

    #[test]
    fn test_recommendation_title_without_description_is_dropped() {
        let recs = parse_recommendations("Title: Orphan\nTitle: Kept\nDescription: Yes");
        assert_eq!(recs, vec![Recommendation::new("Kept", "Yes")]);
    }

    #[test]
    fn test_recommendation_description_before_title_is_discarded() {
        let recs = parse_recommendations("Description: early\nTitle: T\nDescription: D");
        assert_eq!(recs, vec![Recommendation::new("T", "D")]);
    }

    #[test]
    fn test_recommendations_tolerate_indentation() {
        let recs = parse_recommendations("  Title: Indented\n    Description: Still read");
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_strip_only_from_marker() {
        let text = "Before the marker.\nRecommended summary paths: a\nb\nc";
        assert_eq!(strip_recommendation_paths(text), "Before the marker.");
    }

    #[test]
    fn test_strip_cuts_at_first_marker() {
        let text = "Prose.\nRecommended summary paths:\n1. x\nRecommended summary paths:\n2. y";
        assert_eq!(strip_recommendation_paths(text), "Prose.");
        assert_eq!(strip_recommendation_paths("Recommended summary paths: only"), "");
    }
}
