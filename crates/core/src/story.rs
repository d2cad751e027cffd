//! Story generation request/response types and model-output parsing.
//!
//! The model is asked to answer with a single JSON object. Real answers
//! often wrap that object in prose, so [`extract_story_json`] scans the
//! free text for the first-`{`-to-last-`}` substring (greedy match) before
//! parsing. That extraction strategy is a compatibility contract: it is
//! what shipped clients rely on, including its known fragility when the
//! surrounding prose itself contains braces.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::characteristics::PhysicalCharacteristics;

/// A previously uploaded image supplied to seed story content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceIllustration {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
}

/// Everything the pipeline needs to generate one story.
///
/// Constructed fresh per request and discarded after the response; nothing
/// here is persisted by the pipeline itself.
#[derive(Debug, Clone)]
pub struct StoryRequest {
    pub child_name: String,
    pub child_age: i32,
    pub reading_level: String,
    pub favorite_things: Vec<String>,
    pub parent_summary: Option<String>,
    pub custom_prompt: Option<String>,
    pub source_illustration: Option<SourceIllustration>,
    pub physical_characteristics: Option<PhysicalCharacteristics>,
}

/// One illustration slot as described by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllustrationSpec {
    /// Scene description, used verbatim as the image-prompt subject.
    pub description: String,
    /// Character offset into the story content. A placement hint only;
    /// never validated against the content bounds.
    pub position: i64,
}

/// The story object parsed out of the model's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStory {
    pub title: String,
    pub content: String,
    pub illustrations: Vec<IllustrationSpec>,
}

/// One illustration in the final response: the description always survives,
/// the image URL only when generation and upload both succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IllustrationResult {
    pub description: String,
    pub position: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Non-fatal conditions surfaced alongside a successful story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryWarning {
    /// The image service refused at least one illustration prompt.
    IllustrationContentPolicy,
}

/// The full generation result returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStory {
    pub title: String,
    pub content: String,
    pub illustrations: Vec<IllustrationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<StoryWarning>,
}

/// Why the model's reply could not be turned into a [`ParsedStory`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoryParseError {
    /// No `{...}` substring found, or the substring was not valid JSON.
    #[error("Failed to parse story response")]
    Unparseable,

    /// Valid JSON, but `title` or `content` missing or empty.
    #[error("Invalid story format")]
    InvalidFormat,
}

/// Greedy first-`{`-to-last-`}` matcher, `.` spanning newlines.
static JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid story-extraction regex"));

/// Extract and validate the story JSON embedded in free-form model text.
///
/// `title` and `content` must be present and non-empty. `illustrations` is
/// optional; entries without a string `description` are dropped, and a
/// missing or non-integer `position` defaults to `0`.
pub fn extract_story_json(text: &str) -> Result<ParsedStory, StoryParseError> {
    let raw = JSON_BLOCK
        .find(text)
        .ok_or(StoryParseError::Unparseable)?
        .as_str();

    let value: Value = serde_json::from_str(raw).map_err(|_| StoryParseError::Unparseable)?;

    let title = non_empty_string(&value, "title").ok_or(StoryParseError::InvalidFormat)?;
    let content = non_empty_string(&value, "content").ok_or(StoryParseError::InvalidFormat)?;

    let illustrations = value
        .get("illustrations")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let description = entry.get("description")?.as_str()?.to_string();
                    let position = entry
                        .get("position")
                        .and_then(Value::as_i64)
                        .unwrap_or(0);
                    Some(IllustrationSpec {
                        description,
                        position,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(ParsedStory {
        title,
        content,
        illustrations,
    })
}

fn non_empty_string(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const WELL_FORMED: &str = r#"{"title": "The Moon Cat", "content": "Mira looked up.",
        "illustrations": [{"description": "A cat on the moon", "position": 12}]}"#;

    #[test]
    fn parses_bare_json() {
        let story = extract_story_json(WELL_FORMED).unwrap();
        assert_eq!(story.title, "The Moon Cat");
        assert_eq!(story.content, "Mira looked up.");
        assert_eq!(story.illustrations.len(), 1);
        assert_eq!(story.illustrations[0].description, "A cat on the moon");
        assert_eq!(story.illustrations[0].position, 12);
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let text = format!("Here is your story!\n\n{WELL_FORMED}\n\nEnjoy reading it together.");
        let story = extract_story_json(&text).unwrap();
        assert_eq!(story.title, "The Moon Cat");
    }

    #[test]
    fn no_braces_is_unparseable() {
        assert_matches!(
            extract_story_json("Once upon a time there was no JSON."),
            Err(StoryParseError::Unparseable)
        );
    }

    #[test]
    fn invalid_json_between_braces_is_unparseable() {
        assert_matches!(
            extract_story_json("{this is not json}"),
            Err(StoryParseError::Unparseable)
        );
    }

    #[test]
    fn greedy_match_spans_first_to_last_brace() {
        // Trailing prose containing a brace extends the greedy match past
        // the valid object, so the parse fails. Pinned compatibility
        // behavior of the first-{-to-last-} extraction.
        let text = format!("{WELL_FORMED} and remember: {{braces}} are fun");
        assert_matches!(extract_story_json(&text), Err(StoryParseError::Unparseable));
    }

    #[test]
    fn missing_title_is_invalid_format() {
        assert_matches!(
            extract_story_json(r#"{"content": "text"}"#),
            Err(StoryParseError::InvalidFormat)
        );
    }

    #[test]
    fn empty_content_is_invalid_format() {
        assert_matches!(
            extract_story_json(r#"{"title": "T", "content": ""}"#),
            Err(StoryParseError::InvalidFormat)
        );
    }

    #[test]
    fn missing_illustrations_defaults_to_empty() {
        let story = extract_story_json(r#"{"title": "T", "content": "C"}"#).unwrap();
        assert!(story.illustrations.is_empty());
    }

    #[test]
    fn illustration_without_description_is_dropped() {
        let story = extract_story_json(
            r#"{"title": "T", "content": "C",
                "illustrations": [{"position": 3}, {"description": "ok"}]}"#,
        )
        .unwrap();
        assert_eq!(story.illustrations.len(), 1);
        assert_eq!(story.illustrations[0].description, "ok");
        assert_eq!(story.illustrations[0].position, 0);
    }

    #[test]
    fn warning_serializes_snake_case() {
        let json = serde_json::to_string(&StoryWarning::IllustrationContentPolicy).unwrap();
        assert_eq!(json, r#""illustration_content_policy""#);
    }

    #[test]
    fn unresolved_image_url_is_omitted_from_json() {
        let result = IllustrationResult {
            description: "d".into(),
            position: 1,
            image_url: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("imageUrl").is_none());
        assert_eq!(json["description"], "d");
    }
}
