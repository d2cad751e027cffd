//! Prompt assembly for story and illustration generation.
//!
//! Pure string building: profile facts, the reading-level word bounds as a
//! hard constraint, and the exact JSON reply shape the parser in
//! [`crate::story`] expects.

use std::fmt::Write as _;

use crate::characteristics::{describe_character, PhysicalCharacteristics};
use crate::reading_level;
use crate::story::StoryRequest;

/// Style preamble prepended to every illustration prompt.
pub const ILLUSTRATION_STYLE_PREAMBLE: &str =
    "A warm, whimsical children's storybook illustration: ";

/// Style suffix appended to every illustration prompt.
pub const ILLUSTRATION_STYLE_SUFFIX: &str =
    " Soft watercolor style, gentle colors, friendly and age-appropriate, no text.";

/// Build the single prompt sent to the text-generation model.
pub fn build_story_prompt(req: &StoryRequest) -> String {
    let policy = reading_level::lookup(&req.reading_level);

    let mut prompt = format!(
        "You are a creative children's story writer. Write an engaging, \
         age-appropriate story for a child with the following profile:\n\n\
         - Name: {name}\n\
         - Age: {age}\n\
         - Reading Level: {level}\n\
         - Interests: {interests}\n",
        name = req.child_name,
        age = req.child_age,
        level = req.reading_level,
        interests = req.favorite_things.join(", "),
    );

    if let Some(summary) = req.parent_summary.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(prompt, "- About the child: {summary}");
    }

    if let Some(topic) = req.custom_prompt.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(prompt, "\nThe child specifically requested: {topic}\n");
    }

    if let Some(source) = &req.source_illustration {
        let _ = write!(
            prompt,
            "\nAn illustration titled \"{}\" is attached. Treat the image as \
             narrative inspiration: let its scene, characters, or mood shape \
             the story without describing the picture literally.",
            source.title,
        );
        if let Some(description) = source.description.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(prompt, " The illustration shows: {description}.");
        }
        prompt.push('\n');
    }

    let _ = write!(
        prompt,
        "\nThe story must:\n\
         1. Be between {min} and {max} words long. This is a hard constraint.\n\
         2. Use {guidance}.\n\
         3. Feature {name} as the main character.\n\
         4. Weave the child's interests naturally into the plot.\n\
         5. Have a clear beginning, middle, and end.\n\
         \n\
         Also provide exactly one illustration description at a key moment in \
         the story. The position is the character index in the story content \
         where the illustration should appear.\n\
         \n\
         IMPORTANT: Respond ONLY with valid JSON in this exact format, no \
         additional text:\n\
         {{\n\
         \x20 \"title\": \"Story Title Here\",\n\
         \x20 \"content\": \"Full story text here...\",\n\
         \x20 \"illustrations\": [\n\
         \x20   {{\"description\": \"A vivid scene description\", \"position\": 0}}\n\
         \x20 ]\n\
         }}",
        min = policy.min_words,
        max = policy.max_words,
        guidance = policy.sentence_guidance,
        name = req.child_name,
    );

    prompt
}

/// Compose the image-generation prompt for one illustration description.
///
/// The character descriptor derived from the child's physical
/// characteristics is inserted between the scene and the style suffix; when
/// the profile is unconstrained it contributes nothing.
pub fn build_illustration_prompt(
    description: &str,
    characteristics: Option<&PhysicalCharacteristics>,
) -> String {
    let mut prompt = format!("{ILLUSTRATION_STYLE_PREAMBLE}{description}.");

    if let Some(clause) = characteristics
        .map(describe_character)
        .filter(|c| !c.is_empty())
    {
        let _ = write!(prompt, " The child in the scene is {clause}.");
    }

    prompt.push_str(ILLUSTRATION_STYLE_SUFFIX);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading_level::{DEFAULT_LEVEL, READING_LEVELS};
    use crate::story::SourceIllustration;

    fn request(level: &str) -> StoryRequest {
        StoryRequest {
            child_name: "Mira".into(),
            child_age: 6,
            reading_level: level.into(),
            favorite_things: vec!["cats".into(), "rockets".into()],
            parent_summary: None,
            custom_prompt: None,
            source_illustration: None,
            physical_characteristics: None,
        }
    }

    #[test]
    fn prompt_contains_bounds_for_every_level() {
        for policy in READING_LEVELS {
            let prompt = build_story_prompt(&request(policy.level));
            assert!(
                prompt.contains(&format!(
                    "between {} and {} words",
                    policy.min_words, policy.max_words
                )),
                "missing bounds for {}",
                policy.level
            );
        }
    }

    #[test]
    fn unknown_level_uses_fallback_bounds() {
        let prompt = build_story_prompt(&request("Night School"));
        assert!(prompt.contains(&format!(
            "between {} and {} words",
            DEFAULT_LEVEL.min_words, DEFAULT_LEVEL.max_words
        )));
        // The profile's own label still appears in the fact list.
        assert!(prompt.contains("Reading Level: Night School"));
    }

    #[test]
    fn prompt_lists_profile_facts() {
        let mut req = request("1st Grade");
        req.parent_summary = Some("Loves space documentaries".into());
        req.custom_prompt = Some("a trip to Saturn".into());
        let prompt = build_story_prompt(&req);

        assert!(prompt.contains("Name: Mira"));
        assert!(prompt.contains("Age: 6"));
        assert!(prompt.contains("Interests: cats, rockets"));
        assert!(prompt.contains("About the child: Loves space documentaries"));
        assert!(prompt.contains("specifically requested: a trip to Saturn"));
        assert!(prompt.contains("Feature Mira as the main character"));
    }

    #[test]
    fn prompt_demands_exact_json_shape() {
        let prompt = build_story_prompt(&request("2nd Grade"));
        assert!(prompt.contains("Respond ONLY with valid JSON"));
        assert!(prompt.contains("\"title\""));
        assert!(prompt.contains("\"content\""));
        assert!(prompt.contains("\"illustrations\""));
        assert!(prompt.contains("exactly one illustration description"));
    }

    #[test]
    fn source_illustration_adds_inspiration_instruction() {
        let mut req = request("3rd Grade");
        req.source_illustration = Some(SourceIllustration {
            url: "https://cdn.example.com/img.png".into(),
            title: "The Paper Boat".into(),
            description: Some("a boat on a puddle".into()),
        });
        let prompt = build_story_prompt(&req);
        assert!(prompt.contains("The Paper Boat"));
        assert!(prompt.contains("narrative inspiration"));
        assert!(prompt.contains("a boat on a puddle"));
    }

    #[test]
    fn illustration_prompt_wraps_description_in_style() {
        let prompt = build_illustration_prompt("A cat sailing a leaf", None);
        assert!(prompt.starts_with(ILLUSTRATION_STYLE_PREAMBLE));
        assert!(prompt.ends_with(ILLUSTRATION_STYLE_SUFFIX));
        assert!(prompt.contains("A cat sailing a leaf"));
    }

    #[test]
    fn illustration_prompt_includes_character_clause() {
        let characteristics = PhysicalCharacteristics {
            hair_color: Some("brown".into()),
            gender: Some("female".into()),
            ..Default::default()
        };
        let prompt = build_illustration_prompt("A picnic", Some(&characteristics));
        assert!(prompt.contains("a young girl with brown hair"));
    }

    #[test]
    fn unconstrained_characteristics_add_nothing() {
        let characteristics = PhysicalCharacteristics::default();
        let with = build_illustration_prompt("A picnic", Some(&characteristics));
        let without = build_illustration_prompt("A picnic", None);
        assert_eq!(with, without);
    }
}
