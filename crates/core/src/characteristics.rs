//! Optional physical characteristics of a child profile and the descriptor
//! clause derived from them.
//!
//! The descriptor steers image generation toward a consistent depiction of
//! the child. It is prepended to illustration prompts only -- the story
//! prompt never sees these fields.

use serde::{Deserialize, Serialize};

/// Sentinel meaning "unconstrained / let the model choose".
pub const DIVERSE: &str = "diverse";

/// Gender value treated as absent for description purposes.
pub const PREFER_NOT_TO_SAY: &str = "prefer-not-to-say";

/// Optional appearance fields on a child profile.
///
/// `None` and the `"diverse"` sentinel both mean the field places no
/// constraint on generated artwork.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalCharacteristics {
    pub skin_tone: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub gender: Option<String>,
    pub pronouns: Option<String>,
}

impl PhysicalCharacteristics {
    /// True when no field constrains the depiction.
    pub fn is_unconstrained(&self) -> bool {
        describe_character(self).is_empty()
    }
}

/// Returns a constrained field value, treating the diverse sentinel as absent.
fn constrained<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(DIVERSE))
}

/// Map a gender value to the child-appropriate noun used in image prompts.
///
/// `"prefer-not-to-say"` is treated as absent; any other non-diverse value
/// maps to `"child"`.
fn gender_noun(gender: &Option<String>) -> Option<&'static str> {
    match constrained(gender)? {
        g if g.eq_ignore_ascii_case(PREFER_NOT_TO_SAY) => None,
        g if g.eq_ignore_ascii_case("male") => Some("boy"),
        g if g.eq_ignore_ascii_case("female") => Some("girl"),
        _ => Some("child"),
    }
}

/// Build the natural-language clause describing the child for image prompts.
///
/// Returns the empty string when every field is null, `"diverse"`, or
/// `"prefer-not-to-say"` -- in that case the illustration prompt carries no
/// appearance constraint at all.
pub fn describe_character(pc: &PhysicalCharacteristics) -> String {
    let mut clauses: Vec<String> = Vec::new();
    if let Some(tone) = constrained(&pc.skin_tone) {
        clauses.push(format!("{tone} skin tone"));
    }
    if let Some(hair) = constrained(&pc.hair_color) {
        clauses.push(format!("{hair} hair"));
    }
    if let Some(eyes) = constrained(&pc.eye_color) {
        clauses.push(format!("{eyes} eyes"));
    }

    let noun = gender_noun(&pc.gender);

    if clauses.is_empty() && noun.is_none() {
        return String::new();
    }

    let noun = noun.unwrap_or("child");
    if clauses.is_empty() {
        format!("a young {noun}")
    } else {
        format!("a young {noun} with {}", join_clauses(&clauses))
    }
}

/// Join clauses as "a", "a and b", or "a, b, and c".
fn join_clauses(clauses: &[String]) -> String {
    match clauses {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(
        skin: Option<&str>,
        hair: Option<&str>,
        eyes: Option<&str>,
        gender: Option<&str>,
    ) -> PhysicalCharacteristics {
        PhysicalCharacteristics {
            skin_tone: skin.map(String::from),
            hair_color: hair.map(String::from),
            eye_color: eyes.map(String::from),
            gender: gender.map(String::from),
            pronouns: None,
        }
    }

    #[test]
    fn all_null_is_empty() {
        assert_eq!(describe_character(&pc(None, None, None, None)), "");
    }

    #[test]
    fn all_diverse_is_empty() {
        let chars = pc(
            Some("diverse"),
            Some("diverse"),
            Some("diverse"),
            Some("diverse"),
        );
        assert_eq!(describe_character(&chars), "");
        assert!(chars.is_unconstrained());
    }

    #[test]
    fn prefer_not_to_say_gender_is_absent() {
        assert_eq!(
            describe_character(&pc(None, None, None, Some("prefer-not-to-say"))),
            ""
        );
    }

    #[test]
    fn male_renders_as_boy() {
        assert_eq!(
            describe_character(&pc(None, None, None, Some("male"))),
            "a young boy"
        );
    }

    #[test]
    fn female_renders_as_girl() {
        assert_eq!(
            describe_character(&pc(None, None, None, Some("female"))),
            "a young girl"
        );
    }

    #[test]
    fn other_gender_renders_as_child() {
        assert_eq!(
            describe_character(&pc(None, None, None, Some("non-binary"))),
            "a young child"
        );
    }

    #[test]
    fn clauses_without_gender_use_child_noun() {
        let out = describe_character(&pc(Some("fair"), None, None, None));
        assert_eq!(out, "a young child with fair skin tone");
    }

    #[test]
    fn every_supplied_clause_appears() {
        let out = describe_character(&pc(
            Some("fair"),
            Some("brown"),
            Some("green"),
            Some("female"),
        ));
        assert!(out.contains("fair skin tone"));
        assert!(out.contains("brown hair"));
        assert!(out.contains("green eyes"));
        assert!(out.starts_with("a young girl with "));
    }

    #[test]
    fn two_clauses_join_with_and() {
        let out = describe_character(&pc(None, Some("black"), Some("brown"), None));
        assert_eq!(out, "a young child with black hair and brown eyes");
    }

    #[test]
    fn diverse_fields_are_skipped_individually() {
        let out = describe_character(&pc(Some("diverse"), Some("red"), None, Some("male")));
        assert_eq!(out, "a young boy with red hair");
    }
}
