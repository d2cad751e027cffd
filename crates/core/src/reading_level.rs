//! Reading-level policy: word-count bounds and sentence guidance per grade.
//!
//! The table drives the story prompt (word bounds are stated to the model as
//! a hard constraint) and profile validation. Lookups for unknown keys fall
//! back to [`DEFAULT_LEVEL`] rather than erroring, so a profile saved with a
//! level this build does not know still generates a story.

/// Word-count bounds and sentence guidance for one reading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingLevelPolicy {
    /// Reading-level key as stored on child profiles (e.g. `"2nd Grade"`).
    pub level: &'static str,
    /// Minimum story length in words.
    pub min_words: u32,
    /// Maximum story length in words.
    pub max_words: u32,
    /// Sentence-structure guidance passed verbatim into the prompt.
    pub sentence_guidance: &'static str,
}

/// The full policy table, ordered from youngest to oldest readers.
pub const READING_LEVELS: &[ReadingLevelPolicy] = &[
    ReadingLevelPolicy {
        level: "Pre-K",
        min_words: 100,
        max_words: 200,
        sentence_guidance: "very short sentences of 3-6 words with simple, repeated vocabulary",
    },
    ReadingLevelPolicy {
        level: "Kindergarten",
        min_words: 150,
        max_words: 250,
        sentence_guidance: "short sentences of 5-8 words using common sight words",
    },
    ReadingLevelPolicy {
        level: "1st Grade",
        min_words: 200,
        max_words: 350,
        sentence_guidance: "simple sentences with occasional compound sentences",
    },
    ReadingLevelPolicy {
        level: "2nd Grade",
        min_words: 300,
        max_words: 450,
        sentence_guidance: "a mix of simple and compound sentences with grade-level vocabulary",
    },
    ReadingLevelPolicy {
        level: "3rd Grade",
        min_words: 400,
        max_words: 600,
        sentence_guidance: "varied sentence structure with some descriptive language",
    },
    ReadingLevelPolicy {
        level: "4th Grade",
        min_words: 500,
        max_words: 700,
        sentence_guidance: "longer paragraphs with richer vocabulary and dialogue",
    },
    ReadingLevelPolicy {
        level: "5th Grade",
        min_words: 600,
        max_words: 800,
        sentence_guidance: "complex sentences, figurative language, and multi-scene structure",
    },
    ReadingLevelPolicy {
        level: "6th Grade",
        min_words: 700,
        max_words: 900,
        sentence_guidance: "sophisticated vocabulary, subplots, and nuanced character moments",
    },
];

/// Index of the fallback entry used for unrecognized keys (Kindergarten).
const DEFAULT_LEVEL_INDEX: usize = 1;

/// The policy applied when a reading-level key is not in the table.
pub const DEFAULT_LEVEL: &ReadingLevelPolicy = &READING_LEVELS[DEFAULT_LEVEL_INDEX];

/// Look up the policy for a reading-level key.
///
/// Unknown keys resolve to [`DEFAULT_LEVEL`]; this is the documented default
/// for stale or free-form level strings, not an error.
pub fn lookup(level: &str) -> &'static ReadingLevelPolicy {
    READING_LEVELS
        .iter()
        .find(|p| p.level == level)
        .unwrap_or(DEFAULT_LEVEL)
}

/// Whether `level` is one of the known table keys (used by profile
/// validation, which is stricter than prompt building).
pub fn is_known_level(level: &str) -> bool {
    READING_LEVELS.iter().any(|p| p.level == level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_eight_ordered_levels() {
        assert_eq!(READING_LEVELS.len(), 8);
        assert_eq!(READING_LEVELS[0].level, "Pre-K");
        assert_eq!(READING_LEVELS[7].level, "6th Grade");
    }

    #[test]
    fn bounds_are_monotonic() {
        for pair in READING_LEVELS.windows(2) {
            assert!(pair[0].min_words <= pair[1].min_words);
            assert!(pair[0].max_words <= pair[1].max_words);
        }
        for policy in READING_LEVELS {
            assert!(policy.min_words < policy.max_words);
        }
    }

    #[test]
    fn lookup_finds_every_key() {
        for policy in READING_LEVELS {
            assert_eq!(lookup(policy.level).level, policy.level);
        }
    }

    #[test]
    fn lookup_falls_back_to_kindergarten() {
        let policy = lookup("Postgraduate");
        assert_eq!(policy.level, "Kindergarten");
        assert_eq!(policy.min_words, DEFAULT_LEVEL.min_words);
    }

    #[test]
    fn known_level_check() {
        assert!(is_known_level("3rd Grade"));
        assert!(!is_known_level("3rd grade"));
        assert!(!is_known_level(""));
    }
}
