// ABOUTME: Heuristic intent classifier turning free text into an Intent with extracted slots
// ABOUTME: Celebrity styles short-circuit; later predicate matches overwrite earlier ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intent Classifier
//!
//! Fast, model-free classification. Steps, on the lowercased input:
//!
//! 1. A named celebrity or influencer style returns `celebrity_inspired`
//!    immediately with the matched name and no other slots.
//! 2. Slots are extracted regardless of the intent finally chosen: modality
//!    (first match in precedence order), duration (clamped), focus, split and
//!    an ordinal reference.
//! 3. Predicates run in a fixed order (make, modify, explain, log) and each
//!    match overwrites the previous one, so the most specific category wins.
//! 4. No predicate match leaves the intent `unknown`.

use pierre_core::constants::clamp_minutes;
use pierre_core::models::{Intent, IntentKind, Modality, Split};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Keyword (lowercase) and the display name it is reported under
const CELEBRITY_STYLES: &[(&str, &str)] = &[
    ("schwarzenegger", "Arnold Schwarzenegger"),
    ("arnold", "Arnold Schwarzenegger"),
    ("the rock", "Dwayne Johnson"),
    ("dwayne johnson", "Dwayne Johnson"),
    ("hemsworth", "Chris Hemsworth"),
    ("goggins", "David Goggins"),
    ("cbum", "Chris Bumstead"),
    ("bumstead", "Chris Bumstead"),
    ("ronnie coleman", "Ronnie Coleman"),
    ("kayla itsines", "Kayla Itsines"),
    ("mat fraser", "Mat Fraser"),
    ("jeff nippard", "Jeff Nippard"),
    ("henry cavill", "Henry Cavill"),
    ("bruce lee", "Bruce Lee"),
];

/// Body-area keywords recognised as the session focus
const FOCUS_KEYWORDS: &[(&str, &str)] = &[
    ("legs", "legs"),
    ("leg", "legs"),
    ("glutes", "glutes"),
    ("back", "back"),
    ("chest", "chest"),
    ("shoulders", "shoulders"),
    ("arms", "arms"),
    ("core", "core"),
];

const ORDINAL_WORDS: [&str; 10] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
];

static DURATION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 45 min, 30minutes, 120 minute
    Regex::new(r"(\d{2,3})\s?(min|minutes|minute)").ok()
});

static MAKE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(workout|wod|session|program)s?\b").ok());

static MODIFY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(swap|replace|shorter|longer|change)\b|\bno\s").ok());

static EXPLAIN_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"how to|what is|\bwhy\b|explain|\bform\b").ok());

static LOG_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\blog\b|history|what did i do").ok());

static NTH_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)$").ok());

static NUMBERED_REFERENCE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: number 3, #2, option 4, program 1
    Regex::new(r"(?:\bnumber\s+|#|\boption\s+|\bprogram\s+)(\d{1,2})\b").ok()
});

fn matches(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// Words of `text`, keeping hyphenated compounds such as `pull-up` whole
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|word| !word.is_empty())
}

fn detect_celebrity(lowered: &str) -> Option<&'static str> {
    CELEBRITY_STYLES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, name)| *name)
}

/// First modality keyword in precedence order, not by position in the text
fn detect_modality(lowered: &str) -> Option<Modality> {
    Modality::DETECTION_ORDER
        .into_iter()
        .find(|modality| lowered.contains(modality.as_str()))
}

/// Duration in minutes, clamped into the supported session range
fn detect_duration(lowered: &str) -> Option<u32> {
    let captures = DURATION_PATTERN.as_ref()?.captures(lowered)?;
    let minutes = captures.get(1)?.as_str().parse::<u32>().ok()?;
    Some(clamp_minutes(minutes))
}

fn detect_focus(lowered: &str) -> Option<String> {
    words(lowered).find_map(|word| {
        FOCUS_KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == word)
            .map(|(_, focus)| (*focus).to_owned())
    })
}

fn detect_split(lowered: &str) -> Option<Split> {
    words(lowered).find_map(Split::from_name)
}

/// Map an ordinal word, an `Nth` form or a bare integer to its number.
///
/// `"first"`..`"tenth"` and `"1st"`..`"10th"` are recognised; anything else
/// that is not a plain integer is `None`, never zero.
#[must_use]
pub fn ordinal_to_number(raw: &str) -> Option<u32> {
    let token = raw.trim().to_lowercase();
    if let Some(index) = ORDINAL_WORDS.iter().position(|word| *word == token) {
        return u32::try_from(index + 1).ok();
    }
    if let Some(captures) = NTH_PATTERN.as_ref().and_then(|re| re.captures(&token)) {
        return captures
            .get(1)
            .and_then(|digits| digits.as_str().parse::<u32>().ok())
            .filter(|n| (1..=10).contains(n));
    }
    token.parse::<u32>().ok()
}

/// First ordinal reference in free text ("the second one", "3rd", "number 4").
///
/// Bare integers only count after a marker such as `number` or `#`, so that
/// durations and set counts are not mistaken for references.
#[must_use]
pub fn find_ordinal(text: &str) -> Option<u32> {
    let lowered = text.to_lowercase();
    let from_words = words(&lowered)
        .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
        .find_map(ordinal_to_number);
    from_words.or_else(|| {
        NUMBERED_REFERENCE_PATTERN
            .as_ref()?
            .captures(&lowered)?
            .get(1)?
            .as_str()
            .parse()
            .ok()
    })
}

/// Classify free text into an [`Intent`] using heuristics only
#[must_use]
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();

    if let Some(name) = detect_celebrity(&lowered) {
        let mut intent = Intent::new(IntentKind::CelebrityInspired);
        intent.referenced_name = Some(name.to_owned());
        return intent;
    }

    let mut kind = IntentKind::Unknown;
    if matches(&MAKE_PATTERN, &lowered) {
        kind = IntentKind::MakeWorkout;
    }
    if matches(&MODIFY_PATTERN, &lowered) {
        kind = IntentKind::ModifyWorkout;
    }
    if matches(&EXPLAIN_PATTERN, &lowered) {
        kind = IntentKind::ExplainOrCoach;
    }
    if matches(&LOG_PATTERN, &lowered) {
        kind = IntentKind::LogOrHistory;
    }

    let intent = Intent {
        kind,
        duration_minutes: detect_duration(&lowered),
        modality: detect_modality(&lowered),
        focus: detect_focus(&lowered),
        referenced_name: None,
        split: detect_split(&lowered),
        ordinal: find_ordinal(&lowered),
    };
    debug!(intent = %intent.kind, slots = intent.has_slots(), "Heuristic classification");
    intent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_unknown_without_slots() {
        let intent = classify("asdkjasd");
        assert_eq!(intent.kind, IntentKind::Unknown);
        assert!(!intent.has_slots());
    }

    #[test]
    fn test_duration_is_clamped() {
        assert_eq!(classify("a 45 min workout").duration_minutes, Some(45));
        assert_eq!(classify("give me 200 minutes").duration_minutes, Some(120));
        assert_eq!(classify("quick 05 minute session").duration_minutes, Some(10));
        assert_eq!(classify("90minutes please").duration_minutes, Some(90));
        assert_eq!(classify("5 min session").duration_minutes, None);
    }

    #[test]
    fn test_modality_precedence_not_position() {
        let intent = classify("dumbbell or kettlebell workout");
        assert_eq!(intent.modality, Some(Modality::Kettlebell));
        assert_eq!(
            classify("bodyweight and barbell").modality,
            Some(Modality::Barbell)
        );
    }

    #[test]
    fn test_later_predicates_overwrite() {
        assert_eq!(classify("build me a workout").kind, IntentKind::MakeWorkout);
        assert_eq!(
            classify("make the workout shorter").kind,
            IntentKind::ModifyWorkout
        );
        assert_eq!(
            classify("workout with no burpees").kind,
            IntentKind::ModifyWorkout
        );
        assert_eq!(
            classify("explain the workout").kind,
            IntentKind::ExplainOrCoach
        );
        assert_eq!(
            classify("what did i do last session").kind,
            IntentKind::LogOrHistory
        );
    }

    #[test]
    fn test_celebrity_short_circuits() {
        let intent = classify("45 min Arnold style chest workout");
        assert_eq!(intent.kind, IntentKind::CelebrityInspired);
        assert_eq!(
            intent.referenced_name.as_deref(),
            Some("Arnold Schwarzenegger")
        );
        assert!(intent.duration_minutes.is_none());
        assert!(intent.modality.is_none());
    }

    #[test]
    fn test_focus_and_split_slots() {
        let intent = classify("Legs day workout, kettlebell only");
        assert_eq!(intent.focus.as_deref(), Some("legs"));
        assert_eq!(intent.split, Some(Split::Legs));

        let intent = classify("pull-up focused back session");
        assert_eq!(intent.split, None);
        assert_eq!(intent.focus.as_deref(), Some("back"));
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(ordinal_to_number("third"), Some(3));
        assert_eq!(ordinal_to_number("10th"), Some(10));
        assert_eq!(ordinal_to_number("7"), Some(7));
        assert_eq!(ordinal_to_number("eleventh"), None);
        assert_eq!(ordinal_to_number("lots"), None);

        assert_eq!(find_ordinal("let's do the second one"), Some(2));
        assert_eq!(find_ordinal("the 3rd program"), Some(3));
        assert_eq!(find_ordinal("number 4 please"), Some(4));
        assert_eq!(find_ordinal("a 30 min workout"), None);
    }
}
