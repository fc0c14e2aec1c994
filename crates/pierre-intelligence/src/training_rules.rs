// ABOUTME: Static training rulebook: canonical splits, allowed main lifts, core lift ladders
// ABOUTME: Validates a generated main lift against the split and substitutes by equipment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Training Rules Engine
//!
//! Pure lookups with no I/O. Every function here is total: unknown splits and
//! unmapped foci yield `None`/`false` so callers must decide explicitly what
//! to do, rather than receiving a silent default.

use pierre_core::models::{Split, WorkoutShape};
use serde::{Deserialize, Serialize};
use tracing::debug;

const PUSH_MAIN_LIFTS: &[&str] = &[
    "barbell bench press",
    "bench press",
    "overhead press",
    "incline bench press",
    "dumbbell bench press",
    "kettlebell floor press",
    "push-up",
];

const PULL_MAIN_LIFTS: &[&str] = &[
    "barbell row",
    "deadlift",
    "weighted pull-up",
    "pull-up",
    "kettlebell row",
    "dumbbell row",
    "inverted row",
];

const LEGS_MAIN_LIFTS: &[&str] = &[
    "barbell back squat",
    "front squat",
    "trap bar deadlift",
    "romanian deadlift",
    "kettlebell goblet squat",
    "dumbbell goblet squat",
    "bodyweight squat",
];

const UPPER_MAIN_LIFTS: &[&str] = &[
    "barbell bench press",
    "overhead press",
    "barbell row",
    "weighted pull-up",
    "dumbbell bench press",
    "push-up",
];

const FULL_MAIN_LIFTS: &[&str] = &[
    "deadlift",
    "barbell back squat",
    "power clean",
    "kettlebell swing",
    "dumbbell thruster",
    "burpee",
];

/// Canonicalize a raw split name.
///
/// Exact, case-insensitive membership test against the closed set
/// `push|pull|legs|upper|full|hiit`. Near misses such as `"leg"` or
/// `"crossfit"` are `None`; nothing is guessed.
#[must_use]
pub fn canonical_split(raw: &str) -> Option<Split> {
    Split::from_name(raw)
}

/// Configured main lifts for a split, in preference order. Empty for HIIT.
#[must_use]
pub const fn main_lifts(split: Split) -> &'static [&'static str] {
    match split {
        Split::Push => PUSH_MAIN_LIFTS,
        Split::Pull => PULL_MAIN_LIFTS,
        Split::Legs => LEGS_MAIN_LIFTS,
        Split::Upper => UPPER_MAIN_LIFTS,
        Split::Full => FULL_MAIN_LIFTS,
        Split::Hiit => &[],
    }
}

fn normalize_lift_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether `name` is one of the split's main lifts (case and whitespace insensitive)
#[must_use]
pub fn is_main_lift(name: &str, split: Split) -> bool {
    if !split.has_main_lift() {
        return false;
    }
    let wanted = normalize_lift_name(name);
    main_lifts(split).iter().any(|lift| *lift == wanted)
}

/// Raw-string form of [`is_main_lift`]: false unless `split` resolves to a
/// non-HIIT canonical split.
#[must_use]
pub fn is_main_lift_for_split(name: &str, split: &str) -> bool {
    canonical_split(split).is_some_and(|split| is_main_lift(name, split))
}

/// First configured main lift for the split, or `None` for HIIT and unknown splits.
///
/// `equipment_names` is accepted for parity with [`pick_core_lift`] but is not
/// consulted: the choice is always the head of the split's list. Equipment-aware
/// selection for a split goes through [`BodyFocus::for_split`] and
/// [`pick_core_lift`] instead.
#[must_use]
pub fn pick_first_allowed_main(
    split: Option<Split>,
    _equipment_names: &[String],
) -> Option<&'static str> {
    split.and_then(|split| main_lifts(split).first().copied())
}

/// Body region a core lift is chosen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFocus {
    /// Squat pattern
    Legs,
    /// Horizontal/vertical pulling
    BackPull,
    /// Horizontal/vertical pressing
    ChestPush,
}

impl BodyFocus {
    /// Map a free-text focus to a body region. Unmapped foci are `None`.
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "legs" | "leg" | "lower" | "lower body" | "squat" => Some(Self::Legs),
            "back" | "pull" | "back-pull" | "back_pull" | "lats" => Some(Self::BackPull),
            "chest" | "push" | "chest-push" | "chest_push" | "press" => Some(Self::ChestPush),
            _ => None,
        }
    }

    /// Region whose ladder produces lifts valid for the split.
    ///
    /// Upper, full, and HIIT sessions have no single region and return `None`.
    #[must_use]
    pub const fn for_split(split: Split) -> Option<Self> {
        match split {
            Split::Push => Some(Self::ChestPush),
            Split::Pull => Some(Self::BackPull),
            Split::Legs => Some(Self::Legs),
            Split::Upper | Split::Full | Split::Hiit => None,
        }
    }

    const fn ladder(self) -> &'static [LadderRung] {
        match self {
            Self::Legs => LEGS_LADDER,
            Self::BackPull => BACK_PULL_LADDER,
            Self::ChestPush => CHEST_PUSH_LADDER,
        }
    }
}

/// One step of a preference ladder: a lift and the equipment it needs
struct LadderRung {
    lift: &'static str,
    requires: Option<&'static str>,
}

const LEGS_LADDER: &[LadderRung] = &[
    LadderRung {
        lift: "Barbell Back Squat",
        requires: Some("barbell"),
    },
    LadderRung {
        lift: "Kettlebell Goblet Squat",
        requires: Some("kettlebell"),
    },
    LadderRung {
        lift: "Dumbbell Goblet Squat",
        requires: Some("dumbbell"),
    },
    LadderRung {
        lift: "Bodyweight Squat",
        requires: None,
    },
];

const BACK_PULL_LADDER: &[LadderRung] = &[
    LadderRung {
        lift: "Barbell Row",
        requires: Some("barbell"),
    },
    LadderRung {
        lift: "Kettlebell Row",
        requires: Some("kettlebell"),
    },
    LadderRung {
        lift: "Dumbbell Row",
        requires: Some("dumbbell"),
    },
    LadderRung {
        lift: "Pull-Up",
        requires: Some("pull-up bar"),
    },
    LadderRung {
        lift: "Inverted Row",
        requires: None,
    },
];

const CHEST_PUSH_LADDER: &[LadderRung] = &[
    LadderRung {
        lift: "Barbell Bench Press",
        requires: Some("barbell"),
    },
    LadderRung {
        lift: "Dumbbell Bench Press",
        requires: Some("dumbbell"),
    },
    LadderRung {
        lift: "Kettlebell Floor Press",
        requires: Some("kettlebell"),
    },
    LadderRung {
        lift: "Push-Up",
        requires: None,
    },
];

/// Whether any owned equipment name contains the requirement (case-insensitive)
#[must_use]
pub fn has_equipment(equipment_names: &[String], requirement: &str) -> bool {
    let requirement = requirement.to_lowercase();
    equipment_names
        .iter()
        .any(|owned| owned.to_lowercase().contains(&requirement))
}

/// Walk the focus's preference ladder and return the first lift whose
/// equipment requirement the user satisfies.
///
/// Returns `None` when `focus` does not map to a body region, leaving the
/// choice to the generative model.
#[must_use]
pub fn pick_core_lift(focus: &str, equipment_names: &[String]) -> Option<&'static str> {
    BodyFocus::from_name(focus).and_then(|focus| pick_core_lift_for(focus, equipment_names))
}

/// Typed form of [`pick_core_lift`]
#[must_use]
pub fn pick_core_lift_for(focus: BodyFocus, equipment_names: &[String]) -> Option<&'static str> {
    focus
        .ladder()
        .iter()
        .find(|rung| {
            rung.requires
                .map_or(true, |requirement| has_equipment(equipment_names, requirement))
        })
        .map(|rung| rung.lift)
}

/// A disallowed main lift and what replaced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainLiftSubstitution {
    /// Lift the model chose
    pub original: String,
    /// Lift the rules engine put in its place
    pub replacement: String,
}

fn title_case(lift: &str) -> String {
    lift.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replacement lift for `split`: the equipment ladder of the split's body
/// region when its pick is allowed, else the head of the split's list.
#[must_use]
pub fn replacement_main_lift(split: Split, equipment_names: &[String]) -> Option<String> {
    BodyFocus::for_split(split)
        .and_then(|focus| pick_core_lift_for(focus, equipment_names))
        .filter(|lift| is_main_lift(lift, split))
        .map(str::to_owned)
        .or_else(|| pick_first_allowed_main(Some(split), equipment_names).map(title_case))
}

/// Check the shape's primary item against the split and rename it when the
/// lift is not allowed. Sets, reps and other prescription fields are kept.
///
/// HIIT sessions, unknown splits, and shapes without a primary item are left
/// untouched.
pub fn enforce_main_lift(
    shape: &mut WorkoutShape,
    split: Option<Split>,
    equipment_names: &[String],
) -> Option<MainLiftSubstitution> {
    let split = split.filter(Split::has_main_lift)?;
    let primary = shape.primary_mut()?;
    if is_main_lift(&primary.name, split) {
        return None;
    }

    let replacement = replacement_main_lift(split, equipment_names)?;
    debug!(
        split = %split,
        original = %primary.name,
        replacement = %replacement,
        "Substituting disallowed main lift"
    );
    let original = std::mem::replace(&mut primary.name, replacement.clone());
    Some(MainLiftSubstitution {
        original,
        replacement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equipment(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn test_canonical_split_closed_set() {
        for raw in ["HIIT", "hiit", "Hiit"] {
            assert_eq!(canonical_split(raw), Some(Split::Hiit));
        }
        assert_eq!(canonical_split("crossfit"), None);
        assert_eq!(canonical_split(""), None);
    }

    #[test]
    fn test_main_lift_membership() {
        assert!(is_main_lift_for_split("barbell back squat", "legs"));
        assert!(is_main_lift_for_split("  Barbell   Back  Squat ", "LEGS"));
        assert!(!is_main_lift_for_split("bench press", "legs"));
        assert!(!is_main_lift_for_split("burpee", "hiit"));
        assert!(!is_main_lift_for_split("deadlift", "crossfit"));
    }

    #[test]
    fn test_every_ladder_lift_is_allowed_for_its_split() {
        for split in [Split::Push, Split::Pull, Split::Legs] {
            let focus = BodyFocus::for_split(split).unwrap();
            for rung in focus.ladder() {
                assert!(is_main_lift(rung.lift, split), "{} / {split}", rung.lift);
            }
        }
    }

    #[test]
    fn test_pick_first_allowed_main_ignores_equipment() {
        let owned = equipment(&["kettlebell"]);
        assert_eq!(
            pick_first_allowed_main(Some(Split::Legs), &owned),
            Some("barbell back squat")
        );
        assert_eq!(pick_first_allowed_main(Some(Split::Hiit), &owned), None);
        assert_eq!(pick_first_allowed_main(None, &owned), None);
    }

    #[test]
    fn test_enforce_main_lift_substitutes_by_equipment() {
        use pierre_core::models::WorkoutItem;

        let mut shape = WorkoutShape {
            main: vec![
                WorkoutItem::named("Bench Press").with_sets_reps(5_u32, 5_u32).as_main(),
                WorkoutItem::named("Lunge"),
            ],
            ..WorkoutShape::default()
        };
        let swap = enforce_main_lift(&mut shape, Some(Split::Legs), &equipment(&["kettlebell"]))
            .unwrap();
        assert_eq!(swap.original, "Bench Press");
        assert_eq!(swap.replacement, "Kettlebell Goblet Squat");
        assert_eq!(shape.main[0].name, "Kettlebell Goblet Squat");
        assert_eq!(shape.main[0].sets, Some(5_u32.into()));

        assert!(enforce_main_lift(&mut shape, Some(Split::Legs), &[]).is_none());
        assert!(enforce_main_lift(&mut shape, Some(Split::Hiit), &[]).is_none());
        assert!(enforce_main_lift(&mut shape, None, &[]).is_none());
    }

    #[test]
    fn test_replacement_for_splits_without_ladder() {
        assert_eq!(
            replacement_main_lift(Split::Upper, &[]).as_deref(),
            Some("Barbell Bench Press")
        );
        assert_eq!(
            replacement_main_lift(Split::Full, &[]).as_deref(),
            Some("Deadlift")
        );
    }

    #[test]
    fn test_pick_core_lift_walks_ladder() {
        assert_eq!(
            pick_core_lift("legs", &equipment(&["Olympic Barbell", "Rack"])),
            Some("Barbell Back Squat")
        );
        assert_eq!(
            pick_core_lift("legs", &equipment(&["24kg Kettlebell"])),
            Some("Kettlebell Goblet Squat")
        );
        assert_eq!(pick_core_lift("legs", &[]), Some("Bodyweight Squat"));
        assert_eq!(
            pick_core_lift("back", &equipment(&["doorway pull-up bar"])),
            Some("Pull-Up")
        );
        assert_eq!(
            pick_core_lift("chest", &equipment(&["adjustable dumbbells"])),
            Some("Dumbbell Bench Press")
        );
        assert_eq!(pick_core_lift("calves", &equipment(&["barbell"])), None);
    }
}
