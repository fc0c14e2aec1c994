// ABOUTME: Workout plan data types: splits, modalities, phases, items, and canonical shape
// ABOUTME: Closed enums reject unknown names at the boundary instead of falling through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekly training focus category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Chest, shoulders, triceps
    Push,
    /// Back, biceps, rear delts
    Pull,
    /// Lower body
    Legs,
    /// Upper body combined
    Upper,
    /// Full body
    Full,
    /// High-intensity intervals, no main lift
    Hiit,
}

impl Split {
    /// Every canonical split, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Push,
        Self::Pull,
        Self::Legs,
        Self::Upper,
        Self::Full,
        Self::Hiit,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Legs => "legs",
            Self::Upper => "upper",
            Self::Full => "full",
            Self::Hiit => "hiit",
        }
    }

    /// Exact, case-insensitive lookup. Anything outside the closed set is `None`.
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|split| split.as_str().eq_ignore_ascii_case(raw))
    }

    /// Whether sessions of this split are anchored by a main lift
    #[must_use]
    pub const fn has_main_lift(&self) -> bool {
        !matches!(self, Self::Hiit)
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment modality requested for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Kettlebell-only work
    Kettlebell,
    /// Barbell-centred work
    Barbell,
    /// Dumbbell-centred work
    Dumbbell,
    /// No equipment
    Bodyweight,
    /// Any combination
    Mixed,
}

impl Modality {
    /// Keyword precedence used for detection in free text: first match wins
    pub const DETECTION_ORDER: [Self; 5] = [
        Self::Kettlebell,
        Self::Barbell,
        Self::Dumbbell,
        Self::Bodyweight,
        Self::Mixed,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kettlebell => "kettlebell",
            Self::Barbell => "barbell",
            Self::Dumbbell => "dumbbell",
            Self::Bodyweight => "bodyweight",
            Self::Mixed => "mixed",
        }
    }

    /// Case-insensitive exact lookup
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::DETECTION_ORDER
            .into_iter()
            .find(|modality| modality.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named segment of a session as produced by the phased plan shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// General preparation (raise temperature, mobilize)
    Prep,
    /// Targeted activation drills
    Activation,
    /// Combined warmup block
    Warmup,
    /// Strength block anchored by the main lift
    Strength,
    /// Main block
    Main,
    /// Accessory work drawn from the rotation pool
    Accessory,
    /// Conditioning / metabolic block
    Conditioning,
    /// Cooldown and down-regulation
    Cooldown,
}

impl Phase {
    /// Phases the generation contract allows the model to emit
    pub const GENERATION_PHASES: [Self; 5] = [
        Self::Warmup,
        Self::Main,
        Self::Accessory,
        Self::Conditioning,
        Self::Cooldown,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prep => "prep",
            Self::Activation => "activation",
            Self::Warmup => "warmup",
            Self::Strength => "strength",
            Self::Main => "main",
            Self::Accessory => "accessory",
            Self::Conditioning => "conditioning",
            Self::Cooldown => "cooldown",
        }
    }

    /// Case-insensitive exact lookup
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        [
            Self::Prep,
            Self::Activation,
            Self::Warmup,
            Self::Strength,
            Self::Main,
            Self::Accessory,
            Self::Conditioning,
            Self::Cooldown,
        ]
        .into_iter()
        .find(|phase| phase.as_str().eq_ignore_ascii_case(trimmed))
    }
}

/// Sets or reps as the model wrote them: a number (`3`) or text (`"8-10"`, `"AMRAP"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// Numeric value, kept as a JSON number so integers stay integers
    Number(serde_json::Number),
    /// Free-form value
    Text(String),
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// One exercise line in a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutItem {
    /// Exercise name (never empty once normalized)
    pub name: String,
    /// Set count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<Quantity>,
    /// Rep target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Quantity>,
    /// Timed work in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    /// Coaching cue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    /// Rest after each set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    /// Marks the primary lift of the main block
    #[serde(default)]
    pub is_main: bool,
    /// Marks an item whose exercise comes from the accessory rotation
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_accessory: bool,
}

impl WorkoutItem {
    /// Create an item carrying only a name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: None,
            reps: None,
            duration_seconds: None,
            instruction: None,
            rest_seconds: None,
            is_main: false,
            is_accessory: false,
        }
    }

    /// Set the sets/reps prescription
    #[must_use]
    pub fn with_sets_reps(mut self, sets: impl Into<Quantity>, reps: impl Into<Quantity>) -> Self {
        self.sets = Some(sets.into());
        self.reps = Some(reps.into());
        self
    }

    /// Mark the item as the session's primary lift
    #[must_use]
    pub const fn as_main(mut self) -> Self {
        self.is_main = true;
        self
    }

    /// Mark the item as an accessory slot
    #[must_use]
    pub const fn as_accessory(mut self) -> Self {
        self.is_accessory = true;
        self
    }
}

/// Canonical session shape returned to callers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutShape {
    /// Warmup items in execution order
    #[serde(default)]
    pub warmup: Vec<WorkoutItem>,
    /// Main block items in execution order
    #[serde(default)]
    pub main: Vec<WorkoutItem>,
    /// Cooldown items in execution order
    #[serde(default)]
    pub cooldown: Vec<WorkoutItem>,
}

impl WorkoutShape {
    /// Total number of items across all three lists
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.warmup.len() + self.main.len() + self.cooldown.len()
    }

    /// True when no list has any item
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// The main-block item flagged as primary
    #[must_use]
    pub fn primary(&self) -> Option<&WorkoutItem> {
        self.main.iter().find(|item| item.is_main)
    }

    /// Mutable access to the primary item
    pub fn primary_mut(&mut self) -> Option<&mut WorkoutItem> {
        self.main.iter_mut().find(|item| item.is_main)
    }

    /// Accessory-tagged items of the main block
    pub fn accessories_mut(&mut self) -> impl Iterator<Item = &mut WorkoutItem> {
        self.main.iter_mut().filter(|item| item.is_accessory)
    }
}

/// Candidate accessory exercise drawn from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryPoolEntry {
    /// Exercise name
    pub name: String,
    /// Rest applied when the generated item carries none
    pub rest_seconds_default: u32,
    /// Working time of one set
    pub set_duration_seconds: u32,
}
