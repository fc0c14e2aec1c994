// ABOUTME: Stored user context consumed by the planner: profile, catalog entries, sessions
// ABOUTME: Records exchanged with the persistent store collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccessoryPoolEntry, Split, WorkoutShape};
use crate::constants::{
    CORE_LIFT_TAG, DEFAULT_ACCESSORY_REST_SECONDS, DEFAULT_ACCESSORY_SET_SECONDS,
    NON_ACCESSORY_CATEGORIES,
};

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLevel {
    /// Less than a year of structured training
    #[default]
    Beginner,
    /// One to three years
    Intermediate,
    /// Three years or more
    Advanced,
}

impl TrainingLevel {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Profile metrics used to personalize prompts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning user
    pub user_id: String,
    /// Display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Age in years
    #[serde(default)]
    pub age: Option<u32>,
    /// Body weight in kilograms
    #[serde(default)]
    pub body_weight_kg: Option<f64>,
    /// Height in centimeters
    #[serde(default)]
    pub height_cm: Option<f64>,
    /// Training experience
    #[serde(default)]
    pub level: TrainingLevel,
    /// Stated goal ("hypertrophy", "first pull-up", ...)
    #[serde(default)]
    pub goal: Option<String>,
    /// Injuries or movements to avoid
    #[serde(default)]
    pub limitations: Vec<String>,
}

impl UserProfile {
    /// Empty profile for a user with no stored metrics
    #[must_use]
    pub fn anonymous(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }
}

/// Exercise as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogExercise {
    /// Exercise name
    pub name: String,
    /// Category (`strength`, `accessory`, `warmup`, `mobility`, `cooldown`, ...)
    pub category: String,
    /// Free-form tags; `core_lift` marks main lifts
    #[serde(default)]
    pub tags: Vec<String>,
    /// Equipment needed, matched by substring against the user's inventory
    #[serde(default)]
    pub equipment: Option<String>,
    /// Rest between sets
    #[serde(default)]
    pub rest_seconds_default: Option<u32>,
    /// Working time of one set
    #[serde(default)]
    pub set_duration_seconds: Option<u32>,
}

impl CatalogExercise {
    /// Whether the exercise is tagged as a core lift
    #[must_use]
    pub fn is_core_lift(&self) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(CORE_LIFT_TAG))
    }

    /// Whether the category keeps the exercise out of the accessory pool
    #[must_use]
    pub fn is_excluded_category(&self) -> bool {
        NON_ACCESSORY_CATEGORIES
            .iter()
            .any(|category| self.category.eq_ignore_ascii_case(category))
    }

    /// Project the catalog entry into an accessory pool candidate
    #[must_use]
    pub fn to_pool_entry(&self) -> AccessoryPoolEntry {
        AccessoryPoolEntry {
            name: self.name.clone(),
            rest_seconds_default: self
                .rest_seconds_default
                .unwrap_or(DEFAULT_ACCESSORY_REST_SECONDS),
            set_duration_seconds: self
                .set_duration_seconds
                .unwrap_or(DEFAULT_ACCESSORY_SET_SECONDS),
        }
    }
}

/// A generated session written back to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Session identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Split the session was built for
    pub split: Option<Split>,
    /// Planned length
    pub minutes: u32,
    /// Normalized plan
    pub workout: WorkoutShape,
    /// Message shown alongside the plan
    pub coach_message: String,
}

impl SessionRecord {
    /// New record stamped with a fresh id and the current time
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        split: Option<Split>,
        minutes: u32,
        workout: WorkoutShape,
        coach_message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            created_at: Utc::now(),
            split,
            minutes,
            workout,
            coach_message: coach_message.into(),
        }
    }
}
