// ABOUTME: Persistent store abstraction consumed by the plan assembler
// ABOUTME: Profile, equipment, catalog, sessions, set logs, and rotation history by key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Planner Store
//!
//! The pipeline reads and writes user context through [`PlannerStore`]. Only
//! single-key reads and full-value overwrites are required; there are no
//! transactions. Rotation history in particular is read-then-overwrite with
//! last-writer-wins semantics.

mod memory;

pub use memory::{InMemoryStore, DEMO_USER_ID, MAX_SESSIONS_PER_USER, MAX_SETS_PER_USER};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use pierre_core::constants::{CORE_LIFT_TAG, NON_ACCESSORY_CATEGORIES};
use pierre_core::models::{CatalogExercise, SessionRecord, UserProfile};

/// Catalog query filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Only this category (case-insensitive), when set
    pub category: Option<String>,
    /// Categories to leave out (case-insensitive)
    pub exclude_categories: Vec<String>,
    /// Leave out entries carrying this tag (case-insensitive)
    pub exclude_tag: Option<String>,
}

impl CatalogFilter {
    /// Every catalog entry
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Entries of one category
    #[must_use]
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Accessory candidates: no warmup, mobility or cooldown work and no core lifts
    #[must_use]
    pub fn accessory_pool() -> Self {
        Self {
            category: None,
            exclude_categories: NON_ACCESSORY_CATEGORIES
                .iter()
                .map(|category| (*category).to_owned())
                .collect(),
            exclude_tag: Some(CORE_LIFT_TAG.to_owned()),
        }
    }

    /// Whether `exercise` passes the filter
    #[must_use]
    pub fn matches(&self, exercise: &CatalogExercise) -> bool {
        if let Some(category) = &self.category {
            if !exercise.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if self
            .exclude_categories
            .iter()
            .any(|excluded| exercise.category.eq_ignore_ascii_case(excluded))
        {
            return false;
        }
        !self.exclude_tag.as_ref().is_some_and(|excluded| {
            exercise
                .tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(excluded))
        })
    }
}

/// One logged set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedSet {
    /// Exercise the set belongs to
    pub exercise: String,
    /// 1-based set number
    pub set_number: u32,
    /// Repetitions performed
    pub reps: u32,
    /// Load lifted
    pub weight: f64,
    /// When the set was recorded
    pub logged_at: DateTime<Utc>,
}

/// Store collaborator used by the planner
#[async_trait]
pub trait PlannerStore: Send + Sync {
    /// Profile of the user, if one is stored
    async fn user_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>>;

    /// Equipment names owned by the user
    async fn equipment(&self, user_id: &str) -> AppResult<Vec<String>>;

    /// Catalog entries passing `filter`, in catalog order
    async fn exercise_catalog(&self, filter: &CatalogFilter) -> AppResult<Vec<CatalogExercise>>;

    /// Persist a generated session
    async fn save_session(&self, record: SessionRecord) -> AppResult<()>;

    /// Most recent sessions first, at most `limit`
    async fn recent_sessions(&self, user_id: &str, limit: usize) -> AppResult<Vec<SessionRecord>>;

    /// Append sets to the user's log
    async fn append_set_log(&self, user_id: &str, sets: Vec<LoggedSet>) -> AppResult<()>;

    /// Most recent logged sets first, at most `limit`
    async fn recent_sets(&self, user_id: &str, limit: usize) -> AppResult<Vec<LoggedSet>>;

    /// Last stored accessory names for a rotation key (empty if none)
    async fn rotation_history(&self, key: &str) -> AppResult<Vec<String>>;

    /// Replace the rotation history for a key
    async fn set_rotation_history(&self, key: &str, names: Vec<String>) -> AppResult<()>;
}
