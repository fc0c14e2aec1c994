// ABOUTME: DashMap-backed in-memory PlannerStore for the CLI, tests, and local runs
// ABOUTME: Includes a demo profile, equipment list, and exercise catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use super::{CatalogFilter, LoggedSet, PlannerStore};
use crate::errors::AppResult;
use pierre_core::models::{CatalogExercise, SessionRecord, TrainingLevel, UserProfile};

/// User id of the demo profile loaded by [`InMemoryStore::demo`]
pub const DEMO_USER_ID: &str = "demo";

/// Session records retained per user; older records are dropped first
pub const MAX_SESSIONS_PER_USER: usize = 50;

/// Logged sets retained per user; older sets are dropped first
pub const MAX_SETS_PER_USER: usize = 500;

/// Drop the oldest entries so at most `cap` remain
fn retain_newest<T>(entries: &mut Vec<T>, cap: usize) {
    let excess = entries.len().saturating_sub(cap);
    if excess > 0 {
        entries.drain(..excess);
    }
}

/// In-memory store. Per-key maps are concurrent; the catalog is fixed at construction.
///
/// Session and set-log histories are bounded per user by
/// [`MAX_SESSIONS_PER_USER`] and [`MAX_SETS_PER_USER`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    profiles: DashMap<String, UserProfile>,
    equipment: DashMap<String, Vec<String>>,
    catalog: Vec<CatalogExercise>,
    sessions: DashMap<String, Vec<SessionRecord>>,
    set_logs: DashMap<String, Vec<LoggedSet>>,
    rotation: DashMap<String, Vec<String>>,
}

impl InMemoryStore {
    /// Empty store with an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store with the given catalog
    #[must_use]
    pub fn with_catalog(catalog: Vec<CatalogExercise>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Store loaded with the demo user and catalog
    #[must_use]
    pub fn demo() -> Self {
        let store = Self::with_catalog(demo_catalog());
        store.put_profile(UserProfile {
            user_id: DEMO_USER_ID.to_owned(),
            display_name: Some("Demo Athlete".to_owned()),
            age: Some(34),
            body_weight_kg: Some(78.0),
            height_cm: Some(178.0),
            level: TrainingLevel::Intermediate,
            goal: Some("Build strength while staying athletic".to_owned()),
            limitations: Vec::new(),
        });
        store.put_equipment(
            DEMO_USER_ID,
            vec![
                "24kg kettlebell".to_owned(),
                "adjustable dumbbells".to_owned(),
                "doorway pull-up bar".to_owned(),
                "resistance bands".to_owned(),
            ],
        );
        store
    }

    /// Insert or replace a profile
    pub fn put_profile(&self, profile: UserProfile) {
        self.profiles.insert(profile.user_id.clone(), profile);
    }

    /// Replace a user's equipment list
    pub fn put_equipment(&self, user_id: &str, names: Vec<String>) {
        self.equipment.insert(user_id.to_owned(), names);
    }
}

#[async_trait]
impl PlannerStore for InMemoryStore {
    async fn user_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn equipment(&self, user_id: &str) -> AppResult<Vec<String>> {
        Ok(self
            .equipment
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn exercise_catalog(&self, filter: &CatalogFilter) -> AppResult<Vec<CatalogExercise>> {
        Ok(self
            .catalog
            .iter()
            .filter(|exercise| filter.matches(exercise))
            .cloned()
            .collect())
    }

    async fn save_session(&self, record: SessionRecord) -> AppResult<()> {
        debug!(user.id = %record.user_id, session.id = %record.id, "Saving session");
        let mut sessions = self.sessions.entry(record.user_id.clone()).or_default();
        sessions.push(record);
        retain_newest(sessions.value_mut(), MAX_SESSIONS_PER_USER);
        Ok(())
    }

    async fn recent_sessions(&self, user_id: &str, limit: usize) -> AppResult<Vec<SessionRecord>> {
        Ok(self
            .sessions
            .get(user_id)
            .map(|entry| entry.value().iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn append_set_log(&self, user_id: &str, sets: Vec<LoggedSet>) -> AppResult<()> {
        let mut logs = self.set_logs.entry(user_id.to_owned()).or_default();
        logs.extend(sets);
        retain_newest(logs.value_mut(), MAX_SETS_PER_USER);
        Ok(())
    }

    async fn recent_sets(&self, user_id: &str, limit: usize) -> AppResult<Vec<LoggedSet>> {
        Ok(self
            .set_logs
            .get(user_id)
            .map(|entry| entry.value().iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn rotation_history(&self, key: &str) -> AppResult<Vec<String>> {
        Ok(self
            .rotation
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn set_rotation_history(&self, key: &str, names: Vec<String>) -> AppResult<()> {
        self.rotation.insert(key.to_owned(), names);
        Ok(())
    }
}

fn entry(
    name: &str,
    category: &str,
    tags: &[&str],
    equipment: Option<&str>,
    set_duration_seconds: u32,
) -> CatalogExercise {
    CatalogExercise {
        name: name.to_owned(),
        category: category.to_owned(),
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        equipment: equipment.map(str::to_owned),
        rest_seconds_default: None,
        set_duration_seconds: Some(set_duration_seconds),
    }
}

fn demo_catalog() -> Vec<CatalogExercise> {
    vec![
        entry("Jumping Jacks", "warmup", &[], None, 60),
        entry("World's Greatest Stretch", "mobility", &[], None, 60),
        entry("Band Pull-Apart", "warmup", &["pull"], Some("band"), 40),
        entry("Barbell Back Squat", "strength", &["core_lift", "legs"], Some("barbell"), 45),
        entry("Kettlebell Goblet Squat", "strength", &["core_lift", "legs"], Some("kettlebell"), 45),
        entry("Dumbbell Bench Press", "strength", &["core_lift", "push"], Some("dumbbell"), 45),
        entry("Pull-Up", "strength", &["core_lift", "pull"], Some("pull-up bar"), 40),
        entry("Kettlebell Swing", "accessory", &["hinge"], Some("kettlebell"), 40),
        entry("Dumbbell Reverse Lunge", "accessory", &["legs"], Some("dumbbell"), 45),
        entry("Bulgarian Split Squat", "accessory", &["legs"], None, 45),
        entry("Single-Leg Romanian Deadlift", "accessory", &["legs", "hinge"], Some("dumbbell"), 45),
        entry("Dumbbell Row", "accessory", &["pull"], Some("dumbbell"), 40),
        entry("Band Face Pull", "accessory", &["pull"], Some("band"), 40),
        entry("Hammer Curl", "accessory", &["arms"], Some("dumbbell"), 35),
        entry("Push-Up", "accessory", &["push"], None, 35),
        entry("Dumbbell Lateral Raise", "accessory", &["push"], Some("dumbbell"), 35),
        entry("Plank", "accessory", &["core"], None, 45),
        entry("Hanging Knee Raise", "accessory", &["core"], Some("pull-up bar"), 35),
        entry("Barbell Hip Thrust", "accessory", &["legs"], Some("barbell"), 45),
        entry("Child's Pose", "cooldown", &[], None, 60),
        entry("Couch Stretch", "cooldown", &[], None, 60),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pierre_core::models::WorkoutShape;

    #[tokio::test]
    async fn test_demo_store_contents() {
        let store = InMemoryStore::demo();
        assert!(store.user_profile(DEMO_USER_ID).await.unwrap().is_some());
        assert_eq!(store.equipment(DEMO_USER_ID).await.unwrap().len(), 4);
        assert!(store.equipment("nobody").await.unwrap().is_empty());

        let pool = store
            .exercise_catalog(&CatalogFilter::accessory_pool())
            .await
            .unwrap();
        assert!(pool.iter().all(|e| e.category == "accessory"));
        assert!(pool.iter().all(|e| !e.is_core_lift()));
    }

    #[tokio::test]
    async fn test_recent_sessions_newest_first() {
        let store = InMemoryStore::new();
        for minutes in [30, 40, 50] {
            store
                .save_session(SessionRecord::new(
                    "u1",
                    None,
                    minutes,
                    WorkoutShape::default(),
                    "",
                ))
                .await
                .unwrap();
        }
        let recent = store.recent_sessions("u1", 2).await.unwrap();
        let minutes: Vec<u32> = recent.iter().map(|r| r.minutes).collect();
        assert_eq!(minutes, vec![50, 40]);
    }

    #[tokio::test]
    async fn test_rotation_history_is_overwritten() {
        let store = InMemoryStore::new();
        store
            .set_rotation_history("u1:legs", vec!["A".into(), "B".into()])
            .await
            .unwrap();
        store
            .set_rotation_history("u1:legs", vec!["C".into()])
            .await
            .unwrap();
        assert_eq!(store.rotation_history("u1:legs").await.unwrap(), vec!["C"]);
        assert!(store.rotation_history("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_log_appends() {
        let store = InMemoryStore::new();
        let set = LoggedSet {
            exercise: "Squat".to_owned(),
            set_number: 1,
            reps: 5,
            weight: 100.0,
            logged_at: Utc::now(),
        };
        store.append_set_log("u1", vec![set.clone()]).await.unwrap();
        store.append_set_log("u1", vec![set]).await.unwrap();
        assert_eq!(store.recent_sets("u1", 10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_histories_keep_only_newest_entries() {
        let store = InMemoryStore::new();
        for minutes in 0..55 {
            store
                .save_session(SessionRecord::new(
                    "u1",
                    None,
                    minutes,
                    WorkoutShape::default(),
                    "",
                ))
                .await
                .unwrap();
        }
        let sessions = store.recent_sessions("u1", usize::MAX).await.unwrap();
        assert_eq!(sessions.len(), MAX_SESSIONS_PER_USER);
        assert_eq!(sessions[0].minutes, 54);
        assert_eq!(sessions[MAX_SESSIONS_PER_USER - 1].minutes, 5);

        let sets: Vec<LoggedSet> = (1..=510)
            .map(|set_number| LoggedSet {
                exercise: "Squat".to_owned(),
                set_number,
                reps: 5,
                weight: 100.0,
                logged_at: Utc::now(),
            })
            .collect();
        store.append_set_log("u1", sets).await.unwrap();
        let recent = store.recent_sets("u1", usize::MAX).await.unwrap();
        assert_eq!(recent.len(), MAX_SETS_PER_USER);
        assert_eq!(recent[0].set_number, 510);
        assert_eq!(recent[MAX_SETS_PER_USER - 1].set_number, 11);
    }
}
