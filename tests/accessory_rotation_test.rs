// ABOUTME: Tests for accessory rotation across the pure selector and the store-backed picker
// ABOUTME: Validates disjoint consecutive picks, history overwrite, key scoping, and small pools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_core::models::{AccessoryPoolEntry, Split};
use pierre_intelligence::{select_accessories, RotationKey};
use pierre_workout_planner::planner::{accessory_pool, pick_accessories, RotationRng};
use pierre_workout_planner::store::{InMemoryStore, PlannerStore, DEMO_USER_ID};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn pool(names: &[&str]) -> Vec<AccessoryPoolEntry> {
    names
        .iter()
        .map(|name| AccessoryPoolEntry {
            name: (*name).to_owned(),
            rest_seconds_default: 60,
            set_duration_seconds: 40,
        })
        .collect()
}

fn name_set(entries: &[AccessoryPoolEntry]) -> HashSet<String> {
    entries.iter().map(|entry| entry.name.clone()).collect()
}

#[test]
fn test_selection_is_reproducible_with_seed() {
    let pool = pool(&["A", "B", "C", "D", "E", "F"]);
    let first = select_accessories(&pool, &[], 3, &mut ChaCha8Rng::seed_from_u64(11));
    let again = select_accessories(&pool, &[], 3, &mut ChaCha8Rng::seed_from_u64(11));
    assert_eq!(first, again);
}

#[test]
fn test_small_pool_falls_back_to_full_pool() {
    let pool = pool(&["A", "B", "C"]);
    let recent = vec!["a".to_owned(), "B".to_owned()];
    let picked = select_accessories(&pool, &recent, 2, &mut ChaCha8Rng::seed_from_u64(3));
    assert_eq!(picked.len(), 2);

    let tiny = select_accessories(&pool[..1], &[], 3, &mut ChaCha8Rng::seed_from_u64(3));
    assert_eq!(tiny.len(), 1);
}

#[tokio::test]
async fn test_store_backed_picks_are_disjoint() {
    let store = InMemoryStore::demo();
    let equipment = store.equipment(DEMO_USER_ID).await.unwrap();
    let pool = accessory_pool(&store, &equipment).await.unwrap();
    assert!(pool.len() >= 6);

    let key = RotationKey::for_split(DEMO_USER_ID, Some(Split::Pull));
    let first = pick_accessories(&store, &key, &pool, 3, 32, RotationRng::Entropy)
        .await
        .unwrap();
    let second = pick_accessories(&store, &key, &pool, 3, 32, RotationRng::Entropy)
        .await
        .unwrap();

    assert!(name_set(&first).is_disjoint(&name_set(&second)));
    assert_eq!(
        store.rotation_history("demo:pull").await.unwrap(),
        second.iter().map(|e| e.name.clone()).collect::<Vec<_>>()
    );
    // Other splits keep their own history
    assert!(store.rotation_history("demo:legs").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_is_capped() {
    let store = InMemoryStore::demo();
    let pool = accessory_pool(&store, &[]).await.unwrap();
    let key = RotationKey::user("u1");

    let picked = pick_accessories(&store, &key, &pool, 3, 2, RotationRng::Seeded(5))
        .await
        .unwrap();
    let names: Vec<String> = picked.iter().map(|e| e.name.clone()).collect();
    assert_eq!(names.len(), 2);
    assert_eq!(store.rotation_history("u1").await.unwrap(), names);
}

#[tokio::test]
async fn test_empty_pool_leaves_history_untouched() {
    let store = InMemoryStore::new();
    store
        .set_rotation_history("u1", vec!["Plank".to_owned()])
        .await
        .unwrap();

    let picked = pick_accessories(&store, &RotationKey::user("u1"), &[], 2, 32, RotationRng::Entropy)
        .await
        .unwrap();
    assert!(picked.is_empty());
    assert_eq!(store.rotation_history("u1").await.unwrap(), vec!["Plank"]);
}
