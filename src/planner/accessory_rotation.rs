// ABOUTME: Store-backed accessory rotation: build the pool, select, persist, and apply to a plan
// ABOUTME: History is read before selection and fully overwritten afterwards (last writer wins)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{AccessoryPoolEntry, WorkoutShape};
use pierre_intelligence::{has_equipment, next_history, select_accessories, RotationKey};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::instrument;

use crate::errors::AppResult;
use crate::logging::PipelineLogger;
use crate::store::{CatalogFilter, PlannerStore};

/// Source of randomness for accessory shuffles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationRng {
    /// Fresh OS entropy per selection
    #[default]
    Entropy,
    /// The same seed for every selection, for reproducible runs
    Seeded(u64),
}

impl RotationRng {
    /// Seeded when a seed is configured, entropy otherwise
    #[must_use]
    pub const fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(seed),
            None => Self::Entropy,
        }
    }

    fn rng(self) -> ChaCha8Rng {
        match self {
            Self::Entropy => ChaCha8Rng::from_entropy(),
            Self::Seeded(seed) => ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

/// Accessory candidates for a user: catalog entries outside the warmup,
/// mobility and cooldown categories, not tagged as core lifts, whose
/// equipment (if any) the user owns.
///
/// # Errors
///
/// Propagates store failures.
pub async fn accessory_pool(
    store: &dyn PlannerStore,
    equipment: &[String],
) -> AppResult<Vec<AccessoryPoolEntry>> {
    let catalog = store
        .exercise_catalog(&CatalogFilter::accessory_pool())
        .await?;
    Ok(catalog
        .iter()
        .filter(|exercise| {
            exercise
                .equipment
                .as_deref()
                .map_or(true, |required| has_equipment(equipment, required))
        })
        .map(|exercise| exercise.to_pool_entry())
        .collect())
}

/// Read the key's history, pick `count` accessories avoiding it, and
/// overwrite the history with the picks.
///
/// `count` is capped at `history_limit` so the stored history always equals
/// the last selection. An empty pick leaves the stored history untouched.
///
/// # Errors
///
/// Propagates store failures.
#[instrument(skip(store, pool), fields(key = %key, pool = pool.len()))]
pub async fn pick_accessories(
    store: &dyn PlannerStore,
    key: &RotationKey,
    pool: &[AccessoryPoolEntry],
    count: usize,
    history_limit: usize,
    rng: RotationRng,
) -> AppResult<Vec<AccessoryPoolEntry>> {
    let count = count.min(history_limit);
    let recent = store.rotation_history(key.as_str()).await?;
    let selected = select_accessories(pool, &recent, count, &mut rng.rng());

    if !selected.is_empty() {
        store
            .set_rotation_history(key.as_str(), next_history(&selected))
            .await?;
        PipelineLogger::log_rotation(key.as_str(), selected.len(), pool.len());
    }
    Ok(selected)
}

/// Rename the plan's accessory-tagged items, in order, to the selected
/// entries. Prescriptions from the model are kept; a missing rest period is
/// filled from the catalog default, and an item with neither reps nor a
/// duration gets the catalog set duration. Returns the number of items renamed.
pub fn apply_accessories(shape: &mut WorkoutShape, selected: &[AccessoryPoolEntry]) -> usize {
    let mut renamed = 0;
    for (item, entry) in shape.accessories_mut().zip(selected) {
        item.name.clone_from(&entry.name);
        item.rest_seconds.get_or_insert(entry.rest_seconds_default);
        if item.reps.is_none() {
            item.duration_seconds.get_or_insert(entry.set_duration_seconds);
        }
        renamed += 1;
    }
    renamed
}

/// Number of accessory-tagged items in the plan
#[must_use]
pub fn accessory_slots(shape: &WorkoutShape) -> usize {
    shape.main.iter().filter(|item| item.is_accessory).count()
}
