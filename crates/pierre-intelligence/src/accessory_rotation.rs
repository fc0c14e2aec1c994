// ABOUTME: Pure accessory selection that avoids the previous session's accessory picks
// ABOUTME: Random source is injected so shuffles are reproducible under a fixed seed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Accessory Rotation (selection half)
//!
//! Rotation is split into `select` (this module, pure) and `persist` (the
//! store, an isolated effect). Selection prefers candidates that were not used
//! last time; when that leaves fewer than `count` candidates it falls back to
//! the full pool, accepting repeats rather than under-filling the session.

use std::collections::HashSet;
use std::fmt;

use pierre_core::models::{AccessoryPoolEntry, Split};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Key under which a rotation history is stored: a user, optionally narrowed
/// by a context such as the split.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RotationKey(String);

impl RotationKey {
    /// History shared by every session of the user
    #[must_use]
    pub fn user(user_id: &str) -> Self {
        Self(user_id.to_owned())
    }

    /// History scoped to one context of the user (`user:context`)
    #[must_use]
    pub fn with_context(user_id: &str, context: &str) -> Self {
        Self(format!("{user_id}:{context}"))
    }

    /// Split-scoped key when a split is known, user-wide otherwise
    #[must_use]
    pub fn for_split(user_id: &str, split: Option<Split>) -> Self {
        split.map_or_else(
            || Self::user(user_id),
            |split| Self::with_context(user_id, split.as_str()),
        )
    }

    /// String form used as the store key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RotationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pick `count` accessories from `pool`, avoiding names in `recent` when possible.
///
/// The candidate list is shuffled without weighting and its head returned.
/// Returns fewer than `count` entries only if the pool itself is smaller.
pub fn select_accessories<R: Rng + ?Sized>(
    pool: &[AccessoryPoolEntry],
    recent: &[String],
    count: usize,
    rng: &mut R,
) -> Vec<AccessoryPoolEntry> {
    if count == 0 || pool.is_empty() {
        return Vec::new();
    }

    let recent: HashSet<String> = recent.iter().map(|name| name.to_lowercase()).collect();
    let fresh: Vec<&AccessoryPoolEntry> = pool
        .iter()
        .filter(|entry| !recent.contains(&entry.name.to_lowercase()))
        .collect();

    let mut candidates = if fresh.len() >= count {
        fresh
    } else {
        debug!(
            fresh = fresh.len(),
            wanted = count,
            "Not enough fresh accessories, falling back to full pool"
        );
        pool.iter().collect()
    };

    candidates.shuffle(rng);
    candidates.into_iter().take(count).cloned().collect()
}

/// History to persist after a selection: exactly the selected names.
///
/// This replaces the previous history outright; it is not merged.
#[must_use]
pub fn next_history(selected: &[AccessoryPoolEntry]) -> Vec<String> {
    selected.iter().map(|entry| entry.name.clone()).collect()
}
