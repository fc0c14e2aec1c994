// ABOUTME: Workout domain constants for duration bounds, rotation, and catalog tagging
// ABOUTME: Shared by the classifier, rules engine, rotation selector, and assembler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Shortest session the planner will produce, in minutes
pub const MIN_SESSION_MINUTES: u32 = 10;

/// Longest session the planner will produce, in minutes
pub const MAX_SESSION_MINUTES: u32 = 120;

/// Session length used when neither the request nor the message names one
pub const DEFAULT_SESSION_MINUTES: u32 = 45;

/// Upper bound on names kept in a rotation history entry
pub const DEFAULT_ROTATION_HISTORY_LIMIT: usize = 32;

/// Catalog tag marking an exercise as a core (main) lift
pub const CORE_LIFT_TAG: &str = "core_lift";

/// Catalog categories that never enter the accessory pool
pub const NON_ACCESSORY_CATEGORIES: &[&str] = &["warmup", "mobility", "cooldown"];

/// Default rest between accessory sets when the catalog has none
pub const DEFAULT_ACCESSORY_REST_SECONDS: u32 = 60;

/// Default working time of one accessory set
pub const DEFAULT_ACCESSORY_SET_SECONDS: u32 = 40;

/// Clamp a session length into the supported range
#[must_use]
pub fn clamp_minutes(minutes: u32) -> u32 {
    minutes.clamp(MIN_SESSION_MINUTES, MAX_SESSION_MINUTES)
}
