// ABOUTME: Training intelligence for the workout planner: rules engine and accessory rotation
// ABOUTME: Pure functions over pierre-core models, free of I/O and provider concerns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Intelligence
//!
//! Static domain knowledge consulted by the plan assembler:
//!
//! - **`training_rules`**: canonical splits, allowed main lifts per split, and
//!   the equipment-aware core lift ladder
//! - **`accessory_rotation`**: the pure half of accessory rotation, selecting
//!   fresh accessories given the last-used names and an injected random source

/// Canonical splits, main lift lists, and equipment-aware substitution
pub mod training_rules;

/// Accessory selection that avoids repeating the previous session's picks
pub mod accessory_rotation;

pub use accessory_rotation::{next_history, select_accessories, RotationKey};
pub use training_rules::{
    canonical_split, enforce_main_lift, has_equipment, is_main_lift, is_main_lift_for_split,
    main_lifts, pick_core_lift, pick_core_lift_for, pick_first_allowed_main,
    replacement_main_lift, BodyFocus, MainLiftSubstitution,
};
