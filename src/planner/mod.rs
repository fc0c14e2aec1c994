// ABOUTME: Plan synthesis pipeline stages that run inside the planner process
// ABOUTME: Classification, quick entry, prompt building, response repair, normalization, rotation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Planner Stages
//!
//! Each stage is usable on its own; [`crate::services::PlanAssembler`]
//! sequences them into the full pipeline.

/// Store-backed accessory rotation
pub mod accessory_rotation;
/// Heuristic intent classifier
pub mod intent;
/// Model-backed secondary classifier
pub mod intent_router;
/// Plan normalizer
pub mod normalizer;
/// Prompt builder
pub mod prompt_builder;
/// Quick-entry set logging parser
pub mod quick_entry;
/// Response repair parser
pub mod safe_json;

pub use accessory_rotation::{
    accessory_pool, accessory_slots, apply_accessories, pick_accessories, RotationRng,
};
pub use intent::{classify, find_ordinal, ordinal_to_number};
pub use intent_router::{needs_routing, route, Route, RouterDecision};
pub use normalizer::{enforce_single_primary, normalize, normalize_with_source, ShapeSource};
pub use prompt_builder::{build_prompt, PromptContext};
pub use quick_entry::{is_quick_entry, QuickEntry};
pub use safe_json::{try_parse, try_parse_with_strategy, RepairStrategy};
