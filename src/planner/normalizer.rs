// ABOUTME: Plan normalizer reconciling direct and phase-tagged plan payloads into one shape
// ABOUTME: Drops unnamed items and enforces exactly one primary item in the main list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Normalizer
//!
//! Model output arrives in one of several historical shapes:
//!
//! - **direct**: `workout.{warmup,main,cooldown}` arrays, or the same three
//!   arrays at the top level when `workout` is absent
//! - **phased**: `plan.phases[]` of `{phase, items}`
//!
//! The direct shape wins whenever it yields at least one item. Otherwise the
//! phases are grouped: `prep` then `activation` (then `warmup`) form the
//! warmup, `strength`/`main` form the main list with `conditioning` standing
//! in when that group is empty, `accessory` items follow the main group, and
//! `cooldown` is the cooldown. Unknown phase names are skipped.

use pierre_core::models::{Phase, Quantity, WorkoutItem, WorkoutShape};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Which source shape produced the normalized plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeSource {
    /// `workout.{warmup,main,cooldown}` or bare top-level lists
    Direct,
    /// `plan.phases[]`
    Phased,
    /// Neither shape yielded a single usable item
    Empty,
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn quantity(value: Option<&Value>) -> Option<Quantity> {
    match value? {
        Value::Number(number) => Some(Quantity::Number(number.clone())),
        Value::String(text) if !text.trim().is_empty() => Some(Quantity::Text(text.trim().to_owned())),
        _ => None,
    }
}

fn seconds(value: Option<&Value>) -> Option<u32> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .map(|secs| secs.round() as u64)
        })
        .and_then(|secs| u32::try_from(secs).ok())
}

fn tagged_accessory(object: &Map<String, Value>) -> bool {
    object
        .get("is_accessory")
        .and_then(Value::as_bool)
        .unwrap_or(false)
        || ["phase", "tag"].iter().any(|key| {
            non_empty_str(object.get(*key))
                .is_some_and(|tag| tag.eq_ignore_ascii_case(Phase::Accessory.as_str()))
        })
}

/// Repair one raw item. Items without a usable `name`/`exercise` are `None`.
fn parse_item(raw: &Value) -> Option<WorkoutItem> {
    let object = raw.as_object()?;
    let name = non_empty_str(object.get("name")).or_else(|| non_empty_str(object.get("exercise")))?;

    Some(WorkoutItem {
        name: name.to_owned(),
        sets: quantity(object.get("sets")),
        reps: quantity(object.get("reps")),
        duration_seconds: seconds(object.get("duration_seconds")),
        instruction: non_empty_str(object.get("instruction")).map(str::to_owned),
        rest_seconds: seconds(object.get("rest_seconds")),
        is_main: object
            .get("is_main")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        is_accessory: tagged_accessory(object),
    })
}

fn parse_items(list: Option<&Value>) -> Vec<WorkoutItem> {
    list.and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_item).collect())
        .unwrap_or_default()
}

fn direct_shape(raw: &Value) -> WorkoutShape {
    let source = match raw.get("workout") {
        Some(workout) if workout.is_object() => workout,
        _ => raw,
    };
    WorkoutShape {
        warmup: parse_items(source.get("warmup")),
        main: parse_items(source.get("main")),
        cooldown: parse_items(source.get("cooldown")),
    }
}

fn phased_shape(raw: &Value) -> WorkoutShape {
    let Some(phases) = raw
        .get("plan")
        .and_then(|plan| plan.get("phases"))
        .and_then(Value::as_array)
    else {
        return WorkoutShape::default();
    };

    let items_of = |wanted: Phase| -> Vec<WorkoutItem> {
        phases
            .iter()
            .filter(|entry| {
                non_empty_str(entry.get("phase")).and_then(Phase::from_name) == Some(wanted)
            })
            .flat_map(|entry| parse_items(entry.get("items")))
            .collect()
    };

    for entry in phases {
        let name = non_empty_str(entry.get("phase"));
        if name.and_then(Phase::from_name).is_none() {
            debug!(phase = ?name, "Skipping unknown plan phase");
        }
    }

    let mut warmup = items_of(Phase::Prep);
    warmup.extend(items_of(Phase::Activation));
    warmup.extend(items_of(Phase::Warmup));

    let mut main = items_of(Phase::Strength);
    main.extend(items_of(Phase::Main));
    if main.is_empty() {
        main = items_of(Phase::Conditioning);
    }
    main.extend(
        items_of(Phase::Accessory)
            .into_iter()
            .map(WorkoutItem::as_accessory),
    );

    WorkoutShape {
        warmup,
        main,
        cooldown: items_of(Phase::Cooldown),
    }
}

/// Leave exactly one `is_main` item in `main` and none elsewhere.
///
/// The first upstream-flagged item keeps the flag; with no flag the first
/// item is chosen. The primary item never fills an accessory slot, so its
/// accessory tag is cleared.
pub fn enforce_single_primary(shape: &mut WorkoutShape) {
    for item in shape.warmup.iter_mut().chain(shape.cooldown.iter_mut()) {
        item.is_main = false;
    }

    let chosen = shape.main.iter().position(|item| item.is_main).unwrap_or(0);
    for (index, item) in shape.main.iter_mut().enumerate() {
        item.is_main = index == chosen;
        if item.is_main {
            item.is_accessory = false;
        }
    }
}

/// Normalize and report which source shape was used
#[must_use]
pub fn normalize_with_source(raw: &Value) -> (WorkoutShape, ShapeSource) {
    let direct = direct_shape(raw);
    let (mut shape, source) = if direct.is_empty() {
        let phased = phased_shape(raw);
        if phased.is_empty() {
            (phased, ShapeSource::Empty)
        } else {
            (phased, ShapeSource::Phased)
        }
    } else {
        (direct, ShapeSource::Direct)
    };

    enforce_single_primary(&mut shape);
    debug!(
        source = ?source,
        warmup = shape.warmup.len(),
        main = shape.main.len(),
        cooldown = shape.cooldown.len(),
        "Plan normalized"
    );
    (shape, source)
}

/// Normalize any supported payload into the canonical [`WorkoutShape`]
#[must_use]
pub fn normalize(raw: &Value) -> WorkoutShape {
    normalize_with_source(raw).0
}
