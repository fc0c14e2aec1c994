// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Offline inspection commands for pierre-planner
// ABOUTME: Prints heuristic classification and quick-entry parsing without any model call

use anyhow::Result;
use pierre_workout_planner::planner::{classify as classify_intent, is_quick_entry, quick_entry};
use serde_json::json;

/// Print the heuristic intent for `text`
pub fn classify(text: &str) -> Result<()> {
    let intent = classify_intent(text);
    println!("{}", serde_json::to_string_pretty(&intent)?);
    Ok(())
}

/// Print whether `text` is a quick entry and the parsed entries
pub fn quick_entry(text: &str) -> Result<()> {
    let entries = quick_entry::parse(text);
    let complete = quick_entry::ensure_complete(&entries).is_ok();
    let report = json!({
        "isQuickEntry": is_quick_entry(text),
        "complete": complete,
        "entries": entries
            .iter()
            .map(|entry| json!({
                "setNumber": finite_or_null(entry.set_number),
                "reps": finite_or_null(entry.reps),
                "weight": finite_or_null(entry.weight),
            }))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

// serde_json has no NaN; report missing fields as null
fn finite_or_null(value: f64) -> serde_json::Value {
    if value.is_nan() {
        serde_json::Value::Null
    } else {
        json!(value)
    }
}
