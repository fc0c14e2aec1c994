// ABOUTME: Shorthand set logging parser for "set,reps,weight" triplets
// ABOUTME: Separators are ';' or newline; malformed numeric fields become NaN instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::LazyLock;

use crate::errors::{AppError, AppResult};

/// One or more `int,int,int` triplets and nothing else
static QUICK_ENTRY_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d+,\d+,\d+(?:[;\n]\d+,\d+,\d+)*$").ok());

/// One logged set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickEntry {
    /// 1-based set number
    pub set_number: f64,
    /// Repetitions performed
    pub reps: f64,
    /// Load lifted, in the user's unit
    pub weight: f64,
}

impl QuickEntry {
    /// True when every field parsed as a number
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !(self.set_number.is_nan() || self.reps.is_nan() || self.weight.is_nan())
    }
}

/// Whether `text` is a quick-entry log line.
///
/// Surrounding whitespace is ignored; anything else outside the triplets
/// (spaces after commas, units, a trailing separator) fails the match.
#[must_use]
pub fn is_quick_entry(text: &str) -> bool {
    QUICK_ENTRY_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(text.trim()))
}

fn parse_field(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Split `text` into entries. Never fails: unparsable or missing fields are NaN.
#[must_use]
pub fn parse(text: &str) -> Vec<QuickEntry> {
    text.trim()
        .split([';', '\n'])
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            let mut fields = chunk.split(',');
            QuickEntry {
                set_number: parse_field(fields.next()),
                reps: parse_field(fields.next()),
                weight: parse_field(fields.next()),
            }
        })
        .collect()
}

/// Reject entry lists that are empty or contain a NaN field
///
/// # Errors
///
/// Returns `INVALID_INPUT` naming the first incomplete entry.
pub fn ensure_complete(entries: &[QuickEntry]) -> AppResult<()> {
    if entries.is_empty() {
        return Err(AppError::invalid_input("No sets to log"));
    }
    if let Some(position) = entries.iter().position(|entry| !entry.is_complete()) {
        return Err(AppError::invalid_input(format!(
            "Set entry {} is not a valid set,reps,weight triplet",
            position + 1
        ))
        .with_details(json!({ "entry": position + 1 })));
    }
    Ok(())
}
