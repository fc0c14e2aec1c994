// ABOUTME: Response repair parser extracting one structured object from noisy model output
// ABOUTME: Tries whole text, then a fenced code block, then the first-brace to last-brace span
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Safe JSON
//!
//! Generative models wrap JSON in prose and markdown fences. [`try_parse`]
//! runs three strategies in a fixed order and returns the first success; it
//! never raises, leaving the caller to apply its own empty default.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

static FENCED_BLOCK_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: ```json {...} ```, ``` {...} ```, ```jsonc\n{...}\n```
    Regex::new(r"```[\w-]*\s*([\s\S]*?)```").ok()
});

/// Which strategy produced the value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStrategy {
    /// The text parsed as-is
    WholeText,
    /// The interior of the first fenced code block parsed
    FencedBlock,
    /// The span from the first `{` to the last `}` parsed
    BraceSpan,
}

fn fenced_interior(text: &str) -> Option<&str> {
    FENCED_BLOCK_PATTERN
        .as_ref()?
        .captures(text)?
        .get(1)
        .map(|interior| interior.as_str().trim())
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse `text` into `T`, reporting which strategy succeeded
#[must_use]
pub fn try_parse_with_strategy<T: DeserializeOwned>(text: &str) -> Option<(T, RepairStrategy)> {
    if let Ok(value) = serde_json::from_str::<T>(text.trim()) {
        return Some((value, RepairStrategy::WholeText));
    }

    if let Some(value) = fenced_interior(text).and_then(|inner| serde_json::from_str::<T>(inner).ok())
    {
        return Some((value, RepairStrategy::FencedBlock));
    }

    if let Some(value) = brace_span(text).and_then(|span| serde_json::from_str::<T>(span).ok()) {
        return Some((value, RepairStrategy::BraceSpan));
    }

    debug!(
        len = text.len(),
        "No repair strategy produced a valid structure"
    );
    None
}

/// Parse `text` into `T`, or `None` when all three strategies fail
#[must_use]
pub fn try_parse<T: DeserializeOwned>(text: &str) -> Option<T> {
    try_parse_with_strategy(text).map(|(value, _)| value)
}
