// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the coach persona prompt and the strict intent-routing prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Coach persona used as the system message for plan generation
pub const PLAN_SYSTEM_PROMPT: &str = include_str!("plan_system.md");

/// Strict instruction for the secondary intent classifier.
///
/// The model must answer with `{"intent", "nike"?, "split"?}` only.
pub const INTENT_ROUTER_PROMPT: &str = include_str!("intent_router.md");

/// System prompt for plan generation
#[must_use]
pub const fn plan_system_prompt() -> &'static str {
    PLAN_SYSTEM_PROMPT
}

/// System prompt for the model-backed intent router
#[must_use]
pub const fn intent_router_prompt() -> &'static str {
    INTENT_ROUTER_PROMPT
}
