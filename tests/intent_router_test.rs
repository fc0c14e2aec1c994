// ABOUTME: Tests for the model-backed intent router over a scripted provider
// ABOUTME: Validates request shape, reply parsing, and the chat fallback on failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::ScriptedProvider;
use pierre_core::models::{IntentKind, Split};
use pierre_workout_planner::llm::{LlmCapabilities, MessageRole};
use pierre_workout_planner::planner::{route, Route, RouterDecision};

#[tokio::test]
async fn test_router_reply_is_decoded() {
    common::init_test_logging();
    let provider = ScriptedProvider::replying(
        "```json\n{\"intent\": \"modify_workout\", \"nike\": \"2nd\", \"split\": \"PULL\"}\n```",
    );

    let decision = route(&provider, "change the second one").await;
    assert_eq!(decision.route, Route::Intent(IntentKind::ModifyWorkout));
    assert_eq!(decision.program, Some(2));
    assert_eq!(decision.split, Some(Split::Pull));

    let request = &provider.requests()[0];
    assert!(request.json_mode);
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert_eq!(request.messages[1].content, "change the second one");
}

#[tokio::test]
async fn test_router_failures_fall_back_to_chat() {
    common::init_test_logging();
    let failing = ScriptedProvider::failing();
    assert_eq!(route(&failing, "the third").await, RouterDecision::chat());

    let rambling = ScriptedProvider::replying("I think they want a workout!");
    assert_eq!(route(&rambling, "the third").await, RouterDecision::chat());
}

#[tokio::test]
async fn test_router_without_system_messages_inlines_instruction() {
    common::init_test_logging();
    let provider = ScriptedProvider::replying(r#"{"intent":"log_or_history"}"#)
        .with_capabilities(LlmCapabilities::empty());

    let decision = route(&provider, "the first one").await;
    assert_eq!(decision.route, Route::Intent(IntentKind::LogOrHistory));

    let request = &provider.requests()[0];
    assert_eq!(request.messages.len(), 1);
    assert!(request.messages[0].content.ends_with("Message: the first one"));
    assert!(!request.json_mode);
}
