// ABOUTME: Secondary model-backed intent classifier for ambiguous ordinal references
// ABOUTME: Parses a strict {intent, nike?, split?} reply and falls back to chat on any failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intent Router
//!
//! Heuristics cannot tell "the second one" from small talk. When the heuristic
//! result is `unknown` but the text carries an ordinal reference, one model
//! call is made with a strict JSON-only instruction. Transport errors and
//! unparsable replies both resolve to [`Route::Chat`]; nothing is raised.

use pierre_core::constants::env_config::{CLASSIFIER_MAX_TOKENS, CLASSIFIER_TEMPERATURE};
use pierre_core::models::{Intent, IntentKind, Split};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::intent::ordinal_to_number;
use super::safe_json::try_parse;
use crate::llm::prompts::intent_router_prompt;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// Where the router sends the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// A concrete intent the pipeline handles
    Intent(IntentKind),
    /// Conversational fallback
    Chat,
}

/// Router result with the optional program reference and split
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouterDecision {
    /// Chosen route
    pub route: Route,
    /// 1-based number of the program the user picked
    pub program: Option<u32>,
    /// Split named in the message
    pub split: Option<Split>,
}

impl RouterDecision {
    /// The fallback decision
    #[must_use]
    pub const fn chat() -> Self {
        Self {
            route: Route::Chat,
            program: None,
            split: None,
        }
    }
}

/// Wire form of the router reply
#[derive(Debug, Deserialize)]
struct RouterReply {
    intent: String,
    #[serde(default, rename = "nike")]
    program: Option<Value>,
    #[serde(default)]
    split: Option<String>,
}

fn route_for(intent: &str) -> Route {
    let wanted = intent.trim().to_lowercase();
    [
        IntentKind::MakeWorkout,
        IntentKind::ModifyWorkout,
        IntentKind::ExplainOrCoach,
        IntentKind::LogOrHistory,
        IntentKind::CelebrityInspired,
    ]
    .into_iter()
    .find(|kind| kind.as_str() == wanted)
    .map_or(Route::Chat, Route::Intent)
}

fn program_number(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => ordinal_to_number(text),
        _ => None,
    }
}

/// Interpret raw model text as a router decision
#[must_use]
pub fn parse_decision(text: &str) -> RouterDecision {
    let Some(reply) = try_parse::<RouterReply>(text) else {
        debug!("Router reply unparsable, falling back to chat");
        return RouterDecision::chat();
    };

    RouterDecision {
        route: route_for(&reply.intent),
        program: program_number(reply.program.as_ref()),
        split: reply.split.as_deref().and_then(Split::from_name),
    }
}

/// Whether a heuristic result needs the model to disambiguate it
#[must_use]
pub const fn needs_routing(intent: &Intent) -> bool {
    matches!(intent.kind, IntentKind::Unknown) && intent.ordinal.is_some()
}

/// Ask the model to classify `text`. Never fails.
#[instrument(skip(provider, text), fields(provider = provider.name()))]
pub async fn route(provider: &dyn LlmProvider, text: &str) -> RouterDecision {
    let messages = if provider.capabilities().supports_system_messages() {
        vec![
            ChatMessage::system(intent_router_prompt()),
            ChatMessage::user(text),
        ]
    } else {
        vec![ChatMessage::user(format!(
            "{}\n\nMessage: {text}",
            intent_router_prompt()
        ))]
    };

    let mut request = ChatRequest::new(messages)
        .with_temperature(CLASSIFIER_TEMPERATURE)
        .with_max_tokens(CLASSIFIER_MAX_TOKENS);
    if provider.capabilities().supports_json_mode() {
        request = request.with_json_mode();
    }

    match provider.complete(&request).await {
        Ok(response) => parse_decision(&response.content),
        Err(e) => {
            warn!("Intent router call failed, falling back to chat: {e}");
            RouterDecision::chat()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_reply() {
        let decision =
            parse_decision(r#"```json {"intent":"make_workout","nike":2,"split":"Legs"} ```"#);
        assert_eq!(decision.route, Route::Intent(IntentKind::MakeWorkout));
        assert_eq!(decision.program, Some(2));
        assert_eq!(decision.split, Some(Split::Legs));
    }

    #[test]
    fn test_program_as_ordinal_word() {
        let decision = parse_decision(r#"{"intent":"make_workout","nike":"third"}"#);
        assert_eq!(decision.program, Some(3));
    }

    #[test]
    fn test_unknown_and_garbage_fall_back_to_chat() {
        assert_eq!(parse_decision(r#"{"intent":"chat"}"#).route, Route::Chat);
        assert_eq!(parse_decision(r#"{"intent":"dance"}"#).route, Route::Chat);
        assert_eq!(parse_decision("I think it's a workout"), RouterDecision::chat());
    }

    #[test]
    fn test_needs_routing() {
        let mut intent = Intent::unknown();
        assert!(!needs_routing(&intent));
        intent.ordinal = Some(2);
        assert!(needs_routing(&intent));
        intent.kind = IntentKind::MakeWorkout;
        assert!(!needs_routing(&intent));
    }
}
