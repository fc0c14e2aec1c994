// ABOUTME: End-to-end tests of the plan assembler over a scripted provider and the in-memory store
// ABOUTME: Covers generation, main-lift enforcement, rotation, failures, quick entry, and routing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{assembler, Scripted, ScriptedProvider};
use pierre_core::models::{IntentKind, Split};
use pierre_workout_planner::errors::ErrorCode;
use pierre_workout_planner::llm::{LlmCapabilities, MessageRole};
use pierre_workout_planner::planner::{RepairStrategy, ShapeSource};
use pierre_workout_planner::services::{PlanFailure, PlanRequest, PlanResponse, PlannerReply};
use pierre_workout_planner::store::{
    CatalogFilter, InMemoryStore, PlannerStore, DEMO_USER_ID,
};
use serde_json::json;
use std::collections::HashSet;

/// Model reply with a disallowed main lift for legs and two accessory slots
fn legs_reply() -> String {
    json!({
        "workout": {
            "warmup": [{"name": "Jumping Jacks", "duration_seconds": 60}],
            "main": [
                {"name": "Bench Press", "sets": 5, "reps": 5, "is_main": true},
                {"name": "Accessory A", "sets": 3, "reps": 12, "phase": "accessory"},
                {"name": "Accessory B", "sets": 3, "reps": 12, "phase": "accessory"}
            ],
            "cooldown": [{"name": "Couch Stretch", "duration_seconds": 90}]
        },
        "coach_message": "Strong legs today."
    })
    .to_string()
}

fn expect_plan(reply: PlannerReply) -> PlanResponse {
    match reply {
        PlannerReply::Plan(plan) => plan,
        other => panic!("expected a plan, got {other:?}"),
    }
}

async fn accessory_names(store: &InMemoryStore) -> HashSet<String> {
    store
        .exercise_catalog(&CatalogFilter::accessory_pool())
        .await
        .unwrap()
        .into_iter()
        .map(|exercise| exercise.name)
        .collect()
}

#[tokio::test]
async fn test_make_workout_full_pipeline() {
    let (assembler, provider, store) =
        assembler(ScriptedProvider::replying(legs_reply()), InMemoryStore::demo());

    let reply = assembler
        .handle(&PlanRequest::new(DEMO_USER_ID, "make me a 40 min legs workout"))
        .await
        .unwrap();
    let plan = expect_plan(reply);

    assert!(plan.is_success());
    assert_eq!(plan.coach_message, "Strong legs today.");
    assert_eq!(plan.debug.intent, Some(IntentKind::MakeWorkout));
    assert_eq!(plan.debug.split, Some(Split::Legs));
    assert_eq!(plan.debug.minutes, 40);
    assert_eq!(plan.debug.repair_strategy, Some(RepairStrategy::WholeText));
    assert_eq!(plan.debug.shape_source, Some(ShapeSource::Direct));
    assert!(plan.plan.get("workout").is_some());

    // Bench press is not a legs lift; the demo user owns a kettlebell but no barbell
    let primary = &plan.workout.main[0];
    assert!(primary.is_main);
    assert_eq!(primary.name, "Kettlebell Goblet Squat");
    assert_eq!(primary.sets, Some(5_u32.into()));
    let swap = plan.debug.main_lift_substitution.as_ref().unwrap();
    assert_eq!(swap.original, "Bench Press");
    assert_eq!(swap.replacement, "Kettlebell Goblet Squat");

    // Accessory slots renamed from the rotation pool
    let pool = accessory_names(&store).await;
    assert_eq!(plan.debug.accessories.len(), 2);
    for item in &plan.workout.main[1..] {
        assert!(item.is_accessory);
        assert!(pool.contains(&item.name), "{} not in pool", item.name);
        assert_ne!(item.name, "Barbell Hip Thrust", "needs equipment the user lacks");
    }
    assert_eq!(plan.debug.rotation_key.as_deref(), Some("demo:legs"));
    assert_eq!(
        store.rotation_history("demo:legs").await.unwrap(),
        plan.debug.accessories
    );

    // Session persisted with the normalized workout
    let sessions = store.recent_sessions(DEMO_USER_ID, 5).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].workout, plan.workout);
    assert_eq!(sessions[0].minutes, 40);

    // Generation request shape
    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.json_mode);
    assert_eq!(request.temperature, Some(0.7));
    assert_eq!(request.max_tokens, Some(2048));
    assert_eq!(request.messages[0].role, MessageRole::System);
    let prompt = &request.messages[1].content;
    assert!(prompt.contains("40-minute legs workout"));
    assert!(prompt.contains("Use Kettlebell Goblet Squat as the main lift."));
    assert!(prompt.contains("- 24kg kettlebell"));
}

#[tokio::test]
async fn test_consecutive_plans_rotate_accessories() {
    let (assembler, _provider, _store) =
        assembler(ScriptedProvider::replying(legs_reply()), InMemoryStore::demo());
    let request = PlanRequest::new(DEMO_USER_ID, "legs workout please");

    let first = expect_plan(assembler.handle(&request).await.unwrap());
    let second = expect_plan(assembler.handle(&request).await.unwrap());

    let first: HashSet<_> = first.debug.accessories.into_iter().collect();
    let second: HashSet<_> = second.debug.accessories.into_iter().collect();
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(first.is_disjoint(&second));
}

#[tokio::test]
async fn test_allowed_main_lift_is_untouched() {
    let reply = json!({
        "workout": {"main": [{"name": "Barbell Back Squat", "sets": 5, "reps": 3}]},
        "coachMessage": "Heavy triples."
    })
    .to_string();
    let (assembler, _provider, _store) =
        assembler(ScriptedProvider::replying(reply), InMemoryStore::new());

    let plan = expect_plan(
        assembler
            .handle(&PlanRequest::new("u1", "legs workout"))
            .await
            .unwrap(),
    );
    assert_eq!(plan.workout.main[0].name, "Barbell Back Squat");
    assert!(plan.debug.main_lift_substitution.is_none());
    assert_eq!(plan.coach_message, "Heavy triples.");
    // No accessory slots, no rotation write
    assert!(plan.debug.rotation_key.is_none());
}

#[tokio::test]
async fn test_generation_failure_returns_empty_plan() {
    let (assembler, _provider, store) =
        assembler(ScriptedProvider::failing(), InMemoryStore::demo());

    let plan = expect_plan(
        assembler
            .handle(&PlanRequest::new(DEMO_USER_ID, "build me a push workout"))
            .await
            .unwrap(),
    );
    assert_eq!(plan.error, Some(PlanFailure::Generation));
    assert!(plan.workout.is_empty());
    assert!(plan.plan.is_null());
    assert!(!plan.coach_message.is_empty());
    assert!(store.recent_sessions(DEMO_USER_ID, 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unparsable_reply_returns_empty_plan() {
    let (assembler, _provider, store) = assembler(
        ScriptedProvider::replying("Sorry, I can't help with that today."),
        InMemoryStore::demo(),
    );

    let plan = expect_plan(
        assembler
            .handle(&PlanRequest::new(DEMO_USER_ID, "build me a push workout"))
            .await
            .unwrap(),
    );
    assert_eq!(plan.error, Some(PlanFailure::UnparsableResponse));
    assert!(plan.workout.is_empty());
    assert!(store.recent_sessions(DEMO_USER_ID, 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reply_without_items_is_not_guessed() {
    let (assembler, _provider, _store) = assembler(
        ScriptedProvider::replying(r#"{"workout": {"main": [{"sets": 3}]}}"#),
        InMemoryStore::new(),
    );

    let plan = expect_plan(
        assembler
            .handle(&PlanRequest::new("u1", "new session"))
            .await
            .unwrap(),
    );
    assert_eq!(plan.error, Some(PlanFailure::EmptyPlan));
    assert!(plan.workout.is_empty());
    assert_eq!(plan.debug.shape_source, Some(ShapeSource::Empty));
    assert!(plan.plan.get("workout").is_some());
}

#[tokio::test]
async fn test_empty_user_id_rejected_before_model_call() {
    let (assembler, provider, _store) =
        assembler(ScriptedProvider::replying(legs_reply()), InMemoryStore::new());

    let err = assembler
        .handle(&PlanRequest::new("  ", "legs workout"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_quick_entry_logs_sets_without_model() {
    let (assembler, provider, store) =
        assembler(ScriptedProvider::failing(), InMemoryStore::new());

    let reply = assembler
        .handle(&PlanRequest::new("u1", "1,5,225;2,5,230;3,4,230").with_exercise("Back Squat"))
        .await
        .unwrap();
    match reply {
        PlannerReply::SetsLogged { exercise, sets } => {
            assert_eq!(exercise, "Back Squat");
            assert_eq!(sets.len(), 3);
            assert_eq!(sets[2].reps, 4);
        }
        other => panic!("expected logged sets, got {other:?}"),
    }
    assert_eq!(store.recent_sets("u1", 10).await.unwrap().len(), 3);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_quick_entry_requires_exercise() {
    let (assembler, _provider, store) =
        assembler(ScriptedProvider::failing(), InMemoryStore::new());

    for exercise in [None, Some("   ")] {
        let mut request = PlanRequest::new("u1", "1,5,225");
        request.exercise = exercise.map(str::to_owned);
        let err = assembler.handle(&request).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert_eq!(err.context.user_id.as_deref(), Some("u1"));
    }
    assert!(store.recent_sets("u1", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_plan_intents_skip_generation() {
    let (assembler, provider, _store) =
        assembler(ScriptedProvider::failing(), InMemoryStore::demo());

    let coaching = assembler
        .handle(&PlanRequest::new(DEMO_USER_ID, "how to brace for a squat"))
        .await
        .unwrap();
    assert!(matches!(coaching, PlannerReply::Coaching { .. }));

    let celebrity = assembler
        .handle(&PlanRequest::new(DEMO_USER_ID, "train me like Arnold"))
        .await
        .unwrap();
    match celebrity {
        PlannerReply::CelebrityInspired { name, .. } => {
            assert_eq!(name, "Arnold Schwarzenegger");
        }
        other => panic!("expected celebrity reply, got {other:?}"),
    }

    let history = assembler
        .handle(&PlanRequest::new(DEMO_USER_ID, "what did i do last week"))
        .await
        .unwrap();
    assert!(matches!(history, PlannerReply::History { .. }));

    let chat = assembler
        .handle(&PlanRequest::new(DEMO_USER_ID, "hello there"))
        .await
        .unwrap();
    assert!(matches!(chat, PlannerReply::Conversation { program: None, .. }));

    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_modify_seeds_prompt_with_last_session() {
    let (assembler, provider, _store) =
        assembler(ScriptedProvider::replying(legs_reply()), InMemoryStore::demo());

    assembler
        .handle(&PlanRequest::new(DEMO_USER_ID, "legs workout"))
        .await
        .unwrap();
    let plan = expect_plan(
        assembler
            .handle(&PlanRequest::new(DEMO_USER_ID, "swap the lunges in my legs workout"))
            .await
            .unwrap(),
    );
    assert_eq!(plan.debug.intent, Some(IntentKind::ModifyWorkout));

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert!(!requests[0].messages[1].content.contains("Adapt this existing session"));
    let modify_prompt = &requests[1].messages[1].content;
    assert!(modify_prompt.contains("Adapt this existing session"));
    assert!(modify_prompt.contains("Kettlebell Goblet Squat"));
}

#[tokio::test]
async fn test_ordinal_reference_is_routed_by_model() {
    let provider = ScriptedProvider::new([
        Scripted::Reply(r#"{"intent":"make_workout","nike":2,"split":"legs"}"#.to_owned()),
        Scripted::Reply(legs_reply()),
    ]);
    let (assembler, provider, _store) = assembler(provider, InMemoryStore::demo());

    let plan = expect_plan(
        assembler
            .handle(&PlanRequest::new(DEMO_USER_ID, "let's go with the second one"))
            .await
            .unwrap(),
    );
    assert!(plan.debug.routed);
    assert_eq!(plan.debug.split, Some(Split::Legs));

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].temperature, Some(0.0));
    assert_eq!(requests[0].max_tokens, Some(128));
}

#[tokio::test]
async fn test_router_chat_keeps_program_reference() {
    let (assembler, provider, _store) = assembler(
        ScriptedProvider::replying(r#"{"intent":"chat","nike":null}"#),
        InMemoryStore::demo(),
    );

    let reply = assembler
        .handle(&PlanRequest::new(DEMO_USER_ID, "I liked the third one"))
        .await
        .unwrap();
    assert!(matches!(
        reply,
        PlannerReply::Conversation {
            program: Some(3),
            ..
        }
    ));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_request_hints_override_message() {
    let (assembler, provider, _store) =
        assembler(ScriptedProvider::replying(legs_reply()), InMemoryStore::demo());

    let plan = expect_plan(
        assembler
            .handle(
                &PlanRequest::new(DEMO_USER_ID, "30 min legs workout")
                    .with_split("PUSH")
                    .with_minutes(200),
            )
            .await
            .unwrap(),
    );
    assert_eq!(plan.debug.split, Some(Split::Push));
    assert_eq!(plan.debug.minutes, 120);
    assert!(provider.requests()[0].messages[1]
        .content
        .contains("120-minute push workout"));

    let plan = expect_plan(
        assembler
            .handle(&PlanRequest::new(DEMO_USER_ID, "anything").with_split("crossfit"))
            .await
            .unwrap(),
    );
    assert_eq!(plan.debug.ignored_split_hint.as_deref(), Some("crossfit"));
    assert_eq!(plan.debug.split, None);
    assert_eq!(plan.debug.minutes, 45);
}

#[tokio::test]
async fn test_provider_without_system_messages_gets_one_user_message() {
    let provider = ScriptedProvider::replying(legs_reply()).with_capabilities(LlmCapabilities::empty());
    let (assembler, provider, _store) = assembler(provider, InMemoryStore::demo());

    assembler
        .handle(&PlanRequest::new(DEMO_USER_ID, "legs workout"))
        .await
        .unwrap();

    let request = &provider.requests()[0];
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, MessageRole::User);
    assert!(request.messages[0].content.starts_with("You are Pierre"));
    assert!(!request.json_mode);
}
