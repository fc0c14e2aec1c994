// ABOUTME: Plan assembler orchestrating one planner request end to end
// ABOUTME: Classify, build prompt, call the model, repair, normalize, enforce main lift, rotate accessories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Assembler
//!
//! Linear pipeline with a single branch on the classified intent:
//!
//! ```text
//! classify -> [make/modify] prompt -> model -> repair-parse -> normalize
//!          -> main-lift check -> accessory rotation -> save -> reply
//!          -> [other intents] intent-specific payload
//! ```
//!
//! Generation failures and unparsable replies never raise: the reply carries
//! an empty workout and a [`PlanFailure`]. Only invalid domain input (empty
//! user id, quick-entry logging without an exercise, malformed sets) and store
//! failures come back as `Err`.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use pierre_core::constants::clamp_minutes;
use pierre_core::models::{Intent, IntentKind, SessionRecord, Split, UserProfile, WorkoutShape};
use pierre_intelligence::{
    canonical_split, enforce_main_lift, pick_core_lift, replacement_main_lift,
    MainLiftSubstitution, RotationKey,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::PlannerConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::plan_system_prompt;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::PipelineLogger;
use crate::planner::quick_entry::{self, QuickEntry};
use crate::planner::{
    accessory_pool, accessory_slots, apply_accessories, build_prompt, classify, is_quick_entry,
    needs_routing, normalize_with_source, pick_accessories, route, try_parse_with_strategy,
    PromptContext, RepairStrategy, Route, RotationRng, ShapeSource,
};
use crate::store::{LoggedSet, PlannerStore};

/// Coach message used when the model does not supply one
const DEFAULT_COACH_MESSAGE: &str = "Here is your session. Move well and log your sets.";

/// Message returned alongside an empty plan when generation fails
const GENERATION_FAILED_MESSAGE: &str =
    "I couldn't build a workout right now. Please try again in a moment.";

/// Message returned alongside an empty plan when the model reply is unusable
const UNPARSABLE_MESSAGE: &str =
    "I couldn't read the workout I generated. Please try again.";

/// Sessions and sets returned for a history request
const HISTORY_SESSIONS: usize = 5;
const HISTORY_SETS: usize = 20;

/// Inbound planner request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Requesting user
    pub user_id: String,
    /// Free text from the user
    pub message: String,
    /// Split hint; overrides any split found in the message
    #[serde(default)]
    pub split: Option<String>,
    /// Session length hint; overrides any duration found in the message
    #[serde(default)]
    pub minutes: Option<u32>,
    /// Style hint passed to the prompt
    #[serde(default)]
    pub style: Option<String>,
    /// Exercise the quick-entry sets belong to
    #[serde(default)]
    pub exercise: Option<String>,
}

impl PlanRequest {
    /// Request with only a user id and message
    #[must_use]
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Attach a split hint
    #[must_use]
    pub fn with_split(mut self, split: impl Into<String>) -> Self {
        self.split = Some(split.into());
        self
    }

    /// Attach a session length hint
    #[must_use]
    pub const fn with_minutes(mut self, minutes: u32) -> Self {
        self.minutes = Some(minutes);
        self
    }

    /// Attach a style hint
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Attach the exercise for quick-entry logging
    #[must_use]
    pub fn with_exercise(mut self, exercise: impl Into<String>) -> Self {
        self.exercise = Some(exercise.into());
        self
    }

    fn has_plan_hints(&self) -> bool {
        self.split.is_some() || self.style.is_some()
    }
}

/// Why a plan came back empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanFailure {
    /// The model call failed
    Generation,
    /// No repair strategy recovered JSON from the reply
    UnparsableResponse,
    /// The reply parsed but held no usable items
    EmptyPlan,
}

impl PlanFailure {
    /// Snake-case name used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::UnparsableResponse => "unparsable_response",
            Self::EmptyPlan => "empty_plan",
        }
    }
}

/// Pipeline diagnostics attached to every plan reply
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDebug {
    /// Intent the pipeline acted on
    pub intent: Option<IntentKind>,
    /// Whether the model router decided the intent
    pub routed: bool,
    /// Split used for the plan
    pub split: Option<Split>,
    /// Split hint that did not name a known split
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_split_hint: Option<String>,
    /// Session length used for the plan
    pub minutes: u32,
    /// Main lift suggested in the prompt
    pub main_lift_hint: Option<String>,
    /// Repair strategy that recovered the JSON
    pub repair_strategy: Option<RepairStrategy>,
    /// Shape the normalizer read
    pub shape_source: Option<ShapeSource>,
    /// Main lift replaced by the rules engine
    pub main_lift_substitution: Option<MainLiftSubstitution>,
    /// Accessory names applied from rotation
    pub accessories: Vec<String>,
    /// Rotation history key
    pub rotation_key: Option<String>,
    /// Model that answered
    pub model: Option<String>,
    /// Wall time of the pipeline
    pub duration_ms: u64,
}

/// Generated plan, or an empty one with the failure reason
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Canonical session
    pub workout: WorkoutShape,
    /// Model JSON as parsed, before normalization
    pub plan: Value,
    /// Message shown with the plan
    pub coach_message: String,
    /// Set when `workout` is empty because generation failed
    pub error: Option<PlanFailure>,
    /// Pipeline diagnostics
    pub debug: PlanDebug,
}

impl PlanResponse {
    fn failed(failure: PlanFailure, message: &str, debug: PlanDebug) -> Self {
        Self {
            workout: WorkoutShape::default(),
            plan: Value::Null,
            coach_message: message.to_owned(),
            error: Some(failure),
            debug,
        }
    }

    /// True when a usable workout was produced
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// One reply per request, tagged by what the pipeline did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PlannerReply {
    /// Make/modify workout result
    Plan(PlanResponse),
    /// Quick-entry sets appended to the log
    SetsLogged {
        /// Exercise the sets were logged against
        exercise: String,
        /// Stored sets
        sets: Vec<LoggedSet>,
    },
    /// Recent sessions and sets
    History {
        /// Most recent sessions first
        sessions: Vec<SessionRecord>,
        /// Most recent sets first
        sets: Vec<LoggedSet>,
    },
    /// Technique or programming question, handed to the coaching surface
    Coaching {
        /// The question as asked
        question: String,
        /// Body area mentioned
        focus: Option<String>,
    },
    /// Recognized style request awaiting confirmation
    CelebrityInspired {
        /// Matched style
        name: String,
        /// Prompt for the user
        message: String,
    },
    /// Conversational fallback
    Conversation {
        /// Reply text
        message: String,
        /// Program number the user referred to, if any
        program: Option<u32>,
    },
}

/// Classified request after optional model routing
struct Resolved {
    intent: Intent,
    routed: bool,
    program: Option<u32>,
}

/// Orchestrates one planner request over injected collaborators
#[derive(Clone)]
pub struct PlanAssembler {
    provider: Arc<dyn LlmProvider>,
    store: Arc<dyn PlannerStore>,
    config: PlannerConfig,
}

impl PlanAssembler {
    /// Assembler over a model provider, a store and configuration
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        store: Arc<dyn PlannerStore>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            provider,
            store,
            config,
        }
    }

    /// Handle one request
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` or `MISSING_REQUIRED_FIELD` for invalid
    /// domain input before any external call, and propagates store failures.
    /// Model failures are reported inside [`PlanResponse::error`].
    #[instrument(skip(self, request), fields(user.id = %request.user_id))]
    pub async fn handle(&self, request: &PlanRequest) -> AppResult<PlannerReply> {
        if request.user_id.trim().is_empty() {
            return Err(AppError::invalid_input("user_id must not be empty"));
        }

        if is_quick_entry(&request.message) {
            return self.log_sets(request).await;
        }

        let resolved = self.resolve_intent(request).await;
        PipelineLogger::log_classification(
            &request.user_id,
            resolved.intent.kind,
            resolved.routed,
        );

        match resolved.intent.kind {
            IntentKind::MakeWorkout | IntentKind::ModifyWorkout => {
                self.generate(request, &resolved).await.map(PlannerReply::Plan)
            }
            IntentKind::LogOrHistory => self.history(&request.user_id).await,
            IntentKind::ExplainOrCoach => Ok(PlannerReply::Coaching {
                question: request.message.trim().to_owned(),
                focus: resolved.intent.focus,
            }),
            IntentKind::CelebrityInspired => {
                let name = resolved.intent.referenced_name.unwrap_or_default();
                Ok(PlannerReply::CelebrityInspired {
                    message: format!(
                        "Want a session inspired by {name}? Tell me how long you have and I'll build it."
                    ),
                    name,
                })
            }
            IntentKind::Unknown => Ok(PlannerReply::Conversation {
                message: "I can build a workout, adjust your last one, or log your sets. \
                          What would you like to do?"
                    .to_owned(),
                program: resolved.program,
            }),
        }
    }

    async fn resolve_intent(&self, request: &PlanRequest) -> Resolved {
        let mut intent = classify(&request.message);

        if intent.kind == IntentKind::Unknown && request.has_plan_hints() {
            intent.kind = IntentKind::MakeWorkout;
        }

        if !needs_routing(&intent) {
            return Resolved {
                intent,
                routed: false,
                program: None,
            };
        }

        let decision = route(self.provider.as_ref(), &request.message).await;
        let program = decision.program.or(intent.ordinal);
        if let Route::Intent(kind) = decision.route {
            intent.kind = kind;
        }
        if intent.split.is_none() {
            intent.split = decision.split;
        }
        Resolved {
            intent,
            routed: true,
            program,
        }
    }

    #[instrument(skip(self, request))]
    async fn log_sets(&self, request: &PlanRequest) -> AppResult<PlannerReply> {
        let exercise = request
            .exercise
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::missing_field("exercise").with_user_id(&request.user_id))?;

        let entries = quick_entry::parse(&request.message);
        quick_entry::ensure_complete(&entries)
            .map_err(|e| e.with_user_id(&request.user_id).with_resource_id(exercise))?;

        let sets = to_logged_sets(exercise, &entries);
        self.store
            .append_set_log(&request.user_id, sets.clone())
            .await?;
        debug!(exercise = %exercise, sets = sets.len(), "Quick-entry sets logged");

        Ok(PlannerReply::SetsLogged {
            exercise: exercise.to_owned(),
            sets,
        })
    }

    async fn history(&self, user_id: &str) -> AppResult<PlannerReply> {
        let sessions = self.store.recent_sessions(user_id, HISTORY_SESSIONS).await?;
        let sets = self.store.recent_sets(user_id, HISTORY_SETS).await?;
        Ok(PlannerReply::History { sessions, sets })
    }

    #[instrument(skip(self, request, resolved), fields(intent = %resolved.intent.kind))]
    async fn generate(&self, request: &PlanRequest, resolved: &Resolved) -> AppResult<PlanResponse> {
        let started = Instant::now();
        let user_id = request.user_id.as_str();
        let intent = &resolved.intent;

        let profile = self
            .store
            .user_profile(user_id)
            .await?
            .unwrap_or_else(|| UserProfile::anonymous(user_id));
        let equipment = self.store.equipment(user_id).await?;

        let mut debug = PlanDebug {
            intent: Some(intent.kind),
            routed: resolved.routed,
            ..PlanDebug::default()
        };

        let split = match request.split.as_deref() {
            Some(hint) => canonical_split(hint).or_else(|| {
                debug!(hint = %hint, "Ignoring unknown split hint");
                debug.ignored_split_hint = Some(hint.to_owned());
                intent.split
            }),
            None => intent.split,
        };
        let minutes = request
            .minutes
            .map(clamp_minutes)
            .or(intent.duration_minutes)
            .unwrap_or(self.config.generation.default_minutes);
        let main_lift_hint = split
            .filter(Split::has_main_lift)
            .and_then(|split| replacement_main_lift(split, &equipment))
            .or_else(|| {
                intent
                    .focus
                    .as_deref()
                    .and_then(|focus| pick_core_lift(focus, &equipment))
                    .map(str::to_owned)
            });
        debug.split = split;
        debug.minutes = minutes;
        debug.main_lift_hint.clone_from(&main_lift_hint);

        let base_structure = if intent.kind == IntentKind::ModifyWorkout {
            self.store
                .recent_sessions(user_id, 1)
                .await?
                .into_iter()
                .next()
                .map(|record| record.workout)
        } else {
            None
        };

        let style = request
            .style
            .as_deref()
            .or(intent.referenced_name.as_deref());
        let prompt = build_prompt(&PromptContext {
            split,
            style,
            modality: intent.modality,
            focus: intent.focus.as_deref(),
            base_structure: base_structure.as_ref(),
            main_lift_hint: main_lift_hint.as_deref(),
            request: Some(request.message.as_str()),
            ..PromptContext::new(minutes, &profile, &equipment)
        });

        let response = match self.provider.complete(&self.plan_request(prompt)).await {
            Ok(response) => response,
            Err(e) => {
                PipelineLogger::log_plan_failure(
                    user_id,
                    PlanFailure::Generation.as_str(),
                    &e.to_string(),
                );
                debug.duration_ms = elapsed_ms(started);
                return Ok(PlanResponse::failed(
                    PlanFailure::Generation,
                    GENERATION_FAILED_MESSAGE,
                    debug,
                ));
            }
        };
        debug.model = Some(response.model.clone());

        let Some((plan, strategy)) = try_parse_with_strategy::<Value>(&response.content) else {
            PipelineLogger::log_plan_failure(
                user_id,
                PlanFailure::UnparsableResponse.as_str(),
                "no repair strategy recovered JSON",
            );
            debug.duration_ms = elapsed_ms(started);
            return Ok(PlanResponse::failed(
                PlanFailure::UnparsableResponse,
                UNPARSABLE_MESSAGE,
                debug,
            ));
        };
        debug.repair_strategy = Some(strategy);

        let (mut workout, source) = normalize_with_source(&plan);
        debug.shape_source = Some(source);
        if workout.is_empty() {
            PipelineLogger::log_plan_failure(
                user_id,
                PlanFailure::EmptyPlan.as_str(),
                "reply held no usable items",
            );
            debug.duration_ms = elapsed_ms(started);
            return Ok(PlanResponse {
                plan,
                ..PlanResponse::failed(PlanFailure::EmptyPlan, UNPARSABLE_MESSAGE, debug)
            });
        }

        debug.main_lift_substitution = enforce_main_lift(&mut workout, split, &equipment);

        let slots = accessory_slots(&workout);
        if slots > 0 {
            let key = RotationKey::for_split(user_id, split);
            let pool = accessory_pool(self.store.as_ref(), &equipment).await?;
            let selected = pick_accessories(
                self.store.as_ref(),
                &key,
                &pool,
                slots,
                self.config.rotation.history_limit,
                RotationRng::from_seed(self.config.rotation.seed),
            )
            .await?;
            apply_accessories(&mut workout, &selected);
            debug.accessories = selected.into_iter().map(|entry| entry.name).collect();
            debug.rotation_key = Some(key.as_str().to_owned());
        }

        let coach_message = coach_message(&plan);
        self.store
            .save_session(SessionRecord::new(
                user_id,
                split,
                minutes,
                workout.clone(),
                coach_message.clone(),
            ))
            .await?;

        debug.duration_ms = elapsed_ms(started);
        PipelineLogger::log_plan_generated(
            user_id,
            workout.item_count(),
            debug.main_lift_substitution.is_some(),
            debug.duration_ms,
        );

        Ok(PlanResponse {
            workout,
            plan,
            coach_message,
            error: None,
            debug,
        })
    }

    fn plan_request(&self, prompt: String) -> ChatRequest {
        let capabilities = self.provider.capabilities();
        let messages = if capabilities.supports_system_messages() {
            vec![
                ChatMessage::system(plan_system_prompt()),
                ChatMessage::user(prompt),
            ]
        } else {
            vec![ChatMessage::user(format!(
                "{}\n\n{prompt}",
                plan_system_prompt()
            ))]
        };

        let request = ChatRequest::new(messages)
            .with_temperature(self.config.generation.temperature)
            .with_max_tokens(self.config.generation.max_tokens);
        if capabilities.supports_json_mode() {
            request.with_json_mode()
        } else {
            request
        }
    }
}

fn to_logged_sets(exercise: &str, entries: &[QuickEntry]) -> Vec<LoggedSet> {
    let logged_at = Utc::now();
    entries
        .iter()
        .map(|entry| LoggedSet {
            exercise: exercise.to_owned(),
            set_number: entry.set_number as u32,
            reps: entry.reps as u32,
            weight: entry.weight,
            logged_at,
        })
        .collect()
}

fn coach_message(plan: &Value) -> String {
    ["coach_message", "coachMessage"]
        .iter()
        .find_map(|key| plan.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map_or_else(|| DEFAULT_COACH_MESSAGE.to_owned(), str::to_owned)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or_else(|_| {
        warn!("Pipeline duration overflowed u64 milliseconds");
        u64::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coach_message_keys_and_default() {
        assert_eq!(coach_message(&json!({"coach_message": "Go"})), "Go");
        assert_eq!(coach_message(&json!({"coachMessage": " Push "})), "Push");
        assert_eq!(coach_message(&json!({"coach_message": ""})), DEFAULT_COACH_MESSAGE);
        assert_eq!(coach_message(&json!([])), DEFAULT_COACH_MESSAGE);
    }

    #[test]
    fn test_logged_sets_carry_exercise() {
        let entries = quick_entry::parse("1,5,225;2,5,230");
        let sets = to_logged_sets("Back Squat", &entries);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[1].set_number, 2);
        assert_eq!(sets[1].reps, 5);
        assert!((sets[1].weight - 230.0).abs() < f64::EPSILON);
        assert!(sets.iter().all(|set| set.exercise == "Back Squat"));
    }

    #[test]
    fn test_reply_wire_keys_are_camel_case() {
        let debug = PlanDebug {
            main_lift_hint: Some("Deadlift".to_owned()),
            ignored_split_hint: Some("crossfit".to_owned()),
            ..PlanDebug::default()
        };
        let reply = PlannerReply::Plan(PlanResponse::failed(
            PlanFailure::Generation,
            GENERATION_FAILED_MESSAGE,
            debug,
        ));

        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["kind"], "plan");
        assert_eq!(json["coachMessage"], GENERATION_FAILED_MESSAGE);
        assert!(json.get("coach_message").is_none());
        assert_eq!(json["error"], "generation");
        assert_eq!(json["debug"]["mainLiftHint"], "Deadlift");
        assert_eq!(json["debug"]["ignoredSplitHint"], "crossfit");
        assert!(json["debug"].get("durationMs").is_some());
        assert!(json["workout"].get("main").is_some());

        let logged = PlannerReply::SetsLogged {
            exercise: "Back Squat".to_owned(),
            sets: to_logged_sets("Back Squat", &quick_entry::parse("1,5,225")),
        };
        let json = serde_json::to_value(&logged).unwrap();
        assert_eq!(json["kind"], "sets_logged");
        assert_eq!(json["sets"][0]["setNumber"], 1);
        assert!(json["sets"][0].get("loggedAt").is_some());
    }

    #[test]
    fn test_request_hints() {
        let request = PlanRequest::new("u1", "hello");
        assert!(!request.has_plan_hints());
        assert!(request.clone().with_split("legs").has_plan_hints());
        assert!(request.with_style("circuit").has_plan_hints());
    }
}
