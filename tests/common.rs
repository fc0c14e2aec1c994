// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides a scripted LLM provider, quiet logging, and assembler construction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `pierre_workout_planner`
//!
//! Each test binary includes this module with `mod common;`, so not every
//! helper is used by every binary.

use async_trait::async_trait;
use pierre_workout_planner::config::{PlannerConfig, RotationSettings};
use pierre_workout_planner::errors::{AppError, ErrorCode};
use pierre_workout_planner::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use pierre_workout_planner::services::PlanAssembler;
use pierre_workout_planner::store::InMemoryStore;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// One scripted model outcome
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Reply with this text
    Reply(String),
    /// Fail the call with a provider error
    Fail,
}

/// Fake provider that plays back scripted replies in order and records requests.
/// The last scripted outcome repeats once the script runs out.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ChatRequest>>,
    capabilities: LlmCapabilities,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            capabilities: LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE,
        }
    }

    /// Provider whose every reply is `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new([Scripted::Reply(text.into())])
    }

    /// Provider whose every call fails
    pub fn failing() -> Self {
        Self::new([Scripted::Fail])
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: LlmCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().cloned()
            }
        };

        match next {
            Some(Scripted::Reply(content)) => Ok(ChatResponse {
                content,
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Some(Scripted::Fail) => Err(AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "scripted provider failure",
            )),
            None => Err(AppError::internal("scripted provider has no replies")),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        match self.script.lock().unwrap().front() {
            Some(Scripted::Fail) => Err(AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "scripted provider unreachable",
            )),
            _ => Ok(true),
        }
    }
}

/// Configuration with a fixed rotation seed
pub fn test_config() -> PlannerConfig {
    PlannerConfig {
        rotation: RotationSettings {
            seed: Some(7),
            ..RotationSettings::default()
        },
        ..PlannerConfig::default()
    }
}

/// Assembler over a scripted provider and a store, keeping handles to both
pub fn assembler(
    provider: ScriptedProvider,
    store: InMemoryStore,
) -> (PlanAssembler, Arc<ScriptedProvider>, Arc<InMemoryStore>) {
    init_test_logging();
    let provider = Arc::new(provider);
    let store = Arc::new(store);
    let assembler = PlanAssembler::new(provider.clone(), store.clone(), test_config());
    (assembler, provider, store)
}
