// ABOUTME: Unified LLM provider selector built once at the process entry point
// ABOUTME: Wraps the Groq and local OpenAI-compatible providers behind one LlmProvider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Selector
//!
//! `PIERRE_LLM_PROVIDER` picks the backend:
//! - `groq` (default): hosted inference, requires `GROQ_API_KEY`
//! - `local`/`ollama`/`vllm`/`localai`: any `OpenAI`-compatible server
//!
//! The resulting [`ChatProvider`] is handed to the planner explicitly; nothing
//! in the pipeline constructs a client on its own.

use async_trait::async_trait;
use tracing::info;

use super::{
    ChatRequest, ChatResponse, GroqProvider, LlmCapabilities, LlmProvider,
    OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use crate::config::{LlmProviderType, LlmSettings};
use crate::errors::AppError;

/// Unified chat provider that wraps Groq or a local LLM
pub enum ChatProvider {
    /// Groq provider for fast hosted inference
    Groq(GroqProvider),
    /// Local LLM provider via `OpenAI`-compatible API (Ollama, vLLM, `LocalAI`)
    Local(OpenAiCompatibleProvider),
}

impl ChatProvider {
    /// Build the provider selected by the planner configuration
    ///
    /// # Errors
    ///
    /// Returns an error if `GROQ_API_KEY` is missing for Groq, or if the HTTP
    /// client for a local server cannot be created.
    pub fn from_config(settings: &LlmSettings) -> Result<Self, AppError> {
        let provider = match settings.provider {
            LlmProviderType::Groq => {
                let mut groq = GroqProvider::from_env()?;
                if let Some(model) = &settings.model {
                    groq = groq.with_default_model(model.clone());
                }
                Self::Groq(groq)
            }
            LlmProviderType::Local => {
                let mut config = OpenAiCompatibleConfig::from_env();
                if let Some(model) = &settings.model {
                    config.default_model.clone_from(model);
                }
                Self::Local(OpenAiCompatibleProvider::new(config)?)
            }
        };

        info!(
            "LLM provider initialized: {} with model {}",
            provider.display_name(),
            provider.default_model()
        );
        Ok(provider)
    }

    /// Backend type of this provider
    #[must_use]
    pub const fn provider_type(&self) -> LlmProviderType {
        match self {
            Self::Groq(_) => LlmProviderType::Groq,
            Self::Local(_) => LlmProviderType::Local,
        }
    }

    fn inner(&self) -> &dyn LlmProvider {
        match self {
            Self::Groq(provider) => provider,
            Self::Local(provider) => provider,
        }
    }
}

#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn display_name(&self) -> &'static str {
        self.inner().display_name()
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.inner().capabilities()
    }

    fn default_model(&self) -> &str {
        self.inner().default_model()
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.inner().complete(request).await
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        self.inner().health_check().await
    }
}
