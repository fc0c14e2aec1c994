// ABOUTME: Environment configuration management for the workout planner
// ABOUTME: Parses provider selection, generation settings, and rotation settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::errors::{AppError, AppResult, ErrorCode};
use pierre_core::constants::env_config::{
    DEFAULT_MAX_TOKENS, DEFAULT_MINUTES_ENV, DEFAULT_TEMPERATURE, LLM_MODEL_ENV, LLM_PROVIDER_ENV,
    MAX_TOKENS_ENV, ROTATION_HISTORY_LIMIT_ENV, ROTATION_SEED_ENV, TEMPERATURE_ENV,
};
use pierre_core::constants::{
    DEFAULT_ROTATION_HISTORY_LIMIT, DEFAULT_SESSION_MINUTES, MAX_SESSION_MINUTES,
    MIN_SESSION_MINUTES,
};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which generative model backend to construct
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderType {
    /// Hosted Groq inference (requires `GROQ_API_KEY`)
    #[default]
    Groq,
    /// Local `OpenAI`-compatible server (Ollama, vLLM, `LocalAI`)
    Local,
}

impl LlmProviderType {
    /// Parse from string with fallback to Groq
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "local" | "ollama" | "vllm" | "localai" => Self::Local,
            "groq" => Self::Groq,
            other => {
                warn!("Unknown {LLM_PROVIDER_ENV} value '{other}', using groq");
                Self::Groq
            }
        }
    }

    /// Provider type selected by `PIERRE_LLM_PROVIDER`
    #[must_use]
    pub fn from_env() -> Self {
        env::var(LLM_PROVIDER_ENV)
            .map(|value| Self::from_str_or_default(&value))
            .unwrap_or_default()
    }

    /// Model override from `PIERRE_LLM_MODEL`, if set and non-empty
    #[must_use]
    pub fn model_from_env() -> Option<String> {
        env::var(LLM_MODEL_ENV).ok().filter(|m| !m.trim().is_empty())
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::Local => "local",
        }
    }
}

/// Generative model selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Backend to construct
    pub provider: LlmProviderType,
    /// Model override; the provider default is used when `None`
    pub model: Option<String>,
}

/// Parameters applied to plan generation requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Maximum generated tokens
    pub max_tokens: u32,
    /// Session length used when neither hint nor message gives one
    pub default_minutes: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            default_minutes: DEFAULT_SESSION_MINUTES,
        }
    }
}

/// Accessory rotation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationSettings {
    /// Maximum names persisted per rotation key
    pub history_limit: usize,
    /// Fixed shuffle seed; entropy-seeded when `None`
    pub seed: Option<u64>,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_ROTATION_HISTORY_LIMIT,
            seed: None,
        }
    }
}

/// Complete planner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Model selection
    pub llm: LlmSettings,
    /// Generation parameters
    pub generation: GenerationSettings,
    /// Rotation parameters
    pub rotation: RotationSettings,
}

impl PlannerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if a numeric variable cannot be parsed or the
    /// resulting configuration fails validation.
    pub fn from_env() -> AppResult<Self> {
        let environment = env::var("ENVIRONMENT")
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let config = Self {
            environment,
            llm: LlmSettings {
                provider: LlmProviderType::from_env(),
                model: LlmProviderType::model_from_env(),
            },
            generation: GenerationSettings {
                temperature: parse_env_or(TEMPERATURE_ENV, DEFAULT_TEMPERATURE)?,
                max_tokens: parse_env_or(MAX_TOKENS_ENV, DEFAULT_MAX_TOKENS)?,
                default_minutes: parse_env_or(DEFAULT_MINUTES_ENV, DEFAULT_SESSION_MINUTES)?,
            },
            rotation: RotationSettings {
                history_limit: parse_env_or(
                    ROTATION_HISTORY_LIMIT_ENV,
                    DEFAULT_ROTATION_HISTORY_LIMIT,
                )?,
                seed: parse_optional_env(ROTATION_SEED_ENV)?,
            },
        };

        config.validate()?;
        info!("Planner configuration loaded: {}", config.summary());
        Ok(config)
    }

    /// Validate value ranges
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` describing the first out-of-range value.
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(config_invalid(format!(
                "{TEMPERATURE_ENV} must be between 0.0 and 2.0, got {}",
                self.generation.temperature
            )));
        }
        if self.generation.max_tokens == 0 {
            return Err(config_invalid(format!("{MAX_TOKENS_ENV} must be positive")));
        }
        if !(MIN_SESSION_MINUTES..=MAX_SESSION_MINUTES).contains(&self.generation.default_minutes)
        {
            return Err(config_invalid(format!(
                "{DEFAULT_MINUTES_ENV} must be between {MIN_SESSION_MINUTES} and {MAX_SESSION_MINUTES}"
            )));
        }
        if self.rotation.history_limit == 0 {
            return Err(config_invalid(format!(
                "{ROTATION_HISTORY_LIMIT_ENV} must be positive"
            )));
        }
        Ok(())
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "env={} provider={} model={} temperature={} max_tokens={} default_minutes={} rotation_limit={} seeded={}",
            self.environment,
            self.llm.provider.as_str(),
            self.llm.model.as_deref().unwrap_or("<provider default>"),
            self.generation.temperature,
            self.generation.max_tokens,
            self.generation.default_minutes,
            self.rotation.history_limit,
            self.rotation.seed.is_some(),
        )
    }
}

fn config_invalid(message: String) -> AppError {
    AppError::new(ErrorCode::ConfigInvalid, message)
}

fn parse_env_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    parse_optional_env(key).map(|value| value.unwrap_or(default))
}

fn parse_optional_env<T>(key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| config_invalid(format!("Invalid value for {key} ('{raw}'): {e}"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(
            LlmProviderType::from_str_or_default("Ollama"),
            LlmProviderType::Local
        );
        assert_eq!(
            LlmProviderType::from_str_or_default("groq"),
            LlmProviderType::Groq
        );
        assert_eq!(
            LlmProviderType::from_str_or_default("mystery"),
            LlmProviderType::Groq
        );
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("whatever"),
            Environment::Development
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = PlannerConfig::default();
        assert!(config.validate().is_ok());

        config.generation.temperature = 3.5;
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid);

        config.generation.temperature = 0.5;
        config.generation.default_minutes = 5;
        assert!(config.validate().is_err());
    }
}
