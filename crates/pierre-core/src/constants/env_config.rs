// ABOUTME: Environment variable names and default values for planner configuration
// ABOUTME: Single source of truth for keys read by the config layer and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Selects the generative model provider (`groq` or `local`)
pub const LLM_PROVIDER_ENV: &str = "PIERRE_LLM_PROVIDER";

/// Overrides the provider's default model
pub const LLM_MODEL_ENV: &str = "PIERRE_LLM_MODEL";

/// Generation temperature for plan synthesis
pub const TEMPERATURE_ENV: &str = "PLANNER_TEMPERATURE";

/// Maximum tokens generated for a plan
pub const MAX_TOKENS_ENV: &str = "PLANNER_MAX_TOKENS";

/// Session length used when none is provided
pub const DEFAULT_MINUTES_ENV: &str = "PLANNER_DEFAULT_MINUTES";

/// Cap on the number of names stored per rotation key
pub const ROTATION_HISTORY_LIMIT_ENV: &str = "PLANNER_ROTATION_HISTORY_LIMIT";

/// Fixed seed for accessory shuffles (reproducible plans)
pub const ROTATION_SEED_ENV: &str = "PLANNER_ROTATION_SEED";

/// Default generation temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Temperature used for the model-backed intent classifier
pub const CLASSIFIER_TEMPERATURE: f32 = 0.0;

/// Default generation length
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Generation length for the model-backed intent classifier
pub const CLASSIFIER_MAX_TOKENS: u32 = 128;
