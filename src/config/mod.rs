// ABOUTME: Configuration module for environment-driven planner settings
// ABOUTME: Re-exports the planner configuration and provider selection types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management
//!
//! All configuration comes from environment variables; there are no config
//! files. The process entry point loads a [`PlannerConfig`] once and passes it
//! to the components it constructs.

/// Environment-based configuration loading and validation
pub mod environment;

pub use environment::{
    Environment, GenerationSettings, LlmProviderType, LlmSettings, PlannerConfig,
    RotationSettings,
};
