// ABOUTME: Logging configuration and structured logging setup for the workout planner
// ABOUTME: Configures log level, output format, and structured pipeline event helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Production-ready logging configuration with structured output

use anyhow::{anyhow, Result};
use pierre_core::constants::service_names;
use pierre_core::models::IntentKind;
use serde_json::json;
use std::env;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for CLI output
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::PIERRE_WORKOUT_PLANNER.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::PIERRE_WORKOUT_PLANNER.into()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
            environment,
        }
    }

    /// Configuration for the CLI: environment settings, with the level taken
    /// from `--verbose` and compact output unless `LOG_FORMAT` is set
    #[must_use]
    pub fn for_cli(verbose: bool) -> Self {
        let from_env = Self::from_env();
        let format = if env::var("LOG_FORMAT").is_ok() {
            from_env.format
        } else {
            LogFormat::Compact
        };
        Self {
            level: if verbose { "debug" } else { "warn" }.into(),
            format,
            ..from_env
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").unwrap_or_else(|_| self.level.clone());
        let mut filter = EnvFilter::new(base);
        for directive in [
            "hyper=warn".to_owned(),
            "reqwest=warn".to_owned(),
            format!("pierre_workout_planner={}", self.level),
        ] {
            match directive.parse() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(e) => warn!("Ignoring invalid log directive '{directive}': {e}"),
            }
        }
        filter
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let installed = match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_thread_ids(self.include_thread)
                        .with_thread_names(self.include_thread)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events)
                        .json(),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_thread_ids(self.include_thread)
                        .with_thread_names(self.include_thread)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events),
                )
                .try_init(),
            // CLI output goes to stdout, so logs go to stderr
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stderr)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init(),
        };
        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            "Pierre workout planner starting up: {config_summary}"
        );
    }
}

/// Structured events emitted by the plan synthesis pipeline
pub struct PipelineLogger;

impl PipelineLogger {
    /// Log the classifier's decision
    pub fn log_classification(user_id: &str, intent: IntentKind, model_routed: bool) {
        info!(
            user.id = %user_id,
            intent = %intent,
            intent.model_routed = model_routed,
            "Request classified"
        );
    }

    /// Log a completed plan
    pub fn log_plan_generated(user_id: &str, items: usize, substituted: bool, duration_ms: u64) {
        info!(
            user.id = %user_id,
            plan.items = items,
            plan.main_lift_substituted = substituted,
            plan.duration_ms = duration_ms,
            "Workout plan generated"
        );
    }

    /// Log a degraded plan result (empty shape returned)
    pub fn log_plan_failure(user_id: &str, reason: &str, detail: &str) {
        warn!(
            user.id = %user_id,
            plan.failure = %reason,
            plan.detail = %detail,
            "Workout plan generation failed"
        );
    }

    /// Log an accessory rotation write
    pub fn log_rotation(key: &str, selected: usize, pool: usize) {
        info!(
            rotation.key = %key,
            rotation.selected = selected,
            rotation.pool = pool,
            "Accessory rotation updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cli_config_defaults_to_compact() {
        env::remove_var("LOG_FORMAT");
        env::remove_var("SERVICE_NAME");
        let config = LoggingConfig::for_cli(false);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.service_name, service_names::PIERRE_WORKOUT_PLANNER);
    }

    #[test]
    #[serial]
    fn test_cli_config_honors_environment() {
        env::set_var("LOG_FORMAT", "json");
        env::set_var("SERVICE_NAME", "planner-cli");
        let config = LoggingConfig::for_cli(true);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.service_name, "planner-cli");
        env::remove_var("LOG_FORMAT");
        env::remove_var("SERVICE_NAME");
    }
}
