// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Plan command for pierre-planner
// ABOUTME: Wires config, provider, and store into a PlanAssembler and prints one reply

use std::sync::Arc;

use anyhow::Result;
use pierre_workout_planner::{
    config::PlannerConfig,
    llm::{ChatProvider, LlmProvider},
    services::{PlanAssembler, PlanRequest},
    store::InMemoryStore,
};
use tracing::info;

/// Arguments of the `plan` subcommand
pub struct PlanArgs {
    pub user_id: String,
    pub message: String,
    pub split: Option<String>,
    pub minutes: Option<u32>,
    pub style: Option<String>,
    pub exercise: Option<String>,
    pub seed_demo: bool,
}

/// Run one request through the pipeline and print the reply as JSON
pub async fn run(args: PlanArgs) -> Result<()> {
    let config = PlannerConfig::from_env()?;
    let provider = ChatProvider::from_config(&config.llm)?;
    info!(
        provider = provider.name(),
        model = provider.default_model(),
        "Using LLM provider"
    );

    let store = if args.seed_demo {
        InMemoryStore::demo()
    } else {
        InMemoryStore::new()
    };
    let assembler = PlanAssembler::new(Arc::new(provider), Arc::new(store), config);

    let request = PlanRequest {
        user_id: args.user_id,
        message: args.message,
        split: args.split,
        minutes: args.minutes,
        style: args.style,
        exercise: args.exercise,
    };
    let reply = assembler.handle(&request).await?;

    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}
