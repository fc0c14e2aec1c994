// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Health command for pierre-planner
// ABOUTME: Checks the configured LLM provider and prints the outcome as JSON

use anyhow::{bail, Result};
use pierre_workout_planner::{
    config::PlannerConfig,
    llm::{check_health, ChatProvider},
};

/// Check the configured provider; fails the process when it is unhealthy
pub async fn run() -> Result<()> {
    let config = PlannerConfig::from_env()?;
    let provider = ChatProvider::from_config(&config.llm)?;

    let health = check_health(&provider).await;
    println!("{}", serde_json::to_string_pretty(&health)?);

    if !health.healthy {
        bail!("LLM provider {} is not healthy", health.provider);
    }
    Ok(())
}
