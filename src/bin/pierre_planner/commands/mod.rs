// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for pierre-planner
// ABOUTME: Provides the plan pipeline, provider health, and offline inspection commands

pub mod health;
pub mod inspect;
pub mod plan;
