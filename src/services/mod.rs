// ABOUTME: Domain service layer sequencing the planner stages into request handling
// ABOUTME: Provides the plan assembler consumed by the CLI and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services own collaborators injected at the process entry point (model
//! provider, store, configuration) and turn one inbound request into one
//! reply. They hold no mutable state of their own.

/// Plan assembler: classify, generate, repair, normalize, enforce, rotate
pub mod plan_assembler;

pub use plan_assembler::{
    PlanAssembler, PlanDebug, PlanFailure, PlanRequest, PlanResponse, PlannerReply,
};
