// ABOUTME: Re-export of the unified error system from pierre-core
// ABOUTME: Keeps `crate::errors::{AppError, AppResult}` paths stable for binaries and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error types live in `pierre-core` so that every workspace crate shares
//! them; this module re-exports them under the application path.

pub use pierre_core::errors::*;
