// ABOUTME: Structured intent produced from a free-text request
// ABOUTME: Closed set of intent kinds plus optional extracted slots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Modality, Split};

/// What the user is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Build a new session
    MakeWorkout,
    /// Adjust a previous session
    ModifyWorkout,
    /// Technique or programming question
    ExplainOrCoach,
    /// Session styled after a named athlete or influencer
    CelebrityInspired,
    /// Log sets or look at history
    LogOrHistory,
    /// Nothing recognizable; handled conversationally
    Unknown,
}

impl IntentKind {
    /// Canonical snake-case name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MakeWorkout => "make_workout",
            Self::ModifyWorkout => "modify_workout",
            Self::ExplainOrCoach => "explain_or_coach",
            Self::CelebrityInspired => "celebrity_inspired",
            Self::LogOrHistory => "log_or_history",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this intent leads to plan generation
    #[must_use]
    pub const fn generates_plan(&self) -> bool {
        matches!(self, Self::MakeWorkout | Self::ModifyWorkout)
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified request with its extracted slots. Created per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent category
    pub kind: IntentKind,
    /// Requested session length, clamped into the supported range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Requested equipment modality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<Modality>,
    /// Body area the user mentioned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    /// Matched celebrity style or referenced program name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_name: Option<String>,
    /// Canonical split named in the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<Split>,
    /// Ordinal reference ("the second one")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<u32>,
}

impl Intent {
    /// Intent of the given kind with no slots
    #[must_use]
    pub const fn new(kind: IntentKind) -> Self {
        Self {
            kind,
            duration_minutes: None,
            modality: None,
            focus: None,
            referenced_name: None,
            split: None,
            ordinal: None,
        }
    }

    /// Unknown intent with no slots
    #[must_use]
    pub const fn unknown() -> Self {
        Self::new(IntentKind::Unknown)
    }

    /// True if any slot was populated
    #[must_use]
    pub const fn has_slots(&self) -> bool {
        self.duration_minutes.is_some()
            || self.modality.is_some()
            || self.focus.is_some()
            || self.referenced_name.is_some()
            || self.split.is_some()
            || self.ordinal.is_some()
    }
}
