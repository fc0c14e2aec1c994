// ABOUTME: Pure prompt composition for plan generation requests
// ABOUTME: Renders profile, equipment whitelist, optional seed session, and the output contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use pierre_core::models::{Modality, Phase, Split, UserProfile, WorkoutShape};

/// Everything the prompt is built from. The builder never calls the model.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    /// Training split, when known
    pub split: Option<Split>,
    /// Session length in minutes
    pub minutes: u32,
    /// Free-text style hint ("strength", "circuit", "Arnold Schwarzenegger")
    pub style: Option<&'a str>,
    /// Preferred modality from the request
    pub modality: Option<Modality>,
    /// Body-area focus from the request
    pub focus: Option<&'a str>,
    /// Stored profile metrics
    pub profile: &'a UserProfile,
    /// Owned equipment names
    pub equipment: &'a [String],
    /// Existing session to adapt instead of starting from scratch
    pub base_structure: Option<&'a WorkoutShape>,
    /// Main lift chosen by the rules engine for this split and equipment
    pub main_lift_hint: Option<&'a str>,
    /// The user's own words
    pub request: Option<&'a str>,
}

impl<'a> PromptContext<'a> {
    /// Context with only the required fields set
    #[must_use]
    pub const fn new(minutes: u32, profile: &'a UserProfile, equipment: &'a [String]) -> Self {
        Self {
            split: None,
            minutes,
            style: None,
            modality: None,
            focus: None,
            profile,
            equipment,
            base_structure: None,
            main_lift_hint: None,
            request: None,
        }
    }
}

fn phase_enumeration() -> String {
    Phase::GENERATION_PHASES
        .iter()
        .map(Phase::as_str)
        .collect::<Vec<_>>()
        .join("|")
}

fn write_profile(prompt: &mut String, profile: &UserProfile) {
    let _ = writeln!(prompt, "User profile:");
    let _ = writeln!(prompt, "- Training level: {}", profile.level.as_str());
    if let Some(age) = profile.age {
        let _ = writeln!(prompt, "- Age: {age}");
    }
    if let Some(weight) = profile.body_weight_kg {
        let _ = writeln!(prompt, "- Body weight: {weight:.1} kg");
    }
    if let Some(height) = profile.height_cm {
        let _ = writeln!(prompt, "- Height: {height:.0} cm");
    }
    if let Some(goal) = &profile.goal {
        let _ = writeln!(prompt, "- Goal: {goal}");
    }
    if !profile.limitations.is_empty() {
        let _ = writeln!(
            prompt,
            "- Limitations to respect: {}",
            profile.limitations.join(", ")
        );
    }
}

fn write_equipment(prompt: &mut String, equipment: &[String]) {
    let _ = writeln!(
        prompt,
        "\nEquipment whitelist (use nothing else; bodyweight movements are always allowed):"
    );
    if equipment.is_empty() {
        let _ = writeln!(prompt, "- none (bodyweight only)");
    }
    for name in equipment {
        let _ = writeln!(prompt, "- {name}");
    }
}

fn write_output_contract(prompt: &mut String) {
    let phases = phase_enumeration();
    let _ = writeln!(prompt, "\nOutput format. Respond with ONLY this JSON object:");
    let _ = writeln!(
        prompt,
        r#"{{"workout": {{"warmup": [ITEM], "main": [ITEM], "cooldown": [ITEM]}}, "coach_message": string}}"#
    );
    let _ = writeln!(
        prompt,
        r#"ITEM = {{"name": string, "sets": number|null, "reps": number|string|null, "duration_seconds": number|null, "instruction": string|null, "rest_seconds": number|null, "is_main": boolean, "phase": "{phases}"}}"#
    );
    let _ = writeln!(
        prompt,
        "- Exactly one item in \"main\" has \"is_main\": true; it is the session's main lift."
    );
    let _ = writeln!(
        prompt,
        "- Accessory exercises go in \"main\" after the main lift with \"phase\": \"accessory\"."
    );
    let _ = writeln!(
        prompt,
        "- \"coach_message\" is two or three encouraging sentences addressed to the user."
    );
}

/// Compose the generation instruction block
#[must_use]
pub fn build_prompt(ctx: &PromptContext<'_>) -> String {
    let mut prompt = String::with_capacity(2048);

    let split = ctx.split.map_or("general", |split| split.as_str());
    let _ = writeln!(prompt, "Create a {}-minute {split} workout.", ctx.minutes);
    if let Some(style) = ctx.style {
        let _ = writeln!(prompt, "Style: {style}.");
    }
    if let Some(modality) = ctx.modality {
        let _ = writeln!(prompt, "Preferred modality: {modality}.");
    }
    if let Some(focus) = ctx.focus {
        let _ = writeln!(prompt, "Focus area: {focus}.");
    }
    if let Some(request) = ctx.request {
        let _ = writeln!(prompt, "The user asked: \"{}\"", request.trim());
    }
    prompt.push('\n');

    write_profile(&mut prompt, ctx.profile);
    write_equipment(&mut prompt, ctx.equipment);

    if let Some(lift) = ctx.main_lift_hint {
        let _ = writeln!(prompt, "\nUse {lift} as the main lift.");
    }

    if let Some(base) = ctx.base_structure {
        // Serializing a WorkoutShape cannot fail: all keys are strings
        let seed = serde_json::to_string_pretty(base).unwrap_or_default();
        let _ = writeln!(
            prompt,
            "\nAdapt this existing session to the request instead of starting over:\n{seed}"
        );
    }

    write_output_contract(&mut prompt);
    prompt
}
