//! Scenario wizard: classify an intent and persist the chosen preset.

use std::io::{self, Write};
use std::path::Path;

use crate::core::{now_iso, write_json, DevflowError, PresetRecord, PresetSummary, Result};
use crate::preset::{IntentMatcher, MatchResult};

/// Project a match into the record stored in `.devflow/preset.json`.
pub fn preset_record(intent: &str, matched: &MatchResult, detected_at: String) -> PresetRecord {
    let scenario = matched.scenario;
    PresetRecord {
        intent: Some(intent.to_string()),
        detected_at: Some(detected_at),
        preset: Some(PresetSummary {
            id: scenario.id.to_string(),
            title: scenario.title.to_string(),
            summary: scenario.summary.to_string(),
        }),
        matched_keywords: matched.matched_keywords.iter().map(|k| (*k).to_string()).collect(),
        recommendations: scenario.recommendations.iter().map(|r| (*r).to_string()).collect(),
        guidance_prompt: scenario.guidance_prompt.to_string(),
    }
}

/// Join command-line words into an intent, asking on stdin when there are none.
pub fn read_intent(words: &[String]) -> Result<String> {
    let joined = words.join(" ");
    let intent = joined.trim();
    if !intent.is_empty() {
        return Ok(intent.to_string());
    }

    print!("Describe your goal or requirement: ");
    io::stdout().flush().map_err(|e| DevflowError::io("flush", "<stdout>", e))?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(|e| DevflowError::io("read", "<stdin>", e))?;

    let intent = input.trim();
    if intent.is_empty() {
        return Err(DevflowError::EmptyIntent);
    }
    Ok(intent.to_string())
}

/// Classify `intent`, print the outcome and write the preset record to `output`.
pub async fn run_wizard(intent: &str, output: &Path) -> Result<PresetRecord> {
    let intent = intent.trim();
    if intent.is_empty() {
        return Err(DevflowError::EmptyIntent);
    }

    let matched = IntentMatcher::default().match_intent(intent);
    for entry in &matched.ranking {
        tracing::debug!(
            scenario = entry.scenario.id,
            score = entry.score,
            keywords = ?entry.matched_keywords,
            "Scenario score"
        );
    }

    print_match(&matched);

    let record = preset_record(intent, &matched, now_iso());
    write_json(output, &record).await?;
    tracing::info!(path = %output.display(), scenario = matched.scenario.id, "Wrote preset");

    println!();
    println!("Preset written to {}", output.display());
    println!("Reference the prompt above in your assistant session to follow this scenario.");

    Ok(record)
}

fn print_match(matched: &MatchResult) {
    let scenario = matched.scenario;

    println!();
    println!("Scenario: {} ({})", scenario.title, scenario.id);
    if matched.is_fallback() {
        println!("Matched keywords: none, using the general workflow");
    } else {
        println!("Matched keywords: {}", matched.matched_keywords.join(", "));
    }
    println!("{}", scenario.summary);

    println!();
    println!("Recommendations:");
    for (i, recommendation) in scenario.recommendations.iter().enumerate() {
        println!("  {}. {recommendation}", i + 1);
    }

    println!();
    println!("Add this to the first message of your assistant session:");
    println!("{}", scenario.guidance_prompt);
}
