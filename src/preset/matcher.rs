//! Keyword scoring of free-text intent against the scenario catalog.

use serde::Serialize;

use super::catalog::{PresetCatalog, Scenario};

/// Score of one scenario for one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioScore {
    pub scenario: &'static Scenario,
    pub score: usize,
    pub matched_keywords: Vec<&'static str>,
}

/// Outcome of classifying an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Winning scenario, or the fallback when nothing scored
    pub scenario: &'static Scenario,

    /// Keywords of `scenario` found in the intent, in catalog order
    pub matched_keywords: Vec<&'static str>,

    /// All keyed scenarios by score descending, then id ascending
    pub ranking: Vec<ScenarioScore>,
}

impl MatchResult {
    /// Whether the fallback scenario was chosen.
    pub fn is_fallback(&self) -> bool {
        self.matched_keywords.is_empty()
    }
}

/// Classifies intents against a catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentMatcher {
    catalog: PresetCatalog,
}

impl IntentMatcher {
    /// Create a matcher over a catalog.
    pub fn new(catalog: PresetCatalog) -> Self {
        Self { catalog }
    }

    /// Classify an intent. Pure: same input, same result.
    pub fn match_intent(&self, intent: &str) -> MatchResult {
        let normalized = intent.to_lowercase();

        let mut ranking: Vec<ScenarioScore> = self
            .catalog
            .scenarios()
            .iter()
            .map(|scenario| {
                let matched_keywords: Vec<&'static str> = scenario
                    .keywords
                    .iter()
                    .copied()
                    .filter(|keyword| normalized.contains(&keyword.to_lowercase()))
                    .collect();
                ScenarioScore { scenario, score: matched_keywords.len(), matched_keywords }
            })
            .collect();

        ranking.sort_by(|a, b| {
            b.score.cmp(&a.score).then_with(|| a.scenario.id.cmp(b.scenario.id))
        });

        let (scenario, matched_keywords) = ranking
            .first()
            .filter(|top| top.score > 0)
            .map(|top| (top.scenario, top.matched_keywords.clone()))
            .unwrap_or_else(|| (self.catalog.fallback(), Vec::new()));

        MatchResult { scenario, matched_keywords, ranking }
    }
}

/// Classify an intent against the built-in catalog.
pub fn match_preset(intent: &str) -> MatchResult {
    IntentMatcher::default().match_intent(intent)
}
