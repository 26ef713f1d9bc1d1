use serde::{Deserialize, Serialize};

/// The structured report returned by the completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_summary: String,
    pub key_strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub actionable_suggestions: Vec<ActionableSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantitative_analysis: Option<QuantitativeAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableSuggestion {
    pub suggestion: String,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeAnalysis {
    pub average_score: f64, // 1 – 5 scale assumed
    pub score_distribution: Vec<ScoreBucket>,
}

/// One bar of the score distribution: a label such as "5" and its count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub name: String,
    pub value: f64,
}

impl AnalysisResult {
    /// Soft size expectations the prompt asks for but nothing enforces.
    /// Returns a description of each expectation the result misses.
    pub fn soft_expectation_gaps(&self) -> Vec<String> {
        let mut gaps = Vec::new();
        if !(3..=5).contains(&self.key_strengths.len()) {
            gaps.push(format!(
                "keyStrengths has {} items (3-5 expected)",
                self.key_strengths.len()
            ));
        }
        if !(3..=5).contains(&self.areas_for_improvement.len()) {
            gaps.push(format!(
                "areasForImprovement has {} items (3-5 expected)",
                self.areas_for_improvement.len()
            ));
        }
        if self.actionable_suggestions.len() < 2 {
            gaps.push(format!(
                "actionableSuggestions has {} items (at least 2 expected)",
                self.actionable_suggestions.len()
            ));
        }
        gaps
    }
}
