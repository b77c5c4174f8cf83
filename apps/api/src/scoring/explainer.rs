//! Contribution ranking and the templated prediction narrative.

use serde::Serialize;

use crate::features::{FeatureVector, FEATURE_NAMES, NUM_FEATURES};
use crate::ml::explain::TreeExplainer;
use crate::models::ReadinessClass;

/// Number of ranked contributions returned for display.
pub const TOP_CONTRIBUTIONS: usize = 10;
/// The narrative draws from this many of the strongest contributions.
const NARRATIVE_POOL: usize = 5;
/// At most this many feature names per narrative clause.
const NARRATIVE_NAMES: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct FeatureContribution {
    pub feature: &'static str,
    /// Attribution toward (positive) or away from (negative) the
    /// predicted class.
    pub contribution: f64,
    /// Raw feature value the attribution applies to.
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplanationReport {
    pub contributions: Vec<FeatureContribution>,
    pub explanation: String,
}

/// Ranks the predicted class's attributions and assembles the narrative.
pub fn explain(
    features: &FeatureVector,
    class: ReadinessClass,
    explainer: &TreeExplainer,
) -> ExplanationReport {
    let values = features.to_array();
    let attributions = explainer.attributions(&values, class.index());
    let ranked = rank_contributions(&attributions, &values);
    let explanation = build_explanation(class, &ranked);

    let contributions = ranked.into_iter().take(TOP_CONTRIBUTIONS).collect();
    ExplanationReport {
        contributions,
        explanation,
    }
}

/// Pairs each feature with its attribution and raw value, sorted by
/// absolute attribution descending. The sort is stable, so equal
/// magnitudes keep feature order.
fn rank_contributions(
    attributions: &[f64],
    values: &[f64; NUM_FEATURES],
) -> Vec<FeatureContribution> {
    let mut ranked: Vec<FeatureContribution> = FEATURE_NAMES
        .iter()
        .zip(attributions)
        .zip(values)
        .map(|((feature, contribution), value)| FeatureContribution {
            feature: *feature,
            contribution: *contribution,
            value: *value,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.contribution
            .abs()
            .partial_cmp(&a.contribution.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// `"Predicted readiness: <label>. Top positive factors: <...>. Areas to
/// improve: <...>."`; either clause is omitted when its list is empty.
fn build_explanation(class: ReadinessClass, ranked: &[FeatureContribution]) -> String {
    let pool = &ranked[..ranked.len().min(NARRATIVE_POOL)];
    let positive: Vec<&str> = pool
        .iter()
        .filter(|c| c.contribution > 0.0)
        .take(NARRATIVE_NAMES)
        .map(|c| c.feature)
        .collect();
    let negative: Vec<&str> = pool
        .iter()
        .filter(|c| c.contribution < 0.0)
        .take(NARRATIVE_NAMES)
        .map(|c| c.feature)
        .collect();

    let mut explanation = format!("Predicted readiness: {}.", class.display_label());
    if !positive.is_empty() {
        explanation.push_str(&format!(" Top positive factors: {}.", positive.join(", ")));
    }
    if !negative.is_empty() {
        explanation.push_str(&format!(" Areas to improve: {}.", negative.join(", ")));
    }
    explanation
}
