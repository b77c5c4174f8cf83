//! Scorer: turns a feature vector and the current classifier into a
//! readiness prediction.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::features::FeatureVector;
use crate::ml::gbdt::{self, GbdtClassifier};
use crate::models::ReadinessClass;

/// Per-class probability triple. Components sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub not_ready: f64,
    pub partial: f64,
    pub ready: f64,
}

impl ClassProbabilities {
    fn from_slice(probs: &[f64]) -> Result<Self, AppError> {
        match probs {
            [not_ready, partial, ready] => Ok(Self {
                not_ready: *not_ready,
                partial: *partial,
                ready: *ready,
            }),
            _ => Err(AppError::Internal(anyhow::anyhow!(
                "expected {} class probabilities, got {}",
                ReadinessClass::COUNT,
                probs.len()
            ))),
        }
    }
}

/// Blend anchors per class ordinal: the readiness score is
/// `30 P(not_ready) + 60 P(partial) + 85 P(ready)`, a continuous signal
/// smoother than the discrete class alone.
const SCORE_ANCHORS: [f64; ReadinessClass::COUNT] = [30.0, 60.0, 85.0];

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub class: ReadinessClass,
    pub probabilities: ClassProbabilities,
    pub readiness_score: f64,
}

pub fn score(features: &FeatureVector, model: &GbdtClassifier) -> Result<Prediction, AppError> {
    let x = features.to_array();
    let probs = model.predict_proba(&x);

    let class_index = gbdt::argmax(&probs);
    let class = ReadinessClass::from_index(class_index).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("class index {class_index} out of range"))
    })?;

    let probabilities = ClassProbabilities::from_slice(&probs)?;
    let readiness_score = probs
        .iter()
        .zip(SCORE_ANCHORS)
        .map(|(p, anchor)| p * anchor)
        .sum();

    Ok(Prediction {
        class,
        probabilities,
        readiness_score,
    })
}
