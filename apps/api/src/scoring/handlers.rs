//! Axum route handlers for prediction and retraining.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::features::extract_features;
use crate::ml::train_snapshot;
use crate::models::{lenient, ReadinessClass, Role, StudentProfile};
use crate::scoring::explainer::{explain, FeatureContribution};
use crate::scoring::scorer::{score, ClassProbabilities};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub student_profile: StudentProfile,
    #[serde(default, deserialize_with = "lenient")]
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: ReadinessClass,
    pub probabilities: ClassProbabilities,
    pub readiness_score: f64,
    pub contributions: Vec<FeatureContribution>,
    pub explanation: String,
    pub model_version: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub message: String,
    pub model_version: Uuid,
    pub trained_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/predict
///
/// Scores a student profile against a role. The snapshot is taken once,
/// so the classifier and explainer used by this request always come from
/// the same training run even if a retrain lands mid-flight.
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    let snapshot = state.model.current()?;

    let features = extract_features(&request.student_profile, &request.role);
    let prediction = score(&features, &snapshot.model)?;
    let report = explain(&features, prediction.class, &snapshot.explainer);

    Ok(Json(PredictResponse {
        prediction: prediction.class,
        probabilities: prediction.probabilities,
        readiness_score: prediction.readiness_score,
        contributions: report.contributions,
        explanation: report.explanation,
        model_version: snapshot.version,
    }))
}

/// POST /api/v1/train
///
/// Retrains on fresh synthetic data and swaps the snapshot in one step.
/// On failure the previous snapshot stays installed.
pub async fn handle_train(
    State(state): State<AppState>,
) -> Result<Json<TrainResponse>, AppError> {
    let config = state.config.training.clone();

    // CPU-bound fit; spawn_blocking keeps the async executor unblocked.
    let snapshot = tokio::task::spawn_blocking(move || train_snapshot(&config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed during training: {e}")))?
        .map_err(|e| AppError::Training(e.to_string()))?;

    let model_version = snapshot.version;
    let trained_at = snapshot.trained_at;
    state.model.install(snapshot);
    info!("Model retrained (version {model_version})");

    Ok(Json(TrainResponse {
        message: "Model retrained successfully".to_string(),
        model_version,
        trained_at,
    }))
}
