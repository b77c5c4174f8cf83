//! Training pipeline: synthetic dataset -> boosted classifier -> paired
//! explainer, packaged as one immutable snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::TrainingConfig;
use crate::ml::explain::TreeExplainer;
use crate::ml::gbdt::{GbdtClassifier, GbdtParams};
use crate::ml::synthetic;
use crate::ml::tree::TreeParams;
use crate::ml::TrainError;
use crate::models::ReadinessClass;

/// A trained classifier and the explainer built from the same fit.
///
/// Snapshots are immutable. Retraining produces a whole new snapshot;
/// the classifier and explainer inside one can never be out of sync.
#[derive(Debug, Clone)]
pub struct ModelSnapshot {
    pub version: Uuid,
    pub trained_at: DateTime<Utc>,
    pub model: Arc<GbdtClassifier>,
    pub explainer: TreeExplainer,
}

pub fn train_snapshot(config: &TrainingConfig) -> Result<ModelSnapshot, TrainError> {
    let dataset = synthetic::generate(config);

    let params = GbdtParams {
        n_classes: ReadinessClass::COUNT,
        n_rounds: config.n_rounds,
        learning_rate: config.learning_rate,
        tree: TreeParams {
            max_depth: config.max_depth,
            min_samples_leaf: config.min_samples_leaf,
            lambda: config.lambda,
            ..TreeParams::default()
        },
    };

    let model = Arc::new(GbdtClassifier::fit(&dataset.rows, &dataset.labels, &params)?);
    let explainer = TreeExplainer::new(Arc::clone(&model));

    let snapshot = ModelSnapshot {
        version: Uuid::new_v4(),
        trained_at: Utc::now(),
        model,
        explainer,
    };
    info!(
        "Trained readiness model {} ({} rounds on {} synthetic samples, seed {})",
        snapshot.version, config.n_rounds, config.n_samples, config.seed
    );
    Ok(snapshot)
}
