// Model internals: regression trees, softmax boosting, path attribution,
// and the synthetic training pipeline. The classifier/explainer pair is
// only ever produced together by trainer.rs and replaced as one snapshot.

pub mod explain;
pub mod gbdt;
pub mod synthetic;
pub mod trainer;
pub mod tree;

pub use trainer::{train_snapshot, ModelSnapshot};

use thiserror::Error;

/// Errors raised while fitting a model.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("training dataset is empty")]
    EmptyDataset,

    #[error("rows ({rows}) and labels ({labels}) differ in length")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("at least two classes required, got {0}")]
    TooFewClasses(usize),

    #[error("label {label} out of range for {n_classes} classes")]
    LabelOutOfRange { label: usize, n_classes: usize },
}
