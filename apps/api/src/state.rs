use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::ml::ModelSnapshot;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub model: ModelHandle,
}

/// Process-wide handle to the current model/explainer snapshot.
///
/// Retraining installs a whole new snapshot under the write lock; readers
/// clone the `Arc` out, so a request observes one consistent classifier
/// and explainer for its full lifetime. The snapshot is never partially
/// updated.
#[derive(Clone, Default)]
pub struct ModelHandle {
    inner: Arc<RwLock<Option<Arc<ModelSnapshot>>>>,
}

impl ModelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, or `ModelUnavailable` before the first
    /// successful train.
    pub fn current(&self) -> Result<Arc<ModelSnapshot>, AppError> {
        self.read()
            .as_ref()
            .cloned()
            .ok_or(AppError::ModelUnavailable)
    }

    /// Replaces the snapshot wholesale. The sole mutator.
    pub fn install(&self, snapshot: ModelSnapshot) {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            // Snapshots are immutable; a poisoned lock still holds valid data.
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(Arc::new(snapshot));
    }

    /// Version and training time of the current snapshot, if any.
    pub fn version_info(&self) -> Option<(Uuid, DateTime<Utc>)> {
        self.read().as_ref().map(|s| (s.version, s.trained_at))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Arc<ModelSnapshot>>> {
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
