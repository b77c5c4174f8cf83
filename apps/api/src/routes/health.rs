use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a status object with service version and, when a model is
/// loaded, its version and training time. Never fails, with or without a
/// trained model.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model = state
        .model
        .version_info()
        .map(|(version, trained_at)| json!({ "version": version, "trained_at": trained_at }));

    Json(json!({
        "status": "ok",
        "service": "readiness-api",
        "version": env!("CARGO_PKG_VERSION"),
        "model": model,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, TrainingConfig};
    use crate::state::ModelHandle;

    fn empty_state() -> AppState {
        AppState {
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                training: TrainingConfig::default(),
            },
            model: ModelHandle::new(),
        }
    }

    #[tokio::test]
    async fn test_health_is_ok_without_a_model() {
        let Json(body) = health_handler(State(empty_state())).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "readiness-api");
        assert!(body["model"].is_null());
    }
}
