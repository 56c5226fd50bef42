use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report degraded mode when no predictor is installed, logging model server issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.predictor() {
        Some(predictor) => {
            if let Err(err) = predictor.health_check().await {
                warn!(error = %err, "model server health check failed");
            }
        }
        None => warn!("name prediction unavailable (degraded mode)"),
    }

    if state.is_degraded() {
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
    }
}
