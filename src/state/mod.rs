use std::sync::Arc;

use crate::{error::ServiceError, predictor::NamePredictor};

/// Handle shared by every request handler.
pub type SharedState = Arc<AppState>;

/// Read-only context built once at start-up.
///
/// Holds the name-prediction collaborator when the model server is configured. Without a
/// predictor the service runs in degraded mode and only explicit color values can be resolved.
pub struct AppState {
    predictor: Option<Arc<dyn NamePredictor>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(predictor: Option<Arc<dyn NamePredictor>>) -> SharedState {
        Arc::new(Self { predictor })
    }

    /// Name-prediction collaborator, if one is installed.
    pub fn predictor(&self) -> Option<Arc<dyn NamePredictor>> {
        self.predictor.clone()
    }

    /// Name-prediction collaborator, failing in degraded mode.
    pub fn require_predictor(&self) -> Result<Arc<dyn NamePredictor>, ServiceError> {
        self.predictor()
            .ok_or(ServiceError::PredictorUnavailable)
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        self.predictor.is_none()
    }
}
