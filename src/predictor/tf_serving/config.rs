use std::time::Duration;

use super::error::{ModelServerError, ModelServerResult};

const DEFAULT_MODEL_NAME: &str = "color_names";
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Runtime configuration describing how to reach the model server.
#[derive(Debug, Clone)]
pub struct ModelServerConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl ModelServerConfig {
    /// Construct a configuration from an explicit base URL, with the default model name and
    /// timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: DEFAULT_MODEL_NAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Target another served model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> ModelServerResult<Self> {
        let base_url = std::env::var("MODEL_SERVER_URL").map_err(|_| {
            ModelServerError::MissingEnvVar {
                var: "MODEL_SERVER_URL",
            }
        })?;

        let mut config = Self::new(base_url);

        if let Ok(model) = std::env::var("MODEL_NAME") {
            config = config.with_model(model);
        }

        if let Ok(raw) = std::env::var("MODEL_TIMEOUT_MS") {
            let millis = raw
                .parse::<u64>()
                .map_err(|_| ModelServerError::InvalidEnvVar {
                    var: "MODEL_TIMEOUT_MS",
                    value: raw.clone(),
                })?;
            config = config.with_timeout(Duration::from_millis(millis));
        }

        Ok(config)
    }
}
