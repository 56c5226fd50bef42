use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    color::Rgb,
    predictor::{NamePredictor, NameTokenizer, PredictionResult, scale_prediction},
};

use super::{
    config::ModelServerConfig,
    error::{ModelServerError, ModelServerResult},
};

/// Request body of the `:predict` endpoint, one instance per name.
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: [&'a [Vec<f32>]; 1],
}

/// Response body of the `:predict` endpoint.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<Vec<f32>>,
}

/// [`NamePredictor`] backed by a TensorFlow-Serving compatible REST endpoint.
#[derive(Clone)]
pub struct TfServingPredictor {
    client: Client,
    model_url: Arc<str>,
    tokenizer: Arc<NameTokenizer>,
}

impl TfServingPredictor {
    /// Build the HTTP client for the configured model server.
    ///
    /// No request is sent; reachability is reported by [`NamePredictor::health_check`].
    pub fn connect(
        config: ModelServerConfig,
        tokenizer: Arc<NameTokenizer>,
    ) -> ModelServerResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| ModelServerError::ClientBuilder { source })?;

        let model_url = Arc::<str>::from(format!(
            "{}/v1/models/{}",
            config.base_url.trim_end_matches('/'),
            config.model
        ));

        Ok(Self {
            client,
            model_url,
            tokenizer,
        })
    }

    async fn predict(&self, name: &str) -> ModelServerResult<Vec<f32>> {
        let url = format!("{}:predict", self.model_url);
        let tensor = self.tokenizer.one_hot(name);
        let body = PredictRequest {
            instances: [tensor.as_slice()],
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| ModelServerError::RequestSend {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ModelServerError::RequestStatus {
                url,
                status: response.status(),
            });
        }

        let payload = response
            .json::<PredictResponse>()
            .await
            .map_err(|source| ModelServerError::DecodeResponse {
                url: url.clone(),
                source,
            })?;

        payload
            .predictions
            .into_iter()
            .next()
            .ok_or(ModelServerError::EmptyPrediction { url })
    }

    async fn model_status(&self) -> ModelServerResult<()> {
        let url = self.model_url.to_string();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ModelServerError::RequestSend {
                url: url.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(ModelServerError::RequestStatus { url, status }),
        }
    }
}

impl NamePredictor for TfServingPredictor {
    fn predict_rgb(&self, name: String) -> BoxFuture<'static, PredictionResult<Rgb>> {
        let predictor = self.clone();
        Box::pin(async move {
            let channels = predictor.predict(&name).await?;
            debug!(%name, ?channels, "model server prediction");
            scale_prediction(&channels)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, PredictionResult<()>> {
        let predictor = self.clone();
        Box::pin(async move { predictor.model_status().await.map_err(Into::into) })
    }
}
