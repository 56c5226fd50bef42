//! Name-to-color prediction collaborator and the boundary scaling of its output.

pub mod tokenizer;
#[cfg(feature = "tf-serving")]
pub mod tf_serving;

use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::color::{Rgb, codec::unit_to_channel};

pub use tokenizer::{NameTokenizer, TokenizerError};

/// Result alias for prediction calls.
pub type PredictionResult<T> = Result<T, PredictionError>;

/// Error raised by prediction backends regardless of how the model is hosted.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The backend could not be reached or answered with a failure.
    #[error("prediction backend unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The backend answered but the output is not three finite channels.
    #[error("malformed prediction output: {0}")]
    MalformedOutput(String),
}

impl PredictionError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        PredictionError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}

/// Abstraction over the trained model turning a color name into a color.
pub trait NamePredictor: Send + Sync {
    /// Predict the color for an already-lowercased name.
    fn predict_rgb(&self, name: String) -> BoxFuture<'static, PredictionResult<Rgb>>;
    /// Check that the backend is reachable and serving the model.
    fn health_check(&self) -> BoxFuture<'static, PredictionResult<()>>;
}

/// Turn the three `[0, 1]` model outputs into a triple with `round(value * 255)`.
///
/// Out-of-range outputs are clamped to 0..=255.
pub fn scale_prediction(values: &[f32]) -> PredictionResult<Rgb> {
    let [r, g, b] = values else {
        return Err(PredictionError::MalformedOutput(format!(
            "expected 3 channels, got {}",
            values.len()
        )));
    };
    if let Some(bad) = [r, g, b].into_iter().find(|value| !value.is_finite()) {
        return Err(PredictionError::MalformedOutput(format!(
            "channel value {bad} is not finite"
        )));
    }

    Ok(Rgb::new(
        unit_to_channel(f64::from(*r)),
        unit_to_channel(f64::from(*g)),
        unit_to_channel(f64::from(*b)),
    ))
}
