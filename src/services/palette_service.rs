//! Resolve palette requests from either a color name or an explicit color value.

use tracing::{debug, warn};

use crate::{
    color::{
        Palette, Rgb, assemble,
        codec::{rgb_from_decimal_list, rgb_from_hex},
    },
    dto::payload::RequestPayload,
    error::ServiceError,
    state::SharedState,
};

/// Payload key holding the free-text color name.
pub const NAME_FIELD: &str = "name";
/// Payload key holding the explicit color value.
pub const COLOR_VALUE_FIELD: &str = "color_value";

/// Predict a color for the `name` field and expand it into a palette.
pub async fn resolve_by_name(
    state: &SharedState,
    payload: &RequestPayload,
) -> Result<Palette, ServiceError> {
    let name = payload.text(NAME_FIELD)?.to_lowercase();
    let predictor = state.require_predictor()?;

    let rgb = predictor
        .predict_rgb(name.clone())
        .await
        .inspect_err(|err| warn!(%name, error = %err, "name prediction failed"))?;
    debug!(%name, ?rgb, "resolved color name");

    Ok(assemble(rgb))
}

/// Decode the `color_value` field and expand it into a palette.
pub fn resolve_by_color(payload: &RequestPayload) -> Result<Palette, ServiceError> {
    let rgb = parse_color_value(payload.text(COLOR_VALUE_FIELD)?)?;
    Ok(assemble(rgb))
}

/// Values starting with `#` are hex, anything else is a decimal `r,g,b` list.
pub fn parse_color_value(value: &str) -> Result<Rgb, ServiceError> {
    let rgb = if value.starts_with('#') {
        rgb_from_hex(value)?
    } else {
        rgb_from_decimal_list(value)?
    };
    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures::future::BoxFuture;

    use super::*;
    use crate::{
        color::ColorFormatError,
        predictor::{NamePredictor, PredictionError, PredictionResult},
        state::AppState,
    };

    /// Answers with a fixed color and records the names it was asked about.
    struct FixedPredictor {
        rgb: Rgb,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl NamePredictor for FixedPredictor {
        fn predict_rgb(&self, name: String) -> BoxFuture<'static, PredictionResult<Rgb>> {
            self.seen.lock().unwrap().push(name);
            let rgb = self.rgb;
            Box::pin(async move { Ok(rgb) })
        }

        fn health_check(&self) -> BoxFuture<'static, PredictionResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    struct FailingPredictor;

    impl NamePredictor for FailingPredictor {
        fn predict_rgb(&self, _name: String) -> BoxFuture<'static, PredictionResult<Rgb>> {
            Box::pin(async {
                Err(PredictionError::MalformedOutput(
                    "expected 3 channels, got 1".into(),
                ))
            })
        }

        fn health_check(&self) -> BoxFuture<'static, PredictionResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    fn color_payload(value: &str) -> RequestPayload {
        RequestPayload::from_pairs([(COLOR_VALUE_FIELD, value)])
    }

    #[test]
    fn hex_value_resolves_red_palette() {
        let palette = resolve_by_color(&color_payload("#FF0000")).unwrap();
        assert_eq!(palette.original, Rgb::new(255, 0, 0));
        assert_eq!(palette.complementary, Rgb::new(0, 255, 255));
    }

    #[test]
    fn decimal_black_rotations_stay_black() {
        let black = Rgb::new(0, 0, 0);
        let palette = resolve_by_color(&color_payload("0,0,0")).unwrap();
        assert_eq!(palette.original, black);
        assert_eq!(palette.complementary, black);
        assert_eq!(palette.analogous, [black; 2]);
        assert_eq!(palette.triadic, [black; 2]);
        assert_eq!(palette.tetradic, [black; 3]);
        assert_eq!(palette.monochromatic[0], Rgb::new(204, 204, 204));
        assert_eq!(palette.monochromatic[4], Rgb::new(255, 255, 255));
    }

    #[test]
    fn missing_color_value_is_reported() {
        let err = resolve_by_color(&RequestPayload::default()).unwrap_err();
        assert!(matches!(err, ServiceError::MissingField("color_value")));
    }

    #[test]
    fn malformed_color_values_are_reported() {
        for value in ["#12345", "#zzzzzz", "10,20", "10,20,300", "ff0000", ""] {
            let err = resolve_by_color(&color_payload(value)).unwrap_err();
            assert!(
                matches!(err, ServiceError::InvalidColorFormat(_)),
                "{value:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn unprefixed_hex_is_treated_as_decimal() {
        assert!(matches!(
            parse_color_value("ff0000"),
            Err(ServiceError::InvalidColorFormat(
                ColorFormatError::ChannelCount { count: 1, .. }
            ))
        ));
    }

    #[tokio::test]
    async fn name_is_lowercased_before_prediction() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let predictor = FixedPredictor {
            rgb: Rgb::new(51, 102, 153),
            seen: seen.clone(),
        };
        let state = AppState::new(Some(Arc::new(predictor)));

        let payload = RequestPayload::from_pairs([(NAME_FIELD, "Ocean BLUE")]);
        let palette = resolve_by_name(&state, &payload).await.unwrap();

        assert_eq!(palette.original, Rgb::new(51, 102, 153));
        assert_eq!(palette.complementary, Rgb::new(153, 102, 51));
        assert_eq!(*seen.lock().unwrap(), vec!["ocean blue".to_string()]);
    }

    #[tokio::test]
    async fn missing_name_is_reported_before_prediction() {
        let state = AppState::new(Some(Arc::new(FailingPredictor)));
        let err = resolve_by_name(&state, &RequestPayload::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::MissingField("name")));
    }

    #[tokio::test]
    async fn prediction_failures_propagate() {
        let state = AppState::new(Some(Arc::new(FailingPredictor)));
        let payload = RequestPayload::from_pairs([(NAME_FIELD, "red")]);
        let err = resolve_by_name(&state, &payload).await.unwrap_err();
        assert!(matches!(err, ServiceError::PredictionFailure(_)));
    }

    #[tokio::test]
    async fn degraded_mode_rejects_names() {
        let state = AppState::new(None);
        let payload = RequestPayload::from_pairs([(NAME_FIELD, "red")]);
        let err = resolve_by_name(&state, &payload).await.unwrap_err();
        assert!(matches!(err, ServiceError::PredictorUnavailable));
    }
}
