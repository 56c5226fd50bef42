use axum::{Json, Router, extract::State, routing::post};

use crate::{
    color::Palette,
    dto::payload::RequestPayload,
    error::AppError,
    services::palette_service,
    state::SharedState,
};

/// Palette generation endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/predict", post(predict_color))
        .route("/color_palette", post(color_palette))
}

#[utoipa::path(
    post,
    path = "/predict",
    tag = "palette",
    request_body = crate::dto::palette::NameRequest,
    responses(
        (status = 200, description = "Palette built from the predicted color", body = Palette),
        (status = 400, description = "Missing or invalid `name`", body = crate::error::ErrorBody),
        (status = 502, description = "Name prediction failed", body = crate::error::ErrorBody),
        (status = 503, description = "Name prediction unavailable", body = crate::error::ErrorBody)
    )
)]
/// Predict a color from a free-text name and return its palette.
pub async fn predict_color(
    State(state): State<SharedState>,
    payload: RequestPayload,
) -> Result<Json<Palette>, AppError> {
    let palette = palette_service::resolve_by_name(&state, &payload).await?;
    Ok(Json(palette))
}

#[utoipa::path(
    post,
    path = "/color_palette",
    tag = "palette",
    request_body = crate::dto::palette::ColorValueRequest,
    responses(
        (status = 200, description = "Palette built from the given color", body = Palette),
        (status = 400, description = "Missing or malformed `color_value`", body = crate::error::ErrorBody)
    )
)]
/// Return the palette of an explicit `#rrggbb` or `r,g,b` color value.
pub async fn color_palette(payload: RequestPayload) -> Result<Json<Palette>, AppError> {
    let palette = palette_service::resolve_by_color(&payload)?;
    Ok(Json(palette))
}
