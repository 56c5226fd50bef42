use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the palette service.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::palette::predict_color,
        crate::routes::palette::color_palette,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::palette::NameRequest,
            crate::dto::palette::ColorValueRequest,
            crate::color::Palette,
            crate::error::ErrorBody,
            crate::error::ErrorCode,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "palette", description = "Color palette generation"),
    )
)]
pub struct ApiDoc;
