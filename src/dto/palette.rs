//! Request bodies documented for the palette endpoints.
//!
//! Handlers read these fields through [`super::payload::RequestPayload`] so that JSON and
//! form bodies share one validation path; the structs below only describe the wire shape.

use utoipa::ToSchema;

/// Body of `POST /predict`.
#[derive(Debug, ToSchema)]
pub struct NameRequest {
    /// Free-text color name, matched case-insensitively.
    #[schema(example = "ocean breeze")]
    pub name: String,
}

/// Body of `POST /color_palette`.
#[derive(Debug, ToSchema)]
pub struct ColorValueRequest {
    /// `#rrggbb` hex value or `r,g,b` decimal channels.
    #[schema(example = "#ff0000")]
    pub color_value: String,
}
