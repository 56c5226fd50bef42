//! Request payload extraction shared by the palette endpoints.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};

use crate::error::{AppError, ServiceError};

/// String-keyed request fields, decoded from a JSON object or a URL-encoded form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestPayload {
    fields: Map<String, Value>,
}

impl RequestPayload {
    /// Wrap already-decoded fields.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a payload from string pairs; the first occurrence of a repeated key wins.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = Map::new();
        for (key, value) in pairs {
            fields
                .entry(key.into())
                .or_insert_with(|| Value::String(value.into()));
        }
        Self { fields }
    }

    /// Read a required string field.
    pub fn text(&self, key: &'static str) -> Result<&str, ServiceError> {
        match self.fields.get(key) {
            None => Err(ServiceError::MissingField(key)),
            Some(Value::String(text)) => Ok(text.as_str()),
            Some(_) => Err(ServiceError::InvalidField(key)),
        }
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

impl<S> FromRequest<S> for RequestPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::malformed_payload(rejection.body_text()))?;
            match value {
                Value::Object(fields) => Ok(Self::new(fields)),
                _ => Err(AppError::malformed_payload("JSON body must be an object")),
            }
        } else {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::malformed_payload(rejection.body_text()))?;
            Ok(Self::from_pairs(pairs))
        }
    }
}
