//! JSON extractor whose rejections use the gateway's error body

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiJsonRejection::from(rejection)),
        }
    }
}

#[derive(Debug)]
pub enum ApiJsonRejection {
    MissingContentType,
    InvalidJson(String),
    InvalidData(String),
    Other(String),
}

impl From<JsonRejection> for ApiJsonRejection {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiJsonRejection::MissingContentType,
            JsonRejection::JsonSyntaxError(err) => ApiJsonRejection::InvalidJson(err.body_text()),
            JsonRejection::JsonDataError(err) => ApiJsonRejection::InvalidData(err.body_text()),
            other => ApiJsonRejection::Other(other.body_text()),
        }
    }
}

impl IntoResponse for ApiJsonRejection {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiJsonRejection::MissingContentType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Expected request with `Content-Type: application/json`",
            ),
            ApiJsonRejection::InvalidJson(_) => (StatusCode::BAD_REQUEST, "Invalid JSON format"),
            ApiJsonRejection::InvalidData(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Request body does not match the contact form",
            ),
            ApiJsonRejection::Other(_) => (StatusCode::BAD_REQUEST, "Failed to parse JSON request"),
        };

        tracing::debug!("Rejected JSON body: {}", self);

        let body = Json(json!({
            "success": false,
            "message": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl std::fmt::Display for ApiJsonRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiJsonRejection::MissingContentType => write!(f, "Missing JSON content type"),
            ApiJsonRejection::InvalidJson(msg) => write!(f, "Invalid JSON: {}", msg),
            ApiJsonRejection::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            ApiJsonRejection::Other(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for ApiJsonRejection {}
