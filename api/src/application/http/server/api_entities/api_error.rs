use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nutriplan_core::domain::{
    common::entities::app_errors::CoreError, generation::errors::GenerationError,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InternalServerError(String),

    #[error("{message}")]
    Generation {
        kind: &'static str,
        status: StatusCode,
        message: String,
    },
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            ApiError::InternalServerError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            ApiError::Generation { kind, status, .. } => (*status, *kind),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let body = ApiErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

fn generation_status(error: &GenerationError) -> StatusCode {
    match error {
        GenerationError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        GenerationError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        GenerationError::Transport { .. }
        | GenerationError::MalformedOutput(_)
        | GenerationError::InvalidShape(_) => StatusCode::BAD_GATEWAY,
    }
}

fn generation_message(error: &GenerationError) -> &'static str {
    match error {
        GenerationError::Timeout(_) => "O serviço de IA demorou demasiado a responder.",
        GenerationError::Cancelled => "O pedido foi cancelado.",
        GenerationError::Transport { .. } => "Não foi possível contactar o serviço de IA.",
        GenerationError::MalformedOutput(_) | GenerationError::InvalidShape(_) => {
            "O serviço de IA devolveu uma resposta inválida."
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::GenerationFailed(e) => ApiError::Generation {
                kind: e.kind(),
                status: generation_status(&e),
                message: generation_message(&e).to_string(),
            },
            CoreError::InvalidInput(message) => ApiError::BadRequest(message),
            // Plan history is not exposed over HTTP.
            CoreError::NotFound | CoreError::AlreadySubmitted => {
                ApiError::InternalServerError("Unexpected history error".to_string())
            }
            CoreError::InvalidConfig(_) => {
                ApiError::InternalServerError("Service misconfigured".to_string())
            }
        }
    }
}

/// JSON extractor that runs `validator` rules before the handler sees the payload.
pub struct ValidateJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(ValidateJson(value))
    }
}
