use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use cookbook_core::recipe::{CuisineParseError, RecipeError};
use cookbook_core::storage::{recipe_error_to_status_code, RepositoryError};

/// Application error codes carried in the `err_code` field of error bodies.
pub mod codes {
    pub const INVALID_ID: u32 = 40001;
    pub const INVALID_BODY: u32 = 40002;
    pub const UNKNOWN_CUISINE: u32 = 40003;
    pub const INVALID_NAME: u32 = 40004;
    pub const NOT_FOUND: u32 = 40401;
    pub const CONFLICT: u32 = 40901;
    pub const TIMEOUT: u32 = 50001;
    pub const INTERNAL: u32 = 50002;
}

/// Errors returned by the recipe handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to parse request body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    UnknownCuisine(#[from] CuisineParseError),
    #[error(transparent)]
    Recipe(#[from] RecipeError),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub err_code: u32,
    pub msg: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::UnknownCuisine(_) => StatusCode::BAD_REQUEST,
            ApiError::Recipe(err) => StatusCode::from_u16(recipe_error_to_status_code(err))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    pub fn err_code(&self) -> u32 {
        match self {
            ApiError::InvalidBody(_) => codes::INVALID_BODY,
            ApiError::UnknownCuisine(_) => codes::UNKNOWN_CUISINE,
            ApiError::Recipe(RecipeError::InvalidName) => codes::INVALID_NAME,
            ApiError::Recipe(RecipeError::InvalidId(_)) => codes::INVALID_ID,
            ApiError::Recipe(RecipeError::Repository(err)) => match err {
                RepositoryError::NotFound { .. } => codes::NOT_FOUND,
                RepositoryError::AlreadyExists { .. } => codes::CONFLICT,
                RepositoryError::Cancelled | RepositoryError::DeadlineExceeded => codes::TIMEOUT,
                _ => codes::INTERNAL,
            },
        }
    }

    /// Message sent to the client. Persistence details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Recipe(err) if err.is_timeout() => "Request timed out".to_string(),
            ApiError::Recipe(RecipeError::Repository(err)) if err.is_persistence_fault() => {
                "Internal server error".to_string()
            }
            err => err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let err_code = self.err_code();

        if status.is_server_error() {
            tracing::error!(error = %self, err_code, "Request failed");
        } else {
            tracing::warn!(error = %self, err_code, "Request rejected");
        }

        let body = ErrorBody {
            err_code,
            msg: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    fn repo(err: RepositoryError) -> ApiError {
        ApiError::Recipe(RecipeError::Repository(err))
    }

    #[test]
    fn test_status_and_codes() {
        let cases = [
            (ApiError::InvalidBody("eof".into()), 400, codes::INVALID_BODY),
            (
                ApiError::UnknownCuisine(CuisineParseError("martian".into())),
                400,
                codes::UNKNOWN_CUISINE,
            ),
            (ApiError::Recipe(RecipeError::InvalidName), 400, codes::INVALID_NAME),
            (
                ApiError::Recipe(RecipeError::InvalidId("x".into())),
                400,
                codes::INVALID_ID,
            ),
            (
                repo(RepositoryError::NotFound {
                    entity_type: "Recipe",
                    id: "x".into(),
                }),
                404,
                codes::NOT_FOUND,
            ),
            (
                repo(RepositoryError::AlreadyExists {
                    entity_type: "Recipe",
                    id: "x".into(),
                }),
                409,
                codes::CONFLICT,
            ),
            (repo(RepositoryError::DeadlineExceeded), 504, codes::TIMEOUT),
            (repo(RepositoryError::Cancelled), 504, codes::TIMEOUT),
            (repo(RepositoryError::QueryFailed("boom".into())), 500, codes::INTERNAL),
            (
                repo(RepositoryError::ConnectionFailed("refused".into())),
                503,
                codes::INTERNAL,
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status().as_u16(), status, "{err}");
            assert_eq!(err.err_code(), code, "{err}");
        }
    }

    #[tokio::test]
    async fn test_response_body_hides_persistence_details() {
        let response = repo(RepositoryError::QueryFailed("table cookbook missing".into()))
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["err_code"], 50002);
        assert_eq!(json["msg"], "Internal server error");
    }

    #[tokio::test]
    async fn test_response_body_for_client_error() {
        let response = ApiError::Recipe(RecipeError::InvalidName).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["err_code"], 40004);
        assert_eq!(json["msg"], "Recipe name cannot be empty");
    }
}
