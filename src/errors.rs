use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::ConfigError;
use crate::domain::errors::DomainError;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Order not found.")]
    NotFound,

    /// `message` is shown to the caller; `detail` only lands in the
    /// diagnostic `error` field.
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl AppError {
    /// Converts a domain error, using `message` as the caller-facing text if
    /// the store failed.
    pub fn from_domain(e: DomainError, message: &str) -> Self {
        match e {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::NotFound => AppError::NotFound,
            DomainError::Store(detail) => AppError::Internal {
                message: message.to_string(),
                detail,
            },
        }
    }

    /// Returns a closure for `map_err` that applies [`AppError::from_domain`].
    pub fn context(message: &'static str) -> impl Fn(DomainError) -> AppError {
        move |e| AppError::from_domain(e, message)
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal {
            message: "Internal server error".to_string(),
            detail: e.to_string(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::from_domain(e, "Internal server error")
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::BadRequest(msg) => ErrorBody {
                message: msg.clone(),
                error: None,
            },
            AppError::NotFound => ErrorBody {
                message: self.to_string(),
                error: None,
            },
            AppError::Internal { message, detail } => {
                log::error!("{}: {}", message, detail);
                ErrorBody {
                    message: message.clone(),
                    error: Some(detail.clone()),
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Anything that prevents the service from starting. All of these are fatal.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not connect to the order store: {0}")]
    Connect(#[from] r2d2::Error),

    #[error("could not apply database migrations: {0}")]
    Migrate(String),

    #[error("could not bind the HTTP listener: {0}")]
    Bind(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    #[test]
    fn bad_request_returns_400() {
        let resp = AppError::BadRequest("bad".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound.error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal {
            message: "Failed to list orders".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn internal_error_body_keeps_detail_in_error_field() {
        let err = AppError::Internal {
            message: "Failed to list orders".to_string(),
            detail: "connection refused".to_string(),
        };
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["message"], "Failed to list orders");
        assert_eq!(body["error"], "connection refused");
    }

    #[actix_web::test]
    async fn client_error_body_has_no_error_field() {
        let bytes = to_bytes(AppError::NotFound.error_response().into_body())
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["message"], "Order not found.");
        assert!(body.get("error").is_none());
    }

    #[test]
    fn domain_validation_maps_to_bad_request() {
        let app_err: AppError = DomainError::Validation("bad value".to_string()).into();
        assert!(matches!(app_err, AppError::BadRequest(_)));
    }

    #[test]
    fn domain_not_found_maps_to_app_not_found() {
        let app_err: AppError = DomainError::NotFound.into();
        assert!(matches!(app_err, AppError::NotFound));
    }

    #[test]
    fn domain_store_error_keeps_context_message() {
        let app_err = AppError::context("Failed to create the order")(DomainError::Store(
            "timeout".to_string(),
        ));
        match app_err {
            AppError::Internal { message, detail } => {
                assert_eq!(message, "Failed to create the order");
                assert_eq!(detail, "timeout");
            }
            other => panic!("expected internal error, got {other:?}"),
        }
    }
}
